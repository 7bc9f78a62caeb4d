//! Session controller: the single owner of every adapter.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;

use thiserror::Error;
use tracing::{debug, info};

use crate::backend::{
    BackendError, SpeechSynthesizer, SynthesisRequest, Translator, synthesize_to_file,
};
use crate::catalog::LanguageCatalog;
use crate::playback::{AudioOutput, Playback, PlaybackError, PlaybackState};
use crate::voice::{SpeechEngine, Voice, VoiceError};

use super::form::Form;
use super::save::SaveDialog;
use super::worker::{ArtifactOrigin, AudioArtifact, EventSink, WorkerEvent, spawn_worker};

/// Errors surfaced to the user by session actions.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Text field cannot be empty")]
    EmptyText,

    #[error("Translation failed: {0}")]
    Translation(#[source] BackendError),

    #[error("{0}")]
    Synthesis(#[source] BackendError),

    #[error("Speech engine error: {0}")]
    Engine(#[from] VoiceError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Failed to start synthesis worker: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Session settings that do not change while running.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Directory for Play's temporary files; system temp dir when unset.
    pub temp_dir: Option<PathBuf>,
}

/// Result of a Play action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// A worker was started.
    Started,
    /// A worker was already running; playback was resumed instead.
    Resumed,
}

/// Result of a Save action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Cancelled,
}

/// Owns the engine, the service clients, playback and the current artifact.
///
/// All methods run on the UI thread. The worker only reports back through
/// the [`EventSink`]; the current artifact is replaced in
/// [`Session::handle_worker_event`].
pub struct Session<T, S, E, O>
where
    T: Translator,
    S: SpeechSynthesizer + 'static,
    E: SpeechEngine,
    O: AudioOutput,
{
    translator: T,
    synthesizer: Arc<S>,
    engine: E,
    playback: Playback<O>,
    catalog: LanguageCatalog,
    voices: Vec<Voice>,
    current: Option<AudioArtifact>,
    worker: Option<JoinHandle<()>>,
    events: EventSink,
    config: SessionConfig,
}

impl<T, S, E, O> Session<T, S, E, O>
where
    T: Translator,
    S: SpeechSynthesizer + 'static,
    E: SpeechEngine,
    O: AudioOutput,
{
    /// Create a session. Queries the engine's voice list once.
    pub fn new(
        translator: T,
        synthesizer: S,
        engine: E,
        output: O,
        events: EventSink,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let voices = engine.voices()?;
        debug!(voices = voices.len(), "speech engine ready");

        Ok(Self {
            translator,
            synthesizer: Arc::new(synthesizer),
            engine,
            playback: Playback::new(output),
            catalog: LanguageCatalog::new(),
            voices,
            current: None,
            worker: None,
            events,
            config,
        })
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn current_artifact(&self) -> Option<&AudioArtifact> {
        self.current.as_ref()
    }

    /// Whether started audio is still playing out.
    pub fn is_playing(&self) -> bool {
        self.playback.is_draining()
    }

    /// Whether the synthesis worker is still running.
    pub fn worker_alive(&self) -> bool {
        self.worker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Initial form: first voice, first language, engine rate and volume.
    pub fn initial_form(&self) -> Result<Form, SessionError> {
        let rate = self.engine.rate()?;
        let volume = self.engine.volume()?;
        let voice = (!self.voices.is_empty()).then_some(0);

        Ok(Form::new(self.catalog.first(), voice, rate, volume))
    }

    fn request(&self, form: &Form) -> Result<SynthesisRequest, SessionError> {
        let text = form.text().trim();
        if text.is_empty() {
            return Err(SessionError::EmptyText);
        }

        let mut request = SynthesisRequest::new(text, form.language.code)
            .with_rate(form.rate())
            .with_volume(form.volume());
        if let Some(voice) = form.voice.and_then(|i| self.voices.get(i)) {
            request = request.with_voice(&voice.id);
        }

        Ok(request)
    }

    fn apply_settings(&mut self, request: &SynthesisRequest) -> Result<(), SessionError> {
        self.engine.set_rate(request.rate)?;
        self.engine.set_volume(request.volume)?;
        if let Some(id) = &request.voice_id {
            self.engine.set_voice(id)?;
        }
        Ok(())
    }

    fn translate(&self, request: SynthesisRequest) -> Result<SynthesisRequest, SessionError> {
        info!(lang = %request.language_code, "translating");
        let text = self
            .translator
            .translate(&request.text, &request.language_code)
            .map_err(SessionError::Translation)?;

        Ok(SynthesisRequest { text, ..request })
    }

    /// Play: resume if a worker is running, otherwise translate and start one.
    pub fn play(&mut self, form: &Form) -> Result<PlayOutcome, SessionError> {
        if self.worker_alive() {
            debug!("worker still running, resuming playback");
            self.playback.resume();
            return Ok(PlayOutcome::Resumed);
        }

        let request = self.request(form)?;
        self.apply_settings(&request)?;
        let request = self.translate(request)?;

        let handle = spawn_worker(
            Arc::clone(&self.synthesizer),
            request,
            self.config.temp_dir.clone(),
            Arc::clone(&self.events),
        )
        .map_err(SessionError::Spawn)?;
        self.worker = Some(handle);

        Ok(PlayOutcome::Started)
    }

    /// Apply a worker outcome: store and play a new artifact, or report the failure.
    pub fn handle_worker_event(&mut self, event: WorkerEvent) -> Result<PathBuf, SessionError> {
        match event {
            WorkerEvent::Finished(artifact) => {
                let path = artifact.path.clone();
                self.current = Some(artifact);
                self.playback.load_and_play(&path)?;
                Ok(path)
            }
            WorkerEvent::Failed(e) => Err(SessionError::Synthesis(e)),
        }
    }

    /// Pause if playing. Returns whether anything changed.
    pub fn pause(&mut self) -> bool {
        self.playback.pause()
    }

    /// Stop if playing. Returns whether anything changed.
    pub fn stop(&mut self) -> bool {
        self.playback.stop()
    }

    /// Replay the current artifact from the start. No-op without one.
    pub fn replay(&mut self) -> Result<bool, SessionError> {
        let Some(artifact) = &self.current else {
            debug!("replay ignored, no audio yet");
            return Ok(false);
        };

        self.playback.replay(&artifact.path)?;
        Ok(true)
    }

    /// Save: translate, ask for a destination, synthesize straight to it.
    ///
    /// `choose` is called after translation; returning `None` cancels.
    pub fn save<F>(&mut self, form: &Form, choose: F) -> Result<SaveOutcome, SessionError>
    where
        F: FnOnce(&SaveDialog) -> Option<PathBuf>,
    {
        let request = self.request(form)?;
        let request = self.translate(request)?;

        let dialog = SaveDialog::audio();
        let Some(path) = choose(&dialog) else {
            debug!("save cancelled");
            return Ok(SaveOutcome::Cancelled);
        };
        let path = dialog.apply_default_extension(path);

        let bytes = synthesize_to_file(&*self.synthesizer, &request, &path)
            .map_err(SessionError::Synthesis)?;
        info!(path = %path.display(), bytes, "audio saved");

        self.current = Some(AudioArtifact::new(
            path.clone(),
            &request.language_code,
            ArtifactOrigin::Saved,
        ));

        Ok(SaveOutcome::Saved(path))
    }
}
