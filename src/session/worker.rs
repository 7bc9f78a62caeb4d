//! Background synthesis worker and the artifacts it produces.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::backend::{BackendError, SpeechSynthesizer, SynthesisRequest};

/// Where an artifact came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactOrigin {
    /// Written by Play into the temp directory; never deleted by the program.
    Temporary,
    /// Written by Save to a path the user chose.
    Saved,
}

/// An audio file produced by a synthesis call.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioArtifact {
    pub path: PathBuf,
    pub language_code: String,
    pub origin: ArtifactOrigin,
    pub created_at: DateTime<Utc>,
}

impl AudioArtifact {
    pub fn new(path: PathBuf, language_code: impl Into<String>, origin: ArtifactOrigin) -> Self {
        Self {
            path,
            language_code: language_code.into(),
            origin,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of a worker run, delivered to the UI thread.
#[derive(Debug)]
pub enum WorkerEvent {
    Finished(AudioArtifact),
    Failed(BackendError),
}

/// Receives worker events; must hand them to the UI thread.
pub type EventSink = Arc<dyn Fn(WorkerEvent) + Send + Sync>;

/// Synthesize `request` into a kept temporary `.mp3` file.
pub fn synthesize_to_temp<S: SpeechSynthesizer + ?Sized>(
    synthesizer: &S,
    request: &SynthesisRequest,
    temp_dir: Option<&Path>,
) -> Result<AudioArtifact, BackendError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("babel-tts-").suffix(".mp3");
    let mut file = match temp_dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };

    let audio = synthesizer.synthesize(request)?;
    file.write_all(&audio)?;
    file.flush()?;

    let path = file
        .into_temp_path()
        .keep()
        .map_err(|e| BackendError::Io(e.error))?;
    debug!(path = %path.display(), bytes = audio.len(), "temporary artifact written");

    Ok(AudioArtifact::new(
        path,
        &request.language_code,
        ArtifactOrigin::Temporary,
    ))
}

/// Start the worker thread for one Play action.
pub(crate) fn spawn_worker<S: SpeechSynthesizer + ?Sized + 'static>(
    synthesizer: Arc<S>,
    request: SynthesisRequest,
    temp_dir: Option<PathBuf>,
    sink: EventSink,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("synthesis-worker".to_string())
        .spawn(move || {
            info!(lang = %request.language_code, "synthesizing");
            let event = match synthesize_to_temp(&*synthesizer, &request, temp_dir.as_deref()) {
                Ok(artifact) => WorkerEvent::Finished(artifact),
                Err(e) => {
                    error!("synthesis failed: {e}");
                    WorkerEvent::Failed(e)
                }
            };
            sink(event);
        })
}
