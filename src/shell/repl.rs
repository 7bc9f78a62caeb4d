//! The interactive loop.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::backend::{SpeechSynthesizer, Translator};
use crate::playback::AudioOutput;
use crate::session::{
    Form, PlayOutcome, SaveDialog, SaveOutcome, Session, SessionError, WorkerEvent,
};
use crate::voice::SpeechEngine;

use super::command::{Command, HELP, VoiceSelector};
use super::dialogs::Dialogs;

const PROMPT: &str = "babel> ";

/// How often pending work is polled once input has ended.
const PENDING_POLL: Duration = Duration::from_millis(50);

/// Everything the UI thread reacts to, in arrival order.
#[derive(Debug)]
pub enum ShellEvent {
    Input(String),
    InputClosed,
    Worker(WorkerEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Read stdin lines on a background thread and forward them as events.
pub fn spawn_input_reader(tx: Sender<ShellEvent>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("input-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(ShellEvent::Input(line)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        debug!("stdin read failed: {e}");
                        break;
                    }
                }
            }
            let _ = tx.send(ShellEvent::InputClosed);
        })
}

/// UI shell: owns the form and the session, and is the only consumer of events.
pub struct Shell<D, T, S, E, O>
where
    D: Dialogs,
    T: Translator,
    S: SpeechSynthesizer + 'static,
    E: SpeechEngine,
    O: AudioOutput,
{
    session: Session<T, S, E, O>,
    form: Form,
    dialogs: D,
    events: Receiver<ShellEvent>,
    deferred: Vec<WorkerEvent>,
    input_open: bool,
}

impl<D, T, S, E, O> Shell<D, T, S, E, O>
where
    D: Dialogs,
    T: Translator,
    S: SpeechSynthesizer + 'static,
    E: SpeechEngine,
    O: AudioOutput,
{
    /// Create the shell and initialize the form from the session.
    pub fn new(
        session: Session<T, S, E, O>,
        dialogs: D,
        events: Receiver<ShellEvent>,
    ) -> Result<Self, SessionError> {
        let form = session.initial_form()?;

        Ok(Self {
            session,
            form,
            dialogs,
            events,
            deferred: Vec::new(),
            input_open: true,
        })
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn session(&self) -> &Session<T, S, E, O> {
        &self.session
    }

    /// Process events until `quit` or end of input.
    ///
    /// When input ends, a running worker is still waited for and its audio
    /// played to the end before returning.
    pub fn run(&mut self) {
        self.dialogs
            .print("Type 'help' for commands. Set text with 'text <...>', then 'play'.");

        while self.input_open {
            self.dialogs.prompt(PROMPT);

            let Ok(event) = self.events.recv() else {
                break;
            };

            match event {
                ShellEvent::Input(line) => {
                    if self.handle_line(&line) == Flow::Exit {
                        return;
                    }
                }
                ShellEvent::Worker(event) => self.on_worker_event(event),
                ShellEvent::InputClosed => self.input_open = false,
            }
        }

        self.finish_pending();
    }

    fn finish_pending(&mut self) {
        loop {
            // The worker posts its event before exiting, so once it is gone
            // everything it produced is already queued.
            let alive = self.session.worker_alive();
            match self.events.recv_timeout(PENDING_POLL) {
                Ok(ShellEvent::Worker(event)) => self.on_worker_event(event),
                Ok(ShellEvent::Input(_) | ShellEvent::InputClosed) => {}
                Err(RecvTimeoutError::Timeout) if alive => {}
                Err(_) => break,
            }
        }

        if self.session.is_playing() {
            debug!("input closed, waiting for playback to finish");
        }
        while self.session.is_playing() {
            thread::sleep(PENDING_POLL);
        }
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        match Command::parse(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Flow::Continue,
            Err(e) => {
                self.error(&e.to_string());
                Flow::Continue
            }
        }
    }

    fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::Text(text) => self.form.set_text(text),
            Command::Voice(selector) => self.select_voice(&selector),
            Command::Language(input) => self.select_language(&input),
            Command::Rate(rate) => {
                self.form.set_rate(rate);
            }
            Command::Volume(volume) => {
                self.form.set_volume(volume);
            }
            Command::Play => self.play(),
            Command::Pause => {
                self.session.pause();
            }
            Command::Stop => {
                self.session.stop();
            }
            Command::Replay => {
                if let Err(e) = self.session.replay() {
                    self.error(&e.to_string());
                }
            }
            Command::Save(path) => self.save(path),
            Command::Voices => self.list_voices(),
            Command::Languages => self.list_languages(),
            Command::Status => self.status(),
            Command::Help => self.dialogs.print(HELP),
            Command::Quit => return Flow::Exit,
        }
        Flow::Continue
    }

    fn error(&mut self, message: &str) {
        self.dialogs.show_error("Error", message);
    }

    fn select_voice(&mut self, selector: &VoiceSelector) {
        let voices = self.session.voices();
        let found = match selector {
            VoiceSelector::Index(n) => n.checked_sub(1).filter(|i| *i < voices.len()),
            VoiceSelector::Name(name) => voices
                .iter()
                .position(|v| v.name.eq_ignore_ascii_case(name) || v.id == *name),
        };

        match found {
            Some(index) => self.form.voice = Some(index),
            None => {
                let shown = match selector {
                    VoiceSelector::Index(n) => n.to_string(),
                    VoiceSelector::Name(name) => name.clone(),
                };
                self.error(&format!("Voice not found: {shown}"));
            }
        }
    }

    fn select_language(&mut self, input: &str) {
        match self.session.catalog().find(input) {
            Some(language) => self.form.language = language,
            None => self.error(&format!("Unknown language: {input}")),
        }
    }

    fn play(&mut self) {
        match self.session.play(&self.form) {
            Ok(PlayOutcome::Started) => self.dialogs.print("Synthesizing..."),
            Ok(PlayOutcome::Resumed) => {}
            Err(e) => self.error(&e.to_string()),
        }
    }

    fn save(&mut self, path: Option<PathBuf>) {
        let Self {
            session,
            form,
            dialogs,
            events,
            deferred,
            input_open,
        } = self;

        let result = session.save(form, |dialog| {
            path.or_else(|| ask_save_path(dialogs, events, deferred, input_open, dialog))
        });

        match result {
            Ok(SaveOutcome::Saved(_)) => self
                .dialogs
                .show_info("Success", "Audio file saved successfully"),
            Ok(SaveOutcome::Cancelled) => {}
            Err(e) => self.error(&e.to_string()),
        }

        for event in std::mem::take(&mut self.deferred) {
            self.on_worker_event(event);
        }
    }

    fn on_worker_event(&mut self, event: WorkerEvent) {
        match self.session.handle_worker_event(event) {
            Ok(path) => debug!(path = %path.display(), "worker finished"),
            Err(e) => self.error(&format!("An error occurred: {e}")),
        }
    }

    fn list_voices(&mut self) {
        if self.session.voices().is_empty() {
            self.dialogs.print("No voices available.");
            return;
        }

        let lines: Vec<String> = self
            .session
            .voices()
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let marker = if self.form.voice == Some(i) { '*' } else { ' ' };
                format!("{marker} {}. {}", i + 1, v.name)
            })
            .collect();
        self.dialogs.print(&lines.join("\n"));
    }

    fn list_languages(&mut self) {
        let lines: Vec<String> = self
            .session
            .catalog()
            .languages()
            .iter()
            .map(|l| {
                let marker = if self.form.language == *l { '*' } else { ' ' };
                format!("{marker} {} ({})", l.name, l.code)
            })
            .collect();
        self.dialogs.print(&lines.join("\n"));
    }

    fn status(&mut self) {
        let voice = self
            .form
            .voice
            .and_then(|i| self.session.voices().get(i))
            .map_or("none", |v| v.name.as_str());
        let last = self
            .session
            .current_artifact()
            .map_or_else(|| "none".to_string(), |a| a.path.display().to_string());

        let text = format!(
            "Text:     {}\nVoice:    {}\nLanguage: {} ({})\nRate:     {}\nVolume:   {:.1}\nPlayback: {}{}\nLast audio: {}",
            self.form.text(),
            voice,
            self.form.language.name,
            self.form.language.code,
            self.form.rate(),
            self.form.volume(),
            self.session.playback_state(),
            if self.session.worker_alive() {
                " (synthesizing)"
            } else {
                ""
            },
            last,
        );
        self.dialogs.print(&text);
    }
}

/// Prompt for a destination path, deferring worker events that arrive meanwhile.
fn ask_save_path<D: Dialogs>(
    dialogs: &mut D,
    events: &Receiver<ShellEvent>,
    deferred: &mut Vec<WorkerEvent>,
    input_open: &mut bool,
    dialog: &SaveDialog,
) -> Option<PathBuf> {
    dialogs.print(&format!(
        "{} ({}; default extension {}). Empty input cancels.",
        dialog.title,
        dialog.describe_filters(),
        dialog.default_extension
    ));
    dialogs.prompt("path> ");

    loop {
        match events.recv() {
            Ok(ShellEvent::Input(line)) => {
                let line = line.trim();
                return (!line.is_empty()).then(|| PathBuf::from(line));
            }
            Ok(ShellEvent::Worker(event)) => deferred.push(event),
            Ok(ShellEvent::InputClosed) | Err(_) => {
                *input_open = false;
                return None;
            }
        }
    }
}
