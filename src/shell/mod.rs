//! Interactive shell: the form controls and buttons as line commands.
//!
//! The UI thread runs [`Shell::run`], consuming a single event queue fed
//! by the stdin reader thread and by the synthesis worker.

mod command;
mod dialogs;
mod repl;

pub use command::{Command, CommandError, HELP, VoiceSelector};
#[cfg(test)]
pub use dialogs::MockDialogs;
pub use dialogs::{Dialogs, TerminalDialogs};
pub use repl::{Shell, ShellEvent, spawn_input_reader};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, MockSpeechSynthesizer, MockTranslator};
    use crate::playback::{MockAudioOutput, PlaybackState};
    use crate::session::{EventSink, Session, SessionConfig, WorkerEvent};
    use crate::voice::{SettingsEngine, Voice};
    use mockall::Sequence;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::sync::mpsc::{self, Sender};
    use tempfile::TempDir;

    type TestShell = Shell<
        MockDialogs,
        MockTranslator,
        MockSpeechSynthesizer,
        SettingsEngine,
        MockAudioOutput,
    >;

    fn quiet(dialogs: &mut MockDialogs) {
        dialogs.expect_print().returning(|_| ());
        dialogs.expect_prompt().returning(|_| ());
    }

    fn shell(
        translator: MockTranslator,
        synthesizer: MockSpeechSynthesizer,
        output: MockAudioOutput,
        dialogs: MockDialogs,
        temp_dir: &TempDir,
    ) -> (TestShell, Sender<ShellEvent>) {
        let (tx, rx) = mpsc::channel();
        let worker_tx = tx.clone();
        let sink: EventSink = Arc::new(move |event| {
            let _ = worker_tx.send(ShellEvent::Worker(event));
        });
        let engine = SettingsEngine::with_voices(vec![
            Voice::new("v1", "Alice"),
            Voice::new("v2", "Bob"),
        ]);
        let session = Session::new(
            translator,
            synthesizer,
            engine,
            output,
            sink,
            SessionConfig {
                temp_dir: Some(temp_dir.path().to_path_buf()),
            },
        )
        .unwrap();

        (Shell::new(session, dialogs, rx).unwrap(), tx)
    }

    fn run_lines(shell: &mut TestShell, tx: &Sender<ShellEvent>, lines: &[&str]) {
        for line in lines {
            tx.send(ShellEvent::Input(line.to_string())).unwrap();
        }
        tx.send(ShellEvent::InputClosed).unwrap();
        shell.run();
    }

    // ===========================================
    // Command parsing
    // ===========================================

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn test_parse_text_keeps_inner_spacing() {
        assert_eq!(
            Command::parse("text Hello,  world"),
            Ok(Some(Command::Text("Hello,  world".to_string())))
        );
        assert_eq!(
            Command::parse("text"),
            Ok(Some(Command::Text(String::new())))
        );
    }

    #[test]
    fn test_parse_buttons_case_insensitive() {
        assert_eq!(Command::parse("PLAY"), Ok(Some(Command::Play)));
        assert_eq!(Command::parse("Pause"), Ok(Some(Command::Pause)));
        assert_eq!(Command::parse("stop"), Ok(Some(Command::Stop)));
        assert_eq!(Command::parse("replay"), Ok(Some(Command::Replay)));
        assert_eq!(Command::parse("exit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_parse_save_with_and_without_path() {
        assert_eq!(Command::parse("save"), Ok(Some(Command::Save(None))));
        assert_eq!(
            Command::parse("save /tmp/my file.mp3"),
            Ok(Some(Command::Save(Some(PathBuf::from("/tmp/my file.mp3")))))
        );
    }

    #[test]
    fn test_parse_voice_selector() {
        assert_eq!(
            Command::parse("voice 2"),
            Ok(Some(Command::Voice(VoiceSelector::Index(2))))
        );
        assert_eq!(
            Command::parse("voice Bob"),
            Ok(Some(Command::Voice(VoiceSelector::Name("Bob".to_string()))))
        );
    }

    #[test]
    fn test_parse_rate_range() {
        assert_eq!(Command::parse("rate 50"), Ok(Some(Command::Rate(50))));
        assert_eq!(Command::parse("rate 300"), Ok(Some(Command::Rate(300))));
        assert!(matches!(
            Command::parse("rate 301"),
            Err(CommandError::OutOfRange { command: "rate", .. })
        ));
        assert!(matches!(
            Command::parse("rate fast"),
            Err(CommandError::InvalidValue { command: "rate", .. })
        ));
    }

    #[test]
    fn test_parse_volume_range() {
        assert_eq!(Command::parse("volume 0.3"), Ok(Some(Command::Volume(0.3))));
        assert!(matches!(
            Command::parse("volume 1.5"),
            Err(CommandError::OutOfRange { command: "volume", .. })
        ));
    }

    #[test]
    fn test_parse_missing_argument() {
        assert_eq!(
            Command::parse("language"),
            Err(CommandError::MissingArgument("language"))
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        let error = Command::parse("dance now").unwrap_err();

        assert_eq!(error, CommandError::Unknown("dance".to_string()));
        assert!(error.to_string().contains("help"));
    }

    // ===========================================
    // Shell behaviour
    // ===========================================

    #[test]
    fn test_shell_selections_update_form() {
        let temp_dir = TempDir::new().unwrap();
        let mut dialogs = MockDialogs::new();
        quiet(&mut dialogs);

        let (mut shell, tx) = shell(
            MockTranslator::new(),
            MockSpeechSynthesizer::new(),
            MockAudioOutput::new(),
            dialogs,
            &temp_dir,
        );

        run_lines(
            &mut shell,
            &tx,
            &[
                "text Hello there",
                "voice bob",
                "language fr",
                "rate 120",
                "volume 0.4",
            ],
        );

        let form = shell.form();
        assert_eq!(form.text(), "Hello there");
        assert_eq!(form.voice, Some(1));
        assert_eq!(form.language.code, "fr");
        assert_eq!(form.rate(), 120);
        assert_eq!(form.volume(), 0.4);
    }

    #[test]
    fn test_shell_play_with_empty_text_shows_one_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut translator = MockTranslator::new();
        let mut dialogs = MockDialogs::new();
        quiet(&mut dialogs);
        translator.expect_translate().never();
        dialogs
            .expect_show_error()
            .withf(|title, message| title == "Error" && message == "Text field cannot be empty")
            .times(1)
            .returning(|_, _| ());

        let (mut shell, tx) = shell(
            translator,
            MockSpeechSynthesizer::new(),
            MockAudioOutput::new(),
            dialogs,
            &temp_dir,
        );

        run_lines(&mut shell, &tx, &["play"]);
    }

    #[test]
    fn test_shell_rejects_bad_input_without_changes() {
        let temp_dir = TempDir::new().unwrap();
        let mut dialogs = MockDialogs::new();
        quiet(&mut dialogs);
        dialogs
            .expect_show_error()
            .times(4)
            .returning(|_, _| ());

        let (mut shell, tx) = shell(
            MockTranslator::new(),
            MockSpeechSynthesizer::new(),
            MockAudioOutput::new(),
            dialogs,
            &temp_dir,
        );

        run_lines(
            &mut shell,
            &tx,
            &["rate 999", "voice 3", "language Klingon", "sing"],
        );

        let form = shell.form();
        assert_eq!(form.rate(), 200);
        assert_eq!(form.voice, Some(0));
        assert_eq!(form.language.name, "English");
    }

    #[test]
    fn test_shell_play_runs_worker_and_plays() {
        let temp_dir = TempDir::new().unwrap();
        let mut translator = MockTranslator::new();
        let mut synthesizer = MockSpeechSynthesizer::new();
        let mut output = MockAudioOutput::new();
        let mut dialogs = MockDialogs::new();
        quiet(&mut dialogs);
        dialogs.expect_show_error().never();

        translator
            .expect_translate()
            .withf(|text, dest| text == "Hello" && dest == "es")
            .times(1)
            .returning(|_, _| Ok("Hola".to_string()));
        synthesizer
            .expect_synthesize()
            .times(1)
            .returning(|_| Ok(b"ID3".to_vec()));
        output.expect_load().times(1).returning(|_| Ok(()));
        output.expect_play().times(1).returning(|| Ok(()));

        let (mut shell, tx) = shell(translator, synthesizer, output, dialogs, &temp_dir);

        tx.send(ShellEvent::Input("text Hello".to_string())).unwrap();
        tx.send(ShellEvent::Input("language Spanish".to_string()))
            .unwrap();
        tx.send(ShellEvent::Input("play".to_string())).unwrap();
        let quit_tx = tx.clone();
        drop(tx);

        // The worker's event lands on the queue after the lines above.
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(500));
            let _ = quit_tx.send(ShellEvent::Input("quit".to_string()));
        });
        shell.run();

        let artifact = shell.session().current_artifact().unwrap();
        assert_eq!(artifact.language_code, "es");
        assert!(artifact.path.is_file());
    }

    #[test]
    fn test_shell_end_of_input_waits_for_worker_and_plays() {
        let temp_dir = TempDir::new().unwrap();
        let mut translator = MockTranslator::new();
        let mut synthesizer = MockSpeechSynthesizer::new();
        let mut output = MockAudioOutput::new();
        let mut dialogs = MockDialogs::new();
        quiet(&mut dialogs);
        dialogs.expect_show_error().never();

        translator
            .expect_translate()
            .times(1)
            .returning(|_, _| Ok("Hello".to_string()));
        synthesizer.expect_synthesize().times(1).returning(|_| {
            std::thread::sleep(std::time::Duration::from_millis(200));
            Ok(b"ID3".to_vec())
        });
        output.expect_load().times(1).returning(|_| Ok(()));
        output.expect_play().times(1).returning(|| Ok(()));
        output.expect_tracks_completion().returning(|| true);
        output.expect_is_busy().returning(|| false);

        let (mut shell, tx) = shell(translator, synthesizer, output, dialogs, &temp_dir);

        run_lines(&mut shell, &tx, &["text Hello", "play"]);

        let session = shell.session();
        assert!(!session.worker_alive());
        assert!(session.current_artifact().unwrap().path.is_file());
        assert_eq!(session.playback_state(), PlaybackState::Playing);
    }

    #[test]
    fn test_shell_save_to_given_path_reports_success() {
        let temp_dir = TempDir::new().unwrap();
        let mut translator = MockTranslator::new();
        let mut synthesizer = MockSpeechSynthesizer::new();
        let mut dialogs = MockDialogs::new();
        quiet(&mut dialogs);

        translator
            .expect_translate()
            .returning(|_, _| Ok("Hallo".to_string()));
        synthesizer
            .expect_synthesize()
            .times(1)
            .returning(|_| Ok(b"ID3".to_vec()));
        dialogs
            .expect_show_info()
            .withf(|title, message| title == "Success" && message == "Audio file saved successfully")
            .times(1)
            .returning(|_, _| ());

        let (mut shell, tx) = shell(
            translator,
            synthesizer,
            MockAudioOutput::new(),
            dialogs,
            &temp_dir,
        );
        let dest = temp_dir.path().join("hallo");

        run_lines(
            &mut shell,
            &tx,
            &[
                "text Hello",
                "language de",
                &format!("save {}", dest.display()),
            ],
        );

        assert!(temp_dir.path().join("hallo.mp3").is_file());
    }

    #[test]
    fn test_shell_save_prompt_defers_worker_events() {
        let temp_dir = TempDir::new().unwrap();
        let mut translator = MockTranslator::new();
        let mut synthesizer = MockSpeechSynthesizer::new();
        let mut dialogs = MockDialogs::new();
        let mut seq = Sequence::new();
        quiet(&mut dialogs);

        translator
            .expect_translate()
            .returning(|_, _| Ok("Hello".to_string()));
        synthesizer
            .expect_synthesize()
            .times(1)
            .returning(|_| Ok(b"ID3".to_vec()));
        dialogs
            .expect_show_info()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ());
        dialogs
            .expect_show_error()
            .withf(|_, message| message == "An error occurred: Connection failed: offline")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ());

        let (mut shell, tx) = shell(
            translator,
            synthesizer,
            MockAudioOutput::new(),
            dialogs,
            &temp_dir,
        );
        let dest = temp_dir.path().join("prompted.mp3");

        tx.send(ShellEvent::Input("text Hello".to_string())).unwrap();
        tx.send(ShellEvent::Input("save".to_string())).unwrap();
        tx.send(ShellEvent::Worker(WorkerEvent::Failed(
            BackendError::ConnectionFailed("offline".to_string()),
        )))
        .unwrap();
        tx.send(ShellEvent::Input(dest.display().to_string()))
            .unwrap();
        tx.send(ShellEvent::InputClosed).unwrap();
        shell.run();

        assert!(dest.is_file());
    }

    #[test]
    fn test_shell_save_prompt_empty_input_cancels() {
        let temp_dir = TempDir::new().unwrap();
        let mut translator = MockTranslator::new();
        let mut synthesizer = MockSpeechSynthesizer::new();
        let mut dialogs = MockDialogs::new();
        quiet(&mut dialogs);

        translator
            .expect_translate()
            .times(1)
            .returning(|_, _| Ok("Hello".to_string()));
        synthesizer.expect_synthesize().never();
        dialogs.expect_show_info().never();

        let (mut shell, tx) = shell(
            translator,
            synthesizer,
            MockAudioOutput::new(),
            dialogs,
            &temp_dir,
        );

        run_lines(&mut shell, &tx, &["text Hello", "save", ""]);

        assert!(shell.session().current_artifact().is_none());
    }

    #[test]
    fn test_shell_quit_stops_before_remaining_input() {
        let temp_dir = TempDir::new().unwrap();
        let mut dialogs = MockDialogs::new();
        quiet(&mut dialogs);

        let (mut shell, tx) = shell(
            MockTranslator::new(),
            MockSpeechSynthesizer::new(),
            MockAudioOutput::new(),
            dialogs,
            &temp_dir,
        );

        run_lines(&mut shell, &tx, &["quit", "text ignored"]);

        assert_eq!(shell.form().text(), "");
    }
}
