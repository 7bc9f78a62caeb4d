//! Audio playback adapter.
//!
//! [`Playback`] implements the transport controls (play, pause, resume,
//! stop, replay) on top of an [`AudioOutput`] backend.

mod player;
#[cfg(feature = "audio")]
mod rodio_output;

#[cfg(test)]
pub use player::MockAudioOutput;
pub use player::{AudioOutput, Playback, PlaybackError, PlaybackState, SilentOutput};
#[cfg(feature = "audio")]
pub use rodio_output::RodioOutput;

/// Open the default audio device, or a silent backend when none is available.
pub fn default_output() -> Box<dyn AudioOutput> {
    #[cfg(feature = "audio")]
    {
        match RodioOutput::new() {
            Ok(output) => return Box::new(output),
            Err(e) => tracing::warn!("audio device unavailable, playback is silent: {e}"),
        }
    }

    #[cfg(not(feature = "audio"))]
    tracing::warn!("built with --no-default-features, playback is silent");

    Box::new(SilentOutput::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn loaded_mock(busy: bool) -> MockAudioOutput {
        let mut output = MockAudioOutput::new();
        output.expect_load().times(1).returning(|_| Ok(()));
        output.expect_play().times(1).returning(|| Ok(()));
        output.expect_is_busy().returning(move || busy);
        output
    }

    // ===========================================
    // State machine
    // ===========================================

    #[test]
    fn test_playback_starts_idle() {
        let playback = Playback::new(MockAudioOutput::new());

        assert_eq!(playback.state(), PlaybackState::Idle);
        assert!(playback.loaded().is_none());
    }

    #[test]
    fn test_load_and_play_enters_playing() {
        let mut output = MockAudioOutput::new();
        output
            .expect_load()
            .withf(|path| path == Path::new("/tmp/a.mp3"))
            .times(1)
            .returning(|_| Ok(()));
        output.expect_play().times(1).returning(|| Ok(()));

        let mut playback = Playback::new(output);
        playback.load_and_play(Path::new("/tmp/a.mp3")).unwrap();

        assert_eq!(playback.state(), PlaybackState::Playing);
        assert_eq!(playback.loaded(), Some(Path::new("/tmp/a.mp3")));
    }

    #[test]
    fn test_load_failure_keeps_state() {
        let mut output = MockAudioOutput::new();
        output.expect_load().times(1).returning(|path| {
            Err(PlaybackError::Load {
                path: path.to_path_buf(),
                reason: "corrupt".to_string(),
            })
        });
        output.expect_play().never();

        let mut playback = Playback::new(output);
        let result = playback.load_and_play(Path::new("/tmp/bad.mp3"));

        assert!(matches!(result, Err(PlaybackError::Load { .. })));
        assert_eq!(playback.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_pause_then_resume() {
        let mut output = loaded_mock(true);
        output.expect_pause().times(1).return_const(());
        output.expect_unpause().times(1).return_const(());

        let mut playback = Playback::new(output);
        playback.load_and_play(Path::new("/tmp/a.mp3")).unwrap();

        assert!(playback.pause());
        assert_eq!(playback.state(), PlaybackState::Paused);

        assert!(playback.resume());
        assert_eq!(playback.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_pause_is_noop_when_nothing_playing() {
        let mut output = MockAudioOutput::new();
        output.expect_is_busy().returning(|| false);
        output.expect_pause().never();

        let mut playback = Playback::new(output);

        assert!(!playback.pause());
        assert_eq!(playback.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_stop_is_noop_when_nothing_playing() {
        let mut output = MockAudioOutput::new();
        output.expect_is_busy().returning(|| false);
        output.expect_stop().never();

        let mut playback = Playback::new(output);

        assert!(!playback.stop());
        assert_eq!(playback.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_resume_is_noop_unless_paused() {
        let mut output = MockAudioOutput::new();
        output.expect_unpause().never();

        let mut playback = Playback::new(output);

        assert!(!playback.resume());
    }

    #[test]
    fn test_stop_from_playing() {
        let mut output = loaded_mock(true);
        output.expect_stop().times(1).return_const(());

        let mut playback = Playback::new(output);
        playback.load_and_play(Path::new("/tmp/a.mp3")).unwrap();

        assert!(playback.stop());
        assert_eq!(playback.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_stop_from_paused_returns_to_idle() {
        let mut output = loaded_mock(true);
        output.expect_pause().times(1).return_const(());
        output.expect_stop().times(1).return_const(());
        output.expect_unpause().never();

        let mut playback = Playback::new(output);
        playback.load_and_play(Path::new("/tmp/a.mp3")).unwrap();
        playback.pause();

        assert!(playback.stop());
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert!(!playback.resume());
    }

    #[test]
    fn test_draining_only_while_playing_audible_track() {
        let mut output = loaded_mock(true);
        output.expect_tracks_completion().returning(|| true);
        output.expect_pause().times(1).return_const(());

        let mut playback = Playback::new(output);
        assert!(!playback.is_draining());

        playback.load_and_play(Path::new("/tmp/a.mp3")).unwrap();
        assert!(playback.is_draining());

        playback.pause();
        assert!(!playback.is_draining());
    }

    #[test]
    fn test_replay_restarts_from_any_state() {
        let mut output = MockAudioOutput::new();
        output.expect_load().times(2).returning(|_| Ok(()));
        output.expect_play().times(2).returning(|| Ok(()));
        output.expect_is_busy().returning(|| true);
        output.expect_pause().times(1).return_const(());

        let mut playback = Playback::new(output);
        playback.load_and_play(Path::new("/tmp/a.mp3")).unwrap();
        playback.pause();

        playback.replay(Path::new("/tmp/a.mp3")).unwrap();

        assert_eq!(playback.state(), PlaybackState::Playing);
    }

    // ===========================================
    // Silent backend
    // ===========================================

    #[test]
    fn test_silent_output_transport() {
        let temp_dir = TempDir::new().unwrap();
        let path: PathBuf = temp_dir.path().join("a.mp3");
        std::fs::write(&path, b"ID3").unwrap();

        let mut playback = Playback::new(SilentOutput::new());
        playback.load_and_play(&path).unwrap();
        assert!(playback.is_busy());
        assert!(!playback.is_draining());

        assert!(playback.pause());
        assert!(!playback.is_busy());

        assert!(playback.stop());
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert!(!playback.is_busy());

        assert!(!playback.pause());
    }

    #[test]
    fn test_silent_output_rejects_missing_file() {
        let mut output = SilentOutput::new();

        assert!(matches!(
            output.load(Path::new("/nonexistent/a.mp3")),
            Err(PlaybackError::Load { .. })
        ));
        assert!(matches!(output.play(), Err(PlaybackError::NotLoaded)));
    }
}
