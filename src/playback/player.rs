//! Playback transport state machine.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading or playing audio.
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("Failed to load {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("Audio device error: {0}")]
    Device(String),

    #[error("No audio loaded")]
    NotLoaded,
}

/// Low-level audio backend.
#[cfg_attr(test, mockall::automock)]
pub trait AudioOutput {
    /// Bind the backend to an audio file.
    fn load(&mut self, path: &Path) -> Result<(), PlaybackError>;

    /// Start the loaded file from the beginning.
    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    fn unpause(&mut self);

    /// Halt playback and reset the position.
    fn stop(&mut self);

    /// Whether audio is currently being played (false while paused).
    fn is_busy(&self) -> bool;

    /// Whether `is_busy` turns false on its own when the track ends.
    fn tracks_completion(&self) -> bool {
        true
    }
}

impl<O: AudioOutput + ?Sized> AudioOutput for Box<O> {
    fn load(&mut self, path: &Path) -> Result<(), PlaybackError> {
        (**self).load(path)
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn unpause(&mut self) {
        (**self).unpause()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn is_busy(&self) -> bool {
        (**self).is_busy()
    }

    fn tracks_completion(&self) -> bool {
        (**self).tracks_completion()
    }
}

/// Transport state as driven by user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
        };
        f.write_str(s)
    }
}

/// Playback adapter: tracks state and forwards transport commands.
pub struct Playback<O: AudioOutput> {
    output: O,
    state: PlaybackState,
    loaded: Option<PathBuf>,
}

impl<O: AudioOutput> Playback<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            state: PlaybackState::Idle,
            loaded: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Path of the file the backend is bound to.
    pub fn loaded(&self) -> Option<&Path> {
        self.loaded.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.output.is_busy()
    }

    /// Whether a started track is still audibly playing and will end by itself.
    pub fn is_draining(&self) -> bool {
        self.state == PlaybackState::Playing
            && self.output.tracks_completion()
            && self.output.is_busy()
    }

    /// Load `path` and play it from the start, discarding any position.
    pub fn load_and_play(&mut self, path: &Path) -> Result<(), PlaybackError> {
        self.output.load(path)?;
        self.loaded = Some(path.to_path_buf());
        self.output.play()?;
        self.state = PlaybackState::Playing;
        info!(path = %path.display(), "playing");
        Ok(())
    }

    /// Same as [`Playback::load_and_play`]; valid from any state.
    pub fn replay(&mut self, path: &Path) -> Result<(), PlaybackError> {
        self.load_and_play(path)
    }

    /// Pause if audio is playing. Returns whether anything changed.
    pub fn pause(&mut self) -> bool {
        if !self.output.is_busy() {
            debug!("pause ignored, nothing playing");
            return false;
        }
        self.output.pause();
        self.state = PlaybackState::Paused;
        true
    }

    /// Resume paused audio. Returns whether anything changed.
    pub fn resume(&mut self) -> bool {
        if self.state != PlaybackState::Paused {
            return false;
        }
        self.output.unpause();
        self.state = PlaybackState::Playing;
        true
    }

    /// Stop playing or paused audio and rewind to idle. Returns whether anything changed.
    pub fn stop(&mut self) -> bool {
        if !self.output.is_busy() && self.state != PlaybackState::Paused {
            debug!("stop ignored, nothing playing");
            return false;
        }
        self.output.stop();
        self.state = PlaybackState::Idle;
        true
    }
}

/// Backend that keeps transport state without an audio device.
#[derive(Debug, Default)]
pub struct SilentOutput {
    loaded: Option<PathBuf>,
    playing: bool,
    paused: bool,
}

impl SilentOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioOutput for SilentOutput {
    fn load(&mut self, path: &Path) -> Result<(), PlaybackError> {
        if !path.is_file() {
            return Err(PlaybackError::Load {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        }
        self.loaded = Some(path.to_path_buf());
        self.playing = false;
        self.paused = false;
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.loaded.is_none() {
            return Err(PlaybackError::NotLoaded);
        }
        self.playing = true;
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        if self.playing {
            self.paused = true;
        }
    }

    fn unpause(&mut self) {
        self.paused = false;
    }

    fn stop(&mut self) {
        self.playing = false;
        self.paused = false;
    }

    fn is_busy(&self) -> bool {
        self.playing && !self.paused
    }

    fn tracks_completion(&self) -> bool {
        false
    }
}
