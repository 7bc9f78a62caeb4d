//! Audio output on the default device via rodio.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use super::player::{AudioOutput, PlaybackError};

/// Plays files through a rodio sink. Not `Send`: lives on the UI thread.
pub struct RodioOutput {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    loaded: Option<PathBuf>,
}

impl RodioOutput {
    /// Open the default output device.
    pub fn new() -> Result<Self, PlaybackError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| PlaybackError::Device(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            loaded: None,
        })
    }

    fn open(path: &Path) -> Result<Decoder<BufReader<File>>, PlaybackError> {
        let load_error = |reason: String| PlaybackError::Load {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|e| load_error(e.to_string()))?;
        Decoder::new(BufReader::new(file)).map_err(|e| load_error(e.to_string()))
    }
}

impl AudioOutput for RodioOutput {
    fn load(&mut self, path: &Path) -> Result<(), PlaybackError> {
        // Decode once up front so a bad file fails at load time.
        Self::open(path)?;
        self.loaded = Some(path.to_path_buf());
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let path = self.loaded.as_deref().ok_or(PlaybackError::NotLoaded)?;
        let source = Self::open(path)?;

        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let sink = Sink::try_new(&self.handle).map_err(|e| PlaybackError::Device(e.to_string()))?;
        sink.append(source);
        sink.play();
        self.sink = Some(sink);

        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn unpause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn is_busy(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|sink| !sink.empty() && !sink.is_paused())
    }
}
