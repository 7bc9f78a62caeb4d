//! Platform speech engine backed by the `tts` crate.

use tts::Tts;

use super::engine::{SpeechEngine, Voice, VoiceError, native_to_wpm, wpm_to_native};

fn engine_error(e: tts::Error) -> VoiceError {
    VoiceError::Engine(e.to_string())
}

/// Speech engine using the operating system's synthesizer.
pub struct NativeEngine {
    tts: Tts,
}

impl NativeEngine {
    /// Open the default platform backend.
    pub fn new() -> Result<Self, VoiceError> {
        let tts = Tts::default().map_err(engine_error)?;
        Ok(Self { tts })
    }
}

impl SpeechEngine for NativeEngine {
    fn voices(&self) -> Result<Vec<Voice>, VoiceError> {
        let voices = self.tts.voices().map_err(engine_error)?;
        Ok(voices
            .into_iter()
            .map(|v| Voice::new(v.id(), v.name()))
            .collect())
    }

    fn rate(&self) -> Result<i32, VoiceError> {
        let rate = self.tts.get_rate().map_err(engine_error)?;
        Ok(native_to_wpm(
            rate,
            self.tts.min_rate(),
            self.tts.normal_rate(),
            self.tts.max_rate(),
        ))
    }

    fn set_rate(&mut self, rate: i32) -> Result<(), VoiceError> {
        let native = wpm_to_native(
            rate,
            self.tts.min_rate(),
            self.tts.normal_rate(),
            self.tts.max_rate(),
        );
        self.tts.set_rate(native).map_err(engine_error)?;
        Ok(())
    }

    fn volume(&self) -> Result<f32, VoiceError> {
        let volume = self.tts.get_volume().map_err(engine_error)?;
        let (min, max) = (self.tts.min_volume(), self.tts.max_volume());
        if max <= min {
            return Ok(1.0);
        }
        Ok(((volume - min) / (max - min)).clamp(0.0, 1.0))
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), VoiceError> {
        let (min, max) = (self.tts.min_volume(), self.tts.max_volume());
        let native = min + volume.clamp(0.0, 1.0) * (max - min);
        self.tts.set_volume(native).map_err(engine_error)?;
        Ok(())
    }

    fn set_voice(&mut self, id: &str) -> Result<(), VoiceError> {
        let voices = self.tts.voices().map_err(engine_error)?;
        let voice = voices
            .iter()
            .find(|v| v.id() == id)
            .ok_or_else(|| VoiceError::NotFound(id.to_string()))?;
        self.tts.set_voice(voice).map_err(engine_error)?;
        Ok(())
    }
}
