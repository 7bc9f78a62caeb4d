//! Speech engine adapter.

use thiserror::Error;

/// Rate the UI treats as the engine's normal speed, in words per minute.
pub const DEFAULT_RATE: i32 = 200;

/// Lowest and highest rate the rate slider offers.
pub const MIN_RATE: i32 = 50;
pub const MAX_RATE: i32 = 300;

pub const DEFAULT_VOLUME: f32 = 1.0;

/// Errors that can occur inside the speech engine.
#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Voice not found: {0}")]
    NotFound(String),

    #[error("Speech engine error: {0}")]
    Engine(String),
}

/// A voice offered by the speech engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub id: String,
    pub name: String,
}

impl Voice {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Local speech engine settings.
#[cfg_attr(test, mockall::automock)]
pub trait SpeechEngine {
    /// List the available voices, in engine order.
    fn voices(&self) -> Result<Vec<Voice>, VoiceError>;

    /// Current rate in words per minute.
    fn rate(&self) -> Result<i32, VoiceError>;

    fn set_rate(&mut self, rate: i32) -> Result<(), VoiceError>;

    /// Current volume, 0.0 to 1.0.
    fn volume(&self) -> Result<f32, VoiceError>;

    fn set_volume(&mut self, volume: f32) -> Result<(), VoiceError>;

    /// Select the active voice by id.
    fn set_voice(&mut self, id: &str) -> Result<(), VoiceError>;
}

impl<E: SpeechEngine + ?Sized> SpeechEngine for Box<E> {
    fn voices(&self) -> Result<Vec<Voice>, VoiceError> {
        (**self).voices()
    }

    fn rate(&self) -> Result<i32, VoiceError> {
        (**self).rate()
    }

    fn set_rate(&mut self, rate: i32) -> Result<(), VoiceError> {
        (**self).set_rate(rate)
    }

    fn volume(&self) -> Result<f32, VoiceError> {
        (**self).volume()
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), VoiceError> {
        (**self).set_volume(volume)
    }

    fn set_voice(&mut self, id: &str) -> Result<(), VoiceError> {
        (**self).set_voice(id)
    }
}

/// In-process engine that only holds settings.
///
/// Used when no platform speech engine is compiled in.
#[derive(Debug, Clone)]
pub struct SettingsEngine {
    voices: Vec<Voice>,
    rate: i32,
    volume: f32,
    voice: Option<String>,
}

impl SettingsEngine {
    /// Create an engine with a single default voice.
    pub fn new() -> Self {
        Self::with_voices(vec![Voice::new("default", "Default")])
    }

    /// Create an engine offering the given voices.
    pub fn with_voices(voices: Vec<Voice>) -> Self {
        let voice = voices.first().map(|v| v.id.clone());
        Self {
            voices,
            rate: DEFAULT_RATE,
            volume: DEFAULT_VOLUME,
            voice,
        }
    }

    /// Id of the active voice.
    pub fn current_voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }
}

impl Default for SettingsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechEngine for SettingsEngine {
    fn voices(&self) -> Result<Vec<Voice>, VoiceError> {
        Ok(self.voices.clone())
    }

    fn rate(&self) -> Result<i32, VoiceError> {
        Ok(self.rate)
    }

    fn set_rate(&mut self, rate: i32) -> Result<(), VoiceError> {
        self.rate = rate;
        Ok(())
    }

    fn volume(&self) -> Result<f32, VoiceError> {
        Ok(self.volume)
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), VoiceError> {
        self.volume = volume.clamp(0.0, 1.0);
        Ok(())
    }

    fn set_voice(&mut self, id: &str) -> Result<(), VoiceError> {
        if !self.voices.iter().any(|v| v.id == id) {
            return Err(VoiceError::NotFound(id.to_string()));
        }
        self.voice = Some(id.to_string());
        Ok(())
    }
}

/// Map words per minute onto a backend's normalized rate scale.
///
/// `DEFAULT_RATE` lands on `normal`, `MIN_RATE` on `min` and `MAX_RATE`
/// on `max`, linearly in between.
pub fn wpm_to_native(wpm: i32, min: f32, normal: f32, max: f32) -> f32 {
    let wpm = wpm.clamp(MIN_RATE, MAX_RATE);
    if wpm <= DEFAULT_RATE {
        let t = (DEFAULT_RATE - wpm) as f32 / (DEFAULT_RATE - MIN_RATE) as f32;
        normal - t * (normal - min)
    } else {
        let t = (wpm - DEFAULT_RATE) as f32 / (MAX_RATE - DEFAULT_RATE) as f32;
        normal + t * (max - normal)
    }
}

/// Inverse of [`wpm_to_native`].
pub fn native_to_wpm(rate: f32, min: f32, normal: f32, max: f32) -> i32 {
    let wpm = if rate <= normal {
        if normal <= min {
            return DEFAULT_RATE;
        }
        let t = (normal - rate) / (normal - min);
        DEFAULT_RATE as f32 - t * (DEFAULT_RATE - MIN_RATE) as f32
    } else {
        if max <= normal {
            return DEFAULT_RATE;
        }
        let t = (rate - normal) / (max - normal);
        DEFAULT_RATE as f32 + t * (MAX_RATE - DEFAULT_RATE) as f32
    };

    (wpm.round() as i32).clamp(MIN_RATE, MAX_RATE)
}
