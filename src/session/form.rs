//! User selections, mirroring the form controls.

use crate::catalog::Language;
use crate::voice::{MAX_RATE, MIN_RATE};

/// Resolution of the volume slider.
pub const VOLUME_STEP: f32 = 0.1;

/// Current state of the input form.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    text: String,
    /// Index into the session's voice list.
    pub voice: Option<usize>,
    pub language: Language,
    rate: i32,
    volume: f32,
}

impl Form {
    /// Create a form with empty text; rate and volume are clamped to the slider ranges.
    pub fn new(language: Language, voice: Option<usize>, rate: i32, volume: f32) -> Self {
        let mut form = Self {
            text: String::new(),
            voice,
            language,
            rate: 0,
            volume: 0.0,
        };
        form.set_rate(rate);
        form.set_volume(volume);
        form
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn rate(&self) -> i32 {
        self.rate
    }

    /// Set the rate, clamped to the slider range. Returns the stored value.
    pub fn set_rate(&mut self, rate: i32) -> i32 {
        self.rate = rate.clamp(MIN_RATE, MAX_RATE);
        self.rate
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Set the volume, clamped to 0..=1 and snapped to the slider step.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        let steps_per_unit = (1.0 / VOLUME_STEP).round();
        self.volume = (volume.clamp(0.0, 1.0) * steps_per_unit).round() / steps_per_unit;
        self.volume
    }
}
