//! Local speech engine: voice list, rate and volume.
//!
//! The engine is queried once to populate the voice list and slider
//! defaults, and receives the user's rate, volume and voice before each
//! Play.

mod engine;
#[cfg(feature = "native-voices")]
mod native;

pub use engine::{
    DEFAULT_RATE, DEFAULT_VOLUME, MAX_RATE, MIN_RATE, SettingsEngine, SpeechEngine, Voice,
    VoiceError, native_to_wpm, wpm_to_native,
};
#[cfg(test)]
pub use engine::MockSpeechEngine;
#[cfg(feature = "native-voices")]
pub use native::NativeEngine;

/// Open the platform engine when compiled in, falling back to a settings-only engine.
pub fn default_engine() -> Box<dyn SpeechEngine> {
    #[cfg(feature = "native-voices")]
    {
        match NativeEngine::new() {
            Ok(engine) => return Box::new(engine),
            Err(e) => tracing::warn!("platform speech engine unavailable: {e}"),
        }
    }

    Box::new(SettingsEngine::new())
}
