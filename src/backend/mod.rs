//! Communication with the remote translation and speech services.
//!
//! Provides traits and HTTP implementations for the two remote calls the
//! application makes: translating text into a target language, and
//! turning translated text into MP3 audio.

mod chunk;
mod client;
mod types;

use std::fs;
use std::io::Write;
use std::path::Path;

pub use chunk::{MAX_CHUNK_CHARS, split_text};
pub use client::{HttpSynthesizer, HttpTranslator, build_client};
pub use types::{
    BackendError, DEFAULT_TRANSLATE_URL, DEFAULT_TTS_URL, ServiceConfig, SynthesisRequest,
    parse_translation,
};

/// Trait for the translation service.
///
/// This trait abstracts the HTTP communication with the service,
/// allowing for mock implementations in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Translator: Send + Sync {
    /// Translate `text` into the language identified by `dest`.
    fn translate(&self, text: &str, dest: &str) -> Result<String, BackendError>;
}

/// Trait for the remote speech synthesis service.
#[cfg_attr(test, mockall::automock)]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize speech for `request.text` in `request.language_code`.
    ///
    /// # Returns
    /// Raw MP3 audio data
    fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, BackendError>;
}

/// Synthesize speech and write the bytes to `path`.
///
/// Returns the number of bytes written.
pub fn synthesize_to_file<S: SpeechSynthesizer + ?Sized>(
    synthesizer: &S,
    request: &SynthesisRequest,
    path: &Path,
) -> Result<usize, BackendError> {
    let audio = synthesizer.synthesize(request)?;

    let mut file = fs::File::create(path)?;
    file.write_all(&audio)?;

    Ok(audio.len())
}

/// Create both HTTP clients from one configuration.
pub fn create_services(
    config: &ServiceConfig,
) -> Result<(HttpTranslator, HttpSynthesizer), BackendError> {
    let client = build_client(config)?;
    Ok((
        HttpTranslator::new(&config.translate_url, client.clone()),
        HttpSynthesizer::new(&config.tts_url, client),
    ))
}
