//! Request/response types shared by the remote service clients.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Default base URL of the translation service.
pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com";

/// Default base URL of the speech synthesis service.
pub const DEFAULT_TTS_URL: &str = "https://translate.google.com";

/// Errors that can occur when talking to the remote services.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No text to speak")]
    EmptyText,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Endpoints and transport settings for the remote services.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub translate_url: String,
    pub tts_url: String,
    /// Applied to every request when set. No timeout otherwise.
    pub timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
            tts_url: DEFAULT_TTS_URL.to_string(),
            timeout: None,
        }
    }
}

/// Parameters for one Play or Save invocation.
///
/// The remote service only sees `text` and `language_code`; rate, volume
/// and voice are applied to the local speech engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub language_code: String,
    pub rate: i32,
    pub volume: f32,
    pub voice_id: Option<String>,
}

impl SynthesisRequest {
    /// Create a new synthesis request with engine defaults.
    pub fn new(text: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language_code: language_code.into(),
            rate: 200,
            volume: 1.0,
            voice_id: None,
        }
    }

    /// Set the speech rate in words per minute.
    pub fn with_rate(mut self, rate: i32) -> Self {
        self.rate = rate;
        self
    }

    /// Set the volume (0.0 to 1.0).
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    /// Set the engine voice id.
    pub fn with_voice(mut self, id: impl Into<String>) -> Self {
        self.voice_id = Some(id.into());
        self
    }
}

/// Query string for the translation endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct TranslateQuery<'a> {
    client: &'static str,
    sl: &'static str,
    tl: &'a str,
    dt: &'static str,
    q: &'a str,
}

impl<'a> TranslateQuery<'a> {
    pub(crate) fn new(text: &'a str, dest: &'a str) -> Self {
        Self {
            client: "gtx",
            sl: "auto",
            tl: dest,
            dt: "t",
            q: text,
        }
    }
}

/// Query string for one chunk of the speech endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct SpeechQuery<'a> {
    ie: &'static str,
    client: &'static str,
    tl: &'a str,
    q: &'a str,
    total: usize,
    idx: usize,
    textlen: usize,
}

impl<'a> SpeechQuery<'a> {
    pub(crate) fn new(chunk: &'a str, language_code: &'a str, idx: usize, total: usize) -> Self {
        Self {
            ie: "UTF-8",
            client: "tw-ob",
            tl: language_code,
            q: chunk,
            total,
            idx,
            textlen: chunk.chars().count(),
        }
    }
}

/// Extract the translated text from a translation response.
///
/// The body is a nested array; its first element lists segments whose
/// first item is the translated fragment.
pub fn parse_translation(body: &serde_json::Value) -> Result<String, BackendError> {
    let segments = body
        .as_array()
        .and_then(|a| a.first())
        .and_then(|s| s.as_array())
        .ok_or_else(|| BackendError::InvalidResponse("No translation segments".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.as_array()?.first()?.as_str())
        .collect();

    if translated.is_empty() {
        return Err(BackendError::InvalidResponse(
            "Empty translation".to_string(),
        ));
    }

    Ok(translated)
}
