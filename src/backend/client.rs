//! HTTP clients for the translation and speech services.

use reqwest::blocking::Client;
use tracing::debug;

use super::chunk::{MAX_CHUNK_CHARS, split_text};
use super::types::{
    BackendError, ServiceConfig, SpeechQuery, SynthesisRequest, TranslateQuery, parse_translation,
};
use super::{SpeechSynthesizer, Translator};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Build the HTTP client shared by both services.
pub fn build_client(config: &ServiceConfig) -> Result<Client, BackendError> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| BackendError::ConnectionFailed(e.to_string()))
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// HTTP-based translation client.
pub struct HttpTranslator {
    base_url: String,
    client: Client,
}

impl HttpTranslator {
    /// Create a new translation client.
    pub fn new(base_url: &str, client: Client) -> Self {
        Self {
            base_url: trim_base(base_url),
            client,
        }
    }

    /// Get the base URL for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Translator for HttpTranslator {
    fn translate(&self, text: &str, dest: &str) -> Result<String, BackendError> {
        let url = format!("{}/translate_a/single", self.base_url);
        debug!(dest, chars = text.chars().count(), "requesting translation");

        let response = self
            .client
            .get(&url)
            .query(&TranslateQuery::new(text, dest))
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::RequestFailed(format!(
                "Status: {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        parse_translation(&body)
    }
}

/// HTTP-based speech synthesis client. Always returns MP3 bytes.
pub struct HttpSynthesizer {
    base_url: String,
    client: Client,
}

impl HttpSynthesizer {
    /// Create a new speech client.
    pub fn new(base_url: &str, client: Client) -> Self {
        Self {
            base_url: trim_base(base_url),
            client,
        }
    }

    /// Get the base URL for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn fetch_chunk(&self, query: &SpeechQuery<'_>) -> Result<Vec<u8>, BackendError> {
        let url = format!("{}/translate_tts", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::RequestFailed(format!(
                "Status: {}",
                response.status()
            )));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

impl SpeechSynthesizer for HttpSynthesizer {
    fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, BackendError> {
        let chunks = split_text(&request.text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(BackendError::EmptyText);
        }

        let total = chunks.len();
        let mut audio = Vec::new();

        for (idx, chunk) in chunks.iter().enumerate() {
            debug!(idx, total, lang = %request.language_code, "requesting speech chunk");
            let query = SpeechQuery::new(chunk, &request.language_code, idx, total);
            audio.extend(self.fetch_chunk(&query)?);
        }

        Ok(audio)
    }
}
