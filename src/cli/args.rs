//! CLI argument definitions.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::backend::{DEFAULT_TRANSLATE_URL, DEFAULT_TTS_URL, ServiceConfig};
use crate::session::SessionConfig;

/// Interactive text-to-speech with translation.
#[derive(Parser, Debug)]
#[command(name = "babel-tts")]
#[command(about = "Type text, translate it into one of ten languages, and hear or save it")]
#[command(version)]
#[command(after_help = "Audio plays on the default output device. Builds with the \
`native-voices` feature list the platform's voices; without it a single \
default voice is offered.")]
pub struct Args {
    /// Initially selected language (name or code)
    #[arg(short, long, default_value = "English")]
    pub language: String,

    /// Base URL of the translation service
    #[arg(long, default_value = DEFAULT_TRANSLATE_URL)]
    pub translate_url: String,

    /// Base URL of the speech synthesis service
    #[arg(long, default_value = DEFAULT_TTS_URL)]
    pub tts_url: String,

    /// HTTP timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory for temporary audio files
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Remote service settings.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            translate_url: self.translate_url.clone(),
            tts_url: self.tts_url.clone(),
            timeout: self.timeout.map(Duration::from_secs),
        }
    }

    /// Session settings.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            temp_dir: self.temp_dir.clone(),
        }
    }

    /// Default tracing filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "babel_tts_rs=debug,babel_tts=debug,warn"
        } else {
            "warn"
        }
    }
}
