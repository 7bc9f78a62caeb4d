//! babel-tts-rs: interactive text-to-speech with translation.
//!
//! Text typed into the shell is translated into one of ten languages,
//! synthesized by a remote speech service, and played back or saved as
//! an MP3 file.

pub mod backend;
pub mod catalog;
pub mod cli;
pub mod playback;
pub mod session;
pub mod shell;
pub mod voice;
