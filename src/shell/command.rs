//! Shell command parsing.

use std::path::PathBuf;

use thiserror::Error;

use crate::voice::{MAX_RATE, MIN_RATE};

pub const HELP: &str = "\
Commands:
  text <text>           set the text to speak (empty clears it)
  voice <n|name>        select a voice from 'voices'
  language <name|code>  select the target language
  rate <50-300>         speech rate
  volume <0.0-1.0>      speech volume
  play                  translate and speak, or resume while synthesizing
  pause                 pause playback
  stop                  stop playback
  replay                play the last audio again
  save [path]           translate and save the audio (.mp3 by default)
  voices | languages    list the choices
  status                show the current selections
  help                  show this help
  quit                  exit";

/// Errors produced while parsing a command line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0}. Type 'help' for a list of commands")]
    Unknown(String),

    #[error("Missing argument for '{0}'")]
    MissingArgument(&'static str),

    #[error("Invalid value for '{command}': {value}")]
    InvalidValue { command: &'static str, value: String },

    #[error("{command} must be between {min} and {max}")]
    OutOfRange {
        command: &'static str,
        min: String,
        max: String,
    },
}

/// How a voice is picked: 1-based position in the list, or name/id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceSelector {
    Index(usize),
    Name(String),
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Text(String),
    Voice(VoiceSelector),
    Language(String),
    Rate(i32),
    Volume(f32),
    Play,
    Pause,
    Stop,
    Replay,
    Save(Option<PathBuf>),
    Voices,
    Languages,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "text" => Command::Text(rest.to_string()),
            "voice" => Command::Voice(parse_voice(required("voice", rest)?)),
            "language" | "lang" => Command::Language(required("language", rest)?.to_string()),
            "rate" => Command::Rate(parse_rate(required("rate", rest)?)?),
            "volume" => Command::Volume(parse_volume(required("volume", rest)?)?),
            "play" => Command::Play,
            "pause" => Command::Pause,
            "stop" => Command::Stop,
            "replay" => Command::Replay,
            "save" => Command::Save((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "voices" => Command::Voices,
            "languages" => Command::Languages,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn required<'a>(command: &'static str, rest: &'a str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    Ok(rest)
}

fn parse_voice(arg: &str) -> VoiceSelector {
    match arg.parse::<usize>() {
        Ok(n) => VoiceSelector::Index(n),
        Err(_) => VoiceSelector::Name(arg.to_string()),
    }
}

fn parse_rate(arg: &str) -> Result<i32, CommandError> {
    let rate: i32 = arg.parse().map_err(|_| CommandError::InvalidValue {
        command: "rate",
        value: arg.to_string(),
    })?;

    if !(MIN_RATE..=MAX_RATE).contains(&rate) {
        return Err(CommandError::OutOfRange {
            command: "rate",
            min: MIN_RATE.to_string(),
            max: MAX_RATE.to_string(),
        });
    }

    Ok(rate)
}

fn parse_volume(arg: &str) -> Result<f32, CommandError> {
    let volume: f32 = arg.parse().map_err(|_| CommandError::InvalidValue {
        command: "volume",
        value: arg.to_string(),
    })?;

    if !(0.0..=1.0).contains(&volume) {
        return Err(CommandError::OutOfRange {
            command: "volume",
            min: "0.0".to_string(),
            max: "1.0".to_string(),
        });
    }

    Ok(volume)
}
