//! Save prompt description.

use std::path::PathBuf;

/// One entry of the file type filter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub label: &'static str,
    pub pattern: &'static str,
}

const AUDIO_FILTERS: [FileFilter; 3] = [
    FileFilter {
        label: "MP3 files",
        pattern: "*.mp3",
    },
    FileFilter {
        label: "WAV files",
        pattern: "*.wav",
    },
    FileFilter {
        label: "All files",
        pattern: "*.*",
    },
];

/// What the save prompt offers the user.
///
/// The WAV filter is offered, but the synthesized bytes are MP3 whatever
/// extension is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveDialog {
    pub title: &'static str,
    pub filters: &'static [FileFilter],
    pub default_extension: &'static str,
}

impl SaveDialog {
    /// The prompt used by the Save action.
    pub const fn audio() -> Self {
        Self {
            title: "Save audio as",
            filters: &AUDIO_FILTERS,
            default_extension: ".mp3",
        }
    }

    /// Append the default extension when `path` has none.
    pub fn apply_default_extension(&self, path: PathBuf) -> PathBuf {
        if path.extension().is_some() {
            return path;
        }
        path.with_extension(self.default_extension.trim_start_matches('.'))
    }

    /// Filter list formatted for display, e.g. `MP3 files (*.mp3)`.
    pub fn describe_filters(&self) -> String {
        self.filters
            .iter()
            .map(|f| format!("{} ({})", f.label, f.pattern))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for SaveDialog {
    fn default() -> Self {
        Self::audio()
    }
}
