//! Language catalog definition.

/// Supported languages, in display order.
static LANGUAGES: [Language; 10] = [
    Language::new("English", "en"),
    Language::new("Spanish", "es"),
    Language::new("French", "fr"),
    Language::new("German", "de"),
    Language::new("Italian", "it"),
    Language::new("Chinese", "zh"),
    Language::new("Japanese", "ja"),
    Language::new("Korean", "ko"),
    Language::new("Hindi", "hi"),
    Language::new("Arabic", "ar"),
];

/// A selectable target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Human-readable name shown in the language list.
    pub name: &'static str,
    /// Code sent to the translation and speech services.
    pub code: &'static str,
}

impl Language {
    const fn new(name: &'static str, code: &'static str) -> Self {
        Self { name, code }
    }
}

/// Fixed, ordered mapping from display name to language code.
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    entries: &'static [Language],
}

impl LanguageCatalog {
    /// Create the built-in catalog.
    pub fn new() -> Self {
        Self {
            entries: &LANGUAGES,
        }
    }

    /// All languages in display order.
    pub fn languages(&self) -> &[Language] {
        self.entries
    }

    /// The default selection (first entry).
    pub fn first(&self) -> Language {
        self.entries[0]
    }

    /// Look up the code for an exact display name.
    pub fn code(&self, name: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.code)
    }

    /// Resolve user input to a language.
    ///
    /// Accepts a display name (case-insensitive) or a language code.
    pub fn find(&self, input: &str) -> Option<Language> {
        let input = input.trim();
        self.entries
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(input) || l.code.eq_ignore_ascii_case(input))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::new()
    }
}
