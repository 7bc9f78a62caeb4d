//! Built-in catalog of target languages.

mod languages;

pub use languages::{Language, LanguageCatalog};
