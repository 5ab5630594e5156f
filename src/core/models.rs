//! Core data models for translation

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::languages::{self, AUTO};

/// Translation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Text to translate
    pub text: String,
    /// Source language code, `"auto"` when omitted
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    /// Destination language code
    pub target_lang: String,
}

fn default_source_lang() -> String {
    AUTO.to_string()
}

impl TranslationRequest {
    /// Create a request with auto-detected source language
    pub fn new(text: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_lang: default_source_lang(),
            target_lang: target_lang.into(),
        }
    }

    /// Set an explicit source language
    pub fn with_source_lang(mut self, source_lang: impl Into<String>) -> Self {
        self.source_lang = source_lang.into();
        self
    }
}

/// A language code paired with its display name, when the table knows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Code as given, e.g. `en` or `auto`
    pub code: String,
    /// English name from the table
    pub name: Option<String>,
}

impl Language {
    /// Build a language, resolving the display name from the static table
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let name = languages::language_name(&code.to_lowercase()).map(str::to_string);
        Self { code, name }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", self.code, name),
            None => write!(f, "{}", self.code),
        }
    }
}

/// Translated text, either one string or a feminine/masculine pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslatedText {
    /// A single translation
    Single(String),
    /// Two variants differing by grammatical gender
    Gendered {
        /// Feminine form
        feminine: String,
        /// Masculine form
        masculine: String,
    },
}

impl TranslatedText {
    /// The text to use when a single string is required.
    ///
    /// Gendered translations fall back to the masculine variant.
    pub fn as_str(&self) -> &str {
        match self {
            TranslatedText::Single(text) => text,
            TranslatedText::Gendered { masculine, .. } => masculine,
        }
    }

    /// Whether the provider returned two gendered variants
    pub fn is_gendered(&self) -> bool {
        matches!(self, TranslatedText::Gendered { .. })
    }
}

impl fmt::Display for TranslatedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedResult {
    /// Translated text
    pub text: TranslatedText,
    /// Detected source language, or the requested one for blank input
    pub src_lang: Language,
    /// Requested destination language
    pub dest_lang: Language,
    /// Romanization of the input, when provided
    pub src_pronunciation: Option<String>,
    /// Romanization of the translation, when provided
    pub dest_pronunciation: Option<String>,
}

impl TranslatedResult {
    /// Result returned for blank input without touching the network
    pub(crate) fn empty(src_lang: &str, dest_lang: &str) -> Self {
        Self {
            text: TranslatedText::Single(String::new()),
            src_lang: Language::new(src_lang),
            dest_lang: Language::new(dest_lang),
            src_pronunciation: Some(String::new()),
            dest_pronunciation: Some(String::new()),
        }
    }
}

impl fmt::Display for TranslatedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.text.fmt(f)
    }
}
