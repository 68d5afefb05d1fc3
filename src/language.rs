//! Request locale parsing and per-language tone directives.
//!
//! The locale is always passed explicitly from the request into the prompt
//! builders; there is no process-wide "current language".

use crate::types::Language;

impl Language {
    /// Parse a request language code.
    ///
    /// Only `"hi"` (case-insensitive, surrounding whitespace ignored) selects
    /// Hinglish; every other value, including a missing one, means English.
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(|c| c.trim().to_ascii_lowercase()) {
            Some(c) if c == "hi" => Language::Hindi,
            _ => Language::English,
        }
    }

    /// Two-letter code used in logs and responses.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }
}

/// Tone directive appended to the chat system instructions.
pub fn tone_directive(language: Language) -> &'static str {
    match language {
        Language::Hindi => "Use formal, polite Hinglish (Romanized Hindi).",
        Language::English => "Use formal, polite English.",
    }
}
