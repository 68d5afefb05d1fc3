//! Custom error types for the assistant service.

use thiserror::Error;

/// Unified error type propagated through every reply, generation and lead step.
#[derive(Debug, Error)]
pub enum UtsavError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input validation error: {0}")]
    InputValidation(String),

    /// The requested model identifier is unknown to the API (HTTP 404).
    /// This is the only failure class that triggers the fallback-model retry.
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Gemini API error: {0}")]
    ModelApi(String),

    #[error("Empty response from Gemini")]
    EmptyOutput,

    #[error("Parse error: {message}")]
    Parse { message: String, raw: String },

    #[error("Store error: {0}")]
    Store(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl UtsavError {
    /// `true` for failures that come from the upstream model call itself
    /// (as opposed to bad input or deployment configuration).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            UtsavError::ModelNotFound(_)
                | UtsavError::ModelApi(_)
                | UtsavError::EmptyOutput
                | UtsavError::Http(_)
                | UtsavError::Parse { .. }
        )
    }
}
