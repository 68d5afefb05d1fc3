//! Shared types and data structures for the assistant service.

use serde::{Deserialize, Deserializer, Serialize};

/// Language the assistant should answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Formal English.
    #[default]
    English,
    /// Formal Hinglish (Romanized Hindi).
    Hindi,
}

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single prior turn sent by the chat client, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// Which path produced a chat reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    /// Generated by the language model.
    Model,
    /// Produced by the rule-based fallback responder.
    Fallback,
}

impl std::fmt::Display for ReplySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReplySource::Model => "model",
            ReplySource::Fallback => "fallback",
        };
        f.write_str(label)
    }
}

/// Outcome of the reply orchestrator. `source` is always set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyResult {
    pub text: String,
    pub source: ReplySource,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Absent or `null` decodes as `""` and is rejected by validation.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Absent or `null` decodes as no history.
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<ConversationTurn>,
    /// Language code; `"hi"` selects Hinglish, anything else English.
    #[serde(default)]
    pub language: Option<String>,
}

/// Chat widgets send `null` for fields they have not filled in yet.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatRequest {
    /// Convenience constructor for a message with no prior history.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.language = Some(code.into());
        self
    }
}

/// Response body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub source: ReplySource,
}

impl From<ReplyResult> for ChatResponse {
    fn from(result: ReplyResult) -> Self {
        Self {
            reply: result.text,
            source: result.source,
        }
    }
}
