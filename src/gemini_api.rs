//! Gemini `generateContent` HTTP client using reqwest.
//!
//! Gemini generates text only: prompt assembly, history trimming and every
//! fallback decision stay in Rust. Error mapping separates the one status
//! that warrants a retry (404, unknown model) from everything else.

use std::future::Future;

use async_trait::async_trait;
use serde_json::json;

use crate::{
    config::{Config, CHAT_MAX_OUTPUT_TOKENS, HISTORY_WINDOW, TEMPERATURE},
    error::UtsavError,
    types::{ConversationTurn, Role},
};

/// One `contents[]` entry in Gemini's role vocabulary (`"user"` / `"model"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTurn {
    pub role: &'static str,
    pub text: String,
}

/// Everything needed for a single `generateContent` call, independent of model name.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub system_instruction: Option<String>,
    pub contents: Vec<ContentTurn>,
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl ModelRequest {
    /// Build a chat request: the last [`HISTORY_WINDOW`] turns (oldest dropped,
    /// relative order kept) followed by `message` as the final user turn.
    pub fn chat(system: &str, history: &[ConversationTurn], message: &str) -> Self {
        let start = history.len().saturating_sub(HISTORY_WINDOW);
        let mut contents: Vec<ContentTurn> = history[start..]
            .iter()
            .map(|turn| ContentTurn {
                role: model_role(turn.role),
                text: turn.text.clone(),
            })
            .collect();

        contents.push(ContentTurn {
            role: "user",
            text: message.to_string(),
        });

        Self {
            system_instruction: Some(system.to_string()),
            contents,
            temperature: TEMPERATURE,
            max_output_tokens: CHAT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Build a single-prompt request with no system instruction.
    pub fn single_prompt(prompt: impl Into<String>, max_output_tokens: u32) -> Self {
        Self {
            system_instruction: None,
            contents: vec![ContentTurn {
                role: "user",
                text: prompt.into(),
            }],
            temperature: TEMPERATURE,
            max_output_tokens,
        }
    }
}

fn model_role(role: Role) -> &'static str {
    match role {
        Role::Assistant => "model",
        Role::User => "user",
    }
}

// ── Client seam ──────────────────────────────────────────────────────────────

/// Anything that can turn a [`ModelRequest`] into generated text.
///
/// [`GeminiClient`] is the production implementation; tests substitute stubs.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Run one generation. Any `Err` is a failed call; the variant only
    /// matters for logging and status mapping.
    async fn generate(&self, request: &ModelRequest) -> Result<String, UtsavError>;

    /// Request a chat reply for `message` given prior `history`.
    async fn request_model_reply(
        &self,
        system: &str,
        history: &[ConversationTurn],
        message: &str,
    ) -> Result<String, UtsavError> {
        let request = ModelRequest::chat(system, history, message);
        self.generate(&request).await
    }
}

/// Call `call` with `primary`; when that fails with [`UtsavError::ModelNotFound`]
/// and a distinct `fallback` is configured, call it once more with `fallback`.
///
/// No other failure class is retried.
pub async fn with_model_fallback<T, F, Fut>(
    primary: &str,
    fallback: Option<&str>,
    mut call: F,
) -> Result<T, UtsavError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, UtsavError>>,
{
    match call(primary.to_string()).await {
        Err(UtsavError::ModelNotFound(detail)) => {
            match fallback.filter(|name| !name.is_empty() && *name != primary) {
                Some(name) => {
                    tracing::warn!(
                        primary = %primary,
                        fallback = %name,
                        "primary model not found, retrying with fallback model"
                    );
                    call(name.to_string()).await
                }
                None => Err(UtsavError::ModelNotFound(detail)),
            }
        }
        other => other,
    }
}

// ── Gemini client ────────────────────────────────────────────────────────────

/// HTTP client for the Gemini `generateContent` API.
pub struct GeminiClient {
    client: reqwest::Client,
    config: Config,
}

impl GeminiClient {
    /// Create a client whose every request is bounded by `config.request_timeout`.
    pub fn new(config: Config) -> Result<Self, UtsavError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    // ── Private helpers ────────────────────────────────────────────────────

    fn api_key(&self) -> Result<&str, UtsavError> {
        self.config
            .gemini_api_key
            .as_deref()
            .ok_or_else(|| UtsavError::Config("GEMINI_API_KEY is missing".to_string()))
    }

    /// Build the JSON request body.
    pub(crate) fn build_body(request: &ModelRequest) -> serde_json::Value {
        let contents: Vec<serde_json::Value> = request
            .contents
            .iter()
            .map(|turn| {
                json!({
                    "role":  turn.role,
                    "parts": [{ "text": turn.text }]
                })
            })
            .collect();

        let mut body = json!({
            "contents": contents,
            "generationConfig": {
                "temperature":     request.temperature,
                "maxOutputTokens": request.max_output_tokens,
            },
        });

        if let Some(system) = &request.system_instruction {
            body["systemInstruction"] = json!({
                "role":  "system",
                "parts": [{ "text": system }]
            });
        }

        body
    }

    /// Execute the POST request against `model` and surface structured HTTP errors.
    async fn post(
        &self,
        model: &str,
        api_key: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, UtsavError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.gemini_base_url, model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<serde_json::Value>().await?);
        }

        // Read body for diagnostics before dropping the response.
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "(unreadable body)".to_string());

        Err(map_http_error(status.as_u16(), model, &error_body))
    }

    /// Concatenate every text part of the first candidate.
    pub(crate) fn extract_text(json: &serde_json::Value) -> Result<String, UtsavError> {
        let text: String = json
            .pointer("/candidates/0/content/parts")
            .and_then(|v| v.as_array())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(UtsavError::EmptyOutput);
        }
        Ok(text)
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, request: &ModelRequest) -> Result<String, UtsavError> {
        // Fail before any network traffic when the credential is absent.
        let api_key = self.api_key()?;
        let body = Self::build_body(request);
        let body = &body;

        let raw = with_model_fallback(
            &self.config.gemini_model,
            self.config.gemini_fallback_model.as_deref(),
            move |model| async move { self.post(&model, api_key, body).await },
        )
        .await?;

        Self::extract_text(&raw)
    }
}

// ── HTTP error mapping ────────────────────────────────────────────────────────

/// Maximum number of characters from an HTTP error body included in error messages.
/// Keeps large upstream payloads out of error chains and log sinks.
pub const MAX_ERROR_BODY_LEN: usize = 200;

fn map_http_error(status: u16, model: &str, body: &str) -> UtsavError {
    // Char-based truncation so a multi-byte boundary never panics.
    let safe_body = if body.chars().count() > MAX_ERROR_BODY_LEN {
        let truncated: String = body.chars().take(MAX_ERROR_BODY_LEN).collect();
        format!("{truncated}…[truncated]")
    } else {
        body.to_string()
    };

    match status {
        404 => UtsavError::ModelNotFound(format!("{model}: {safe_body}")),
        401 | 403 => UtsavError::ModelApi("Unauthorized: check GEMINI_API_KEY".to_string()),
        429 => UtsavError::ModelApi("Rate limited by Gemini API".to_string()),
        s if s >= 500 => UtsavError::ModelApi(format!("Gemini server error {s}: {safe_body}")),
        s => UtsavError::ModelApi(format!("HTTP {s}: {safe_body}")),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
