//! Configuration loading from environment variables via dotenvy.
//! No secrets are ever hardcoded here.

use std::time::Duration;

use crate::error::UtsavError;

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
const DEFAULT_GEMINI_FALLBACK_MODEL: &str = "gemini-1.5-pro-latest";
const DEFAULT_TIMEOUT_SECS: u64 = 20;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Runtime configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key, sourced from `GEMINI_API_KEY`.
    ///
    /// Optional at load time so the lead endpoint keeps working without it;
    /// every model call checks for it before touching the network.
    pub gemini_api_key: Option<String>,
    /// Base URL for the Gemini API, sourced from `GEMINI_BASE_URL`
    pub gemini_base_url: String,
    /// Primary model identifier, sourced from `GEMINI_MODEL`
    pub gemini_model: String,
    /// Secondary model tried once when the primary is not found,
    /// sourced from `GEMINI_FALLBACK_MODEL`. An empty value disables the retry.
    pub gemini_fallback_model: Option<String>,
    /// Upper bound on a single upstream HTTP call, sourced from `GEMINI_TIMEOUT_SECS`.
    pub request_timeout: Duration,
    /// Supabase project URL, sourced from `SUPABASE_URL`
    pub supabase_url: Option<String>,
    /// Supabase anon/publishable key, sourced from `SUPABASE_ANON_KEY`
    pub supabase_anon_key: Option<String>,
    /// Socket address the HTTP server binds to, sourced from `BIND_ADDR`
    pub bind_addr: String,
}

impl Config {
    /// Configuration suitable for tests and local runs: no credentials,
    /// default models and endpoints.
    pub fn offline() -> Self {
        Self {
            gemini_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_fallback_model: Some(DEFAULT_GEMINI_FALLBACK_MODEL.to_string()),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            supabase_url: None,
            supabase_anon_key: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

/// Read an env var, treating unset and blank values the same way.
fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load configuration purely from already-set environment variables.
///
/// Does **not** call `dotenvy::dotenv()`, which is useful in tests that need to
/// control the env precisely via [`std::env::set_var`] / [`std::env::remove_var`].
///
/// # Errors
/// Returns [`UtsavError::Config`] if a variable is present but invalid.
pub fn load_config_from_env() -> Result<Config, UtsavError> {
    let gemini_api_key = non_empty_var("GEMINI_API_KEY");

    let base_url = non_empty_var("GEMINI_BASE_URL")
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(UtsavError::Config(
            "GEMINI_BASE_URL must start with http:// or https://".to_string(),
        ));
    }

    // SECURITY: the API key travels in the `x-goog-api-key` header; plaintext
    // http:// is only acceptable for a local mock or proxy.
    if base_url.starts_with("http://") {
        tracing::warn!(
            "GEMINI_BASE_URL uses plaintext http://; the API key will be sent without TLS"
        );
    }

    let gemini_model =
        non_empty_var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

    // Unset → default fallback; set-but-empty → disabled.
    let gemini_fallback_model = match std::env::var("GEMINI_FALLBACK_MODEL") {
        Ok(v) if v.trim().is_empty() => None,
        Ok(v) => Some(v.trim().to_string()),
        Err(_) => Some(DEFAULT_GEMINI_FALLBACK_MODEL.to_string()),
    };

    let timeout_secs = std::env::var("GEMINI_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let supabase_url = non_empty_var("SUPABASE_URL").map(|u| u.trim_end_matches('/').to_string());
    let supabase_anon_key = non_empty_var("SUPABASE_ANON_KEY");

    let bind_addr = non_empty_var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

    Ok(Config {
        gemini_api_key,
        gemini_base_url: base_url.trim_end_matches('/').to_string(),
        gemini_model,
        gemini_fallback_model,
        request_timeout: Duration::from_secs(timeout_secs),
        supabase_url,
        supabase_anon_key,
        bind_addr,
    })
}

/// Load configuration from the environment (`.env` + system env vars).
///
/// Loads `.env` via `dotenvy` first (ignoring errors if the file is absent),
/// then delegates to [`load_config_from_env`].
///
/// # Errors
/// Returns [`UtsavError::Config`] if a variable is present but invalid.
pub fn load_config() -> Result<Config, UtsavError> {
    // Load .env if present; ignore the error, variables may already be set externally.
    let _ = dotenvy::dotenv();
    load_config_from_env()
}

// ── Model call parameters ──────────────────────────────────────────────────

/// Number of most recent history turns forwarded to the model.
pub const HISTORY_WINDOW: usize = 8;

/// Sampling temperature for every model call.
pub const TEMPERATURE: f64 = 0.6;

/// Output-token ceiling for chat replies.
pub const CHAT_MAX_OUTPUT_TOKENS: u32 = 256;

/// Output-token ceiling for long-form blog drafts.
pub const BLOG_MAX_OUTPUT_TOKENS: u32 = 900;

/// Output-token ceiling for SEO fields and translations.
pub const SHORT_MAX_OUTPUT_TOKENS: u32 = 300;
