//! HTTP surface: axum router, handlers and error-to-response mapping.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::{
    error::UtsavError,
    generate::{ContentGenerator, GenerateRequest},
    leads::{LeadStore, LeadSubmission},
    pipeline::ReplyPipeline,
    types::{ChatRequest, ChatResponse},
};

/// Shared handler state. Every component is immutable or internally `Sync`.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: ReplyPipeline,
    pub generator: ContentGenerator,
    pub leads: Arc<dyn LeadStore>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/ai/generate", post(generate))
        .route("/api/leads", post(create_lead))
        .route("/health", get(health))
        .with_state(state)
}

// ── Error responses ───────────────────────────────────────────────────────────

/// JSON error body `{"error": ...}` with an optional `raw` model output.
#[derive(Debug)]
pub struct ApiError {
    pub status_code: StatusCode,
    pub message: String,
    pub raw: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            message: message.into(),
            raw: None,
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            raw: None,
        }
    }

    fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::BAD_GATEWAY,
            message: message.into(),
            raw: None,
        }
    }
}

impl From<UtsavError> for ApiError {
    fn from(err: UtsavError) -> Self {
        match err {
            UtsavError::InputValidation(msg) => Self::bad_request(msg),
            UtsavError::Config(msg) | UtsavError::Store(msg) => Self::internal(msg),
            UtsavError::Parse { message, raw } => Self {
                raw: Some(raw),
                ..Self::bad_gateway(message)
            },
            e @ (UtsavError::ModelNotFound(_)
            | UtsavError::ModelApi(_)
            | UtsavError::EmptyOutput
            | UtsavError::Http(_)) => {
                tracing::warn!(error = %e, "upstream model failure");
                Self::bad_gateway(e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
            raw: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "error": self.message });
        if let Some(raw) = self.raw {
            body["raw"] = json!(raw);
        }
        (self.status_code, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let Json(request) = payload?;
    let result = state.pipeline.reply(&request).await?;
    Ok(Json(result.into()))
}

async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> ApiResult<Json<serde_json::Value>> {
    let Json(body) = payload?;
    let request: GenerateRequest =
        serde_json::from_value(body).map_err(|_| ApiError::bad_request("Invalid type"))?;

    let result = state.generator.generate(&request).await?;
    Ok(Json(json!({ "result": result })))
}

async fn create_lead(
    State(state): State<AppState>,
    payload: Result<Json<LeadSubmission>, JsonRejection>,
) -> ApiResult<Json<serde_json::Value>> {
    let Json(submission) = payload?;
    let lead = submission.validate()?;
    state.leads.insert(&lead).await?;
    Ok(Json(json!({ "ok": true })))
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
