//! Chat reply orchestrator.
//!
//! Every chat turn runs the same explicit steps:
//! 1. validate the message,
//! 2. build system instructions for the request's language,
//! 3. attempt a model reply,
//! 4. on any model failure, substitute the rule-based fallback reply.
//!
//! Once step 1 passes, the only error that can reach the caller is a missing
//! AI credential: that is a deployment problem and is never papered over with
//! a fallback reply. Every other failure (transport, status, empty output, or
//! a panic inside the client) resolves to `ReplySource::Fallback`.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use tracing::Instrument;

use crate::{
    error::UtsavError,
    fallback::build_fallback_reply_with,
    gemini_api::ModelClient,
    knowledge::{KnowledgeBase, KNOWLEDGE_BASE},
    prompt::chat_system_instructions,
    types::{ChatRequest, Language, ReplyResult, ReplySource},
};

/// Validated chat input.
#[derive(Debug, Clone)]
struct IncomingMessage {
    /// Trimmed text sent to the model.
    text: String,
    language: Language,
}

/// Reply orchestrator holding the model client and the knowledge base.
#[derive(Clone)]
pub struct ReplyPipeline {
    client: Arc<dyn ModelClient>,
    knowledge: &'static KnowledgeBase,
}

impl ReplyPipeline {
    /// Orchestrator over `client` using the process-wide knowledge base.
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            client,
            knowledge: &KNOWLEDGE_BASE,
        }
    }

    /// Produce a reply for `request`.
    ///
    /// # Errors
    /// - [`UtsavError::InputValidation`] when the message is blank (no model call is made).
    /// - [`UtsavError::Config`] when the model client reports missing configuration.
    pub async fn reply(&self, request: &ChatRequest) -> Result<ReplyResult, UtsavError> {
        let span = tracing::info_span!(
            "chat_reply",
            request_id = %uuid::Uuid::new_v4(),
            history_len = request.history.len(),
        );
        self.reply_inner(request).instrument(span).await
    }

    async fn reply_inner(&self, request: &ChatRequest) -> Result<ReplyResult, UtsavError> {
        let started = Instant::now();

        // Step 1: validate input
        let msg = self.step1_validate(request)?;

        // Step 2: system instructions for this request's language
        let system = chat_system_instructions(self.knowledge, msg.language);

        // Step 3: model attempt
        let attempt = self
            .step3_attempt_model(&system, request, &msg)
            .await
            .and_then(|text| {
                if text.trim().is_empty() {
                    Err(UtsavError::EmptyOutput)
                } else {
                    Ok(text)
                }
            });

        // Step 4: resolve: model text, configuration error, or fallback
        let result = match attempt {
            Ok(text) => ReplyResult {
                text,
                source: ReplySource::Model,
            },
            Err(e @ UtsavError::Config(_)) => {
                tracing::error!(error = %e, "chat model is not configured");
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(error = %e, "model reply failed, using rule-based fallback");
                self.step4_fallback(&request.message)
            }
        };

        tracing::info!(
            source = %result.source,
            language = msg.language.code(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "chat_reply_done"
        );

        Ok(result)
    }
}

// ── Private step implementations ──────────────────────────────────────────────

impl ReplyPipeline {
    /// STEP 1: Reject blank messages before any external call.
    fn step1_validate(&self, request: &ChatRequest) -> Result<IncomingMessage, UtsavError> {
        let text = request.message.trim();
        if text.is_empty() {
            return Err(UtsavError::InputValidation(
                "Message is required".to_string(),
            ));
        }
        Ok(IncomingMessage {
            text: text.to_string(),
            language: Language::from_code(request.language.as_deref()),
        })
    }

    /// STEP 3: Ask the model client, converting a panic into a failure.
    async fn step3_attempt_model(
        &self,
        system: &str,
        request: &ChatRequest,
        msg: &IncomingMessage,
    ) -> Result<String, UtsavError> {
        let call = self
            .client
            .request_model_reply(system, &request.history, &msg.text);

        match AssertUnwindSafe(call).catch_unwind().await {
            Ok(result) => result,
            Err(_) => Err(UtsavError::ModelApi(
                "model client panicked".to_string(),
            )),
        }
    }

    /// STEP 4: Deterministic reply from the raw message.
    fn step4_fallback(&self, raw_message: &str) -> ReplyResult {
        ReplyResult {
            text: build_fallback_reply_with(self.knowledge, raw_message),
            source: ReplySource::Fallback,
        }
    }
}
