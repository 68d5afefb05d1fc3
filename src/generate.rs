//! Content generation for staff tools: blog drafts, SEO fields and translations.
//!
//! Shares the model client and model-fallback policy with chat, but has no
//! rule-based substitute: a failed or unparseable generation is reported to
//! the caller as an error.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    config::{BLOG_MAX_OUTPUT_TOKENS, SHORT_MAX_OUTPUT_TOKENS},
    error::UtsavError,
    gemini_api::{ModelClient, ModelRequest},
    knowledge::KNOWLEDGE_BASE,
    prompt::{blog_prompt, seo_prompt, translate_prompt},
};

/// Body of `POST /api/ai/generate`, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GenerateRequest {
    Blog {
        title: Option<String>,
        topic: Option<String>,
    },
    Seo {
        title: Option<String>,
        content: Option<String>,
    },
    Translate {
        text: Option<String>,
    },
}

/// Title and content are required; long drafts often run out of tokens
/// before the summary fields, which then decode as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogDraft {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub seo_title: String,
    #[serde(default)]
    pub seo_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoFields {
    pub seo_title: String,
    #[serde(default)]
    pub seo_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub translation: String,
}

/// Decoded model output; serialized without a tag as the `result` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GeneratedContent {
    Blog(BlogDraft),
    Seo(SeoFields),
    Translation(Translation),
}

/// Validated prompt plus the output shape expected back.
struct PreparedPrompt {
    prompt: String,
    max_output_tokens: u32,
    kind: &'static str,
}

/// Runs content-generation requests against a [`ModelClient`].
#[derive(Clone)]
pub struct ContentGenerator {
    client: Arc<dyn ModelClient>,
}

impl ContentGenerator {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Validate, prompt, call the model and decode its JSON answer.
    ///
    /// # Errors
    /// - [`UtsavError::InputValidation`] for missing type-specific fields (no model call).
    /// - Any model-call failure, unchanged.
    /// - [`UtsavError::Parse`] when the output holds no decodable JSON object.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GeneratedContent, UtsavError> {
        let prepared = prepare(request)?;

        let raw = self
            .client
            .generate(&ModelRequest::single_prompt(
                prepared.prompt,
                prepared.max_output_tokens,
            ))
            .await
            .inspect_err(|e| {
                tracing::warn!(kind = prepared.kind, error = %e, "content generation failed");
            })?;

        let content = match request {
            GenerateRequest::Blog { .. } => GeneratedContent::Blog(decode(&raw)?),
            GenerateRequest::Seo { .. } => GeneratedContent::Seo(decode(&raw)?),
            GenerateRequest::Translate { .. } => GeneratedContent::Translation(decode(&raw)?),
        };

        tracing::info!(kind = prepared.kind, "content generated");
        Ok(content)
    }
}

fn prepare(request: &GenerateRequest) -> Result<PreparedPrompt, UtsavError> {
    let business = KNOWLEDGE_BASE.business_name;

    match request {
        GenerateRequest::Blog { title, topic } => {
            let subject = non_blank(title)
                .or_else(|| non_blank(topic))
                .ok_or_else(|| invalid("Title or topic is required"))?;
            Ok(PreparedPrompt {
                prompt: blog_prompt(business, subject),
                max_output_tokens: BLOG_MAX_OUTPUT_TOKENS,
                kind: "blog",
            })
        }
        GenerateRequest::Seo { title, content } => {
            let title = non_blank(title);
            let content = non_blank(content);
            if title.is_none() && content.is_none() {
                return Err(invalid("Title or content is required"));
            }
            Ok(PreparedPrompt {
                prompt: seo_prompt(business, title.unwrap_or(""), content.unwrap_or("")),
                max_output_tokens: SHORT_MAX_OUTPUT_TOKENS,
                kind: "seo",
            })
        }
        GenerateRequest::Translate { text } => {
            let text = non_blank(text).ok_or_else(|| invalid("Text is required"))?;
            Ok(PreparedPrompt {
                prompt: translate_prompt(text),
                max_output_tokens: SHORT_MAX_OUTPUT_TOKENS,
                kind: "translate",
            })
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn invalid(message: &str) -> UtsavError {
    UtsavError::InputValidation(message.to_string())
}

fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, UtsavError> {
    extract_json_object(raw)
        .and_then(|value| serde_json::from_value::<T>(value).ok())
        .ok_or_else(|| UtsavError::Parse {
            message: "Failed to parse AI response".to_string(),
            raw: raw.to_string(),
        })
}

/// Parse `text` as JSON, or failing that, the span from its first `{` to its
/// last `}` (models like to wrap JSON in prose or code fences).
pub fn extract_json_object(text: &str) -> Option<serde_json::Value> {
    if let Ok(value) = serde_json::from_str(text.trim()) {
        return Some(value);
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_plain_json() {
        let v = extract_json_object(r#"{"translation":"Hello"}"#).unwrap();
        assert_eq!(v["translation"], "Hello");
    }

    #[test]
    fn extract_fenced_json() {
        let raw = "Sure!\n```json\n{\"seo_title\":\"T\",\"seo_description\":\"D\"}\n```";
        let v = extract_json_object(raw).unwrap();
        assert_eq!(v["seo_title"], "T");
    }

    #[test]
    fn extract_rejects_prose() {
        assert!(extract_json_object("no json here").is_none());
        assert!(extract_json_object("} backwards {").is_none());
    }

    #[test]
    fn blog_prefers_title_over_topic() {
        let req = GenerateRequest::Blog {
            title: Some("  Mehendi ideas ".into()),
            topic: Some("ignored".into()),
        };
        let prepared = prepare(&req).unwrap();
        assert!(prepared.prompt.contains("Topic: Mehendi ideas"));
        assert_eq!(prepared.max_output_tokens, BLOG_MAX_OUTPUT_TOKENS);
    }

    #[test]
    fn seo_requires_title_or_content() {
        let req = GenerateRequest::Seo {
            title: Some(" ".into()),
            content: None,
        };
        let err = prepare(&req).err().unwrap();
        assert!(err.to_string().contains("Title or content is required"));
    }
}
