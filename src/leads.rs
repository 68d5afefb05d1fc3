//! Lead capture: validation of contact-form submissions and persistence to
//! the Supabase `leads` table over its REST interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::UtsavError};

/// Source recorded when the submission does not name one.
pub const DEFAULT_LEAD_SOURCE: &str = "contact_form";

/// Body of `POST /api/leads`, as sent by the contact form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub guest_count: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// A validated lead row, serialized with the table's column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewLead {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub event_type: String,
    pub event_date: Option<String>,
    pub guest_count: Option<String>,
    pub city: String,
    pub message: Option<String>,
    pub source: String,
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl LeadSubmission {
    /// Trim every field and check the required ones.
    ///
    /// Blank optional fields become `None`; a blank or absent `source`
    /// becomes [`DEFAULT_LEAD_SOURCE`].
    ///
    /// # Errors
    /// [`UtsavError::InputValidation`] when name, phone, email, event type or
    /// city is blank.
    pub fn validate(&self) -> Result<NewLead, UtsavError> {
        let required = (
            trimmed(&self.name),
            trimmed(&self.phone),
            trimmed(&self.email),
            trimmed(&self.event_type),
            trimmed(&self.city),
        );

        let (Some(name), Some(phone), Some(email), Some(event_type), Some(city)) = required else {
            return Err(UtsavError::InputValidation(
                "Missing required fields".to_string(),
            ));
        };

        Ok(NewLead {
            name,
            phone,
            email,
            event_type,
            event_date: trimmed(&self.event_date),
            guest_count: trimmed(&self.guest_count),
            city,
            message: trimmed(&self.message),
            source: trimmed(&self.source).unwrap_or_else(|| DEFAULT_LEAD_SOURCE.to_string()),
        })
    }
}

/// Persistence seam for captured leads.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn insert(&self, lead: &NewLead) -> Result<(), UtsavError>;
}

/// [`LeadStore`] backed by Supabase's PostgREST endpoint.
pub struct SupabaseLeadStore {
    client: reqwest::Client,
    url: Option<String>,
    anon_key: Option<String>,
}

impl SupabaseLeadStore {
    /// Build the store from `config`. Missing Supabase settings are reported
    /// per insert, so the rest of the service can start without them.
    pub fn new(config: &Config) -> Result<Self, UtsavError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
        })
    }

    fn credentials(&self) -> Result<(&str, &str), UtsavError> {
        match (self.url.as_deref(), self.anon_key.as_deref()) {
            (Some(url), Some(key)) => Ok((url, key)),
            _ => Err(UtsavError::Config("Supabase keys are missing".to_string())),
        }
    }
}

#[async_trait]
impl LeadStore for SupabaseLeadStore {
    async fn insert(&self, lead: &NewLead) -> Result<(), UtsavError> {
        let (url, key) = self.credentials()?;

        let response = self
            .client
            .post(format!("{url}/rest/v1/leads"))
            .header("apikey", key)
            .bearer_auth(key)
            .header("Prefer", "return=minimal")
            .json(lead)
            .send()
            .await
            .map_err(|e| UtsavError::Store(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(city = %lead.city, event_type = %lead.event_type, "lead stored");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = store_error_message(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), error = %message, "lead insert rejected");
        Err(UtsavError::Store(message))
    }
}

/// PostgREST reports failures as `{"message": ...}`; fall back to the status.
fn store_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| format!("Supabase returned HTTP {status}"))
}
