//! Remote model client
//!
//! [`ModelClient`] is the seam between the pipeline and the hosted model:
//! text in, text out. [`GeminiClient`] implements it against the Gemini
//! `generateContent` REST endpoint.

use async_trait::async_trait;
use componentai_core::{AppConfig, FailureCause};
use serde::Deserialize;

/// Sends one instruction to a generative model and returns its text answer
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Issue a single, non-streaming request
    async fn generate_text(&self, instruction: &str) -> Result<String, FailureCause>;
}

// ============================================================================
// GeminiClient
// ============================================================================

/// Client for the Gemini `generateContent` endpoint
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl GeminiClient {
    /// Build a client from application config, resolving the API key now
    pub fn from_config(config: &AppConfig) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.resolve_api_key(),
            api_key_env: config.api_key_env.clone(),
        }
    }

    /// Full URL of the `generateContent` call
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate_text(&self, instruction: &str) -> Result<String, FailureCause> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(FailureCause::MissingApiKey(self.api_key_env.clone()));
        };

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": instruction }] }]
        });

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| FailureCause::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let raw = resp.text().await.unwrap_or_default();
            return Err(FailureCause::Service {
                status: status.as_u16(),
                message: service_error_message(&raw, status.canonical_reason()),
            });
        }

        let parsed = resp
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| FailureCause::Transport(format!("invalid response body: {e}")))?;

        parsed.text().ok_or(FailureCause::EmptyResponse)
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pull the message out of a Gemini error body, falling back to the raw text
fn service_error_message(raw: &str, reason: Option<&str>) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(raw) {
        return envelope.error.message;
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        reason.unwrap_or("unknown error").to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}
