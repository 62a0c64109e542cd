//! REST key check: one `generateContent` call per model.

use crate::credential::Credential;
use crate::error::{ApiStatus, GoogleErrorEnvelope, LiveError, Result};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use serde_json::json;
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

static DEFAULT_BASE_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://generativelanguage.googleapis.com/v1beta/")
        .expect("unreachable error: failed to parse default base URL")
});

/// Models checked when none are given.
pub const DEFAULT_REST_MODELS: &[&str] = &["gemini-2.0-flash", "gemini-2.0-flash-live-001"];

/// Default pause between model checks.
pub const DEFAULT_CHECK_DELAY: Duration = Duration::from_secs(1);

/// Availability of one model for the checked key.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAvailability {
    /// Model name as requested.
    pub model: String,
    /// Whether `generateContent` returned candidates.
    pub available: bool,
    /// Status reported by the service when unavailable.
    pub status: Option<ApiStatus>,
    /// Error or unexpected-response detail.
    pub detail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<serde_json::Value>,
}

/// Checks a key against the REST `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct KeyChecker {
    http_client: Client,
    base_url: Url,
    delay: Duration,
}

impl KeyChecker {
    /// Create a checker for the public endpoint.
    pub fn new(credential: &Credential) -> Result<Self> {
        Self::with_base_url(credential, DEFAULT_BASE_URL.clone())
    }

    /// Create a checker for a custom base URL (must end with `/`).
    pub fn with_base_url(credential: &Credential, base_url: Url) -> Result<Self> {
        let key = HeaderValue::from_str(credential.expose())
            .map_err(|e| LiveError::config(format!("failed to parse API key: {}", e)))?;
        let headers = HeaderMap::from_iter([(HeaderName::from_static("x-goog-api-key"), key)]);
        let http_client = Client::builder().default_headers(headers).build()?;

        Ok(Self { http_client, base_url, delay: DEFAULT_CHECK_DELAY })
    }

    /// Set the pause between consecutive model checks.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn build_url(&self, model: &str) -> Result<Url> {
        let suffix = format!("models/{}:generateContent", model.trim_start_matches("models/"));
        self.base_url
            .join(&suffix)
            .map_err(|e| LiveError::config(format!("failed to construct URL '{}': {}", suffix, e)))
    }

    /// Check a single model. Transport failures are returned as errors;
    /// service rejections are reported in the availability.
    pub async fn check_model(&self, model: &str) -> Result<ModelAvailability> {
        let url = self.build_url(model)?;
        let body = json!({ "contents": [{ "parts": [{ "text": "Test" }] }] });

        tracing::info!(%model, "Checking model over REST");
        let response = self.http_client.post(url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
            let available = !parsed.candidates.is_empty();
            return Ok(ModelAvailability {
                model: model.to_string(),
                available,
                status: None,
                detail: (!available).then(|| "response contained no candidates".to_string()),
            });
        }

        let envelope = GoogleErrorEnvelope::parse(&text);
        let api_status = envelope
            .as_ref()
            .and_then(GoogleErrorEnvelope::status)
            .or_else(|| ApiStatus::from_http(status.as_u16()));
        let detail = envelope
            .map(|e| e.error.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        tracing::debug!(%model, status = status.as_u16(), ?api_status, "Model unavailable");
        Ok(ModelAvailability {
            model: model.to_string(),
            available: false,
            status: api_status,
            detail: Some(detail),
        })
    }

    /// Check each model in turn, pausing between requests.
    ///
    /// A transport failure for one model is recorded and does not stop the rest.
    pub async fn check_models<S: AsRef<str>>(&self, models: &[S]) -> Vec<ModelAvailability> {
        let mut results = Vec::with_capacity(models.len());
        for (index, model) in models.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let model = model.as_ref();
            let availability = match self.check_model(model).await {
                Ok(availability) => availability,
                Err(e) => ModelAvailability {
                    model: model.to_string(),
                    available: false,
                    status: e.status(),
                    detail: Some(e.to_string()),
                },
            };
            results.push(availability);
        }
        results
    }
}
