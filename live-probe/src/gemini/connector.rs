//! Gemini Live connector implementation.

use crate::config::SessionConfig;
use crate::connector::LiveConnector;
use crate::credential::Credential;
use crate::error::Result;
use crate::session::BoxedSession;
use async_trait::async_trait;

use super::GEMINI_LIVE_URL;
use super::session::GeminiLiveSession;

/// Opens Gemini Live sessions.
///
/// # Example
///
/// ```rust,ignore
/// use live_probe::gemini::GeminiLiveConnector;
///
/// // Point at a local test server instead of Google.
/// let connector = GeminiLiveConnector::with_endpoint("ws://127.0.0.1:9000/live");
/// ```
#[derive(Debug, Clone)]
pub struct GeminiLiveConnector {
    endpoint: String,
}

impl GeminiLiveConnector {
    /// Create a connector for the public Live endpoint.
    pub fn new() -> Self {
        Self::with_endpoint(GEMINI_LIVE_URL)
    }

    /// Create a connector for a custom endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }

    /// Get the endpoint URL (without credential).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for GeminiLiveConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LiveConnector for GeminiLiveConnector {
    fn provider(&self) -> &str {
        "gemini"
    }

    async fn connect(
        &self,
        credential: &Credential,
        config: SessionConfig,
    ) -> Result<BoxedSession> {
        let session = GeminiLiveSession::connect(&self.endpoint, credential, config).await?;

        Ok(Box::new(session))
    }
}
