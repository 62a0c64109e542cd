//! Core LiveConnector trait definition.

use crate::config::SessionConfig;
use crate::credential::Credential;
use crate::error::Result;
use crate::session::BoxedSession;
use async_trait::async_trait;

/// A factory for live sessions.
///
/// Each provider implements this trait with its own connection logic.
/// Tests substitute a fake to drive the probe without a network.
///
/// # Example
///
/// ```rust,ignore
/// use live_probe::{Credential, LiveConnector, SessionConfig};
/// use live_probe::gemini::GeminiLiveConnector;
///
/// let connector = GeminiLiveConnector::new();
/// let credential = Credential::new(api_key, "GOOGLE_API_KEY");
/// let session = connector
///     .connect(&credential, SessionConfig::text_only("models/gemini-2.0-flash-live-001"))
///     .await?;
///
/// // Use the session...
///
/// session.close().await?;
/// ```
#[async_trait]
pub trait LiveConnector: Send + Sync {
    /// Provider name (e.g. "gemini").
    fn provider(&self) -> &str;

    /// Open a session and send any provider setup.
    async fn connect(&self, credential: &Credential, config: SessionConfig)
    -> Result<BoxedSession>;
}
