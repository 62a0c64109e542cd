//! Credential probe: one session, one prompt, one answer.

use crate::config::{ProbeConfig, SessionConfig};
use crate::connector::LiveConnector;
use crate::credential::Credential;
use crate::error::{ApiStatus, LiveError, Result};
use crate::events::ServerEvent;
use crate::session::LiveSession;
use futures::StreamExt;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Why a probe failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    /// No credential was configured.
    MissingCredential,
    /// The service rejected the key.
    InvalidKey,
    /// The key is valid but lacks access.
    PermissionDenied,
    /// The model is unknown or not available to this key.
    ModelNotFound,
    /// The stream ended before any text arrived.
    NoResponse,
    /// No text arrived before the deadline.
    TimedOut,
    /// Anything else.
    Unknown,
}

impl FailureCategory {
    /// Classify an error from the session layer.
    pub fn classify(error: &LiveError) -> Self {
        if let LiveError::Timeout(_) = error {
            return Self::TimedOut;
        }
        match error.status() {
            Some(ApiStatus::ApiKeyInvalid | ApiStatus::Unauthenticated) => Self::InvalidKey,
            Some(ApiStatus::PermissionDenied) => Self::PermissionDenied,
            Some(ApiStatus::NotFound) => Self::ModelNotFound,
            Some(ApiStatus::ResourceExhausted | ApiStatus::Other(_)) | None => Self::Unknown,
        }
    }

    /// Whether the fix is on the key's side (a new key, or access for it).
    pub fn is_credential_problem(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential | Self::InvalidKey | Self::PermissionDenied | Self::ModelNotFound
        )
    }

    /// Short label for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing credential",
            Self::InvalidKey => "invalid key",
            Self::PermissionDenied => "permission denied",
            Self::ModelNotFound => "model not found",
            Self::NoResponse => "no response",
            Self::TimedOut => "timed out",
            Self::Unknown => "unknown error",
        }
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single probe.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// The session answered with text.
    Connected {
        /// First non-empty text chunk.
        response_text: String,
    },
    /// The probe failed.
    Failed {
        /// Failure classification.
        category: FailureCategory,
        /// Rendered error, for display.
        error: String,
    },
}

/// Result of a verification attempt.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// Model that was probed.
    pub model: String,
    /// Wall-clock time spent.
    pub elapsed: Duration,
    /// What happened.
    pub outcome: ProbeOutcome,
}

impl ProbeResult {
    /// Whether the credential opened a working session.
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Connected { .. })
    }

    /// First response chunk, on success.
    pub fn response_text(&self) -> Option<&str> {
        match &self.outcome {
            ProbeOutcome::Connected { response_text } => Some(response_text),
            ProbeOutcome::Failed { .. } => None,
        }
    }

    /// Failure classification, on failure.
    pub fn failure_category(&self) -> Option<FailureCategory> {
        match &self.outcome {
            ProbeOutcome::Failed { category, .. } => Some(*category),
            ProbeOutcome::Connected { .. } => None,
        }
    }

    /// Rendered error, on failure.
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            ProbeOutcome::Failed { error, .. } => Some(error),
            ProbeOutcome::Connected { .. } => None,
        }
    }
}

/// Drives one probe against a [`LiveConnector`].
///
/// # Example
///
/// ```rust,ignore
/// use live_probe::{CredentialSource, ProbeConfig, Prober};
/// use live_probe::gemini::GeminiLiveConnector;
///
/// let prober = Prober::new(GeminiLiveConnector::new(), ProbeConfig::default());
/// let credential = CredentialSource::default().resolve();
/// let result = prober.probe(credential.as_ref(), "models/gemini-2.0-flash-live-001").await;
/// println!("{:?}", result.outcome);
/// ```
#[derive(Debug, Clone)]
pub struct Prober<C> {
    connector: C,
    config: ProbeConfig,
}

impl<C: LiveConnector> Prober<C> {
    /// Create a prober.
    pub fn new(connector: C, config: ProbeConfig) -> Self {
        Self { connector, config }
    }

    /// Get the probe configuration.
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Probe `model` with `credential`.
    ///
    /// Never returns an error: every failure is classified into the result.
    /// The configured deadline bounds connecting as well as the exchange.
    /// A session, once opened, is closed exactly once before returning.
    pub async fn probe(&self, credential: Option<&Credential>, model: &str) -> ProbeResult {
        let started = Instant::now();
        let outcome = self.run(credential, model).await;
        ProbeResult { model: model.to_string(), elapsed: started.elapsed(), outcome }
    }

    async fn run(&self, credential: Option<&Credential>, model: &str) -> ProbeOutcome {
        let Some(credential) = credential.filter(|c| !c.is_empty()) else {
            tracing::warn!("No credential configured, skipping connection");
            return ProbeOutcome::Failed {
                category: FailureCategory::MissingCredential,
                error: "no API key configured".to_string(),
            };
        };

        tracing::info!(
            provider = self.connector.provider(),
            model,
            credential_source = credential.source(),
            "Opening live session"
        );
        // One deadline covers the upgrade and the exchange.
        let deadline = self.config.response_timeout.map(|limit| (Instant::now() + limit, limit));

        let connect = self.connector.connect(credential, SessionConfig::text_only(model));
        let session = match within(deadline, connect).await {
            Ok(session) => session,
            Err(e) => return failed(e),
        };
        tracing::info!(session_id = session.session_id(), "Live session opened");

        let result = within(deadline, self.exchange(session.as_ref())).await;

        if let Err(e) = session.close().await {
            tracing::warn!(session_id = session.session_id(), error = %e, "Failed to close session");
        }

        match result {
            Ok(Some(response_text)) => ProbeOutcome::Connected { response_text },
            Ok(None) => ProbeOutcome::Failed {
                category: FailureCategory::NoResponse,
                error: "session ended before any text was received".to_string(),
            },
            Err(e) => failed(e),
        }
    }

    /// Send the prompt and wait for the first non-empty text chunk.
    async fn exchange(&self, session: &dyn LiveSession) -> Result<Option<String>> {
        session.send_text(&self.config.prompt).await?;
        tracing::debug!(prompt = %self.config.prompt, "Test prompt sent");

        let mut events = session.events();
        while let Some(event) = events.next().await {
            match event? {
                ServerEvent::Error { code, message } => {
                    return Err(LiveError::server(code.unwrap_or_default(), message));
                }
                event => {
                    if let Some(text) = event.text() {
                        return Ok(Some(text.to_string()));
                    }
                    tracing::debug!(?event, "Skipping non-text event");
                }
            }
        }

        Ok(None)
    }
}

async fn within<T, F>(deadline: Option<(Instant, Duration)>, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match deadline {
        Some((at, limit)) => tokio::time::timeout_at(at, future)
            .await
            .unwrap_or_else(|_| Err(LiveError::Timeout(limit))),
        None => future.await,
    }
}

fn failed(error: LiveError) -> ProbeOutcome {
    let category = FailureCategory::classify(&error);
    tracing::warn!(%category, error = %error, "Probe failed");
    ProbeOutcome::Failed { category, error: error.to_string() }
}
