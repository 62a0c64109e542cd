//! Configuration types for live sessions and probes.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Live model probed when none is given.
pub const DEFAULT_MODEL: &str = "models/gemini-2.0-flash-live-001";

/// Prompt sent as the single test turn.
pub const DEFAULT_PROMPT: &str = "Hello, please respond with 'Connection successful!'";

/// Default deadline for the send/receive exchange.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for opening a live session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Model to connect to, e.g. `models/gemini-2.0-flash-live-001`.
    pub model: String,

    /// Output modalities, e.g. `["TEXT"]`.
    pub modalities: Vec<String>,
}

impl SessionConfig {
    /// Create a text-only session config for `model`.
    pub fn text_only(model: impl Into<String>) -> Self {
        Self { model: model.into(), modalities: vec!["TEXT".to_string()] }
    }
}

/// Configuration for a credential probe.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Text sent as the single user turn.
    pub prompt: String,

    /// Deadline for connect, send and the first text event. `None` waits indefinitely.
    pub response_timeout: Option<Duration>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { prompt: DEFAULT_PROMPT.to_string(), response_timeout: Some(DEFAULT_RESPONSE_TIMEOUT) }
    }
}

impl ProbeConfig {
    /// Create a config with default prompt and timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the test prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the response deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = Some(timeout);
        self
    }

    /// Wait for the first response without a deadline.
    pub fn without_timeout(mut self) -> Self {
        self.response_timeout = None;
        self
    }
}
