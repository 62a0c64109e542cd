//! Error types for live sessions and key checks.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Result type for probe operations.
pub type Result<T> = std::result::Result<T, LiveError>;

/// Errors that can occur while opening or driving a live session.
#[derive(Error, Debug)]
pub enum LiveError {
    /// WebSocket connection error (DNS, TLS, socket).
    #[error("WebSocket connection error: {0}")]
    ConnectionError(String),

    /// The server rejected the WebSocket upgrade with an HTTP status.
    #[error("Handshake rejected with HTTP {status}: {body}")]
    Handshake {
        /// HTTP status code of the rejection.
        status: u16,
        /// Response body, if any.
        body: String,
    },

    /// The server closed the session with a close frame.
    #[error("Session closed by server ({code}): {reason}")]
    Closed {
        /// WebSocket close code.
        code: u16,
        /// Close reason sent by the server.
        reason: String,
    },

    /// Server returned a structured error.
    #[error("Server error: {code} - {message}")]
    ServerError {
        /// Error code from the server (status name or numeric code).
        code: String,
        /// Error message from the server.
        message: String,
    },

    /// Malformed or unexpected frame.
    #[error("WebSocket message error: {0}")]
    MessageError(String),

    /// Session already closed.
    #[error("Session already closed")]
    SessionClosed,

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Timeout waiting for response.
    #[error("Timeout: no response within {0:?}")]
    Timeout(Duration),

    /// HTTP request error from the REST key check.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl LiveError {
    /// Create a new connection error.
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a new server error.
    pub fn server<S: Into<String>>(code: S, message: S) -> Self {
        Self::ServerError { code: code.into(), message: message.into() }
    }

    /// Create a new handshake rejection.
    pub fn handshake(status: u16, body: impl Into<String>) -> Self {
        Self::Handshake { status, body: body.into() }
    }

    /// Create a new close-frame error.
    pub fn closed(code: u16, reason: impl Into<String>) -> Self {
        Self::Closed { code, reason: reason.into() }
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a new protocol error.
    pub fn protocol<S: Into<String>>(msg: S) -> Self {
        Self::MessageError(msg.into())
    }

    /// Machine-readable status carried by this error, if the server sent one.
    pub fn status(&self) -> Option<ApiStatus> {
        match self {
            Self::Handshake { status, body } => {
                GoogleErrorEnvelope::parse(body).and_then(|e| e.status()).or_else(|| {
                    ApiStatus::from_http(*status).or_else(|| ApiStatus::from_reason(body))
                })
            }
            Self::Closed { reason, .. } => ApiStatus::from_reason(reason),
            Self::ServerError { code, message } => ApiStatus::from_code(code)
                .or_else(|| ApiStatus::from_reason(message)),
            Self::HttpError(e) => e.status().and_then(|s| ApiStatus::from_http(s.as_u16())),
            _ => None,
        }
    }
}

/// Canonical API status reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    /// The API key was rejected (`API_KEY_INVALID`).
    ApiKeyInvalid,
    /// No usable credential (`UNAUTHENTICATED`, HTTP 401).
    Unauthenticated,
    /// The credential lacks access (`PERMISSION_DENIED`, HTTP 403).
    PermissionDenied,
    /// The model or method does not exist (`NOT_FOUND`, HTTP 404).
    NotFound,
    /// Quota exhausted (`RESOURCE_EXHAUSTED`, HTTP 429).
    ResourceExhausted,
    /// Any other status name.
    Other(String),
}

impl ApiStatus {
    /// Map an HTTP status code.
    pub fn from_http(status: u16) -> Option<Self> {
        match status {
            401 => Some(Self::Unauthenticated),
            403 => Some(Self::PermissionDenied),
            404 => Some(Self::NotFound),
            429 => Some(Self::ResourceExhausted),
            _ => None,
        }
    }

    /// Map a status name or numeric code as it appears in error payloads.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        if let Ok(numeric) = code.parse::<u16>() {
            return Self::from_http(numeric);
        }
        match code.to_ascii_uppercase().as_str() {
            "" => None,
            "API_KEY_INVALID" => Some(Self::ApiKeyInvalid),
            "UNAUTHENTICATED" => Some(Self::Unauthenticated),
            "PERMISSION_DENIED" => Some(Self::PermissionDenied),
            "NOT_FOUND" => Some(Self::NotFound),
            "RESOURCE_EXHAUSTED" => Some(Self::ResourceExhausted),
            other => Some(Self::Other(other.to_string())),
        }
    }

    /// Recover a status from a free-text reason.
    ///
    /// Close frames carry only a human-readable reason, so this is the one
    /// place where message text is inspected.
    pub fn from_reason(reason: &str) -> Option<Self> {
        let lower = reason.to_ascii_lowercase();
        if reason.contains("API_KEY_INVALID") || lower.contains("api key not valid") {
            Some(Self::ApiKeyInvalid)
        } else if reason.contains("PERMISSION_DENIED") || lower.contains("permission") {
            Some(Self::PermissionDenied)
        } else if reason.contains("NOT_FOUND") || lower.contains("not found") {
            Some(Self::NotFound)
        } else if reason.contains("UNAUTHENTICATED") {
            Some(Self::Unauthenticated)
        } else if reason.contains("RESOURCE_EXHAUSTED") || lower.contains("quota") {
            Some(Self::ResourceExhausted)
        } else {
            None
        }
    }
}

/// Google API error envelope: `{"error": {"code", "message", "status", "details"}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorEnvelope {
    /// The error body.
    pub error: GoogleErrorBody,
}

/// Body of a [`GoogleErrorEnvelope`].
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorBody {
    /// HTTP status code.
    #[serde(default)]
    pub code: u16,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Canonical status name, e.g. `INVALID_ARGUMENT`.
    #[serde(default)]
    pub status: Option<String>,
    /// Structured details; `ErrorInfo` entries carry a `reason`.
    #[serde(default)]
    pub details: Vec<GoogleErrorDetail>,
}

/// One entry of `error.details`.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorDetail {
    /// Machine-readable reason, e.g. `API_KEY_INVALID`.
    #[serde(default)]
    pub reason: Option<String>,
}

impl GoogleErrorEnvelope {
    /// Parse an envelope, returning `None` for anything else.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Most specific status in the envelope: detail reason, then status name, then HTTP code.
    pub fn status(&self) -> Option<ApiStatus> {
        let from_reason = self
            .error
            .details
            .iter()
            .filter_map(|d| d.reason.as_deref())
            .find_map(|r| match ApiStatus::from_code(r) {
                Some(ApiStatus::Other(_)) | None => None,
                known => known,
            });

        from_reason
            .or_else(|| match self.error.status.as_deref().and_then(ApiStatus::from_code) {
                Some(ApiStatus::Other(_)) | None => None,
                known => known,
            })
            .or_else(|| ApiStatus::from_http(self.error.code))
            .or_else(|| self.error.status.as_deref().and_then(ApiStatus::from_code))
    }
}
