//! # live-probe
//!
//! Verify that an API credential can open a Gemini Live streaming session.
//!
//! A probe opens one session, sends one prompt, waits for the first text
//! chunk and closes the session. The outcome is classified into a small set
//! of [`FailureCategory`] values so callers can print targeted guidance.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────┐     connect      ┌──────────────────┐
//!   │    Prober    │ ───────────────► │  LiveConnector   │
//!   │ (one prompt) │                  │ (gemini / fake)  │
//!   └──────┬───────┘                  └────────┬─────────┘
//!          │ send_text / events / close        │
//!          └──────────────────────────► ┌──────▼─────────┐
//!                                       │  LiveSession   │
//!                                       └────────────────┘
//! ```
//!
//! ## Features
//!
//! - **Credential probe**: [`Prober`] with a configurable response deadline
//! - **Structured errors**: [`LiveError::status`] yields an [`ApiStatus`]
//! - **REST key check**: [`rest::KeyChecker`] probes `generateContent` per model
//! - **Device advisory**: [`devices`] checks audio (feature `desktop-audio`) and camera
//!
//! ## Example
//!
//! ```rust,ignore
//! use live_probe::{CredentialSource, ProbeConfig, Prober, DEFAULT_MODEL};
//! use live_probe::gemini::GeminiLiveConnector;
//!
//! #[tokio::main]
//! async fn main() {
//!     let credential = CredentialSource::default().resolve();
//!     let prober = Prober::new(GeminiLiveConnector::new(), ProbeConfig::default());
//!     let result = prober.probe(credential.as_ref(), DEFAULT_MODEL).await;
//!
//!     match result.response_text() {
//!         Some(text) => println!("connected: {text}"),
//!         None => println!("failed: {:?}", result.failure_category()),
//!     }
//! }
//! ```

pub mod config;
pub mod connector;
pub mod credential;
pub mod devices;
pub mod error;
pub mod events;
pub mod gemini;
pub mod probe;
pub mod rest;
pub mod session;

// Re-exports
pub use config::{DEFAULT_MODEL, DEFAULT_PROMPT, ProbeConfig, SessionConfig};
pub use connector::LiveConnector;
pub use credential::{Credential, CredentialSource, DEFAULT_ENV_VARS, mask_key};
pub use devices::{Capability, check_audio_devices, check_video_devices};
pub use error::{ApiStatus, LiveError, Result};
pub use events::ServerEvent;
pub use probe::{FailureCategory, ProbeOutcome, ProbeResult, Prober};
pub use rest::{DEFAULT_REST_MODELS, KeyChecker, ModelAvailability};
pub use session::{BoxedSession, LiveSession};
