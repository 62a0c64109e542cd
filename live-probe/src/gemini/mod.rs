//! Gemini Live API provider.
//!
//! Connects to Google's WebSocket-based Live API
//! (`BidiGenerateContent`). The API key travels as the `key` query
//! parameter; the first frame is a `setup` message naming the model and
//! the response modalities.
//!
//! # Example
//!
//! ```rust,ignore
//! use live_probe::gemini::GeminiLiveConnector;
//! use live_probe::{Credential, LiveConnector, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credential = Credential::new(std::env::var("GOOGLE_API_KEY")?, "GOOGLE_API_KEY");
//!     let session = GeminiLiveConnector::new()
//!         .connect(&credential, SessionConfig::text_only("models/gemini-2.0-flash-live-001"))
//!         .await?;
//!
//!     session.send_text("Hello").await?;
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

mod connector;
mod session;

pub use connector::GeminiLiveConnector;
pub use session::GeminiLiveSession;

/// Gemini Live API WebSocket URL (v1beta).
pub const GEMINI_LIVE_URL: &str = "wss://generativelanguage.googleapis.com/ws/google.ai.generativelanguage.v1beta.GenerativeService.BidiGenerateContent";
