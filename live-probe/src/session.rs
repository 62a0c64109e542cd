//! Core LiveSession trait definition.

use crate::error::Result;
use crate::events::ServerEvent;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// A bidirectional streaming session with a remote model.
///
/// # Example
///
/// ```rust,ignore
/// use live_probe::{LiveSession, ServerEvent};
///
/// async fn first_text(session: &dyn LiveSession) -> Result<Option<String>> {
///     session.send_text("Hello").await?;
///     while let Some(event) = session.next_event().await {
///         if let Some(text) = event?.text() {
///             return Ok(Some(text.to_string()));
///         }
///     }
///     Ok(None)
/// }
/// ```
#[async_trait]
pub trait LiveSession: Send + Sync {
    /// Get the session ID.
    fn session_id(&self) -> &str;

    /// Check if the session is currently connected.
    fn is_connected(&self) -> bool;

    /// Send a text message as one complete user turn.
    async fn send_text(&self, text: &str) -> Result<()>;

    /// Get the next event from the server.
    ///
    /// Returns `None` when the session is closed.
    async fn next_event(&self) -> Option<Result<ServerEvent>>;

    /// Get a stream of server events.
    fn events(&self) -> Pin<Box<dyn Stream<Item = Result<ServerEvent>> + Send + '_>> {
        Box::pin(futures::stream::unfold(self, |session| async move {
            let event = session.next_event().await?;
            Some((event, session))
        }))
    }

    /// Close the session gracefully.
    async fn close(&self) -> Result<()>;
}

/// A boxed session type for dynamic dispatch.
pub type BoxedSession = Box<dyn LiveSession>;
