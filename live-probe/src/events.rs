//! Server events emitted by a live session.
//!
//! Provider-specific frames are translated into this small unified set;
//! anything the probe does not act on becomes [`ServerEvent::Unknown`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events received from the live server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// The server accepted the setup message.
    SessionCreated {
        /// Raw setup acknowledgement.
        session: Value,
    },

    /// A chunk of model text.
    TextDelta {
        /// Text delta.
        delta: String,
    },

    /// The model finished its turn.
    TurnComplete,

    /// The server announced it will disconnect soon.
    GoAway {
        /// Time left before disconnect, as sent by the server.
        time_left: Option<String>,
    },

    /// The server reported an error in-band.
    Error {
        /// Error code or status name.
        code: Option<String>,
        /// Error message.
        message: String,
    },

    /// Any frame the session does not translate.
    Unknown,
}

impl ServerEvent {
    /// Non-empty text carried by this event, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::TextDelta { delta } if !delta.is_empty() => Some(delta),
            _ => None,
        }
    }
}
