use crate::config::SessionConfig;
use crate::credential::Credential;
use crate::error::{LiveError, Result};
use crate::events::ServerEvent;
use crate::session::LiveSession;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use url::Url;

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;
type WsSink = futures::stream::SplitSink<WsStream, Message>;
type WsSource = futures::stream::SplitStream<WsStream>;

/// Gemini-specific client message format.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiClientMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    setup: Option<GeminiSetup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_content: Option<GeminiClientContent>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiClientContent {
    turns: Vec<GeminiTurn>,
    turn_complete: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTurn {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiSetup {
    model: String,
    generation_config: Value,
}

#[derive(Debug, Clone, Serialize)]
struct GeminiPart {
    text: String,
}

/// Gemini Live session.
///
/// Manages a WebSocket connection to Google's Gemini Live API.
pub struct GeminiLiveSession {
    session_id: String,
    connected: Arc<AtomicBool>,
    sender: Arc<Mutex<WsSink>>,
    receiver: Arc<Mutex<WsSource>>,
}

impl GeminiLiveSession {
    /// Connect to the Live endpoint and send the setup message.
    pub async fn connect(
        endpoint: &str,
        credential: &Credential,
        config: SessionConfig,
    ) -> Result<Self> {
        let mut url = Url::parse(endpoint)
            .map_err(|e| LiveError::config(format!("Invalid endpoint '{}': {}", endpoint, e)))?;
        url.query_pairs_mut().append_pair("key", credential.expose());

        let request = url.as_str().into_client_request().map_err(|e| {
            LiveError::connection(format!("Failed to create client request: {}", e))
        })?;

        tracing::info!(%endpoint, model = %config.model, "Connecting to Gemini Live");
        let (stream, _response) = connect_async(request).await.map_err(handshake_error)?;
        let (sink, source) = stream.split();

        let session = Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            connected: Arc::new(AtomicBool::new(true)),
            sender: Arc::new(Mutex::new(sink)),
            receiver: Arc::new(Mutex::new(source)),
        };

        session.send_setup(config).await?;

        Ok(session)
    }

    /// Send initial setup message.
    async fn send_setup(&self, config: SessionConfig) -> Result<()> {
        let setup = GeminiClientMessage {
            setup: Some(GeminiSetup {
                model: config.model.clone(),
                generation_config: json!({ "responseModalities": config.modalities }),
            }),
            client_content: None,
        };

        tracing::info!(model_id = %config.model, session_id = %self.session_id, "Sending setup message");
        self.send_raw(&setup).await
    }

    /// Send a raw message.
    async fn send_raw<T: Serialize>(&self, value: &T) -> Result<()> {
        let msg = serde_json::to_string(value)
            .map_err(|e| LiveError::protocol(format!("JSON serialize error: {}", e)))?;
        tracing::debug!(raw = %msg, "Sending frame");

        let mut sender = self.sender.lock().await;
        sender
            .send(Message::Text(msg.into()))
            .await
            .map_err(|e| LiveError::connection(format!("Send error: {}", e)))?;

        Ok(())
    }

    /// Receive and parse the next message.
    async fn receive_raw(&self) -> Option<Result<ServerEvent>> {
        let mut receiver = self.receiver.lock().await;

        match receiver.next().await {
            Some(Ok(Message::Text(text))) => Some(translate_gemini_event(&text)),
            Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                Ok(text) => Some(translate_gemini_event(&text)),
                Err(e) => Some(Err(LiveError::protocol(format!(
                    "Invalid UTF-8 in binary message: {}",
                    e
                )))),
            },
            Some(Ok(Message::Close(frame))) => {
                self.connected.store(false, Ordering::SeqCst);
                match frame {
                    Some(frame) if frame.code != CloseCode::Normal => {
                        let code = u16::from(frame.code);
                        let reason = frame.reason.to_string();
                        tracing::warn!(code, %reason, "Server closed session");
                        Some(Err(LiveError::closed(code, reason)))
                    }
                    _ => None,
                }
            }
            Some(Ok(_)) => Some(Ok(ServerEvent::Unknown)),
            Some(Err(e)) => {
                self.connected.store(false, Ordering::SeqCst);
                Some(Err(LiveError::connection(format!("Receive error: {}", e))))
            }
            None => {
                self.connected.store(false, Ordering::SeqCst);
                None
            }
        }
    }
}

/// Map a failed upgrade into a structured error.
fn handshake_error(err: tokio_tungstenite::tungstenite::Error) -> LiveError {
    use tokio_tungstenite::tungstenite::Error as WsError;

    match err {
        WsError::Http(response) => {
            let status = response.status().as_u16();
            let body = response
                .body()
                .as_deref()
                .map(|b| String::from_utf8_lossy(b).into_owned())
                .unwrap_or_default();
            LiveError::handshake(status, body)
        }
        other => LiveError::connection(format!("WebSocket connect error: {}", other)),
    }
}

/// Translate Gemini-specific frames to unified events.
fn translate_gemini_event(raw: &str) -> Result<ServerEvent> {
    tracing::debug!(%raw, "Translating Gemini event");
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| LiveError::protocol(format!("Parse error: {}, raw: {}", e, raw)))?;

    if value.get("setupComplete").is_some() {
        return Ok(ServerEvent::SessionCreated { session: value });
    }

    if let Some(error) = value.get("error") {
        let code = error
            .get("status")
            .and_then(|s| s.as_str())
            .map(str::to_string)
            .or_else(|| error.get("code").map(|c| c.to_string()));
        let message =
            error.get("message").and_then(|m| m.as_str()).unwrap_or_default().to_string();
        return Ok(ServerEvent::Error { code, message });
    }

    if let Some(content) = value.get("serverContent") {
        if let Some(parts) =
            content.get("modelTurn").and_then(|t| t.get("parts")).and_then(|p| p.as_array())
        {
            // Parts may lead with empty text or non-text data.
            let text = parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                .find(|text| !text.is_empty());
            if let Some(text) = text {
                return Ok(ServerEvent::TextDelta { delta: text.to_string() });
            }
        }

        if content.get("turnComplete").and_then(|t| t.as_bool()).unwrap_or(false) {
            return Ok(ServerEvent::TurnComplete);
        }
    }

    if let Some(go_away) = value.get("goAway") {
        let time_left = go_away.get("timeLeft").and_then(|t| t.as_str()).map(str::to_string);
        return Ok(ServerEvent::GoAway { time_left });
    }

    Ok(ServerEvent::Unknown)
}

#[async_trait]
impl LiveSession for GeminiLiveSession {
    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn send_text(&self, text: &str) -> Result<()> {
        if !self.is_connected() {
            return Err(LiveError::SessionClosed);
        }

        let msg = GeminiClientMessage {
            setup: None,
            client_content: Some(GeminiClientContent {
                turns: vec![GeminiTurn {
                    role: "user".to_string(),
                    parts: vec![GeminiPart { text: text.to_string() }],
                }],
                turn_complete: true,
            }),
        };
        self.send_raw(&msg).await
    }

    async fn next_event(&self) -> Option<Result<ServerEvent>> {
        self.receive_raw().await
    }

    async fn close(&self) -> Result<()> {
        // A server-initiated close has already been answered by tungstenite.
        if !self.connected.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        let mut sender = self.sender.lock().await;
        sender
            .send(Message::Close(None))
            .await
            .map_err(|e| LiveError::connection(format!("Close error: {}", e)))?;

        Ok(())
    }
}

impl std::fmt::Debug for GeminiLiveSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiLiveSession")
            .field("session_id", &self.session_id)
            .field("connected", &self.connected.load(Ordering::SeqCst))
            .finish()
    }
}
