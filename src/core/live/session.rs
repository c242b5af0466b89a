//! Live API WebSocket session.
//!
//! [`LiveSession::connect`] opens the socket, authenticates with the same
//! headers the REST client uses and sends the `setup` message. The session
//! can then be split so that one task sends realtime input while another
//! receives server messages.

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info};

use super::base::{LiveConnectConfig, LiveError, LiveResult};
use super::messages::{LiveClientMessage, LiveRealtimeInput, LiveServerMessage, LiveSetup};
use crate::core::genai::GenAiClient;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// =============================================================================
// Live Session
// =============================================================================

/// An open live session with the model.
pub struct LiveSession {
    id: String,
    model: String,
    sender: LiveSender,
    receiver: LiveReceiver,
}

impl LiveSession {
    /// Connect to the live endpoint of the client's backend and send `setup`.
    pub async fn connect(
        client: &GenAiClient,
        model: &str,
        config: &LiveConnectConfig,
    ) -> LiveResult<Self> {
        let client_config = client.config();
        let url = client_config.live_url()?;
        let model = client_config.model_resource(model);

        let mut request = url
            .as_str()
            .into_client_request()
            .map_err(|e| LiveError::ConnectionFailed(e.to_string()))?;
        let headers = client.auth().headers(client_config).await?;
        request.headers_mut().extend(headers);

        let (ws_stream, _response) = connect_async(request)
            .await
            .map_err(|e| LiveError::ConnectionFailed(e.to_string()))?;

        let id = uuid::Uuid::new_v4().to_string();
        info!(session_id = %id, %model, backend = %client.backend(), "Connected to live API");

        let (sink, stream) = ws_stream.split();
        let mut session = Self {
            id,
            model: model.clone(),
            sender: LiveSender { sink, closed: false },
            receiver: LiveReceiver { stream },
        };

        session
            .sender
            .send(&LiveClientMessage::setup(LiveSetup::new(model, config)))
            .await?;
        debug!(session_id = %session.id, "Sent setup message");

        Ok(session)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fully qualified model resource name sent in `setup`.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn send_realtime_input(&mut self, input: LiveRealtimeInput) -> LiveResult<()> {
        self.sender.send_realtime_input(input).await
    }

    pub async fn receive(&mut self) -> Option<LiveResult<LiveServerMessage>> {
        self.receiver.receive().await
    }

    pub async fn close(&mut self) -> LiveResult<()> {
        self.sender.close().await
    }

    /// Split into independently owned send and receive halves.
    pub fn split(self) -> (LiveSender, LiveReceiver) {
        (self.sender, self.receiver)
    }
}

// =============================================================================
// Halves
// =============================================================================

/// Write half of a [`LiveSession`].
pub struct LiveSender {
    sink: SplitSink<WsStream, Message>,
    closed: bool,
}

impl LiveSender {
    pub async fn send(&mut self, message: &LiveClientMessage) -> LiveResult<()> {
        if self.closed {
            return Err(LiveError::NotConnected);
        }
        let json = serde_json::to_string(message)?;
        self.sink
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| LiveError::WebSocketError(e.to_string()))
    }

    /// Forward browser input wrapped as `{"realtimeInput": ...}`.
    pub async fn send_realtime_input(&mut self, input: LiveRealtimeInput) -> LiveResult<()> {
        self.send(&LiveClientMessage::realtime_input(input)).await
    }

    /// Send a close frame. Closing twice is a no-op.
    pub async fn close(&mut self) -> LiveResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.sink
            .send(Message::Close(None))
            .await
            .map_err(|e| LiveError::WebSocketError(e.to_string()))?;
        self.sink
            .close()
            .await
            .map_err(|e| LiveError::WebSocketError(e.to_string()))
    }
}

/// Read half of a [`LiveSession`].
pub struct LiveReceiver {
    stream: SplitStream<WsStream>,
}

impl LiveReceiver {
    /// Next server message; `None` once the server closed the socket.
    ///
    /// The API sends JSON in both text and binary frames.
    pub async fn receive(&mut self) -> Option<LiveResult<LiveServerMessage>> {
        loop {
            let frame = match self.stream.next().await? {
                Ok(frame) => frame,
                Err(e) => return Some(Err(LiveError::WebSocketError(e.to_string()))),
            };

            let parsed = match frame {
                Message::Text(text) => serde_json::from_str(text.as_str()),
                Message::Binary(data) => serde_json::from_slice(&data),
                Message::Close(frame) => {
                    debug!(?frame, "Live API closed the session");
                    return None;
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
            };
            return Some(parsed.map_err(LiveError::from));
        }
    }
}
