//! Live relay WebSocket handler
//!
//! Bridges a browser WebSocket to a model live session. Server messages are
//! forwarded to the browser as JSON text frames; browser frames are parsed as
//! realtime input and sent upstream. Either side ending tears down both.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::{select, time::Duration};
use tracing::{debug, error, info, warn};

use crate::core::live::{LiveReceiver, LiveRealtimeInput, LiveSender, LiveServerMessage, LiveSession};
use crate::state::AppState;

use super::dump::dump_message;
use super::profile::LiveProfile;

/// Channel buffer between the relay and the browser socket writer
const CHANNEL_BUFFER_SIZE: usize = 1024;

/// Maximum WebSocket frame size (10 MB)
const MAX_WS_FRAME_SIZE: usize = 10 * 1024 * 1024;

/// Maximum WebSocket message size (10 MB)
const MAX_WS_MESSAGE_SIZE: usize = 10 * 1024 * 1024;

/// How long the writer gets to flush the close frame during teardown
const CLOSE_GRACE_PERIOD: Duration = Duration::from_secs(1);

/// Frames queued for the browser socket
#[derive(Debug)]
pub enum LiveMessageRoute {
    /// A serialized server message
    Outgoing(String),
    Close,
}

/// Live relay WebSocket handler
///
/// Rejects the upgrade with 403 when the profile's origin policy refuses the
/// request, otherwise upgrades and starts relaying.
pub async fn live_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    if !state.profile.origin_policy.allows(&headers) {
        warn!(
            origin = ?headers.get(axum::http::header::ORIGIN),
            "Rejected live connection from foreign origin"
        );
        return (StatusCode::FORBIDDEN, "Origin not allowed").into_response();
    }

    info!(profile = state.profile.name, "Live WebSocket connection upgrade requested");

    ws.max_frame_size(MAX_WS_FRAME_SIZE)
        .max_message_size(MAX_WS_MESSAGE_SIZE)
        .on_upgrade(move |socket| handle_live_socket(socket, state))
}

/// Handle one relayed browser connection
async fn handle_live_socket(socket: WebSocket, app_state: Arc<AppState>) {
    let connection_id = uuid::Uuid::new_v4().to_string();
    info!(%connection_id, "Live WebSocket connection established");

    let (mut sender, mut receiver) = socket.split();
    let (message_tx, mut message_rx) = mpsc::channel::<LiveMessageRoute>(CHANNEL_BUFFER_SIZE);

    // Sender task for outgoing messages
    let mut sender_task = tokio::spawn(async move {
        while let Some(route) = message_rx.recv().await {
            let result = match route {
                LiveMessageRoute::Outgoing(json) => sender.send(Message::Text(json.into())).await,
                LiveMessageRoute::Close => {
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                }
            };

            if let Err(e) = result {
                error!("Failed to send WebSocket message: {}", e);
                break;
            }
        }
    });

    let profile = &app_state.profile;
    let model = profile.model_for(app_state.client.backend());
    let session =
        match LiveSession::connect(&app_state.client, model, &profile.connect_config).await {
            Ok(session) => session,
            Err(e) => {
                error!(%connection_id, model, "Failed to connect to live API: {}", e);
                close_client(&message_tx, &mut sender_task).await;
                return;
            }
        };
    info!(%connection_id, session_id = session.id(), model, "Live session opened");

    let (mut live_sender, live_receiver) = session.split();

    let mut upstream_task = tokio::spawn(forward_server_messages(
        live_receiver,
        message_tx.clone(),
        profile.clone(),
        app_state.config.live_dump_dir(),
        connection_id.clone(),
    ));

    loop {
        select! {
            msg_result = receiver.next() => {
                match msg_result {
                    Some(Ok(msg)) => {
                        if !forward_client_message(msg, &mut live_sender, &connection_id).await {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        warn!(%connection_id, "Live WebSocket read error: {}", e);
                        break;
                    }
                    None => {
                        info!(%connection_id, "Live WebSocket connection closed by client");
                        break;
                    }
                }
            }
            _ = &mut upstream_task => {
                info!(%connection_id, "Live API stream ended");
                break;
            }
        }
    }

    // Cleanup
    upstream_task.abort();
    if let Err(e) = live_sender.close().await {
        debug!(%connection_id, "Failed to close live session: {}", e);
    }
    close_client(&message_tx, &mut sender_task).await;

    info!(%connection_id, "Live WebSocket connection terminated");
}

/// Queue a close frame and give the writer a moment to flush it.
async fn close_client(
    message_tx: &mpsc::Sender<LiveMessageRoute>,
    sender_task: &mut tokio::task::JoinHandle<()>,
) {
    let _ = message_tx.try_send(LiveMessageRoute::Close);
    if tokio::time::timeout(CLOSE_GRACE_PERIOD, &mut *sender_task)
        .await
        .is_err()
    {
        sender_task.abort();
    }
}

/// Forward one browser frame upstream. Returns false when the relay must stop.
async fn forward_client_message(
    msg: Message,
    live_sender: &mut LiveSender,
    connection_id: &str,
) -> bool {
    let parsed: Result<LiveRealtimeInput, _> = match msg {
        Message::Text(text) => serde_json::from_str(text.as_str()),
        Message::Binary(data) => serde_json::from_slice(&data),
        Message::Close(_) => {
            info!(%connection_id, "Client sent close frame");
            return false;
        }
        Message::Ping(_) | Message::Pong(_) => return true,
    };

    let input = match parsed {
        Ok(input) => input,
        Err(e) => {
            error!(%connection_id, "Failed to parse realtime input: {}", e);
            return false;
        }
    };

    if let Err(e) = live_sender.send_realtime_input(input).await {
        error!(%connection_id, "Failed to send realtime input: {}", e);
        return false;
    }
    true
}

/// Relay server messages to the browser until either side ends.
async fn forward_server_messages(
    mut live_receiver: LiveReceiver,
    message_tx: mpsc::Sender<LiveMessageRoute>,
    profile: LiveProfile,
    dump_dir: Option<PathBuf>,
    connection_id: String,
) {
    while let Some(result) = live_receiver.receive().await {
        let message = match result {
            Ok(message) => message,
            Err(e) => {
                error!(%connection_id, "Failed to receive from live API: {}", e);
                break;
            }
        };

        log_transcripts(&profile, &message);

        let json = match serde_json::to_string(&message) {
            Ok(json) => json,
            Err(e) => {
                error!(%connection_id, "Failed to serialize server message: {}", e);
                break;
            }
        };

        if let Some(dir) = &dump_dir {
            let dir = dir.clone();
            let bytes = json.clone().into_bytes();
            match tokio::task::spawn_blocking(move || dump_message(&dir, &bytes)).await {
                Ok(Ok(path)) => debug!(%connection_id, path = %path.display(), "Dumped server message"),
                Ok(Err(e)) => warn!(%connection_id, "Failed to dump server message: {}", e),
                Err(e) => warn!(%connection_id, "Dump task failed: {}", e),
            }
        }

        if message_tx.send(LiveMessageRoute::Outgoing(json)).await.is_err() {
            debug!(%connection_id, "Browser writer gone, stopping relay");
            break;
        }
    }
}

fn log_transcripts(profile: &LiveProfile, message: &LiveServerMessage) {
    if let Some(text) = message.input_transcript() {
        info!("{}: {}", profile.input_label, text);
    }
    if let Some(text) = message.output_transcript() {
        info!("{}: {}", profile.output_label, text);
    }
}
