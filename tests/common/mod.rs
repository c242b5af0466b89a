//! Shared helpers for integration tests: configs, clients and a mock live API.

#![allow(dead_code)]

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use url::Url;

use genai_workshop::ServerConfig;
use genai_workshop::config::{DEFAULT_PROXY_VIDEO_ALLOWED_ORIGIN, DEFAULT_PROXY_VIDEO_URL};
use genai_workshop::core::genai::{Backend, ClientConfig, GenAiClient};

pub const TEST_API_KEY: &str = "test-key";

/// Minimal relay configuration with dumps disabled.
pub fn server_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        port_defaulted: false,
        tls: None,
        google_api_key: Some(TEST_API_KEY.to_string()),
        use_vertexai: false,
        google_cloud_project: None,
        google_cloud_location: None,
        gemini_base_url: None,
        vertex_base_url: None,
        proxy_video_url: DEFAULT_PROXY_VIDEO_URL.to_string(),
        proxy_video_allowed_origin: DEFAULT_PROXY_VIDEO_ALLOWED_ORIGIN.to_string(),
        live_dump_dir: None,
        live_dump_enabled: false,
    }
}

pub fn gemini_client(base_url: &str) -> GenAiClient {
    GenAiClient::new(ClientConfig {
        backend: Backend::GeminiApi,
        api_key: Some(TEST_API_KEY.to_string().into()),
        base_url: Some(Url::parse(base_url).unwrap()),
        ..Default::default()
    })
    .unwrap()
}

/// Vertex AI in express mode: API key, no project.
pub fn vertex_express_client(base_url: &str) -> GenAiClient {
    GenAiClient::new(ClientConfig {
        backend: Backend::VertexAi,
        api_key: Some(TEST_API_KEY.to_string().into()),
        base_url: Some(Url::parse(base_url).unwrap()),
        ..Default::default()
    })
    .unwrap()
}

/// What the mock live API saw during the handshake.
#[derive(Debug, Clone, Default)]
pub struct Handshake {
    pub path: String,
    pub api_key: Option<String>,
}

/// A local stand-in for the live API.
///
/// It answers `setup` with a binary `setupComplete` frame, then replies to
/// every realtime input with one `serverContent` message carrying both
/// transcriptions.
pub struct MockLiveServer {
    /// REST-style root (`http://127.0.0.1:{port}/`)
    pub base_url: String,
    /// Every client message, parsed
    pub received: mpsc::UnboundedReceiver<Value>,
    pub handshake: Arc<Mutex<Handshake>>,
}

pub fn echo_reply(index: usize) -> Value {
    json!({
        "serverContent": {
            "inputTranscription": {"text": format!("heard {index}")},
            "outputTranscription": {"text": format!("guess {index}")},
            "modelTurn": {"parts": [{"text": format!("reply {index}")}]}
        }
    })
}

pub async fn start_mock_live_server() -> MockLiveServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    let handshake = Arc::new(Mutex::new(Handshake::default()));

    let seen = handshake.clone();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let tx = tx.clone();
            let seen = seen.clone();
            tokio::spawn(async move {
                let callback = |request: &Request, response: Response| {
                    let mut seen = seen.lock().unwrap();
                    seen.path = request.uri().path().to_string();
                    seen.api_key = request
                        .headers()
                        .get("x-goog-api-key")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    Ok::<_, ErrorResponse>(response)
                };
                let Ok(ws_stream) = accept_hdr_async(stream, callback).await else {
                    return;
                };
                let (mut write, mut read) = ws_stream.split();
                let mut replies = 0;

                while let Some(Ok(msg)) = read.next().await {
                    let value: Value = match msg {
                        Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
                        Message::Binary(data) => serde_json::from_slice(&data).unwrap(),
                        Message::Close(_) => break,
                        _ => continue,
                    };

                    let reply = if value.get("setup").is_some() {
                        Message::Binary(json!({"setupComplete": {}}).to_string().into_bytes().into())
                    } else {
                        replies += 1;
                        Message::Text(echo_reply(replies).to_string().into())
                    };
                    let _ = tx.send(value);
                    if write.send(reply).await.is_err() {
                        break;
                    }
                }
            });
        }
    });

    MockLiveServer {
        base_url: format!("http://{addr}/"),
        received: rx,
        handshake,
    }
}

/// A live API that completes setup and then hangs up.
///
/// Returns the REST-style root to point a client at.
pub async fn start_closing_live_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let Ok(mut ws_stream) = tokio_tungstenite::accept_async(stream).await else {
                    return;
                };
                while let Some(Ok(msg)) = ws_stream.next().await {
                    if matches!(msg, Message::Text(_) | Message::Binary(_)) {
                        break;
                    }
                }
                let setup_complete = json!({"setupComplete": {}}).to_string();
                if ws_stream.send(Message::Text(setup_complete.into())).await.is_ok() {
                    let _ = ws_stream.close(None).await;
                }
            });
        }
    });

    format!("http://{addr}/")
}
