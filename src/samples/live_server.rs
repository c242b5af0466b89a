//! Live relay server samples.
//!
//! Sample 7 relays a voice (and optional video) conversation with a native
//! audio model. Sample 8 runs the "forbidden words" guessing game. Both serve
//! a page at `/` that talks to `/live`.

use anyhow::anyhow;
use async_trait::async_trait;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use http::HeaderValue;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

use super::{Sample, SampleContext};
use crate::core::genai::Content;
use crate::core::live::{LiveConnectConfig, Modality};
use crate::handlers::live::{LiveProfile, OriginPolicy};
use crate::routes;
use crate::state::AppState;

pub const GUESSING_GAME_PROMPT: &str = r#"You are playing the "guessing word" game where the human player with their microphone
is describing a word. Your job is to listen to the description and say only one word as
your guess, every few seconds. You have only 3 guesses.
Don't say anything else than the word you're guessing."#;

const LIVE_STREAMING_PAGE: &str = include_str!("../../assets/live_streaming.html");
const FORBIDDEN_WORDS_PAGE: &str = include_str!("../../assets/forbidden_words.html");

/// Voice conversation with a native audio model.
pub fn streaming_profile() -> LiveProfile {
    LiveProfile {
        name: "live-streaming",
        vertex_model: "gemini-live-2.5-flash-preview-native-audio-09-2025",
        gemini_model: "gemini-2.5-flash-native-audio-preview-09-2025",
        connect_config: LiveConnectConfig::default()
            .with_system_instruction(Content::new(Vec::new()))
            .with_modalities(&[Modality::Audio])
            .with_transcriptions(),
        input_label: "Input Transcript",
        output_label: "Output Transcript",
        page: LIVE_STREAMING_PAGE,
        origin_policy: OriginPolicy::Any,
        proxy_video: true,
    }
}

/// The model guesses the word the player describes.
pub fn forbidden_words_profile() -> LiveProfile {
    LiveProfile {
        name: "forbidden-words",
        vertex_model: "gemini-2.0-flash-live-preview-04-09",
        gemini_model: "gemini-live-2.5-flash-preview",
        connect_config: LiveConnectConfig::default()
            .with_system_text(GUESSING_GAME_PROMPT)
            .with_transcriptions(),
        input_label: "Human player says",
        output_label: "Model player guesses",
        page: FORBIDDEN_WORDS_PAGE,
        origin_policy: OriginPolicy::SameHost,
        proxy_video: false,
    }
}

/// Full application for a relay server: routes, state and security headers.
pub fn create_app(state: Arc<AppState>) -> Router {
    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    routes::live::create_live_router(&state.profile)
        .with_state(state)
        .layer(security_headers)
}

/// Bind the configured address and serve until the process stops.
pub async fn serve(state: Arc<AppState>) -> anyhow::Result<()> {
    let config = &state.config;
    if config.port_defaulted {
        info!("defaulting to port {}", config.port);
    }

    let address = config.address();
    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;
    let tls = config.tls.clone();

    info!("listening on port {}", config.port);
    let app = create_app(state.clone());

    if let Some(tls) = tls {
        let rustls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
            .await
            .map_err(|e| {
                anyhow!(
                    "Failed to load TLS certificates from {} and {}: {}",
                    tls.cert_path.display(),
                    tls.key_path.display(),
                    e
                )
            })?;

        axum_server::bind_rustls(socket_addr, rustls_config)
            .serve(app.into_make_service())
            .await
            .map_err(|e| anyhow!("TLS server error: {}", e))?;
    } else {
        let listener = TcpListener::bind(&socket_addr).await?;
        axum::serve(listener, app.into_make_service()).await?;
    }

    Ok(())
}

/// Samples 7 and 8.
pub struct LiveServer {
    profile: LiveProfile,
    title: &'static str,
}

impl LiveServer {
    pub fn streaming() -> Self {
        Self {
            profile: streaming_profile(),
            title: "Live streaming server",
        }
    }

    pub fn forbidden_words() -> Self {
        Self {
            profile: forbidden_words_profile(),
            title: "Forbidden words game",
        }
    }

    pub fn profile(&self) -> &LiveProfile {
        &self.profile
    }
}

#[async_trait]
impl Sample for LiveServer {
    fn name(&self) -> &'static str {
        self.title
    }

    async fn run(&self, ctx: &SampleContext, _out: &mut (dyn Write + Send)) -> anyhow::Result<()> {
        let state = AppState::new(ctx.config.clone(), ctx.client.clone(), self.profile.clone());
        serve(state).await
    }
}
