//! Shared state for the live relay server.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::genai::GenAiClient;
use crate::handlers::live::LiveProfile;

/// Application state shared by every handler of the relay server.
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
    /// Backend client; live sessions reuse its config and auth headers
    pub client: GenAiClient,
    /// Which sample's relay this server runs
    pub profile: LiveProfile,
    /// Plain HTTP client for `/proxyVideo`
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: ServerConfig, client: GenAiClient, profile: LiveProfile) -> Arc<Self> {
        Arc::new(Self {
            config,
            client,
            profile,
            http: reqwest::Client::new(),
        })
    }
}
