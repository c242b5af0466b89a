use axum::{
    extract::State,
    http::{HeaderMap, header},
    response::Html,
};
use std::sync::Arc;

use crate::state::AppState;

/// Placeholder in the page template replaced by the WebSocket URL
pub(crate) const WS_URL_PLACEHOLDER: &str = "{{.}}";

/// Serve the sample's page pointing its WebSocket at this host's `/live`.
///
/// Falls back to the configured listen address when no `Host` header is sent.
pub async fn home_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Html<String> {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| state.config.address());
    let scheme = if state.config.is_tls_enabled() {
        "wss"
    } else {
        "ws"
    };

    let ws_url = format!("{scheme}://{host}/live");
    Html(state.profile.page.replace(WS_URL_PLACEHOLDER, &ws_url))
}
