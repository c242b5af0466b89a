//! Live relay server route configuration

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers::live::{LiveProfile, home_handler, live_handler, proxy_video_handler};
use crate::state::AppState;

/// Create the live relay router
///
/// # Endpoints
///
/// - `GET /` - HTML page for the profile
/// - `GET /live` - WebSocket upgrade; browser frames are realtime input
///   (`{"mediaChunks":[{"mimeType":"audio/pcm;rate=16000","data":"..."}]}`),
///   server frames are live API messages as JSON text
/// - `GET /proxyVideo` - only when the profile enables it
pub fn create_live_router(profile: &LiveProfile) -> Router<Arc<AppState>> {
    let router = Router::new()
        .route("/", get(home_handler))
        .route("/live", get(live_handler));

    let router = if profile.proxy_video {
        router.route("/proxyVideo", get(proxy_video_handler))
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}
