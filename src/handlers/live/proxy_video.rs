use axum::{
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error};

use crate::state::AppState;

/// Stream the configured sample video through this server.
///
/// The upstream status and `Content-Type` are passed on and
/// `Access-Control-Allow-Origin` is set to the configured origin. A transport
/// failure answers 500 `Error fetching video`.
pub async fn proxy_video_handler(State(state): State<Arc<AppState>>) -> Response {
    let url = &state.config.proxy_video_url;
    let upstream = match state.http.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            error!(%url, "Error fetching video: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error fetching video").into_response();
        }
    };
    debug!(%url, status = %upstream.status(), "Proxying video");

    let mut builder = Response::builder().status(upstream.status()).header(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        state.config.proxy_video_allowed_origin.as_str(),
    );
    if let Some(content_type) = upstream.headers().get(header::CONTENT_TYPE) {
        builder = builder.header(header::CONTENT_TYPE, content_type.clone());
    }

    match builder.body(Body::from_stream(upstream.bytes_stream())) {
        Ok(response) => response,
        Err(e) => {
            error!("Failed to build proxy response: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error fetching video").into_response()
        }
    }
}
