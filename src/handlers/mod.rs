//! HTTP and WebSocket request handlers
//!
//! - `live` - the live relay server used by the streaming samples

pub mod live;

pub use live::{home_handler, live_handler, proxy_video_handler};
