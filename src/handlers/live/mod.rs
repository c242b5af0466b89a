//! Live relay server handlers
//!
//! - `GET /` - the sample's HTML page with the WebSocket URL filled in
//! - `GET /live` - WebSocket relay to the model's live API
//! - `GET /proxyVideo` - streams a sample video through this origin

mod dump;
mod handler;
mod home;
mod profile;
mod proxy_video;

pub use dump::{DUMP_PREFIX, dump_message};
pub use handler::{LiveMessageRoute, live_handler};
pub use home::home_handler;
pub use profile::{LiveProfile, OriginPolicy};
pub use proxy_video::proxy_video_handler;
