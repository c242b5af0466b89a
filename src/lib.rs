pub mod cli;
pub mod config;
pub mod core;
pub mod handlers;
pub mod routes;
pub mod samples;
pub mod state;

// Re-export commonly used items for convenience
pub use crate::core::genai::{GenAiClient, GenAiError, GenAiResult};
pub use crate::core::live::{LiveError, LiveResult, LiveSession};
pub use config::ServerConfig;
pub use state::AppState;
