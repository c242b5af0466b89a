//! GenAI REST client used by the text, multimodal and image samples.
//!
//! Talks to either Google AI Studio (API key) or Vertex AI (Application
//! Default Credentials, or an API key in express mode). Only the calls the
//! samples need are covered:
//!
//! - `generateContent` and `streamGenerateContent` (SSE)
//! - Imagen `predict` for generation and upscaling

mod auth;
mod base;
mod client;
mod config;
mod messages;

pub use auth::{API_KEY_HEADER, AuthHeaders};
pub use base::{Backend, GenAiError, GenAiResult, parse_flag};
pub use client::{GenAiClient, GenerateContentStream};
pub use config::{
    AuthMode, ClientConfig, GEMINI_API_BASE_URL, GEMINI_API_VERSION, GEMINI_LIVE_PATH,
    VERTEX_API_VERSION, VERTEX_GLOBAL_BASE_URL, VERTEX_LIVE_PATH,
};
pub use messages::{
    Blob, Candidate, Content, EMPTY_RESPONSE, GenerateContentRequest, GenerateContentResponse,
    GenerateImagesConfig, GenerateImagesResponse, GeneratedImage, Image, Part,
    UpscaleImageConfig, UpscaleImageResponse, check_not_empty, text_of,
};
