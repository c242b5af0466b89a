//! Base types shared by every GenAI call: errors and backend selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Errors returned by the GenAI REST client.
#[derive(Debug, Error)]
pub enum GenAiError {
    /// Missing or inconsistent client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Credentials could not be obtained or applied
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The HTTP request could not be sent
    #[error("Request failed: {0}")]
    Request(String),

    /// The API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A server-sent event stream broke mid-way
    #[error("Stream error: {0}")]
    Stream(String),

    /// The model answered without any candidate content
    #[error("{0}")]
    EmptyResponse(String),

    /// The call is not available on the configured backend
    #[error("{0}")]
    UnsupportedBackend(String),
}

/// Result type for GenAI operations.
pub type GenAiResult<T> = Result<T, GenAiError>;

impl From<reqwest::Error> for GenAiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GenAiError::Decode(err.to_string())
        } else {
            GenAiError::Request(err.to_string())
        }
    }
}

// =============================================================================
// Backend
// =============================================================================

/// Which Google service the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Backend {
    /// Google AI Studio (generativelanguage.googleapis.com), API key auth
    #[default]
    #[serde(rename = "gemini-api")]
    GeminiApi,
    /// Vertex AI (aiplatform.googleapis.com), ADC or express-mode API key
    #[serde(rename = "vertex-ai")]
    VertexAi,
}

impl Backend {
    /// Pick the backend from the `GOOGLE_GENAI_USE_VERTEXAI` flag value.
    pub fn from_use_vertexai(flag: bool) -> Self {
        if flag {
            Self::VertexAi
        } else {
            Self::GeminiApi
        }
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeminiApi => "GeminiAPI",
            Self::VertexAi => "VertexAI",
        }
    }

    pub fn is_vertex(&self) -> bool {
        matches!(self, Self::VertexAi)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a boolean env flag the way the Google SDKs do (`true` or `1`, any case).
pub fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}
