//! Base types for live sessions: errors and connect configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::core::genai::{Content, GenAiError, Part};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur on a live session.
#[derive(Debug, Error)]
pub enum LiveError {
    /// Connection to the live endpoint failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// WebSocket error
    #[error("WebSocket error: {0}")]
    WebSocketError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Not connected
    #[error("Not connected")]
    NotConnected,
}

/// Result type for live operations.
pub type LiveResult<T> = Result<T, LiveError>;

impl From<GenAiError> for LiveError {
    fn from(err: GenAiError) -> Self {
        match err {
            GenAiError::Authentication(msg) => LiveError::AuthenticationFailed(msg),
            GenAiError::InvalidConfiguration(msg) => LiveError::InvalidConfiguration(msg),
            other => LiveError::ConnectionFailed(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for LiveError {
    fn from(err: serde_json::Error) -> Self {
        LiveError::SerializationError(err.to_string())
    }
}

// =============================================================================
// Configuration Types
// =============================================================================

/// Response modality requested from the live model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modality {
    Text,
    Audio,
}

impl Modality {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Audio => "AUDIO",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Session options sent in the `setup` message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveConnectConfig {
    pub system_instruction: Option<Content>,
    /// Left empty, the model picks its default modality
    pub response_modalities: Vec<Modality>,
    pub input_audio_transcription: bool,
    pub output_audio_transcription: bool,
}

impl LiveConnectConfig {
    /// Set a single-part text system instruction.
    pub fn with_system_text(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = Some(Content::new(vec![Part::from_text(text)]));
        self
    }

    pub fn with_system_instruction(mut self, content: Content) -> Self {
        self.system_instruction = Some(content);
        self
    }

    pub fn with_modalities(mut self, modalities: &[Modality]) -> Self {
        self.response_modalities = modalities.to_vec();
        self
    }

    /// Ask for both input and output audio transcriptions.
    pub fn with_transcriptions(mut self) -> Self {
        self.input_audio_transcription = true;
        self.output_audio_transcription = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modality_serde() {
        assert_eq!(serde_json::to_string(&Modality::Audio).unwrap(), "\"AUDIO\"");
        assert_eq!(Modality::Text.to_string(), "TEXT");
    }

    #[test]
    fn test_builder() {
        let config = LiveConnectConfig::default()
            .with_system_text("be brief")
            .with_modalities(&[Modality::Audio])
            .with_transcriptions();

        assert_eq!(config.response_modalities, vec![Modality::Audio]);
        assert!(config.input_audio_transcription);
        assert!(config.output_audio_transcription);
        let instruction = config.system_instruction.unwrap();
        assert_eq!(instruction.parts[0].text.as_deref(), Some("be brief"));
    }

    #[test]
    fn test_error_conversion() {
        let err: LiveError = GenAiError::Authentication("no ADC".to_string()).into();
        assert!(matches!(err, LiveError::AuthenticationFailed(_)));

        let err: LiveError = GenAiError::InvalidConfiguration("bad".to_string()).into();
        assert!(matches!(err, LiveError::InvalidConfiguration(_)));
    }
}
