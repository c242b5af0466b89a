//! Live API wire messages.
//!
//! Client messages are built by this crate (`setup`, `realtimeInput`).
//! Server messages are parsed only as deep as the relay needs; every field
//! not modelled here lands in a flattened map so that serialising a
//! [`LiveServerMessage`] reproduces what the server sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::base::{LiveConnectConfig, Modality};
use crate::core::genai::{Blob, Content};

// =============================================================================
// Client → Server
// =============================================================================

/// Top-level client envelope; exactly one field is set per message.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveClientMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup: Option<LiveSetup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realtime_input: Option<LiveRealtimeInput>,
}

impl LiveClientMessage {
    pub fn setup(setup: LiveSetup) -> Self {
        Self {
            setup: Some(setup),
            ..Default::default()
        }
    }

    pub fn realtime_input(input: LiveRealtimeInput) -> Self {
        Self {
            realtime_input: Some(input),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSetup {
    /// Fully qualified model resource name
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<LiveGenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_audio_transcription: Option<AudioTranscriptionConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_audio_transcription: Option<AudioTranscriptionConfig>,
}

impl LiveSetup {
    pub fn new(model: String, config: &LiveConnectConfig) -> Self {
        let generation_config = (!config.response_modalities.is_empty()).then(|| {
            LiveGenerationConfig {
                response_modalities: config.response_modalities.clone(),
            }
        });

        Self {
            model,
            system_instruction: config.system_instruction.clone(),
            generation_config,
            input_audio_transcription: config
                .input_audio_transcription
                .then_some(AudioTranscriptionConfig {}),
            output_audio_transcription: config
                .output_audio_transcription
                .then_some(AudioTranscriptionConfig {}),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveGenerationConfig {
    pub response_modalities: Vec<Modality>,
}

/// Enables transcription; the API takes an empty object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioTranscriptionConfig {}

/// Realtime input as sent by the browser page and forwarded to the model.
///
/// Unknown fields are ignored on parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveRealtimeInput {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media_chunks: Vec<Blob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Blob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Blob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_start: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_end: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_stream_end: Option<bool>,
}

impl LiveRealtimeInput {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// =============================================================================
// Server → Client
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveServerMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_complete: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_content: Option<LiveServerContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LiveServerMessage {
    /// Non-empty transcription of what the user said.
    pub fn input_transcript(&self) -> Option<&str> {
        self.server_content
            .as_ref()
            .and_then(|c| c.input_transcription.as_ref())
            .and_then(Transcription::text)
    }

    /// Non-empty transcription of what the model said.
    pub fn output_transcript(&self) -> Option<&str> {
        self.server_content
            .as_ref()
            .and_then(|c| c.output_transcription.as_ref())
            .and_then(Transcription::text)
    }

    pub fn is_turn_complete(&self) -> bool {
        self.server_content
            .as_ref()
            .and_then(|c| c.turn_complete)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveServerContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_turn: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_complete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interrupted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_complete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_transcription: Option<Transcription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_transcription: Option<Transcription>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transcription {
    fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}
