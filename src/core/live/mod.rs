//! Live (bidirectional streaming) API client.
//!
//! A live session is a WebSocket to the model's `BidiGenerateContent`
//! endpoint. The first client message is `setup`; afterwards the client
//! streams `realtimeInput` (audio, video frames, text) and the server
//! answers with `serverContent` carrying audio/text parts and, when enabled,
//! transcriptions of both sides.
//!
//! # Example
//!
//! ```rust,ignore
//! use genai_workshop::core::live::{LiveConnectConfig, LiveSession, Modality};
//!
//! let config = LiveConnectConfig::default()
//!     .with_modalities(&[Modality::Audio])
//!     .with_transcriptions();
//! let session = LiveSession::connect(&client, "gemini-live-2.5-flash-preview", &config).await?;
//! let (mut sender, mut receiver) = session.split();
//!
//! while let Some(message) = receiver.receive().await {
//!     if let Some(text) = message?.output_transcript() {
//!         println!("{text}");
//!     }
//! }
//! ```

mod base;
mod messages;
mod session;

pub use base::{LiveConnectConfig, LiveError, LiveResult, Modality};
pub use messages::{
    AudioTranscriptionConfig, LiveClientMessage, LiveGenerationConfig, LiveRealtimeInput,
    LiveServerContent, LiveServerMessage, LiveSetup, Transcription,
};
pub use session::{LiveReceiver, LiveSender, LiveSession};
