//! Live session tests against a local mock of the live API.

mod common;

use std::time::Duration;

use serde_json::json;
use tokio::time::timeout;

use common::{TEST_API_KEY, gemini_client, start_mock_live_server, vertex_express_client};
use genai_workshop::core::genai::Blob;
use genai_workshop::core::live::{LiveConnectConfig, LiveRealtimeInput, LiveSession, Modality};

const WAIT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_connect_sends_setup_with_api_key() {
    let mut mock = start_mock_live_server().await;
    let client = gemini_client(&mock.base_url);
    let config = LiveConnectConfig::default()
        .with_system_text("Answer briefly.")
        .with_modalities(&[Modality::Audio])
        .with_transcriptions();

    let mut session = LiveSession::connect(&client, "gemini-live-2.5-flash-preview", &config)
        .await
        .unwrap();
    assert_eq!(session.model(), "models/gemini-live-2.5-flash-preview");
    assert!(!session.id().is_empty());

    let setup = timeout(WAIT, mock.received.recv()).await.unwrap().unwrap();
    assert_eq!(
        setup,
        json!({
            "setup": {
                "model": "models/gemini-live-2.5-flash-preview",
                "systemInstruction": {"parts": [{"text": "Answer briefly."}]},
                "generationConfig": {"responseModalities": ["AUDIO"]},
                "inputAudioTranscription": {},
                "outputAudioTranscription": {}
            }
        })
    );

    let handshake = mock.handshake.lock().unwrap().clone();
    assert_eq!(
        handshake.path,
        "/ws/google.ai.generativelanguage.v1beta.GenerativeService.BidiGenerateContent"
    );
    assert_eq!(handshake.api_key.as_deref(), Some(TEST_API_KEY));

    // setupComplete arrives as a binary frame
    let first = timeout(WAIT, session.receive()).await.unwrap().unwrap().unwrap();
    assert!(first.setup_complete.is_some());

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_realtime_input_round_trip() {
    let mut mock = start_mock_live_server().await;
    let client = gemini_client(&mock.base_url);

    let session = LiveSession::connect(&client, "gemini-live-2.5-flash-preview", &LiveConnectConfig::default())
        .await
        .unwrap();
    let (mut sender, mut receiver) = session.split();
    let _setup = timeout(WAIT, mock.received.recv()).await.unwrap().unwrap();

    let input = LiveRealtimeInput {
        media_chunks: vec![Blob {
            mime_type: "audio/pcm;rate=16000".to_string(),
            data: "AAAA".to_string(),
        }],
        ..Default::default()
    };
    sender.send_realtime_input(input).await.unwrap();

    let forwarded = timeout(WAIT, mock.received.recv()).await.unwrap().unwrap();
    assert_eq!(
        forwarded,
        json!({
            "realtimeInput": {
                "mediaChunks": [{"mimeType": "audio/pcm;rate=16000", "data": "AAAA"}]
            }
        })
    );

    let setup_complete = timeout(WAIT, receiver.receive()).await.unwrap().unwrap().unwrap();
    assert!(setup_complete.setup_complete.is_some());

    let reply = timeout(WAIT, receiver.receive()).await.unwrap().unwrap().unwrap();
    assert_eq!(reply.input_transcript(), Some("heard 1"));
    assert_eq!(reply.output_transcript(), Some("guess 1"));

    sender.close().await.unwrap();
    // Closing twice is fine
    sender.close().await.unwrap();
    assert!(sender.send_realtime_input(LiveRealtimeInput::default()).await.is_err());
}

#[tokio::test]
async fn test_vertex_express_uses_vertex_live_path() {
    let mut mock = start_mock_live_server().await;
    let client = vertex_express_client(&mock.base_url);

    let mut session = LiveSession::connect(
        &client,
        "gemini-2.0-flash-live-preview-04-09",
        &LiveConnectConfig::default(),
    )
    .await
    .unwrap();

    let setup = timeout(WAIT, mock.received.recv()).await.unwrap().unwrap();
    assert_eq!(
        setup["setup"]["model"],
        "publishers/google/models/gemini-2.0-flash-live-preview-04-09"
    );
    assert!(setup["setup"].get("generationConfig").is_none());

    let handshake = mock.handshake.lock().unwrap().clone();
    assert_eq!(
        handshake.path,
        "/ws/google.cloud.aiplatform.v1beta1.LlmInferenceService.BidiGenerateContent"
    );
    assert_eq!(handshake.api_key.as_deref(), Some(TEST_API_KEY));

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_connect_failure() {
    // Nothing listens on port 1
    let client = gemini_client("http://127.0.0.1:1/");
    let result = LiveSession::connect(&client, "gemini-live-2.5-flash-preview", &LiveConnectConfig::default()).await;
    assert!(result.is_err());
}
