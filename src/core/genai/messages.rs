//! Request and response envelopes of the Gemini and Imagen REST APIs.
//!
//! Field names follow the vendor JSON (camelCase). Inline media travels as
//! base64 text; [`Blob::from_bytes`] and [`Blob::decode`] convert at the edge.

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use super::base::{GenAiError, GenAiResult};

/// Message returned when a response carries no candidate content.
pub const EMPTY_RESPONSE: &str = "empty response from model";

// =============================================================================
// Content
// =============================================================================

/// Inline media: MIME type plus base64 payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

impl Blob {
    pub fn from_bytes(data: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(data),
        }
    }

    pub fn decode(&self) -> GenAiResult<Vec<u8>> {
        STANDARD
            .decode(&self.data)
            .map_err(|e| GenAiError::Decode(format!("invalid base64 in {}: {e}", self.mime_type)))
    }
}

/// One piece of a [`Content`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
    /// Part kinds the samples do not use (function calls, code, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Part {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn from_bytes(data: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            inline_data: Some(Blob::from_bytes(data, mime_type)),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn new(parts: Vec<Part>) -> Self {
        Self { role: None, parts }
    }

    /// A single user turn holding one text part.
    pub fn text(text: impl Into<String>) -> Vec<Content> {
        vec![Self {
            role: Some("user".to_string()),
            parts: vec![Part::from_text(text)],
        }]
    }
}

// =============================================================================
// generateContent
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Fails unless the first candidate has at least one part.
pub fn check_not_empty(response: &GenerateContentResponse) -> GenAiResult<()> {
    let has_parts = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .is_some_and(|content| !content.parts.is_empty());

    if has_parts {
        Ok(())
    } else {
        Err(GenAiError::EmptyResponse(EMPTY_RESPONSE.to_string()))
    }
}

/// Text of the first part of the first candidate.
pub fn text_of(response: &GenerateContentResponse) -> GenAiResult<&str> {
    check_not_empty(response)?;
    Ok(response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.as_deref())
        .unwrap_or_default())
}

// =============================================================================
// Imagen predict
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateImagesConfig {
    pub number_of_images: u32,
    pub output_mime_type: Option<String>,
    pub include_rai_reason: bool,
}

impl Default for GenerateImagesConfig {
    fn default() -> Self {
        Self {
            number_of_images: 1,
            output_mime_type: None,
            include_rai_reason: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpscaleImageConfig {
    pub output_mime_type: Option<String>,
    pub include_rai_reason: bool,
}

/// An image sent to or returned by Imagen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_base64_encoded: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl Image {
    pub fn from_bytes(data: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            bytes_base64_encoded: Some(STANDARD.encode(data)),
            mime_type: Some(mime_type.into()),
        }
    }

    /// Decoded bytes, `None` when the image was filtered out.
    pub fn image_bytes(&self) -> GenAiResult<Option<Vec<u8>>> {
        self.bytes_base64_encoded
            .as_deref()
            .map(|data| {
                STANDARD
                    .decode(data)
                    .map_err(|e| GenAiError::Decode(format!("invalid image bytes: {e}")))
            })
            .transpose()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: PredictParameters,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PredictInstance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PredictParameters {
    pub sample_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upscale_config: Option<UpscaleParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_options: Option<OutputOptions>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub include_rai_reason: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpscaleParameters {
    pub upscale_factor: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OutputOptions {
    pub mime_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Prediction {
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub rai_filtered_reason: Option<String>,
}

impl From<Prediction> for GeneratedImage {
    fn from(prediction: Prediction) -> Self {
        Self {
            image: Image {
                bytes_base64_encoded: prediction.bytes_base64_encoded,
                mime_type: prediction.mime_type,
            },
            rai_filtered_reason: prediction.rai_filtered_reason,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedImage {
    pub image: Image,
    pub rai_filtered_reason: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GenerateImagesResponse {
    pub generated_images: Vec<GeneratedImage>,
}

#[derive(Debug, Clone, Default)]
pub struct UpscaleImageResponse {
    pub generated_images: Vec<GeneratedImage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text_of_first_part() {
        let res = response(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "1805"}, {"text": "ignored"}]}},
                {"content": {"parts": [{"text": "second candidate"}]}}
            ]
        }));
        assert_eq!(text_of(&res).unwrap(), "1805");
    }

    #[test]
    fn test_text_of_non_text_part_is_empty() {
        let res = response(json!({
            "candidates": [{"content": {"parts": [{"inlineData": {"mimeType": "image/png", "data": "AA=="}}]}}]
        }));
        assert_eq!(text_of(&res).unwrap(), "");
    }

    #[test]
    fn test_empty_responses_rejected() {
        for value in [
            json!({}),
            json!({"candidates": []}),
            json!({"candidates": [{"finishReason": "SAFETY"}]}),
            json!({"candidates": [{"content": {"parts": []}}]}),
        ] {
            let res = response(value);
            match text_of(&res) {
                Err(GenAiError::EmptyResponse(msg)) => assert_eq!(msg, EMPTY_RESPONSE),
                other => panic!("expected EmptyResponse, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_part_serialization() {
        let part = Part::from_bytes(b"abc", "image/png");
        assert_eq!(
            serde_json::to_value(&part).unwrap(),
            json!({"inlineData": {"mimeType": "image/png", "data": "YWJj"}})
        );
        assert_eq!(
            serde_json::to_value(Part::from_text("hi")).unwrap(),
            json!({"text": "hi"})
        );
    }

    #[test]
    fn test_blob_decode() {
        let blob = Blob::from_bytes(&[0, 1, 2, 255], "audio/pcm");
        assert_eq!(blob.decode().unwrap(), vec![0, 1, 2, 255]);

        let broken = Blob {
            mime_type: "audio/pcm".to_string(),
            data: "not base64!".to_string(),
        };
        assert!(matches!(broken.decode(), Err(GenAiError::Decode(_))));
    }

    #[test]
    fn test_predict_request_shape() {
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: Some("umbrella".to_string()),
                image: None,
            }],
            parameters: PredictParameters {
                sample_count: 4,
                output_options: Some(OutputOptions {
                    mime_type: "image/jpeg".to_string(),
                }),
                include_rai_reason: true,
                ..Default::default()
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "instances": [{"prompt": "umbrella"}],
                "parameters": {
                    "sampleCount": 4,
                    "outputOptions": {"mimeType": "image/jpeg"},
                    "includeRaiReason": true
                }
            })
        );
    }

    #[test]
    fn test_filtered_prediction_has_no_bytes() {
        let prediction: Prediction =
            serde_json::from_value(json!({"raiFilteredReason": "blocked"})).unwrap();
        let image = GeneratedImage::from(prediction);
        assert_eq!(image.rai_filtered_reason.as_deref(), Some("blocked"));
        assert_eq!(image.image.image_bytes().unwrap(), None);
    }
}
