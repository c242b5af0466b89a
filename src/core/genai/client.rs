//! REST client for the Gemini and Imagen endpoints.
//!
//! # Example
//!
//! ```rust,no_run
//! use genai_workshop::core::genai::{Backend, ClientConfig, Content, GenAiClient, text_of};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GenAiClient::new(ClientConfig {
//!     backend: Backend::GeminiApi,
//!     api_key: Some("your-api-key".to_string().into()),
//!     ..Default::default()
//! })?;
//!
//! let response = client
//!     .generate_content("gemini-2.0-flash-001", Content::text("Hello"))
//!     .await?;
//! println!("{}", text_of(&response)?);
//! # Ok(())
//! # }
//! ```

use std::pin::Pin;
use std::sync::Arc;

use eventsource_stream::Eventsource;
use futures::{Stream, StreamExt, TryStreamExt};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::auth::AuthHeaders;
use super::base::{Backend, GenAiError, GenAiResult};
use super::config::ClientConfig;
use super::messages::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerateImagesConfig,
    GenerateImagesResponse, GeneratedImage, Image, OutputOptions, PredictInstance,
    PredictParameters, PredictRequest, PredictResponse, UpscaleImageConfig, UpscaleImageResponse,
    UpscaleParameters,
};

/// Stream of partial responses from `streamGenerateContent`.
pub type GenerateContentStream =
    Pin<Box<dyn Stream<Item = GenAiResult<GenerateContentResponse>> + Send>>;

/// Client handle shared by the samples.
///
/// Cloning is cheap; clones share the HTTP connection pool and cached
/// credentials.
#[derive(Debug, Clone)]
pub struct GenAiClient {
    config: Arc<ClientConfig>,
    http: Client,
    auth: Arc<AuthHeaders>,
}

impl GenAiClient {
    pub fn new(config: ClientConfig) -> GenAiResult<Self> {
        config.validate()?;
        let http = Client::builder()
            .build()
            .map_err(|e| GenAiError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_http_client(config, http))
    }

    pub fn with_http_client(config: ClientConfig, http: Client) -> Self {
        Self {
            config: Arc::new(config),
            http,
            auth: Arc::new(AuthHeaders::new()),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn backend(&self) -> Backend {
        self.config.backend
    }

    pub(crate) fn auth(&self) -> &AuthHeaders {
        &self.auth
    }

    /// Single-shot generation (`models/{model}:generateContent`).
    pub async fn generate_content(
        &self,
        model: &str,
        contents: Vec<Content>,
    ) -> GenAiResult<GenerateContentResponse> {
        let url = self.config.method_url(model, "generateContent")?;
        let request = GenerateContentRequest { contents };
        self.post_json(url, &request).await
    }

    /// Streaming generation over server-sent events.
    ///
    /// Each event's `data` is one full `GenerateContentResponse` chunk.
    pub async fn generate_content_stream(
        &self,
        model: &str,
        contents: Vec<Content>,
    ) -> GenAiResult<GenerateContentStream> {
        let mut url = self.config.method_url(model, "streamGenerateContent")?;
        url.query_pairs_mut().append_pair("alt", "sse");
        let request = GenerateContentRequest { contents };

        let response = self.send(url, &request).await?;
        let stream = response
            .bytes_stream()
            .eventsource()
            .map_err(|e| GenAiError::Stream(e.to_string()))
            .try_filter(|event| futures::future::ready(!event.data.trim().is_empty()))
            .and_then(|event| async move {
                serde_json::from_str::<GenerateContentResponse>(&event.data)
                    .map_err(|e| GenAiError::Decode(format!("bad stream chunk: {e}")))
            });

        Ok(stream.boxed())
    }

    /// Text-to-image generation (`models/{model}:predict`).
    pub async fn generate_images(
        &self,
        model: &str,
        prompt: &str,
        config: &GenerateImagesConfig,
    ) -> GenAiResult<GenerateImagesResponse> {
        let url = self.config.method_url(model, "predict")?;
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: Some(prompt.to_string()),
                image: None,
            }],
            parameters: PredictParameters {
                sample_count: config.number_of_images,
                output_options: output_options(config.output_mime_type.as_deref()),
                include_rai_reason: config.include_rai_reason,
                ..Default::default()
            },
        };

        let response: PredictResponse = self.post_json(url, &request).await?;
        Ok(GenerateImagesResponse {
            generated_images: collect_images(response),
        })
    }

    /// Image upscaling. Only Vertex AI serves this call.
    pub async fn upscale_image(
        &self,
        model: &str,
        image: Image,
        upscale_factor: &str,
        config: &UpscaleImageConfig,
    ) -> GenAiResult<UpscaleImageResponse> {
        if !self.backend().is_vertex() {
            return Err(GenAiError::UnsupportedBackend(
                "upscale_image is only supported on the VertexAI backend".to_string(),
            ));
        }

        let url = self.config.method_url(model, "predict")?;
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: None,
                image: Some(image),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                mode: Some("upscale".to_string()),
                upscale_config: Some(UpscaleParameters {
                    upscale_factor: upscale_factor.to_string(),
                }),
                output_options: output_options(config.output_mime_type.as_deref()),
                include_rai_reason: config.include_rai_reason,
            },
        };

        let response: PredictResponse = self.post_json(url, &request).await?;
        Ok(UpscaleImageResponse {
            generated_images: collect_images(response),
        })
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> GenAiResult<T> {
        let response = self.send(url, body).await?;
        response
            .json()
            .await
            .map_err(|e| GenAiError::Decode(e.to_string()))
    }

    async fn send<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> GenAiResult<Response> {
        debug!(backend = %self.backend(), %url, "POST");
        let headers = self.auth.headers(&self.config).await?;
        let response = self
            .http
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await?;
        check_response(response).await
    }
}

fn output_options(mime_type: Option<&str>) -> Option<OutputOptions> {
    mime_type.map(|mime_type| OutputOptions {
        mime_type: mime_type.to_string(),
    })
}

fn collect_images(response: PredictResponse) -> Vec<GeneratedImage> {
    response
        .predictions
        .into_iter()
        .map(GeneratedImage::from)
        .collect()
}

/// Turn non-2xx answers into [`GenAiError::Api`], keeping `error.message`.
async fn check_response(response: Response) -> GenAiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or(body);

    Err(GenAiError::Api {
        status: status.as_u16(),
        message,
    })
}
