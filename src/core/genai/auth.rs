//! Request authorization for the REST and live endpoints.

use google_cloud_auth::credentials::{Builder, CacheableResource, Credentials};
use http::{HeaderMap, HeaderName, HeaderValue};
use tokio::sync::OnceCell;

use super::base::{GenAiError, GenAiResult};
use super::config::{AuthMode, ClientConfig};

/// Header carrying the API key on Google AI Studio and Vertex express mode.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Produces the auth headers for a [`ClientConfig`].
///
/// ADC credentials are loaded on first use, so configs that never reach
/// Vertex AI do not need a credentials file.
#[derive(Default)]
pub struct AuthHeaders {
    adc: OnceCell<Credentials>,
}

impl std::fmt::Debug for AuthHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthHeaders")
            .field("adc_loaded", &self.adc.initialized())
            .finish()
    }
}

impl AuthHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn headers(&self, config: &ClientConfig) -> GenAiResult<HeaderMap> {
        match config.auth_mode() {
            AuthMode::ApiKey(key) => api_key_headers(key),
            AuthMode::ApplicationDefault => {
                let credentials = self
                    .adc
                    .get_or_try_init(|| async {
                        Builder::default()
                            .with_scopes([CLOUD_PLATFORM_SCOPE])
                            .build()
                            .map_err(|e| {
                                GenAiError::Authentication(format!(
                                    "failed to load Application Default Credentials: {e}"
                                ))
                            })
                    })
                    .await?;

                let headers = credentials.headers(Default::default()).await.map_err(|e| {
                    GenAiError::Authentication(format!("failed to fetch auth headers: {e}"))
                })?;

                match headers {
                    CacheableResource::New { data, .. } => Ok(data),
                    CacheableResource::NotModified => Err(GenAiError::Authentication(
                        "credentials returned no headers".to_string(),
                    )),
                }
            }
        }
    }
}

fn api_key_headers(key: &str) -> GenAiResult<HeaderMap> {
    let mut value = HeaderValue::from_str(key)
        .map_err(|e| GenAiError::Authentication(format!("invalid API key header: {e}")))?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
    Ok(headers)
}
