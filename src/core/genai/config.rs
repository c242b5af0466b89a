//! GenAI client configuration: backend, credentials and endpoint derivation.

use std::fmt;
use url::Url;
use zeroize::Zeroizing;

use super::base::{Backend, GenAiError, GenAiResult};

/// Google AI Studio REST root.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

/// Vertex AI REST root for the `global` location and express mode.
pub const VERTEX_GLOBAL_BASE_URL: &str = "https://aiplatform.googleapis.com/";

/// API version used against Google AI Studio.
pub const GEMINI_API_VERSION: &str = "v1beta";

/// API version used against Vertex AI.
pub const VERTEX_API_VERSION: &str = "v1beta1";

/// Live API path on Google AI Studio.
pub const GEMINI_LIVE_PATH: &str =
    "ws/google.ai.generativelanguage.v1beta.GenerativeService.BidiGenerateContent";

/// Live API path on Vertex AI.
pub const VERTEX_LIVE_PATH: &str =
    "ws/google.cloud.aiplatform.v1beta1.LlmInferenceService.BidiGenerateContent";

/// How requests are authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode<'a> {
    /// `x-goog-api-key` header
    ApiKey(&'a str),
    /// Bearer token from Application Default Credentials
    ApplicationDefault,
}

/// Configuration for [`GenAiClient`](super::GenAiClient) and live sessions.
#[derive(Clone, Default)]
pub struct ClientConfig {
    pub backend: Backend,
    /// Wiped from memory when the config is dropped
    pub api_key: Option<Zeroizing<String>>,
    pub project: Option<String>,
    pub location: Option<String>,
    /// Overrides the REST root (and the live root derived from it)
    pub base_url: Option<Url>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("backend", &self.backend)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("project", &self.project)
            .field("location", &self.location)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ClientConfig {
    /// Check that the backend has the credentials it needs.
    pub fn validate(&self) -> GenAiResult<()> {
        match self.backend {
            Backend::GeminiApi => {
                if self.api_key().is_none() {
                    return Err(GenAiError::InvalidConfiguration(
                        "missing API key: set GOOGLE_API_KEY to use the GeminiAPI backend"
                            .to_string(),
                    ));
                }
            }
            Backend::VertexAi => {
                let has_project = self.project().is_some() && self.location().is_some();
                if !has_project && self.api_key().is_none() {
                    return Err(GenAiError::InvalidConfiguration(
                        "VertexAI backend needs GOOGLE_CLOUD_PROJECT and GOOGLE_CLOUD_LOCATION, \
                         or GOOGLE_API_KEY for express mode"
                            .to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.trim())
            .filter(|key| !key.is_empty())
    }

    pub fn project(&self) -> Option<&str> {
        non_empty(&self.project)
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(&self.location)
    }

    /// Vertex AI addressed with an API key and no project.
    pub fn is_express(&self) -> bool {
        self.backend.is_vertex() && self.project().is_none() && self.api_key().is_some()
    }

    pub fn auth_mode(&self) -> AuthMode<'_> {
        match (self.backend, self.api_key()) {
            (Backend::GeminiApi, key) => AuthMode::ApiKey(key.unwrap_or_default()),
            (Backend::VertexAi, Some(key)) if self.is_express() => AuthMode::ApiKey(key),
            _ => AuthMode::ApplicationDefault,
        }
    }

    pub fn api_version(&self) -> &'static str {
        match self.backend {
            Backend::GeminiApi => GEMINI_API_VERSION,
            Backend::VertexAi => VERTEX_API_VERSION,
        }
    }

    /// REST root, always ending with `/` so relative joins keep its path.
    pub fn base_url(&self) -> GenAiResult<Url> {
        let mut url = match (&self.base_url, self.backend) {
            (Some(url), _) => url.clone(),
            (None, Backend::GeminiApi) => parse_url(GEMINI_API_BASE_URL)?,
            (None, Backend::VertexAi) => match self.location() {
                Some(location) if !self.is_express() && location != "global" => {
                    parse_url(&format!("https://{location}-aiplatform.googleapis.com/"))?
                }
                _ => parse_url(VERTEX_GLOBAL_BASE_URL)?,
            },
        };

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Fully qualified model resource name for this backend.
    pub fn model_resource(&self, model: &str) -> String {
        match self.backend {
            Backend::GeminiApi => {
                if model.starts_with("models/") || model.starts_with("tunedModels/") {
                    model.to_string()
                } else {
                    format!("models/{model}")
                }
            }
            Backend::VertexAi => {
                if model.starts_with("projects/") {
                    return model.to_string();
                }
                let publisher_path = if model.starts_with("publishers/") {
                    model.to_string()
                } else if model.starts_with("models/") {
                    format!("publishers/google/{model}")
                } else {
                    format!("publishers/google/models/{model}")
                };
                match (self.project(), self.location()) {
                    (Some(project), Some(location)) => {
                        format!("projects/{project}/locations/{location}/{publisher_path}")
                    }
                    _ => publisher_path,
                }
            }
        }
    }

    /// REST URL for `{model}:{method}`.
    pub fn method_url(&self, model: &str, method: &str) -> GenAiResult<Url> {
        let suffix = format!(
            "{}/{}:{}",
            self.api_version(),
            self.model_resource(model),
            method
        );
        self.base_url()?
            .join(&suffix)
            .map_err(|e| GenAiError::InvalidConfiguration(format!("bad URL {suffix}: {e}")))
    }

    /// WebSocket URL of the live API, derived from the REST root.
    pub fn live_url(&self) -> GenAiResult<Url> {
        let mut url = self.base_url()?;
        let scheme = match url.scheme() {
            "http" | "ws" => "ws",
            _ => "wss",
        };
        url.set_scheme(scheme).map_err(|_| {
            GenAiError::InvalidConfiguration(format!("cannot use {url} as a live endpoint"))
        })?;

        let path = match self.backend {
            Backend::GeminiApi => GEMINI_LIVE_PATH,
            Backend::VertexAi => VERTEX_LIVE_PATH,
        };
        url.join(path)
            .map_err(|e| GenAiError::InvalidConfiguration(format!("bad live URL: {e}")))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_url(value: &str) -> GenAiResult<Url> {
    Url::parse(value).map_err(|e| GenAiError::InvalidConfiguration(format!("bad URL {value}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gemini() -> ClientConfig {
        ClientConfig {
            backend: Backend::GeminiApi,
            api_key: Some("test-key".to_string().into()),
            ..Default::default()
        }
    }

    fn vertex() -> ClientConfig {
        ClientConfig {
            backend: Backend::VertexAi,
            project: Some("my-project".to_string()),
            location: Some("us-central1".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate() {
        assert!(gemini().validate().is_ok());
        assert!(vertex().validate().is_ok());

        let missing_key = ClientConfig::default();
        assert!(matches!(
            missing_key.validate(),
            Err(GenAiError::InvalidConfiguration(_))
        ));

        let blank_key = ClientConfig {
            api_key: Some("  ".to_string().into()),
            ..Default::default()
        };
        assert!(blank_key.validate().is_err());

        let vertex_without_project = ClientConfig {
            backend: Backend::VertexAi,
            location: Some("us-central1".to_string()),
            ..Default::default()
        };
        assert!(vertex_without_project.validate().is_err());

        let express = ClientConfig {
            backend: Backend::VertexAi,
            api_key: Some("key".to_string().into()),
            ..Default::default()
        };
        assert!(express.validate().is_ok());
        assert!(express.is_express());
    }

    #[test]
    fn test_auth_mode() {
        assert_eq!(gemini().auth_mode(), AuthMode::ApiKey("test-key"));
        assert_eq!(vertex().auth_mode(), AuthMode::ApplicationDefault);

        // Project and location win over an API key on Vertex
        let mut both = vertex();
        both.api_key = Some("key".to_string().into());
        assert_eq!(both.auth_mode(), AuthMode::ApplicationDefault);
        assert!(!both.is_express());
    }

    #[test]
    fn test_gemini_method_url() {
        let url = gemini()
            .method_url("gemini-2.0-flash-001", "generateContent")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-001:generateContent"
        );

        let url = gemini()
            .method_url("models/gemini-1.5-pro-002", "generateContent")
            .unwrap();
        assert!(url.path().ends_with("/v1beta/models/gemini-1.5-pro-002:generateContent"));
    }

    #[test]
    fn test_vertex_method_url() {
        let url = vertex()
            .method_url("imagen-3.0-generate-002", "predict")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://us-central1-aiplatform.googleapis.com/v1beta1/projects/my-project/locations/us-central1/publishers/google/models/imagen-3.0-generate-002:predict"
        );
    }

    #[test]
    fn test_vertex_global_and_express_roots() {
        let mut global = vertex();
        global.location = Some("global".to_string());
        assert_eq!(
            global.base_url().unwrap().as_str(),
            "https://aiplatform.googleapis.com/"
        );

        let express = ClientConfig {
            backend: Backend::VertexAi,
            api_key: Some("key".to_string().into()),
            ..Default::default()
        };
        let url = express
            .method_url("gemini-2.0-flash-001", "generateContent")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://aiplatform.googleapis.com/v1beta1/publishers/google/models/gemini-2.0-flash-001:generateContent"
        );
    }

    #[test]
    fn test_base_url_override_keeps_path() {
        let mut config = gemini();
        config.base_url = Some(Url::parse("http://127.0.0.1:9000/proxy").unwrap());
        let url = config.method_url("m", "predict").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/proxy/v1beta/models/m:predict");
    }

    #[test]
    fn test_live_url() {
        assert_eq!(
            gemini().live_url().unwrap().as_str(),
            "wss://generativelanguage.googleapis.com/ws/google.ai.generativelanguage.v1beta.GenerativeService.BidiGenerateContent"
        );
        assert_eq!(
            vertex().live_url().unwrap().as_str(),
            "wss://us-central1-aiplatform.googleapis.com/ws/google.cloud.aiplatform.v1beta1.LlmInferenceService.BidiGenerateContent"
        );

        let mut local = gemini();
        local.base_url = Some(Url::parse("http://127.0.0.1:9001").unwrap());
        assert_eq!(local.live_url().unwrap().scheme(), "ws");
    }

    #[test]
    fn test_model_resource() {
        assert_eq!(gemini().model_resource("gemini-live-2.5-flash-preview"), "models/gemini-live-2.5-flash-preview");
        assert_eq!(
            vertex().model_resource("gemini-2.0-flash-live-preview-04-09"),
            "projects/my-project/locations/us-central1/publishers/google/models/gemini-2.0-flash-live-preview-04-09"
        );
        assert_eq!(
            vertex().model_resource("projects/p/locations/l/publishers/google/models/m"),
            "projects/p/locations/l/publishers/google/models/m"
        );
    }

    #[test]
    fn test_fields_can_be_moved_out() {
        let ClientConfig { api_key, base_url, .. } = gemini();
        assert_eq!(api_key.as_deref().map(String::as_str), Some("test-key"));
        assert!(base_url.is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let printed = format!("{:?}", gemini());
        assert!(!printed.contains("test-key"));
        assert!(printed.contains("<redacted>"));
    }
}
