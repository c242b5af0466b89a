//! Configuration module for the workshop binary
//!
//! This module handles configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//!
//! # Example
//! ```rust,no_run
//! use genai_workshop::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use url::Url;
use zeroize::Zeroizing;

use crate::core::genai::{Backend, ClientConfig};

mod env;
mod merge;
mod validation;
mod yaml;

pub use yaml::{GenAiYaml, LiveYaml, ServerYaml, TlsYaml, YamlConfig};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PROXY_VIDEO_URL: &str =
    "http://storage.googleapis.com/cloud-samples-data/video/animals.mp4";
pub const DEFAULT_PROXY_VIDEO_ALLOWED_ORIGIN: &str = "http://localhost:8080";

/// TLS configuration for HTTPS and WSS
#[derive(Debug, Clone)]
pub struct TlsConfig {
    /// Path to the TLS certificate file (PEM format)
    pub cert_path: PathBuf,
    /// Path to the TLS private key file (PEM format)
    pub key_path: PathBuf,
}

/// Workshop configuration
///
/// Holds the backend selection shared by every sample plus the settings of
/// the live relay server (samples 7 and 8).
#[derive(Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,
    /// True when no port was configured and [`DEFAULT_PORT`] is in use
    pub port_defaulted: bool,

    // TLS configuration (optional)
    pub tls: Option<TlsConfig>,

    // Backend selection
    pub google_api_key: Option<String>,
    pub use_vertexai: bool,
    pub google_cloud_project: Option<String>,
    pub google_cloud_location: Option<String>,
    /// REST root override for the Gemini API backend
    pub gemini_base_url: Option<String>,
    /// REST root override for the Vertex AI backend
    pub vertex_base_url: Option<String>,

    // Live relay
    pub proxy_video_url: String,
    pub proxy_video_allowed_origin: String,
    /// Directory for livestream dumps; the system temp dir when unset
    pub live_dump_dir: Option<PathBuf>,
    pub live_dump_enabled: bool,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("port_defaulted", &self.port_defaulted)
            .field("tls", &self.tls)
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("use_vertexai", &self.use_vertexai)
            .field("google_cloud_project", &self.google_cloud_project)
            .field("google_cloud_location", &self.google_cloud_location)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("vertex_base_url", &self.vertex_base_url)
            .field("proxy_video_url", &self.proxy_video_url)
            .field(
                "proxy_video_allowed_origin",
                &self.proxy_video_allowed_origin,
            )
            .field("live_dump_dir", &self.live_dump_dir)
            .field("live_dump_enabled", &self.live_dump_enabled)
            .finish()
    }
}

/// Implement Drop to zeroize the API key when ServerConfig is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.google_api_key {
            key.zeroize();
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and defaults only.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge::merge_config(None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Environment variables (including values loaded from `.env` in `main`)
    /// provide the base configuration; YAML values override them. After
    /// merging, the final configuration is validated.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        validation::validate_tls(&self.tls)?;
        validation::validate_url("GOOGLE_GEMINI_BASE_URL", self.gemini_base_url.as_deref())?;
        validation::validate_url("GOOGLE_VERTEX_BASE_URL", self.vertex_base_url.as_deref())?;
        validation::validate_url("PROXY_VIDEO_URL", Some(&self.proxy_video_url))?;
        Ok(())
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if TLS is enabled
    ///
    /// Returns true if TLS configuration is present
    pub fn is_tls_enabled(&self) -> bool {
        self.tls.is_some()
    }

    pub fn backend(&self) -> Backend {
        Backend::from_use_vertexai(self.use_vertexai)
    }

    /// Build the GenAI client configuration for the selected backend.
    pub fn client_config(&self) -> Result<ClientConfig, Box<dyn std::error::Error>> {
        let backend = self.backend();
        let base_url = match backend {
            Backend::GeminiApi => self.gemini_base_url.as_deref(),
            Backend::VertexAi => self.vertex_base_url.as_deref(),
        }
        .map(Url::parse)
        .transpose()
        .map_err(|e| format!("Invalid base URL for {backend}: {e}"))?;

        Ok(ClientConfig {
            backend,
            api_key: self.google_api_key.clone().map(Zeroizing::new),
            project: self.google_cloud_project.clone(),
            location: self.google_cloud_location.clone(),
            base_url,
        })
    }

    /// Directory live dumps are written to, or `None` when dumping is off.
    pub fn live_dump_dir(&self) -> Option<PathBuf> {
        if !self.live_dump_enabled {
            return None;
        }
        Some(
            self.live_dump_dir
                .clone()
                .unwrap_or_else(std::env::temp_dir),
        )
    }
}
