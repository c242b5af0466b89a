use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present in
/// the file override environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 8080
///   tls:
///     enabled: true
///     cert_path: "/etc/workshop/cert.pem"
///     key_path: "/etc/workshop/key.pem"
///
/// genai:
///   api_key: "your-gemini-api-key"
///   use_vertexai: false
///   project: "my-gcp-project"
///   location: "us-central1"
///
/// live:
///   proxy_video_url: "http://storage.googleapis.com/cloud-samples-data/video/animals.mp4"
///   proxy_video_allowed_origin: "http://localhost:8080"
///   dump_dir: "/tmp/livestream"
///   dump_enabled: true
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub genai: Option<GenAiYaml>,
    pub live: Option<LiveYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tls: Option<TlsYaml>,
}

/// TLS configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TlsYaml {
    pub enabled: Option<bool>,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

/// Backend selection and credentials from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GenAiYaml {
    pub api_key: Option<String>,
    pub use_vertexai: Option<bool>,
    pub project: Option<String>,
    pub location: Option<String>,
    /// REST root override, applied to whichever backend is selected
    pub base_url: Option<String>,
}

/// Live relay server settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LiveYaml {
    pub proxy_video_url: Option<String>,
    pub proxy_video_allowed_origin: Option<String>,
    pub dump_dir: Option<String>,
    pub dump_enabled: Option<bool>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Fields have invalid types
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_config_full() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 9090
  tls:
    enabled: true
    cert_path: "/certs/cert.pem"
    key_path: "/certs/key.pem"

genai:
  api_key: "yaml-key"
  use_vertexai: true
  project: "proj"
  location: "europe-west4"
  base_url: "http://localhost:1234"

live:
  proxy_video_url: "http://videos.local/a.mp4"
  proxy_video_allowed_origin: "http://localhost:3000"
  dump_dir: "/tmp/dumps"
  dump_enabled: false
"#;

        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();

        let server = config.server.unwrap();
        assert_eq!(server.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(server.port, Some(9090));
        let tls = server.tls.unwrap();
        assert_eq!(tls.enabled, Some(true));
        assert_eq!(tls.cert_path.as_deref(), Some("/certs/cert.pem"));

        let genai = config.genai.unwrap();
        assert_eq!(genai.api_key.as_deref(), Some("yaml-key"));
        assert_eq!(genai.use_vertexai, Some(true));
        assert_eq!(genai.project.as_deref(), Some("proj"));
        assert_eq!(genai.location.as_deref(), Some("europe-west4"));
        assert_eq!(genai.base_url.as_deref(), Some("http://localhost:1234"));

        let live = config.live.unwrap();
        assert_eq!(live.proxy_video_url.as_deref(), Some("http://videos.local/a.mp4"));
        assert_eq!(live.dump_enabled, Some(false));
    }

    #[test]
    fn test_yaml_config_partial() {
        let yaml = r#"
genai:
  use_vertexai: false
"#;
        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.server.is_none());
        assert!(config.live.is_none());
        let genai = config.genai.unwrap();
        assert_eq!(genai.use_vertexai, Some(false));
        assert!(genai.api_key.is_none());
    }

    #[test]
    fn test_yaml_config_empty() {
        let config: YamlConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.server.is_none());
        assert!(config.genai.is_none());
        assert!(config.live.is_none());
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let yaml_content = r#"
server:
  host: "localhost"
  port: 3000
"#;

        fs::write(&config_path, yaml_content).unwrap();

        let config = YamlConfig::from_file(&config_path).unwrap();

        assert_eq!(
            config.server.as_ref().unwrap().host,
            Some("localhost".to_string())
        );
        assert_eq!(config.server.as_ref().unwrap().port, Some(3000));
    }

    #[test]
    fn test_from_file_not_found() {
        let path = PathBuf::from("/nonexistent/config.yaml");
        let result = YamlConfig::from_file(&path);

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }

    #[test]
    fn test_from_file_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("invalid.yaml");

        fs::write(&config_path, "invalid: yaml: content:").unwrap();

        let result = YamlConfig::from_file(&config_path);

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse YAML")
        );
    }
}
