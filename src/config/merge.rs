use std::path::PathBuf;

use super::yaml::YamlConfig;
use super::{ServerConfig, TlsConfig, env};

/// Merge environment configuration (base) with YAML overrides.
///
/// Every value present in the YAML file wins over its environment variable.
/// `genai.base_url` is applied to whichever backend ends up selected.
pub fn merge_config(yaml: Option<YamlConfig>) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = env::from_env()?;
    let Some(yaml) = yaml else {
        return Ok(config);
    };

    if let Some(server) = yaml.server {
        if let Some(host) = server.host {
            config.host = host;
        }
        if let Some(port) = server.port {
            config.port = port;
            config.port_defaulted = false;
        }
        if let Some(tls) = server.tls {
            config.tls = merge_tls(config.tls.take(), tls)?;
        }
    }

    if let Some(genai) = yaml.genai {
        if let Some(key) = genai.api_key {
            config.google_api_key = Some(key);
        }
        if let Some(flag) = genai.use_vertexai {
            config.use_vertexai = flag;
        }
        if let Some(project) = genai.project {
            config.google_cloud_project = Some(project);
        }
        if let Some(location) = genai.location {
            config.google_cloud_location = Some(location);
        }
        if let Some(base_url) = genai.base_url {
            if config.use_vertexai {
                config.vertex_base_url = Some(base_url);
            } else {
                config.gemini_base_url = Some(base_url);
            }
        }
    }

    if let Some(live) = yaml.live {
        if let Some(url) = live.proxy_video_url {
            config.proxy_video_url = url;
        }
        if let Some(origin) = live.proxy_video_allowed_origin {
            config.proxy_video_allowed_origin = origin;
        }
        if let Some(dir) = live.dump_dir {
            config.live_dump_dir = Some(PathBuf::from(dir));
        }
        if let Some(enabled) = live.dump_enabled {
            config.live_dump_enabled = enabled;
        }
    }

    Ok(config)
}

fn merge_tls(
    base: Option<TlsConfig>,
    yaml: super::yaml::TlsYaml,
) -> Result<Option<TlsConfig>, Box<dyn std::error::Error>> {
    let enabled = yaml.enabled.unwrap_or(base.is_some());
    if !enabled {
        return Ok(None);
    }

    let cert_path = yaml
        .cert_path
        .map(PathBuf::from)
        .or_else(|| base.as_ref().map(|tls| tls.cert_path.clone()))
        .ok_or("TLS is enabled but no certificate path is configured")?;
    let key_path = yaml
        .key_path
        .map(PathBuf::from)
        .or_else(|| base.as_ref().map(|tls| tls.key_path.clone()))
        .ok_or("TLS is enabled but no private key path is configured")?;

    Ok(Some(TlsConfig {
        cert_path,
        key_path,
    }))
}
