use std::env;
use std::path::PathBuf;

use super::{
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PROXY_VIDEO_ALLOWED_ORIGIN, DEFAULT_PROXY_VIDEO_URL,
    ServerConfig, TlsConfig,
};
use crate::core::genai::parse_flag;

/// Read an env var, treating empty values as unset.
pub(crate) fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// First non-empty value among `names`.
fn first_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| var(name))
}

/// Build the configuration from environment variables and defaults.
///
/// The `.env` file is loaded into the environment by `main` before this runs.
pub fn from_env() -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let port = match var("PORT") {
        Some(port) => Some(
            port.trim()
                .parse::<u16>()
                .map_err(|e| format!("Invalid PORT value '{port}': {e}"))?,
        ),
        None => None,
    };

    let tls = if var("TLS_ENABLED").is_some_and(|v| parse_flag(&v)) {
        let cert_path = var("TLS_CERT_PATH").ok_or("TLS_ENABLED is set but TLS_CERT_PATH is missing")?;
        let key_path = var("TLS_KEY_PATH").ok_or("TLS_ENABLED is set but TLS_KEY_PATH is missing")?;
        Some(TlsConfig {
            cert_path: PathBuf::from(cert_path),
            key_path: PathBuf::from(key_path),
        })
    } else {
        None
    };

    Ok(ServerConfig {
        host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: port.unwrap_or(DEFAULT_PORT),
        port_defaulted: port.is_none(),
        tls,
        google_api_key: first_var(&["GOOGLE_API_KEY", "GEMINI_API_KEY"]),
        use_vertexai: var("GOOGLE_GENAI_USE_VERTEXAI").is_some_and(|v| parse_flag(&v)),
        google_cloud_project: var("GOOGLE_CLOUD_PROJECT"),
        google_cloud_location: first_var(&["GOOGLE_CLOUD_LOCATION", "GOOGLE_CLOUD_REGION"]),
        gemini_base_url: var("GOOGLE_GEMINI_BASE_URL"),
        vertex_base_url: var("GOOGLE_VERTEX_BASE_URL"),
        proxy_video_url: var("PROXY_VIDEO_URL")
            .unwrap_or_else(|| DEFAULT_PROXY_VIDEO_URL.to_string()),
        proxy_video_allowed_origin: var("PROXY_VIDEO_ALLOWED_ORIGIN")
            .unwrap_or_else(|| DEFAULT_PROXY_VIDEO_ALLOWED_ORIGIN.to_string()),
        live_dump_dir: var("LIVE_DUMP_DIR").map(PathBuf::from),
        live_dump_enabled: var("LIVE_DUMP_ENABLED").is_none_or(|v| parse_flag(&v)),
    })
}
