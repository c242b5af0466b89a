use axum::http::{HeaderMap, header};
use url::Url;

use crate::core::genai::Backend;
use crate::core::live::LiveConnectConfig;

/// Which browser origins may open `/live`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginPolicy {
    /// Any origin, including cross-site pages
    Any,
    /// No `Origin` header, or one whose host matches `Host`
    SameHost,
}

impl OriginPolicy {
    pub fn allows(&self, headers: &HeaderMap) -> bool {
        match self {
            OriginPolicy::Any => true,
            OriginPolicy::SameHost => {
                let Some(origin) = headers.get(header::ORIGIN) else {
                    return true;
                };
                let Some(host) = headers.get(header::HOST).and_then(|h| h.to_str().ok()) else {
                    return false;
                };
                origin
                    .to_str()
                    .ok()
                    .and_then(origin_authority)
                    .is_some_and(|authority| authority.eq_ignore_ascii_case(host))
            }
        }
    }
}

/// Authority of an origin URL exactly as written, so an explicit default
/// port (`http://h:80`) is kept and compares equal to `Host: h:80`.
fn origin_authority(origin: &str) -> Option<&str> {
    Url::parse(origin).ok().filter(Url::has_host)?;
    let (_, rest) = origin.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    Some(authority.rsplit_once('@').map_or(authority, |(_, host)| host))
}

/// Per-sample parameters of the live relay.
#[derive(Debug, Clone)]
pub struct LiveProfile {
    pub name: &'static str,
    pub vertex_model: &'static str,
    pub gemini_model: &'static str,
    pub connect_config: LiveConnectConfig,
    /// Log label for what the browser user said
    pub input_label: &'static str,
    /// Log label for what the model said
    pub output_label: &'static str,
    /// HTML page served at `/`, with `{{.}}` standing for the WebSocket URL
    pub page: &'static str,
    pub origin_policy: OriginPolicy,
    /// Whether `/proxyVideo` is mounted
    pub proxy_video: bool,
}

impl LiveProfile {
    pub fn model_for(&self, backend: Backend) -> &'static str {
        match backend {
            Backend::VertexAi => self.vertex_model,
            Backend::GeminiApi => self.gemini_model,
        }
    }
}
