use url::Url;

use super::TlsConfig;

/// Validate that configured TLS files exist.
pub fn validate_tls(tls: &Option<TlsConfig>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(tls) = tls else {
        return Ok(());
    };

    if !tls.cert_path.exists() {
        return Err(format!(
            "TLS certificate file not found: {}",
            tls.cert_path.display()
        )
        .into());
    }
    if !tls.key_path.exists() {
        return Err(format!("TLS private key file not found: {}", tls.key_path.display()).into());
    }
    Ok(())
}

/// Validate an optional URL setting.
pub fn validate_url(name: &str, value: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    match value {
        Some(value) => match Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            Ok(url) => Err(format!("{name} must use http or https, got '{}'", url.scheme()).into()),
            Err(e) => Err(format!("Invalid {name} '{value}': {e}").into()),
        },
        None => Ok(()),
    }
}
