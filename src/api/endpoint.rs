// src/api/endpoint.rs — API base URL resolution

use url::Url;

/// Address of the API when the dashboard runs on a developer machine.
pub const LOCAL_DEV_BASE_URL: &str = "http://localhost:8000";

const LOCAL_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Base URL for a dashboard served from `origin`.
///
/// A non-local origin means the API is mounted under `/api` on the same host;
/// a local origin (or none) means the dev server.
pub fn resolve_from_origin(origin: Option<&str>) -> anyhow::Result<String> {
    let Some(origin) = origin else {
        return Ok(LOCAL_DEV_BASE_URL.to_string());
    };

    let url = Url::parse(origin)
        .map_err(|e| anyhow::anyhow!("Invalid origin '{origin}': {e}"))?;
    let host = url.host_str().unwrap_or_default();

    if LOCAL_HOSTS.contains(&host) {
        Ok(LOCAL_DEV_BASE_URL.to_string())
    } else {
        Ok(format!("{}/api", url.origin().ascii_serialization()))
    }
}

/// Validate an explicit base URL and strip trailing slashes.
pub fn normalize(base_url: &str) -> anyhow::Result<String> {
    Url::parse(base_url).map_err(|e| anyhow::anyhow!("Invalid API URL '{base_url}': {e}"))?;
    Ok(base_url.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_origin_is_local_dev() {
        assert_eq!(resolve_from_origin(None).unwrap(), LOCAL_DEV_BASE_URL);
    }

    #[test]
    fn test_localhost_origin_is_local_dev() {
        assert_eq!(
            resolve_from_origin(Some("http://localhost:3000")).unwrap(),
            LOCAL_DEV_BASE_URL
        );
        assert_eq!(
            resolve_from_origin(Some("http://127.0.0.1:5500/index.html")).unwrap(),
            LOCAL_DEV_BASE_URL
        );
    }

    #[test]
    fn test_deployed_origin_uses_same_host_api() {
        assert_eq!(
            resolve_from_origin(Some("https://onto.example.org/dashboard/")).unwrap(),
            "https://onto.example.org/api"
        );
        assert_eq!(
            resolve_from_origin(Some("http://10.0.0.5:8080")).unwrap(),
            "http://10.0.0.5:8080/api"
        );
    }

    #[test]
    fn test_invalid_origin_rejected() {
        assert!(resolve_from_origin(Some("not a url")).is_err());
    }

    #[test]
    fn test_normalize_trims_slashes() {
        assert_eq!(
            normalize("http://localhost:8000//").unwrap(),
            "http://localhost:8000"
        );
        assert!(normalize("localhost").is_err());
    }
}
