//! URL composition for the Looker API
//!
//! The API root is `{host}:{port}/api/{version}/` and every endpoint is a
//! `/`-joined list of path segments below it.

use crate::error::ConfigError;
use reqwest::Url;

/// Build the API root for a Looker host.
///
/// A trailing slash on `base_url` is ignored. The `port` is applied only
/// when `base_url` does not already name one.
pub fn build_api_root(base_url: &str, port: u16, api_version: &str) -> Result<String, ConfigError> {
    let trimmed = base_url.trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        field: "base_url".to_string(),
        value: base_url.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: "URL has no host".to_string(),
        });
    }

    // Url drops a scheme-default port such as :443, so read it from the raw text
    let port = url.port().or_else(|| explicit_port(trimmed)).unwrap_or(port);
    let host = url.host_str().unwrap_or_default();
    let path = url.path().trim_end_matches('/');
    let version = api_version.trim_matches('/');

    Ok(format!(
        "{}://{}:{}{}/api/{}/",
        url.scheme(),
        host,
        port,
        path,
        version
    ))
}

/// Port written in the authority of `raw`, if any
fn explicit_port(raw: &str) -> Option<u16> {
    let (_, rest) = raw.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
    let after_host = match host_port.rfind(']') {
        Some(end) => &host_port[end + 1..],
        None => host_port,
    };
    let (_, port) = after_host.rsplit_once(':')?;
    port.parse().ok()
}

/// Join path segments onto a base URL with single slashes.
pub fn compose_url<S: AsRef<str>>(base: &str, parts: &[S]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for part in parts {
        let part = part.as_ref().trim_matches('/');
        if part.is_empty() {
            continue;
        }
        url.push('/');
        url.push_str(part);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_api_root_appends_port_and_version() {
        let root = build_api_root("https://company.looker.com", 19999, "3.1").unwrap();
        assert_eq!(root, "https://company.looker.com:19999/api/3.1/");
    }

    #[test]
    fn test_build_api_root_trailing_slash() {
        let root = build_api_root("https://company.looker.com/", 19999, "3.0").unwrap();
        assert_eq!(root, "https://company.looker.com:19999/api/3.0/");
    }

    #[test]
    fn test_build_api_root_keeps_explicit_port() {
        let root = build_api_root("http://127.0.0.1:8080", 19999, "3.1").unwrap();
        assert_eq!(root, "http://127.0.0.1:8080/api/3.1/");
    }

    #[test]
    fn test_build_api_root_keeps_scheme_default_port() {
        let root = build_api_root("https://company.looker.com:443", 19999, "4.0").unwrap();
        assert_eq!(root, "https://company.looker.com:443/api/4.0/");

        let root = build_api_root("http://looker.internal:80/", 19999, "3.1").unwrap();
        assert_eq!(root, "http://looker.internal:80/api/3.1/");
    }

    #[test]
    fn test_explicit_port() {
        assert_eq!(explicit_port("https://h:443"), Some(443));
        assert_eq!(explicit_port("https://user:pw@h/x"), None);
        assert_eq!(explicit_port("http://[::1]:8080/"), Some(8080));
        assert_eq!(explicit_port("http://[::1]/"), None);
        assert_eq!(explicit_port("https://h"), None);
    }

    #[test]
    fn test_build_api_root_rejects_garbage() {
        assert!(build_api_root("not a url", 19999, "3.1").is_err());
    }

    #[test]
    fn test_compose_url() {
        let base = "https://company.looker.com:19999/api/3.1/";
        assert_eq!(
            compose_url(base, &["login"]),
            "https://company.looker.com:19999/api/3.1/login"
        );
        assert_eq!(
            compose_url(base, &["projects", "analytics", "git_branch"]),
            "https://company.looker.com:19999/api/3.1/projects/analytics/git_branch"
        );
        assert_eq!(
            compose_url(base, &["queries".to_string(), 12.to_string(), "run".to_string()]),
            "https://company.looker.com:19999/api/3.1/queries/12/run"
        );
    }

    #[test]
    fn test_compose_url_skips_empty_and_trims_slashes() {
        let url = compose_url("http://h/api/3.1", &["/lookml_models/", "", "m"]);
        assert_eq!(url, "http://h/api/3.1/lookml_models/m");
    }
}
