//! Client configuration: API location, HTTP timeout and session directory.
//!
//! # Design
//! - Values resolve from explicit arguments first, then `MOVIENEST_*` environment variables.
//! - Environment lookups go through a closure so resolution stays testable without
//!   mutating the process environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Hosted MovieNest API.
pub const DEFAULT_API_URL: &str = "https://movie-nest-app-630a7e8ce836.herokuapp.com/";
/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "MOVIENEST_API_URL";
/// Environment variable overriding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "MOVIENEST_HTTP_TIMEOUT_SECS";
/// Environment variable overriding the session directory.
pub const ENV_SESSION_DIR: &str = "MOVIENEST_SESSION_DIR";

const SESSION_DIR_NAME: &str = ".movienest";

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL, always ending in `/`.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Directory backing the persisted session.
    pub session_dir: PathBuf,
}

impl ClientConfig {
    /// Configuration for `base_url` with default timeout and session directory.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_dir: default_session_dir(),
        }
    }

    /// Resolve configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when a variable is set but malformed.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when a variable is set but malformed.
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = parse_base_url(
            lookup(ENV_API_URL)
                .as_deref()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(DEFAULT_API_URL),
        )?;
        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => parse_timeout_secs(&raw)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        let session_dir = session_dir_from(
            lookup(ENV_SESSION_DIR).as_deref(),
            lookup("HOME").as_deref(),
        );
        Ok(Self {
            base_url,
            timeout,
            session_dir,
        })
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the session directory.
    #[must_use]
    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = dir.into();
        self
    }
}

/// Parse and normalise an API base URL.
///
/// # Errors
///
/// Returns [`ClientError::Config`] for unparsable URLs, non-HTTP schemes and
/// URLs that cannot carry a path.
pub fn parse_base_url(input: &str) -> ClientResult<Url> {
    let url = input.trim().parse::<Url>().map_err(|err| ClientError::Config {
        detail: format!("invalid API URL '{input}': {err}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ClientError::Config {
            detail: format!("API URL '{input}' must be an http(s) URL"),
        });
    }
    Ok(normalize_base_url(url))
}

/// Parse a timeout expressed in whole seconds.
///
/// # Errors
///
/// Returns [`ClientError::Config`] for non-numeric or zero values.
pub fn parse_timeout_secs(raw: &str) -> ClientResult<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(ClientError::Config {
            detail: format!("timeout must be a positive number of seconds, got '{raw}'"),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
    }
}

/// Session directory derived from the process environment.
#[must_use]
pub fn default_session_dir() -> PathBuf {
    session_dir_from(
        std::env::var(ENV_SESSION_DIR).ok().as_deref(),
        std::env::var("HOME").ok().as_deref(),
    )
}

fn session_dir_from(explicit: Option<&str>, home: Option<&str>) -> PathBuf {
    if let Some(dir) = explicit.filter(|value| !value.trim().is_empty()) {
        return PathBuf::from(dir);
    }
    home.filter(|value| !value.trim().is_empty())
        .map_or_else(|| PathBuf::from(SESSION_DIR_NAME), |home| {
            Path::new(home).join(SESSION_DIR_NAME)
        })
}

fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = parse_base_url("http://127.0.0.1:8080/api").expect("valid URL");
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/");
        let root = parse_base_url("http://127.0.0.1:8080").expect("valid URL");
        assert_eq!(root.as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn base_url_rejects_other_schemes() {
        assert!(matches!(
            parse_base_url("ftp://example.com"),
            Err(ClientError::Config { .. })
        ));
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ClientError::Config { .. })
        ));
    }

    #[test]
    fn timeout_must_be_positive() {
        assert_eq!(
            parse_timeout_secs(" 30 ").expect("valid timeout"),
            Duration::from_secs(30)
        );
        assert!(parse_timeout_secs("0").is_err());
        assert!(parse_timeout_secs("soon").is_err());
    }

    #[test]
    fn lookup_defaults_to_hosted_api_and_home_directory() {
        let config = ClientConfig::from_lookup(lookup_from(&[("HOME", "/home/neo")]))
            .expect("config resolves");
        assert_eq!(config.base_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.session_dir, PathBuf::from("/home/neo/.movienest"));
    }

    #[test]
    fn lookup_honours_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_API_URL, "http://localhost:3000"),
            (ENV_TIMEOUT_SECS, "3"),
            (ENV_SESSION_DIR, "/tmp/movienest"),
            ("HOME", "/home/neo"),
        ]))
        .expect("config resolves");
        assert_eq!(config.base_url.as_str(), "http://localhost:3000/");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.session_dir, PathBuf::from("/tmp/movienest"));
    }

    #[test]
    fn lookup_surfaces_malformed_timeout() {
        let result = ClientConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "-1")]));
        assert!(matches!(result, Err(ClientError::Config { .. })));
    }

    #[test]
    fn session_dir_falls_back_to_working_directory() {
        assert_eq!(session_dir_from(None, None), PathBuf::from(".movienest"));
        assert_eq!(session_dir_from(Some("  "), None), PathBuf::from(".movienest"));
    }
}
