//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use crate::error::ConfigError;

const SESSION_DIR: &str = "gatehouse";
const SESSION_FILE_NAME: &str = "session.json";

/// Optional transport deadlines. Unset means a request runs until it
/// completes or the connection fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: Option<u64>,
    pub connect_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API origin (scheme + host [+ port]) without a trailing slash.
    pub origin: String,
    /// File holding the durable session marker.
    pub session_file: PathBuf,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Build a config for `origin` with default timeouts and session file.
    ///
    /// # Errors
    ///
    /// Returns an error if `origin` is not an absolute http(s) URL.
    pub fn new(origin: &str) -> Result<Self, ConfigError> {
        Ok(Self { origin: parse_origin(origin)?, session_file: default_session_file(), timeouts: Timeouts::default() })
    }

    /// Build typed client config from environment variables, loading a
    /// `.env` file first when present.
    ///
    /// Required:
    /// - `API_HOST`: API origin, e.g. `https://api.example.com`
    ///
    /// Optional:
    /// - `SESSION_FILE`: durable session path (default: local data dir)
    /// - `API_REQUEST_TIMEOUT_SECS`: whole-request deadline (default: none)
    /// - `API_CONNECT_TIMEOUT_SECS`: connect deadline (default: none)
    ///
    /// # Errors
    ///
    /// Returns an error if `API_HOST` is missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let raw_origin = std::env::var("API_HOST").map_err(|_| ConfigError::Missing("API_HOST"))?;
        let origin = parse_origin(&raw_origin)?;
        let session_file = match std::env::var("SESSION_FILE") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_session_file(),
        };
        let timeouts = Timeouts {
            request_secs: env_parse_u64("API_REQUEST_TIMEOUT_SECS"),
            connect_secs: env_parse_u64("API_CONNECT_TIMEOUT_SECS"),
        };

        Ok(Self { origin, session_file, timeouts })
    }

    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

fn env_parse_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<u64>().ok())
}

fn parse_origin(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: &str| ConfigError::InvalidOrigin { origin: raw.to_owned(), reason: reason.to_owned() };

    let url = url::Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("origin must not carry a query or fragment"));
    }
    Ok(trimmed.to_owned())
}

/// Session file under the platform data dir, or the working directory when
/// the platform has none.
#[must_use]
pub fn default_session_file() -> PathBuf {
    dirs::data_local_dir().unwrap_or_default().join(SESSION_DIR).join(SESSION_FILE_NAME)
}
