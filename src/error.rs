//! Error types shared across the session layer.
//!
//! ERROR HANDLING
//! ==============
//! `ApiError` separates "no response at all" (`Transport`) from "a response
//! with a failing status" (`Http`, `SessionInvalidated`) so callers can react
//! to a 401 without string matching. The 401 variant is only produced after
//! the session flag has already been cleared.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::net::response::IncomingResponse;

/// Errors produced by API calls made through [`crate::net::ApiClient`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status other than 401.
    #[error("request failed: {}", .response.status_line())]
    Http { status: u16, response: IncomingResponse },

    /// The server answered 401. The local session was cleared before this
    /// error was returned.
    #[error("session invalidated (401)")]
    SessionInvalidated { response: IncomingResponse },

    /// A response labeled as JSON did not contain valid JSON.
    #[error("response body decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// A typed read expected a JSON payload but the server sent text.
    #[error("expected a JSON payload, got text")]
    UnexpectedPayload,

    /// The session flag could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// HTTP status carried by the error, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::SessionInvalidated { .. } => Some(401),
            _ => None,
        }
    }

    /// The response that caused the failure, if one was received.
    #[must_use]
    pub fn response(&self) -> Option<&IncomingResponse> {
        match self {
            Self::Http { response, .. } | Self::SessionInvalidated { response } => Some(response),
            _ => None,
        }
    }

    /// Whether this failure cleared the local session.
    #[must_use]
    pub fn is_session_invalidated(&self) -> bool {
        matches!(self, Self::SessionInvalidated { .. })
    }

    /// Whether no response was received at all.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Errors raised by durable session storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("session storage I/O failed at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("session storage at {path} is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while building [`crate::ClientConfig`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required env var {0}")]
    Missing(&'static str),

    /// The API origin is not an absolute http(s) URL.
    #[error("invalid API origin '{origin}': {reason}")]
    InvalidOrigin { origin: String, reason: String },
}

/// Errors raised while assembling an [`crate::App`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
