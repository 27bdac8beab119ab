//! Incoming response model and content-type driven body normalization.
//!
//! DESIGN
//! ======
//! Whether a body is parsed as JSON is decided by the content-type header
//! alone. The body is never sniffed, so a text response that happens to look
//! like JSON stays text.

#[cfg(test)]
#[path = "response_test.rs"]
mod response_test;

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// A response as received from the transport, before status handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingResponse {
    pub status: u16,
    /// Reason phrase for `status`, e.g. `Not Found`.
    pub status_text: Option<String>,
    /// Raw `Content-Type` header, if the server sent one.
    pub content_type: Option<String>,
    pub body: String,
}

/// How a response body is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Text,
}

/// A normalized success body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(serde_json::Value),
    Text(String),
}

impl IncomingResponse {
    #[must_use]
    pub fn new(status: u16, content_type: Option<String>, body: String) -> Self {
        Self { status, status_text: None, content_type, body }
    }

    #[must_use]
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = Some(status_text.into());
        self
    }

    /// `404 Not Found`, or just `404` without a reason phrase.
    #[must_use]
    pub fn status_line(&self) -> String {
        match &self.status_text {
            Some(text) if !text.is_empty() => format!("{} {text}", self.status),
            _ => self.status.to_string(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn content_kind(&self) -> ContentKind {
        classify(self.content_type.as_deref())
    }

    /// Convert the body into a [`Payload`] according to its content type.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the content type is JSON but the body
    /// is not valid JSON.
    pub fn into_payload(self) -> Result<Payload, ApiError> {
        match self.content_kind() {
            ContentKind::Json => Ok(Payload::Json(serde_json::from_str(&self.body)?)),
            ContentKind::Text => Ok(Payload::Text(self.body)),
        }
    }
}

/// Classify a `Content-Type` header value.
///
/// `application/json` and any `+json` structured-syntax type count as JSON,
/// ignoring parameters such as `charset` and letter case. Everything else,
/// including a missing header, is text.
#[must_use]
pub fn classify(content_type: Option<&str>) -> ContentKind {
    let Some(raw) = content_type else {
        return ContentKind::Text;
    };
    let essence = raw.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    let is_json = essence == "application/json"
        || essence
            .split_once('/')
            .is_some_and(|(_, subtype)| subtype.ends_with("+json"));
    if is_json { ContentKind::Json } else { ContentKind::Text }
}

impl Payload {
    #[must_use]
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Json(_) => ContentKind::Json,
            Self::Text(_) => ContentKind::Text,
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Decode a JSON payload into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnexpectedPayload`] for text payloads and
    /// [`ApiError::Decode`] if the JSON does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Self::Json(value) => Ok(serde_json::from_value(value)?),
            Self::Text(_) => Err(ApiError::UnexpectedPayload),
        }
    }
}
