//! Transport seam between the API client and the HTTP stack.
//!
//! ARCHITECTURE
//! ============
//! The transport only moves bytes: it returns whatever status the server sent
//! and never interprets it. Status rules live in [`super::client`], so tests
//! can script responses with a mock transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use super::request::{Method, OutgoingRequest};
use super::response::IncomingResponse;
use crate::config::Timeouts;
use crate::error::ApiError;

/// Sends a request and returns the raw response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue `request` against `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] only when no response was received, or
    /// when a successful response's body could not be read. Any status code,
    /// including 4xx/5xx, is `Ok`.
    async fn send(&self, origin: &str, request: &OutgoingRequest) -> Result<IncomingResponse, ApiError>;
}

/// `reqwest`-backed transport.
///
/// Keeps a cookie jar for its lifetime so the server's session cookie is
/// sent on every request, like a browser with credentials included.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with a fresh cookie jar. Deadlines apply only when
    /// set in `timeouts`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(timeouts: Timeouts) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(secs) = timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = timeouts.connect_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, origin: &str, request: &OutgoingRequest) -> Result<IncomingResponse, ApiError> {
        let url = request.url(origin);
        let builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url).multipart(request.multipart_form()),
        };

        let response = builder.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = match response.text().await {
            Ok(body) => body,
            // Keep the status: a 401 must still clear the session.
            Err(e) if !status.is_success() => {
                tracing::warn!(method = %request.method, %url, status = status.as_u16(), error = %e, "api error body unreadable");
                String::new()
            }
            Err(e) => return Err(ApiError::Transport(e.to_string())),
        };

        tracing::debug!(method = %request.method, %url, status = status.as_u16(), "api response");
        Ok(IncomingResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().map(str::to_owned),
            content_type,
            body,
        })
    }
}
