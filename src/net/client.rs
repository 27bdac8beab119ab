//! API client: every call to the remote API goes through here.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views call `get`/`post` (or the auth helpers) and receive either a
//! normalized [`Payload`] or an [`ApiError`]. The client owns the one rule
//! that couples networking to session state: a 401 clears the session before
//! the error is returned, so any navigation triggered by the caller's error
//! handling already sees the anonymous session.
//!
//! TRADE-OFFS
//! ==========
//! Only 401 clears the session; 403 and 5xx leave it untouched. Logout clears
//! the session whether or not the server acknowledged the logout request.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::request::OutgoingRequest;
use super::response::{IncomingResponse, Payload};
use super::transport::{HttpTransport, Transport};
use crate::config::ClientConfig;
use crate::error::{ApiError, StorageError};
use crate::session::SessionStore;

pub const LOGIN_PATH: &str = "/api/login";
pub const LOGOUT_PATH: &str = "/api/logout";
pub const REGISTER_PATH: &str = "/api/register";
pub const PERSON_CURRENT_PATH: &str = "/api/person/current";

const STATUS_UNAUTHORIZED: u16 = 401;

/// Cloneable handle for calling the API. Clones share the transport (and so
/// its cookie jar) and the session store.
#[derive(Clone)]
pub struct ApiClient {
    origin: Arc<str>,
    transport: Arc<dyn Transport>,
    session: SessionStore,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("origin", &self.origin)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client for `origin` (scheme + host, no trailing slash).
    pub fn new(origin: impl Into<String>, transport: Arc<dyn Transport>, session: SessionStore) -> Self {
        let origin: String = origin.into();
        Self { origin: origin.trim_end_matches('/').into(), transport, session }
    }

    /// Build a client using the `reqwest` transport configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &ClientConfig, session: SessionStore) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(config.timeouts)?;
        Ok(Self::new(config.origin.clone(), Arc::new(transport), session))
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Whether the local session is currently marked authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// `GET origin + path`, with `params` as the query string.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn get<I, K, V>(&self, path: &str, params: I) -> Result<Payload, ApiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.send(OutgoingRequest::get(path).params(params)).await
    }

    /// `POST origin + path`, with `fields` as a multipart form body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn post<I, K, V>(&self, path: &str, fields: I) -> Result<Payload, ApiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.send(OutgoingRequest::post(path).params(fields)).await
    }

    /// `GET` and decode the JSON payload into `T`.
    ///
    /// # Errors
    ///
    /// Fails like [`ApiClient::get`], or with [`ApiError::UnexpectedPayload`]
    /// / [`ApiError::Decode`] if the body is not the expected JSON.
    pub async fn get_as<T, I, K, V>(&self, path: &str, params: I) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.get(path, params).await?.decode()
    }

    /// Issue `request` and normalize the response.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] if no response was received.
    /// - [`ApiError::SessionInvalidated`] on 401, after clearing the session.
    /// - [`ApiError::Http`] on any other non-2xx status.
    /// - [`ApiError::Decode`] if a JSON-labeled body does not parse.
    pub async fn send(&self, request: OutgoingRequest) -> Result<Payload, ApiError> {
        tracing::debug!(method = %request.method, path = %request.path, "api request");
        let response = self.transport.send(&self.origin, &request).await.inspect_err(|e| {
            tracing::warn!(method = %request.method, path = %request.path, error = %e, "api transport failed");
        })?;
        self.check_status(&request, response)
    }

    fn check_status(&self, request: &OutgoingRequest, response: IncomingResponse) -> Result<Payload, ApiError> {
        if response.is_success() {
            return response.into_payload();
        }

        let status = response.status;
        tracing::warn!(method = %request.method, path = %request.path, status, "api request failed");

        if status == STATUS_UNAUTHORIZED {
            if let Err(e) = self.session.clear() {
                tracing::warn!(error = %e, "failed to persist session clear after 401");
            }
            return Err(ApiError::SessionInvalidated { response });
        }

        Err(ApiError::Http { status, response })
    }

    /// Log in with `username`/`password`, marking the session authenticated
    /// on success.
    ///
    /// # Errors
    ///
    /// Fails like [`ApiClient::post`]; a rejected login (401) leaves the
    /// session anonymous. Returns [`ApiError::Storage`] if the login succeeded
    /// but the marker could not be persisted.
    pub async fn login(&self, username: &str, password: &str) -> Result<Payload, ApiError> {
        let payload = self
            .post(LOGIN_PATH, [("username", username), ("password", password)])
            .await?;
        self.session.set()?;
        Ok(payload)
    }

    /// Log out. The server call is best-effort; the local session is cleared
    /// regardless of its outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only if clearing the local marker could not be
    /// persisted. The session already reads as anonymous in that case.
    pub async fn logout(&self) -> Result<(), StorageError> {
        if let Err(e) = self.send(OutgoingRequest::get(LOGOUT_PATH)).await {
            tracing::warn!(error = %e, "logout request failed; clearing local session anyway");
        }
        self.session.clear()
    }

    /// Create an account. Does not change the local session; the caller logs
    /// in afterwards.
    ///
    /// # Errors
    ///
    /// Fails like [`ApiClient::post`]. Validation failures surface as
    /// [`ApiError::Http`] with the server's response attached.
    pub async fn register(&self, username: &str, password: &str, email: &str) -> Result<Payload, ApiError> {
        self.post(REGISTER_PATH, [("username", username), ("password", password), ("email", email)])
            .await
    }

    /// Fetch the profile of the logged-in person.
    ///
    /// # Errors
    ///
    /// Fails like [`ApiClient::get`]; an expired server session yields
    /// [`ApiError::SessionInvalidated`].
    pub async fn current_person(&self) -> Result<Payload, ApiError> {
        self.send(OutgoingRequest::get(PERSON_CURRENT_PATH)).await
    }
}
