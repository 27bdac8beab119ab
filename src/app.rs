//! Composition root wiring session, API client, and navigation together.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionStore` is shared by the API client (which mutates it) and the
//! route guard (which reads it). One `Navigator` is shared by the router and
//! by any callback that navigates imperatively. Nothing here is global; every
//! consumer receives its dependencies explicitly.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::{ApiError, AppError, StorageError};
use crate::nav::{Navigator, Resolution, RouteGuard, RouteTable, Router};
use crate::net::{ApiClient, Transport};
use crate::session::{FileStorage, SessionStore, Storage};

const INITIAL_PATH: &str = "/";

#[derive(Debug, Clone)]
pub struct App {
    pub session: SessionStore,
    pub api: ApiClient,
    pub navigator: Navigator,
    pub router: Router,
}

impl App {
    /// Build from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is missing or invalid, the session
    /// file is unreadable, or the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    /// Build with file-backed session storage and the `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file is unreadable or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, AppError> {
        let storage = FileStorage::open(&config.session_file)?;
        tracing::info!(origin = %config.origin, session_file = %storage.path().display(), "client configured");
        let session = SessionStore::open(Arc::new(storage));
        let api = ApiClient::from_config(config, session.clone())?;
        Ok(Self::assemble(session, api))
    }

    /// Build from explicit storage and transport.
    pub fn with_parts(origin: &str, storage: Arc<dyn Storage>, transport: Arc<dyn Transport>) -> Self {
        let session = SessionStore::open(storage);
        let api = ApiClient::new(origin, transport, session.clone());
        Self::assemble(session, api)
    }

    fn assemble(session: SessionStore, api: ApiClient) -> Self {
        let navigator = Navigator::new(INITIAL_PATH);
        let router = Router::new(RouteTable::standard(), RouteGuard::require_auth(session.clone()), navigator.clone());
        Self { session, api, navigator, router }
    }

    /// Log in, then continue to where the user was headed.
    ///
    /// # Errors
    ///
    /// Returns the login failure; navigation is left untouched in that case.
    pub async fn login_and_resume(&self, username: &str, password: &str) -> Result<Resolution, ApiError> {
        self.api.login(username, password).await?;
        Ok(self.router.resume())
    }

    /// Log out, then re-resolve the current location so a protected view is
    /// left immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the cleared session could not be persisted. The
    /// navigator has already been moved off any protected view by then.
    pub async fn logout(&self) -> Result<Resolution, StorageError> {
        let cleared = self.api.logout().await;
        let resolution = self.router.resolve();
        cleared.map(|()| resolution)
    }
}
