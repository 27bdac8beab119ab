//! Auth-session flag for the current client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the route guard on every protected navigation; set by a successful
//! login, cleared by logout and by any 401 seen by the API client. No user
//! identity or expiry is tracked here, the server-side cookie owns that.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;

use super::storage::Storage;
use crate::error::StorageError;

/// Storage key holding the authenticated marker.
pub const SESSION_KEY: &str = "loggedIn";

const AUTHENTICATED: &str = "true";

/// Coarse session state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Shared handle to the durable authenticated flag.
///
/// Cloning is cheap; all clones observe the same flag.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("state", &self.state()).finish()
    }
}

impl SessionStore {
    /// Attach to `storage`, picking up any marker left by a previous run.
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        let store = Self { storage };
        tracing::debug!(state = ?store.state(), "session store opened");
        store
    }

    /// Mark the client authenticated.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker could not be persisted. The marker is
    /// still visible to readers in this process.
    pub fn set(&self) -> Result<(), StorageError> {
        self.storage.set(SESSION_KEY, AUTHENTICATED)?;
        tracing::info!("session authenticated");
        Ok(())
    }

    /// Remove the authenticated marker.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal could not be persisted. Readers in this
    /// process already see the session as anonymous.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(SESSION_KEY)?;
        tracing::info!("session cleared");
        Ok(())
    }

    /// Whether the authenticated marker is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.storage.get(SESSION_KEY).is_some_and(|v| is_truthy(&v))
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.is_authenticated() { SessionState::Authenticated } else { SessionState::Anonymous }
    }
}

fn is_truthy(raw: &str) -> bool {
    !matches!(raw.trim(), "" | "false" | "0")
}
