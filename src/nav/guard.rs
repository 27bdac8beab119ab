//! Route guard for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Evaluated by the router before a protected view is built. The decision is
//! a plain value so it can be tested without a router; the router performs
//! the redirect. The session is read on every evaluation, never cached, so a
//! 401 anywhere takes effect on the very next protected navigation.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::navigator::{Location, NavState};
use crate::session::SessionStore;

/// Entry point unauthenticated users are sent to.
pub const REGISTRATION_ROUTE: &str = "/register";

/// A denied navigation: where to go instead, and where the user was headed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectIntent {
    pub to: String,
    pub next_path: String,
}

impl RedirectIntent {
    /// History entry for the redirect target, carrying `next_path` as state.
    #[must_use]
    pub fn into_location(self) -> Location {
        Location::with_state(self.to, NavState { next_path: self.next_path })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(RedirectIntent),
}

/// Requires an authenticated session.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: SessionStore,
    redirect_to: String,
}

impl RouteGuard {
    /// Guard that sends anonymous users to [`REGISTRATION_ROUTE`].
    #[must_use]
    pub fn require_auth(session: SessionStore) -> Self {
        Self { session, redirect_to: REGISTRATION_ROUTE.to_owned() }
    }

    #[must_use]
    pub fn redirecting_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = path.into();
        self
    }

    /// Decide whether navigation to `target` may proceed.
    #[must_use]
    pub fn evaluate(&self, target: &Location) -> GuardDecision {
        if self.session.is_authenticated() {
            return GuardDecision::Allow;
        }
        tracing::info!(path = %target.path, redirect = %self.redirect_to, "unauthenticated; redirecting");
        GuardDecision::Redirect(RedirectIntent { to: self.redirect_to.clone(), next_path: target.path.clone() })
    }
}
