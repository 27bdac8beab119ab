//! Route table and guard-aware route resolution.
//!
//! ARCHITECTURE
//! ============
//! Guards are attached per route: only routes declared `guarded` consult the
//! [`RouteGuard`]. Index redirects and guard redirects both replace the
//! current history entry, so "back" never lands on a page the user was
//! bounced away from.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use super::guard::{GuardDecision, REGISTRATION_ROUTE, RouteGuard};
use super::navigator::{Location, Navigator};

/// Where the root path sends users, and where login resumes by default.
pub const DEFAULT_PROTECTED_ROUTE: &str = "/person";

const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    /// Unconditional redirect to another path.
    Redirect(String),
    /// Renders `view`, consulting the guard first when `guarded`.
    View { view: &'static str, guarded: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub kind: RouteKind,
}

/// Exact-match route table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// An empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The application table: `/` redirects to the protected person view,
    /// login and registration are open.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .redirect("/", DEFAULT_PROTECTED_ROUTE)
            .guarded(DEFAULT_PROTECTED_ROUTE, "person")
            .view("/login", "login")
            .view(REGISTRATION_ROUTE, "register")
    }

    #[must_use]
    pub fn redirect(self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.with(from, RouteKind::Redirect(to.into()))
    }

    #[must_use]
    pub fn view(self, path: impl Into<String>, view: &'static str) -> Self {
        self.with(path, RouteKind::View { view, guarded: false })
    }

    #[must_use]
    pub fn guarded(self, path: impl Into<String>, view: &'static str) -> Self {
        self.with(path, RouteKind::View { view, guarded: true })
    }

    fn with(mut self, path: impl Into<String>, kind: RouteKind) -> Self {
        let path: String = path.into();
        let path = normalize(&path).to_owned();
        self.routes.retain(|r| r.path != path);
        self.routes.push(Route { path, kind });
        self
    }

    /// Route for `path`, ignoring any query string and trailing slash.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Route> {
        let path = normalize(path);
        self.routes.iter().find(|r| r.path == path)
    }

    /// Whether `path` is a guarded view.
    #[must_use]
    pub fn is_protected(&self, path: &str) -> bool {
        matches!(self.lookup(path), Some(Route { kind: RouteKind::View { guarded: true, .. }, .. }))
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// Outcome of resolving the navigator's current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Render `view`; `location` is where the navigator ended up.
    Render { view: &'static str, location: Location },
    /// No route matches `location`.
    NotFound { location: Location },
    /// Redirects did not settle on a view.
    RedirectLoop { location: Location },
}

impl Resolution {
    #[must_use]
    pub fn location(&self) -> &Location {
        match self {
            Self::Render { location, .. } | Self::NotFound { location } | Self::RedirectLoop { location } => location,
        }
    }

    #[must_use]
    pub fn view(&self) -> Option<&'static str> {
        match self {
            Self::Render { view, .. } => Some(*view),
            _ => None,
        }
    }
}

/// Applies the route table and guard to the shared navigator.
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    guard: RouteGuard,
    navigator: Navigator,
}

impl Router {
    #[must_use]
    pub fn new(table: RouteTable, guard: RouteGuard, navigator: Navigator) -> Self {
        Self { table, guard, navigator }
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Resolve the current location to a view, following index redirects and
    /// guard redirects. Redirects are written back into the navigator.
    pub fn resolve(&self) -> Resolution {
        self.resolve_tracked().0
    }

    /// [`Router::resolve`], also returning the navigator generation after the
    /// last redirect this call wrote.
    fn resolve_tracked(&self) -> (Resolution, u64) {
        let (mut location, mut generation) = self.navigator.snapshot();
        for _ in 0..MAX_REDIRECTS {
            let Some(route) = self.table.lookup(&location.path) else {
                tracing::debug!(path = %location.path, "no route");
                return (Resolution::NotFound { location }, generation);
            };
            match &route.kind {
                RouteKind::Redirect(to) => {
                    location = Location { path: to.clone(), state: location.state };
                    generation = self.navigator.replace(location.clone());
                }
                RouteKind::View { view, guarded } => {
                    if *guarded {
                        if let GuardDecision::Redirect(intent) = self.guard.evaluate(&location) {
                            location = intent.into_location();
                            generation = self.navigator.replace(location.clone());
                            continue;
                        }
                    }
                    return (Resolution::Render { view: *view, location }, generation);
                }
            }
        }
        tracing::warn!(path = %location.path, "redirect limit reached");
        (Resolution::RedirectLoop { location }, generation)
    }

    /// Navigate to `path` and resolve it.
    pub fn push(&self, path: impl Into<String>) -> Resolution {
        self.navigator.push(path);
        self.resolve()
    }

    /// Continue to where the user was headed before the guard redirected
    /// them, or to [`DEFAULT_PROTECTED_ROUTE`]. Call after a successful login.
    pub fn resume(&self) -> Resolution {
        let next = self
            .navigator
            .take_next_path()
            .unwrap_or_else(|| DEFAULT_PROTECTED_ROUTE.to_owned());
        self.push(next)
    }

    /// Resolve now and again after every navigator change, handing each
    /// resolution to `on_change`. Runs until the returned future is dropped.
    pub async fn follow<F>(&self, mut on_change: F)
    where
        F: FnMut(Resolution) + Send,
    {
        let mut changes = self.navigator.subscribe();
        loop {
            let _ = changes.borrow_and_update();
            let (resolution, resolved_at) = self.resolve_tracked();
            on_change(resolution);
            // Skip notifications for redirects written by `resolve_tracked`;
            // anything written since then came from another handle.
            loop {
                if changes.changed().await.is_err() {
                    return;
                }
                if self.navigator.generation() != resolved_at {
                    break;
                }
            }
        }
    }
}
