//! Navigation: shared history handle, route guard, and route resolution.
//!
//! SYSTEM CONTEXT
//! ==============
//! `Navigator` is the one history handle shared by the router and by any
//! success callback that needs to move the user along. `RouteGuard` is a pure
//! allow/redirect decision; `Router` looks routes up, applies the guard to
//! protected ones, and writes redirects back into the navigator.

pub mod guard;
pub mod navigator;
pub mod router;

pub use guard::{GuardDecision, REGISTRATION_ROUTE, RedirectIntent, RouteGuard};
pub use navigator::{Location, NavState, Navigator};
pub use router::{DEFAULT_PROTECTED_ROUTE, Resolution, Route, RouteKind, RouteTable, Router};
