//! Client-side session layer: durable auth flag, route guarding, and a
//! normalized request/response pipeline for the remote API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns the durable "logged in" flag, `net` talks to the API and
//! invalidates the session on 401, and `nav` decides whether a navigation to
//! a protected view may proceed. `app` wires the three together.

pub mod app;
pub mod config;
pub mod error;
pub mod nav;
pub mod net;
pub mod session;

pub use app::App;
pub use config::ClientConfig;
pub use error::{ApiError, AppError, ConfigError, StorageError};
pub use nav::{GuardDecision, Location, Navigator, RedirectIntent, RouteGuard, Router};
pub use net::{ApiClient, HttpTransport, OutgoingRequest, Payload, Transport};
pub use session::{SessionState, SessionStore};
