//! Networking: request building, response normalization, and the API client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `request` and `response` are pure data + serialization, `transport` is the
//! seam to the HTTP stack, and `client` applies the status rules (including
//! the 401 session invalidation) on top of it.

pub mod client;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{ApiClient, LOGIN_PATH, LOGOUT_PATH, PERSON_CURRENT_PATH, REGISTER_PATH};
pub use request::{Method, NO_PARAMS, OutgoingRequest};
pub use response::{ContentKind, IncomingResponse, Payload};
pub use transport::{HttpTransport, Transport};
