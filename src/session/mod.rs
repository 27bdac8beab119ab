//! Durable session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `store` holds the authenticated flag consulted by the route guard and
//! mutated by the API client; `storage` provides the durable key/value
//! backends it persists through.

pub mod storage;
pub mod store;

pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{SESSION_KEY, SessionState, SessionStore};
