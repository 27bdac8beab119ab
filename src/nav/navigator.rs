//! Shared imperative navigation handle.
//!
//! DESIGN
//! ======
//! History entries live behind a mutex; the current entry is mirrored into a
//! `watch` channel so a render loop can await location changes. Both are
//! updated under the same lock so subscribers never see an entry that is not
//! on top of the history stack. Every notifying write also bumps a generation
//! counter under that lock, which lets a reader tell its own writes apart from
//! writes made through other handles.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod navigator_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

/// State carried along with a history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    /// Where the user was headed before being redirected.
    pub next_path: String,
}

/// A history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub state: Option<NavState>,
}

impl Location {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), state: None }
    }

    #[must_use]
    pub fn with_state(path: impl Into<String>, state: NavState) -> Self {
        Self { path: path.into(), state: Some(state) }
    }
}

/// Cloneable history handle. All clones drive the same history.
#[derive(Clone)]
pub struct Navigator {
    inner: Arc<Inner>,
}

struct Inner {
    history: Mutex<Vec<Location>>,
    current: watch::Sender<Location>,
    generation: AtomicU64,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator").field("current", &self.current()).finish()
    }
}

impl Navigator {
    /// Start a history whose only entry is `initial`.
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        let initial = Location::new(initial);
        let (current, _) = watch::channel(initial.clone());
        Self { inner: Arc::new(Inner { history: Mutex::new(vec![initial]), current, generation: AtomicU64::new(0) }) }
    }

    /// Publish `location` as current. Call with the history lock held.
    fn publish(&self, location: Location) -> u64 {
        self.inner.current.send_replace(location);
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Count of notifying writes made through any handle.
    #[must_use]
    pub fn generation(&self) -> u64 {
        let _history = self.history();
        self.inner.generation.load(Ordering::SeqCst)
    }

    /// Current entry together with the generation it was written at.
    #[must_use]
    pub fn snapshot(&self) -> (Location, u64) {
        let _history = self.history();
        (self.inner.current.borrow().clone(), self.inner.generation.load(Ordering::SeqCst))
    }

    fn history(&self) -> MutexGuard<'_, Vec<Location>> {
        self.inner.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The entry on top of the history stack.
    #[must_use]
    pub fn current(&self) -> Location {
        self.inner.current.borrow().clone()
    }

    /// Number of entries in the history stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.history().len()
    }

    /// Navigate to `path`, adding a history entry.
    pub fn push(&self, path: impl Into<String>) {
        self.push_location(Location::new(path));
    }

    /// Navigate to `path` carrying `state`, adding a history entry.
    pub fn push_with_state(&self, path: impl Into<String>, state: NavState) {
        self.push_location(Location::with_state(path, state));
    }

    fn push_location(&self, location: Location) {
        let mut history = self.history();
        tracing::debug!(path = %location.path, "navigate push");
        history.push(location.clone());
        self.publish(location);
    }

    /// Swap the current entry for `location` without growing the history.
    /// Returns the generation of this write.
    pub fn replace(&self, location: Location) -> u64 {
        let mut history = self.history();
        tracing::debug!(path = %location.path, "navigate replace");
        match history.last_mut() {
            Some(top) => *top = location.clone(),
            None => history.push(location.clone()),
        }
        self.publish(location)
    }

    /// Pop the current entry. Returns `false` (and stays put) at the first entry.
    pub fn back(&self) -> bool {
        let mut history = self.history();
        if history.len() <= 1 {
            return false;
        }
        history.pop();
        if let Some(top) = history.last() {
            self.publish(top.clone());
        }
        true
    }

    /// Consume the `next_path` carried by the current entry. A second call
    /// returns `None`.
    pub fn take_next_path(&self) -> Option<String> {
        let mut history = self.history();
        let next = history.last_mut()?.state.take()?.next_path;
        self.inner.current.send_if_modified(|location| {
            location.state = None;
            false
        });
        Some(next)
    }

    /// Receiver that observes every change of the current entry.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Location> {
        self.inner.current.subscribe()
    }
}
