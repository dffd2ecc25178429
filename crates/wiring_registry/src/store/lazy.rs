//! Lazy producers and their one-time promotion.

use core::fmt;
use parking_lot::Mutex;

use super::Entry;

/// Deferred construction of an entry.
pub(crate) type Producer = Box<dyn FnOnce() -> Entry + Send>;

enum LazyState {
    /// The producer has not run yet.
    Pending(Producer),
    /// The producer ran and produced this entry.
    Ready(Entry),
    /// The producer panicked while running.
    Poisoned,
}

/// A producer that runs at most once.
///
/// The per-entry mutex serializes concurrent promotions of the same name, so
/// the producer runs exactly once even when several threads race on it. It is
/// independent of the store lock, which leaves producers free to resolve other
/// names.
pub(crate) struct LazyEntry {
    state: Mutex<LazyState>,
}

impl LazyEntry {
    pub(crate) fn new(producer: Producer) -> Self {
        Self {
            state: Mutex::new(LazyState::Pending(producer)),
        }
    }

    /// Runs the producer on the first call and returns its entry on every call.
    ///
    /// Returns `None` once a producer has panicked.
    pub(crate) fn force(&self) -> Option<Entry> {
        let mut state = self.state.lock();

        if let LazyState::Ready(entry) = &*state {
            return Some(entry.clone());
        }

        // Left as `Poisoned` if the producer unwinds.
        match core::mem::replace(&mut *state, LazyState::Poisoned) {
            LazyState::Pending(producer) => {
                let entry = producer();
                *state = LazyState::Ready(entry.clone());
                Some(entry)
            }
            LazyState::Ready(_) | LazyState::Poisoned => None,
        }
    }

    /// Returns `true` once the producer has panicked.
    ///
    /// Never blocks: a producer that is still running holds the lock and is
    /// not poisoned.
    pub(crate) fn is_poisoned(&self) -> bool {
        matches!(self.state.try_lock().as_deref(), Some(LazyState::Poisoned))
    }
}

impl fmt::Debug for LazyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state.try_lock().as_deref() {
            Some(LazyState::Pending(_)) => "pending",
            Some(LazyState::Ready(_)) => "ready",
            Some(LazyState::Poisoned) => "poisoned",
            None => "running",
        };
        f.debug_struct("LazyEntry").field("state", &state).finish()
    }
}
