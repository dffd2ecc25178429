//! Named storage for materialized values and lazy producers.
//!
//! The [`Store`] maps each name to exactly one state:
//!
//! | State | Meaning |
//! |-------|---------|
//! | absent | nothing registered under the name |
//! | lazy | a producer waits to be run on first access |
//! | materialized | an [`Entry`] is ready to be handed out |
//!
//! A name is never lazy and materialized at the same time. Promotion replaces
//! the lazy state with the materialized one in a single write.

mod entry;
mod lazy;

pub use entry::Entry;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry as MapEntry;
use lazy::{LazyEntry, Producer};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::component::Component;

/// The state of a single name.
enum EntryState {
    Materialized(Entry),
    Lazy(Arc<LazyEntry>),
}

/// Outcome of [`Store::insert_lazy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LazyInsert {
    /// The producer was stored.
    Stored,
    /// The producer replaced an earlier, not yet promoted producer.
    Replaced,
    /// A materialized value already exists; the producer was dropped.
    Ignored,
}

/// Outcome of [`Store::promote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    /// Nothing is registered under the name.
    Absent,
    /// The name already held a materialized value.
    AlreadyMaterialized,
    /// The lazy producer's value is now the materialized entry.
    Promoted,
    /// The producer ran, but the name was registered again while it was
    /// running; the produced value was discarded and the newer registration
    /// kept.
    Superseded,
    /// The producer panicked on an earlier promotion.
    Poisoned,
}

/// Container mapping names to materialized entries or lazy producers.
///
/// All methods take `&self`; the map sits behind a `RwLock`. The lock is
/// never held while a producer runs.
///
/// # Example
///
/// ```
/// use wiring_registry::store::{Promotion, Store};
///
/// let store = Store::new();
/// store.insert_lazy("answer", || 42_u32);
/// assert!(store.is_lazy("answer"));
///
/// assert_eq!(store.promote("answer"), Promotion::Promoted);
/// let entry = store.lookup("answer").unwrap();
/// assert_eq!(*entry.downcast::<u32>().unwrap(), 42);
/// ```
#[derive(Default)]
pub struct Store {
    entries: RwLock<HashMap<String, EntryState>>,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Stores `value` under `name`, replacing any value or producer.
    ///
    /// Returns `true` if something was replaced.
    pub fn insert<T: Component>(&self, name: impl Into<String>, value: T) -> bool {
        self.insert_entry(name, Entry::new(value))
    }

    /// Stores an already built entry under `name`, replacing any value or
    /// producer.
    ///
    /// Returns `true` if something was replaced.
    pub fn insert_entry(&self, name: impl Into<String>, entry: Entry) -> bool {
        self.entries
            .write()
            .insert(name.into(), EntryState::Materialized(entry))
            .is_some()
    }

    /// Stores a producer under `name`.
    ///
    /// An existing materialized value wins: the producer is dropped without
    /// running. An existing producer is replaced.
    pub fn insert_lazy<T, F>(&self, name: impl Into<String>, producer: F) -> LazyInsert
    where
        T: Component,
        F: FnOnce() -> T + Send + 'static,
    {
        let producer: Producer = Box::new(move || Entry::new(producer()));
        let lazy = EntryState::Lazy(Arc::new(LazyEntry::new(producer)));

        match self.entries.write().entry(name.into()) {
            MapEntry::Occupied(occupied) if matches!(occupied.get(), EntryState::Materialized(_)) => {
                LazyInsert::Ignored
            }
            MapEntry::Occupied(mut occupied) => {
                occupied.insert(lazy);
                LazyInsert::Replaced
            }
            MapEntry::Vacant(vacant) => {
                vacant.insert(lazy);
                LazyInsert::Stored
            }
        }
    }

    /// Runs the producer registered under `name`, if any, and stores its
    /// value as the materialized entry.
    ///
    /// Idempotent: once promoted, later calls report
    /// [`Promotion::AlreadyMaterialized`] and never run the producer again.
    pub fn promote(&self, name: &str) -> Promotion {
        let lazy = match self.entries.read().get(name) {
            Some(EntryState::Lazy(lazy)) => Arc::clone(lazy),
            Some(EntryState::Materialized(_)) => return Promotion::AlreadyMaterialized,
            None => return Promotion::Absent,
        };

        let Some(entry) = lazy.force() else {
            return Promotion::Poisoned;
        };

        let mut entries = self.entries.write();
        // A concurrent registration may have replaced the producer we ran.
        let unchanged = matches!(
            entries.get(name),
            Some(EntryState::Lazy(current)) if Arc::ptr_eq(current, &lazy)
        );
        if !unchanged {
            return Promotion::Superseded;
        }
        entries.insert(name.to_owned(), EntryState::Materialized(entry));
        Promotion::Promoted
    }

    /// Returns the materialized entry under `name`.
    ///
    /// Does not promote: a name that is still lazy returns `None`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Entry> {
        match self.entries.read().get(name) {
            Some(EntryState::Materialized(entry)) => Some(entry.clone()),
            _ => None,
        }
    }

    /// Returns `true` if anything, lazy or materialized, is registered under
    /// `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Returns `true` if `name` holds a producer that has not run yet.
    ///
    /// A producer that panicked is no longer lazy; its name stays registered
    /// but resolves to nothing.
    #[must_use]
    pub fn is_lazy(&self, name: &str) -> bool {
        matches!(
            self.entries.read().get(name),
            Some(EntryState::Lazy(lazy)) if !lazy.is_poisoned()
        )
    }

    /// Removes whatever is registered under `name`.
    ///
    /// Returns `true` if something was removed.
    pub fn remove(&self, name: &str) -> bool {
        self.entries.write().remove(name).is_some()
    }

    /// Returns all registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Returns the number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    struct Counter {
        value: i32,
    }

    fn counting_producer(calls: &Arc<AtomicUsize>, value: i32) -> impl FnOnce() -> Counter + Send + 'static {
        let calls = Arc::clone(calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            Counter { value }
        }
    }

    #[test]
    fn insert_and_lookup() {
        let store = Store::new();
        assert!(!store.insert("counter", Counter { value: 42 }));

        let entry = store.lookup("counter").unwrap();
        assert_eq!(entry.downcast::<Counter>().unwrap().value, 42);
    }

    #[test]
    fn insert_replaces_existing() {
        let store = Store::new();
        store.insert("counter", Counter { value: 1 });

        assert!(store.insert("counter", Counter { value: 2 }));
        let entry = store.lookup("counter").unwrap();
        assert_eq!(entry.downcast::<Counter>().unwrap().value, 2);
    }

    #[test]
    fn insert_replaces_pending_producer() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = Store::new();
        store.insert_lazy("counter", counting_producer(&calls, 1));

        store.insert("counter", Counter { value: 2 });

        assert!(!store.is_lazy("counter"));
        assert_eq!(store.promote("counter"), Promotion::AlreadyMaterialized);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn lazy_insert_does_not_override_value() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = Store::new();
        store.insert("counter", Counter { value: 1 });

        let outcome = store.insert_lazy("counter", counting_producer(&calls, 2));

        assert_eq!(outcome, LazyInsert::Ignored);
        store.promote("counter");
        let entry = store.lookup("counter").unwrap();
        assert_eq!(entry.downcast::<Counter>().unwrap().value, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn lazy_insert_replaces_producer() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let store = Store::new();

        assert_eq!(
            store.insert_lazy("counter", counting_producer(&first, 1)),
            LazyInsert::Stored
        );
        assert_eq!(
            store.insert_lazy("counter", counting_producer(&second, 2)),
            LazyInsert::Replaced
        );

        store.promote("counter");
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn lookup_does_not_promote() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = Store::new();
        store.insert_lazy("counter", counting_producer(&calls, 1));

        assert!(store.lookup("counter").is_none());
        assert!(store.contains("counter"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn promote_runs_producer_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = Store::new();
        store.insert_lazy("counter", counting_producer(&calls, 9));

        assert_eq!(store.promote("counter"), Promotion::Promoted);
        assert_eq!(store.promote("counter"), Promotion::AlreadyMaterialized);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!store.is_lazy("counter"));
        let first = store.lookup("counter").unwrap();
        let second = store.lookup("counter").unwrap();
        assert!(first.ptr_eq(&second));
    }

    #[test]
    fn replacement_during_promotion_is_superseded() {
        let store = Arc::new(Store::new());
        let inner = Arc::clone(&store);
        store.insert_lazy("counter", move || {
            inner.insert_lazy("counter", || Counter { value: 2 });
            Counter { value: 1 }
        });

        assert_eq!(store.promote("counter"), Promotion::Superseded);
        assert!(store.is_lazy("counter"));
        assert!(store.lookup("counter").is_none());

        assert_eq!(store.promote("counter"), Promotion::Promoted);
        let entry = store.lookup("counter").unwrap();
        assert_eq!(entry.downcast::<Counter>().unwrap().value, 2);
    }

    #[test]
    fn poisoned_entry_is_not_lazy() {
        let store = Store::new();
        store.insert_lazy("counter", || -> Counter { panic!("broken producer") });

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.promote("counter")
        }));
        assert!(outcome.is_err());

        assert_eq!(store.promote("counter"), Promotion::Poisoned);
        assert!(!store.is_lazy("counter"));
        assert!(store.contains("counter"));
        assert!(store.lookup("counter").is_none());
    }

    #[test]
    fn promote_absent_is_noop() {
        let store = Store::new();
        assert_eq!(store.promote("missing"), Promotion::Absent);
        assert!(store.is_empty());
    }

    #[test]
    fn names_are_sorted() {
        let store = Store::new();
        store.insert("b", 1_u8);
        store.insert_lazy("c", || 3_u8);
        store.insert("a", 2_u8);

        assert_eq!(store.names(), vec!["a", "b", "c"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn remove_and_clear() {
        let store = Store::new();
        store.insert("a", 1_u8);
        store.insert_lazy("b", || 2_u8);

        assert!(store.remove("a"));
        assert!(!store.remove("a"));
        assert!(store.contains("b"));

        store.clear();
        assert!(store.is_empty());
    }
}
