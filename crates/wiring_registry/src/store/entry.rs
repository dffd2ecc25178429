//! Materialized registry entries.

use core::any::Any;
use core::fmt;
use std::sync::Arc;

use crate::component::{Component, TypeInfo};

/// Turns an erased handle back into a boxed `Arc<T>` of its concrete type.
type ExactView = fn(Arc<dyn Component>) -> Option<Box<dyn Any>>;

fn exact_view<T: Component>(handle: Arc<dyn Component>) -> Option<Box<dyn Any>> {
    handle
        .downcast_arc::<T>()
        .ok()
        .map(|value| Box::new(value) as Box<dyn Any>)
}

/// A materialized value stored under a registry name.
///
/// The value lives behind an `Arc`. Cloning an `Entry` clones the handle, so
/// every lookup of the same materialized entry observes the identical value.
#[derive(Clone)]
pub struct Entry {
    /// Type-erased shared value.
    handle: Arc<dyn Component>,
    /// Concrete type of the value.
    info: TypeInfo,
    /// Recovers `Arc<T>` for the concrete `T`.
    exact: ExactView,
}

impl Entry {
    /// Wraps `value` in a new entry.
    #[must_use]
    pub fn new<T: Component>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wraps an already shared value.
    #[must_use]
    pub fn from_arc<T: Component>(value: Arc<T>) -> Self {
        Self {
            handle: value,
            info: TypeInfo::of::<T>(),
            exact: exact_view::<T>,
        }
    }

    /// Returns the concrete type of the stored value.
    #[must_use]
    pub fn type_info(&self) -> TypeInfo {
        self.info
    }

    /// Returns the concrete type name of the stored value.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.info.name()
    }

    /// Returns the type-erased handle.
    #[must_use]
    pub fn handle(&self) -> &Arc<dyn Component> {
        &self.handle
    }

    /// Returns the value if its concrete type is exactly `T`.
    #[must_use]
    pub fn downcast<T: Component>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.handle).downcast_arc::<T>().ok()
    }

    /// Returns the value as `Arc<I>` if `I` is exactly its concrete type.
    ///
    /// Unlike [`downcast`](Self::downcast) this accepts unsized `I`, which
    /// never matches but lets callers stay generic over trait objects.
    pub(crate) fn exact<I: ?Sized + 'static>(&self) -> Option<Arc<I>> {
        if TypeInfo::of::<I>() != self.info {
            return None;
        }
        (self.exact)(Arc::clone(&self.handle))
            .and_then(|boxed| boxed.downcast::<Arc<I>>().ok())
            .map(|boxed| *boxed)
    }

    /// Returns `true` if both entries share the same value.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handle, &other.handle)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("type", &self.info)
            .finish_non_exhaustive()
    }
}
