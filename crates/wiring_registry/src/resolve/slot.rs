//! Typed destinations.

use std::sync::{Arc, OnceLock};

use super::{MatchKind, Resolution};
use crate::component::TypeInfo;
use crate::error::Result;

/// A single typed destination that a registry value can be written into.
///
/// `Target` is the declared type: either a concrete type (exact matches only)
/// or a trait object such as `dyn Greeter` (capability matches).
///
/// # Built-in Implementations
///
/// - `Option<Arc<I>>` - always settable; a successful resolution replaces the
///   current value.
/// - `OnceLock<Arc<I>>` - settable only while empty.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wiring_registry::Registry;
///
/// let registry = Registry::new();
/// registry.register("port", 8080_u16);
///
/// let mut port: Option<Arc<u16>> = None;
/// registry.get("port", &mut port).unwrap();
/// assert_eq!(port.as_deref(), Some(&8080));
/// ```
pub trait Slot {
    /// The declared type of this destination.
    type Target: ?Sized + 'static;

    /// Returns `true` if the slot currently accepts a write.
    fn is_settable(&self) -> bool {
        true
    }

    /// Writes a resolved value into the slot.
    ///
    /// Only meaningful while [`is_settable`](Self::is_settable) returns
    /// `true`. A slot that refuses writes keeps its current value and drops
    /// `value`; the registry never calls `fill` on such a slot.
    fn fill(&mut self, value: Arc<Self::Target>);
}

impl<I: ?Sized + 'static> Slot for Option<Arc<I>> {
    type Target = I;

    fn fill(&mut self, value: Arc<I>) {
        *self = Some(value);
    }
}

impl<I: ?Sized + 'static> Slot for OnceLock<Arc<I>> {
    type Target = I;

    fn is_settable(&self) -> bool {
        self.get().is_none()
    }

    /// Sets the lock if it is empty; a filled lock keeps its value and
    /// `value` is dropped.
    fn fill(&mut self, value: Arc<I>) {
        if self.set(value).is_err() {
            tracing::trace!(
                declared = core::any::type_name::<I>(),
                "once lock already filled; value dropped"
            );
        }
    }
}

/// Object-safe view of a [`Slot`], used for record fields.
///
/// Implemented for every `Slot`; there is no need to implement it directly.
pub trait DynSlot {
    /// The declared type of the destination.
    fn declared(&self) -> TypeInfo;

    /// Returns `true` if the destination currently accepts a write.
    fn settable(&self) -> bool;

    /// Matches the resolved entry against the declared type and writes it.
    ///
    /// The destination is left untouched on error.
    ///
    /// # Errors
    ///
    /// [`InjectError::TypeMismatch`](crate::InjectError::TypeMismatch) when
    /// the stored value does not satisfy the declared type.
    fn fill_from(&mut self, resolution: &Resolution<'_>) -> Result<MatchKind>;
}

impl<S: Slot> DynSlot for S {
    fn declared(&self) -> TypeInfo {
        TypeInfo::of::<S::Target>()
    }

    fn settable(&self) -> bool {
        self.is_settable()
    }

    fn fill_from(&mut self, resolution: &Resolution<'_>) -> Result<MatchKind> {
        let (value, kind) = resolution.cast::<S::Target>()?;
        self.fill(value);
        Ok(kind)
    }
}
