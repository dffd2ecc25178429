//! Type matching between stored values and declared destinations.
//!
//! A stored value of concrete type `T` is accepted by a destination declaring
//! type `I` in one of two ways, tried in order:
//!
//! 1. **Exact**: `I` is `T`. The destination receives the shared `Arc<T>`.
//! 2. **Capability**: `T` was declared to satisfy `I` (see
//!    [`Capability`](crate::capability::Capability)). The destination receives
//!    the value viewed as `Arc<I>`.
//!
//! Anything else is [`InjectError::TypeMismatch`].
//!
//! Destinations come in two shapes:
//!
//! - a single [`Slot`], filled by [`Registry::get`](crate::Registry::get);
//! - a record implementing [`Inject`], whose fields are filled one by one by
//!   [`Registry::apply`](crate::Registry::apply).

mod inject;
mod slot;

pub use inject::{Field, Inject, Manifest};
pub use slot::{DynSlot, Slot};

use std::sync::Arc;

use crate::capability::Capabilities;
use crate::component::TypeInfo;
use crate::error::{InjectError, Result};
use crate::store::Entry;

/// How a stored value satisfied a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The declared type is the stored value's concrete type.
    Exact,
    /// The stored value was declared to implement the declared type.
    Capability,
}

/// A stored entry about to be written into a destination.
///
/// Handed to [`DynSlot::fill_from`] so that each slot can request the value as
/// its own declared type.
pub struct Resolution<'a> {
    name: &'a str,
    entry: &'a Entry,
    capabilities: &'a Capabilities,
}

impl<'a> Resolution<'a> {
    pub(crate) fn new(name: &'a str, entry: &'a Entry, capabilities: &'a Capabilities) -> Self {
        Self {
            name,
            entry,
            capabilities,
        }
    }

    /// The binding name being resolved.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }

    /// The stored entry.
    #[must_use]
    pub fn entry(&self) -> &Entry {
        self.entry
    }

    /// Returns the stored value as `Arc<I>`.
    ///
    /// # Errors
    ///
    /// [`InjectError::TypeMismatch`] if `I` is neither the concrete type nor a
    /// declared capability of it.
    pub fn cast<I: ?Sized + 'static>(&self) -> Result<(Arc<I>, MatchKind)> {
        let declared = TypeInfo::of::<I>();
        let found = self.entry.type_info();

        let matched = if declared == found {
            self.entry.exact::<I>().map(|value| (value, MatchKind::Exact))
        } else {
            self.capabilities
                .get(found.id(), declared.id())
                .and_then(|capability| capability.cast::<I>(Arc::clone(self.entry.handle())))
                .map(|value| (value, MatchKind::Capability))
        };

        matched.ok_or_else(|| InjectError::TypeMismatch {
            name: self.name.to_owned(),
            expected: declared.name(),
            found: found.name(),
        })
    }
}
