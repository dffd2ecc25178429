//! The value model shared by the store and the resolution engine.

use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};
use downcast_rs::{DowncastSync, impl_downcast};

/// A value that can be stored in a [`Registry`](crate::Registry).
///
/// Any type that is `Send + Sync + 'static` automatically implements
/// `Component`. Stored values are kept behind an `Arc<dyn Component>` and
/// recovered with `downcast_arc`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wiring_registry::Component;
///
/// struct Database { url: String }
///
/// let erased: Arc<dyn Component> = Arc::new(Database { url: "pg://".into() });
/// let db = erased.downcast_arc::<Database>().ok().unwrap();
/// assert_eq!(db.url, "pg://");
/// ```
pub trait Component: DowncastSync {}

impl<T: Send + Sync + 'static> Component for T {}

impl_downcast!(sync Component);

/// Runtime description of a type: its `TypeId` plus a readable name.
///
/// Two descriptors are equal when their `TypeId`s are equal; the name is
/// only carried for error messages and logs.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    /// Describes `T`. Works for unsized types such as `dyn Trait`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Returns the underlying `TypeId`.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the type name as reported by [`core::any::type_name`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
