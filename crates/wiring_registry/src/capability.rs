//! Capability declarations: which trait objects a concrete type can be
//! viewed as.
//!
//! Rust cannot ask at runtime whether a type implements a trait. The registry
//! instead keeps a table, filled at registration time, from a concrete type to
//! the trait objects it may be resolved as. Each row holds a caster that
//! performs the unsizing coercion `Arc<T> -> Arc<dyn Trait>`.
//!
//! ```text
//! concrete TypeId ──► { dyn Greeter ──► |Arc<English>| -> Arc<dyn Greeter>,
//!                       dyn Display ──► |Arc<English>| -> Arc<dyn Display> }
//! ```

use core::any::{Any, TypeId};
use core::fmt;
use hashbrown::HashMap;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::component::{Component, TypeInfo};

/// Erased caster: takes the stored handle, returns a boxed `Arc<dyn Trait>`.
type Caster = Arc<dyn Fn(Arc<dyn Component>) -> Option<Box<dyn Any>> + Send + Sync>;

/// A declaration that values of one concrete type can be resolved as a
/// trait object.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wiring_registry::capability::Capability;
///
/// trait Greeter { fn greet(&self) -> String; }
/// struct English;
/// impl Greeter for English { fn greet(&self) -> String { "hello".into() } }
///
/// let capability = Capability::new::<English, dyn Greeter>(|v| v);
/// assert_eq!(capability.concrete().name(), core::any::type_name::<English>());
/// ```
#[derive(Clone)]
pub struct Capability {
    concrete: TypeInfo,
    interface: TypeInfo,
    cast: Caster,
}

impl Capability {
    /// Declares that `T` can be resolved as `I` through `cast`.
    ///
    /// `cast` is usually the identity closure `|v| v`; the coercion to
    /// `Arc<I>` happens at its return.
    pub fn new<T, I>(cast: impl Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static) -> Self
    where
        T: Component,
        I: ?Sized + 'static,
    {
        let cast: Caster = Arc::new(move |handle: Arc<dyn Component>| {
            let concrete = handle.downcast_arc::<T>().ok()?;
            Some(Box::new(cast(concrete)) as Box<dyn Any>)
        });

        Self {
            concrete: TypeInfo::of::<T>(),
            interface: TypeInfo::of::<I>(),
            cast,
        }
    }

    /// The concrete type this declaration applies to.
    #[must_use]
    pub fn concrete(&self) -> TypeInfo {
        self.concrete
    }

    /// The trait object type values can be resolved as.
    #[must_use]
    pub fn interface(&self) -> TypeInfo {
        self.interface
    }

    /// Casts `handle` to `Arc<I>`.
    ///
    /// Returns `None` if the handle is not of the concrete type or `I` is not
    /// this declaration's interface.
    pub(crate) fn cast<I: ?Sized + 'static>(&self, handle: Arc<dyn Component>) -> Option<Arc<I>> {
        (self.cast)(handle)
            .and_then(|boxed| boxed.downcast::<Arc<I>>().ok())
            .map(|boxed| *boxed)
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("concrete", &self.concrete)
            .field("interface", &self.interface)
            .finish_non_exhaustive()
    }
}

/// Table of [`Capability`] declarations, keyed by concrete type.
#[derive(Default)]
pub struct Capabilities {
    table: RwLock<HashMap<TypeId, HashMap<TypeId, Capability>>>,
}

impl Capabilities {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RwLock::new(HashMap::new()),
        }
    }

    /// Adds a declaration, replacing one for the same concrete/interface pair.
    pub fn insert(&self, capability: Capability) {
        self.table
            .write()
            .entry(capability.concrete.id())
            .or_default()
            .insert(capability.interface.id(), capability);
    }

    /// Returns the declaration for `concrete` viewed as `interface`.
    #[must_use]
    pub fn get(&self, concrete: TypeId, interface: TypeId) -> Option<Capability> {
        self.table
            .read()
            .get(&concrete)
            .and_then(|interfaces| interfaces.get(&interface))
            .cloned()
    }

    /// Returns `true` if `concrete` was declared to satisfy `interface`.
    #[must_use]
    pub fn satisfies(&self, concrete: TypeId, interface: TypeId) -> bool {
        self.table
            .read()
            .get(&concrete)
            .is_some_and(|interfaces| interfaces.contains_key(&interface))
    }

    /// Returns every interface declared for `concrete`.
    #[must_use]
    pub fn interfaces_of(&self, concrete: TypeId) -> Vec<TypeInfo> {
        self.table
            .read()
            .get(&concrete)
            .map(|interfaces| interfaces.values().map(Capability::interface).collect())
            .unwrap_or_default()
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().values().map(HashMap::len).sum()
    }

    /// Returns `true` if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
