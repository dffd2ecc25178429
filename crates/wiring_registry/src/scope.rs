//! Carrying a registry through a call chain.
//!
//! The registry itself does not know where it is stored. Integrations such as
//! HTTP middleware put a registry into some per-request scope and take it out
//! again further down the chain. [`RegistryScope`] is the contract for that
//! scope; [`deps`] loads the registry or fails with
//! [`InjectError::NoRegistry`].
//!
//! Two scopes ship with the crate:
//!
//! - [`RequestScope`] - an explicit context object passed by reference.
//!   Child scopes see their parent's registry unless they store their own.
//! - [`Ambient`] - thread-local storage, entered with [`enter`] and restored
//!   when the returned guard drops.
//!
//! ```text
//! RequestScope (registry: app)
//!    │
//!    └── child (no registry)      deps() ─► app
//!           │
//!           └── child (registry: test) deps() ─► test
//! ```

use core::cell::RefCell;
use core::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{InjectError, Result};
use crate::registry::Registry;

/// A place a registry can be stored in and loaded from later.
pub trait RegistryScope {
    /// Stores `registry` in this scope, replacing any previous one.
    fn store(&mut self, registry: Arc<Registry>);

    /// Returns the registry visible from this scope.
    fn load(&self) -> Option<Arc<Registry>>;
}

/// Loads the registry stored in `scope`.
///
/// # Errors
///
/// [`InjectError::NoRegistry`] if nothing was stored.
pub fn deps<S: RegistryScope + ?Sized>(scope: &S) -> Result<Arc<Registry>> {
    scope.load().ok_or(InjectError::NoRegistry)
}

// ─────────────────────────────────────────────────────────────────────────────
// RequestScope
// ─────────────────────────────────────────────────────────────────────────────

/// An explicit, hierarchical scope.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wiring_registry::scope::{RegistryScope, RequestScope, deps};
/// use wiring_registry::Registry;
///
/// let mut root = RequestScope::new();
/// root.store(Arc::new(Registry::new()));
///
/// let child = root.child();
/// assert!(deps(&child).is_ok());
/// ```
#[derive(Default)]
pub struct RequestScope<'parent> {
    parent: Option<&'parent RequestScope<'parent>>,
    registry: Option<Arc<Registry>>,
}

impl<'parent> RequestScope<'parent> {
    /// Creates an empty root scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: None,
            registry: None,
        }
    }

    /// Creates a root scope holding `registry`.
    #[must_use]
    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Self {
            parent: None,
            registry: Some(registry),
        }
    }

    /// Creates a child scope that falls back to this scope's registry.
    #[must_use]
    pub fn child(&'parent self) -> RequestScope<'parent> {
        RequestScope {
            parent: Some(self),
            registry: None,
        }
    }

    /// Returns the parent scope, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&RequestScope<'parent>> {
        self.parent
    }
}

impl RegistryScope for RequestScope<'_> {
    fn store(&mut self, registry: Arc<Registry>) {
        self.registry = Some(registry);
    }

    fn load(&self) -> Option<Arc<Registry>> {
        match &self.registry {
            Some(registry) => Some(Arc::clone(registry)),
            None => self.parent.and_then(RegistryScope::load),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ambient
// ─────────────────────────────────────────────────────────────────────────────

thread_local! {
    static AMBIENT: RefCell<Option<Arc<Registry>>> = const { RefCell::new(None) };
}

/// The calling thread's ambient scope.
///
/// Storing through `Ambient` replaces the thread's registry until another
/// store; prefer [`enter`], which restores the previous registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ambient;

impl RegistryScope for Ambient {
    fn store(&mut self, registry: Arc<Registry>) {
        AMBIENT.with(|slot| *slot.borrow_mut() = Some(registry));
    }

    fn load(&self) -> Option<Arc<Registry>> {
        AMBIENT.with(|slot| slot.borrow().clone())
    }
}

/// Makes `registry` the calling thread's ambient registry until the guard
/// drops.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wiring_registry::scope::{Ambient, deps, enter};
/// use wiring_registry::Registry;
///
/// let registry = Arc::new(Registry::new());
/// {
///     let _guard = enter(Arc::clone(&registry));
///     assert!(deps(&Ambient).is_ok());
/// }
/// assert!(deps(&Ambient).is_err());
/// ```
#[must_use = "the registry leaves the ambient scope when the guard drops"]
pub fn enter(registry: Arc<Registry>) -> AmbientGuard {
    let previous = AMBIENT.with(|slot| slot.replace(Some(registry)));
    AmbientGuard {
        previous,
        _thread_bound: PhantomData,
    }
}

/// Restores the previous ambient registry on drop.
pub struct AmbientGuard {
    previous: Option<Arc<Registry>>,
    _thread_bound: PhantomData<Rc<()>>,
}

impl Drop for AmbientGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        AMBIENT.with(|slot| *slot.borrow_mut() = previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(label: &'static str) -> Arc<Registry> {
        Arc::new(Registry::with_config(
            crate::RegistryConfig::default().with_label(label),
        ))
    }

    #[test]
    fn empty_scope_has_no_registry() {
        let scope = RequestScope::new();
        assert!(matches!(deps(&scope), Err(InjectError::NoRegistry)));
    }

    #[test]
    fn child_inherits_parent_registry() {
        let root = RequestScope::with_registry(labelled("app"));
        let child = root.child();
        let grandchild = child.child();

        assert_eq!(deps(&grandchild).unwrap().config().label(), "app");
    }

    #[test]
    fn child_registry_shadows_parent() {
        let root = RequestScope::with_registry(labelled("app"));
        let mut child = root.child();
        child.store(labelled("test"));

        assert_eq!(deps(&child).unwrap().config().label(), "test");
        assert_eq!(deps(&root).unwrap().config().label(), "app");
    }

    #[test]
    fn scope_returns_the_stored_instance() {
        let registry = labelled("app");
        let scope = RequestScope::with_registry(Arc::clone(&registry));

        assert!(Arc::ptr_eq(&deps(&scope).unwrap(), &registry));
    }

    #[test]
    fn ambient_guards_nest() {
        let outer = labelled("outer");
        let inner = labelled("inner");

        let _outer_guard = enter(outer);
        {
            let _inner_guard = enter(inner);
            assert_eq!(deps(&Ambient).unwrap().config().label(), "inner");
        }
        assert_eq!(deps(&Ambient).unwrap().config().label(), "outer");
    }

    #[test]
    fn ambient_is_thread_local() {
        let _guard = enter(labelled("main"));

        let seen = std::thread::spawn(|| deps(&Ambient).is_ok()).join().unwrap();
        assert!(!seen);
    }
}
