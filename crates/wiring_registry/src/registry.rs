//! The registry façade: registration, single-name retrieval, and bulk field
//! population.

use core::fmt;
use std::sync::Arc;

use crate::capability::{Capabilities, Capability};
use crate::component::Component;
use crate::config::{RegistryConfig, UnsettablePolicy};
use crate::error::{InjectError, Result};
use crate::module::Module;
use crate::resolve::{DynSlot, Inject, Manifest, MatchKind, Resolution, Slot};
use crate::service::{Service, Services};
use crate::store::{Entry, LazyInsert, Promotion, Store};

/// A runtime service registry.
///
/// Values are registered under string names, either eagerly
/// ([`register`](Self::register)) or through a producer that runs on first
/// access ([`register_lazy`](Self::register_lazy)). They are retrieved into a
/// typed [`Slot`] with [`get`](Self::get), or written into every bound field of
/// a record with [`apply`](Self::apply).
///
/// A value of concrete type `T` satisfies a destination declared as `T`, or as
/// any trait object `dyn I` that `T` was declared to implement with
/// [`implements`](Self::implements) or [`Service::provides`].
///
/// # Thread Safety
///
/// Every method takes `&self`. The registry can be shared through an `Arc` and
/// used from several threads; each lazy producer still runs exactly once.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wiring_registry::Registry;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
///
/// struct English;
/// impl Greeter for English { fn greet(&self) -> String { "hello".into() } }
///
/// let registry = Registry::new();
/// registry.register("greeter", English);
/// registry.implements::<English, dyn Greeter>(|v| v);
///
/// let mut greeter: Option<Arc<dyn Greeter>> = None;
/// registry.get("greeter", &mut greeter).unwrap();
/// assert_eq!(greeter.unwrap().greet(), "hello");
/// ```
#[derive(Default)]
pub struct Registry {
    config: RegistryConfig,
    store: Store,
    capabilities: Capabilities,
}

impl Registry {
    /// Creates an empty registry with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            store: Store::new(),
            capabilities: Capabilities::new(),
        }
    }

    /// Returns the registry configuration.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the capability table.
    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    // ─────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────

    /// Registers `value` under `name`, replacing any value or producer
    /// previously registered under that name.
    pub fn register<T: Component>(&self, name: impl Into<String>, value: T) -> &Self {
        self.register_entry(name.into(), Entry::new(value))
    }

    /// Registers an already shared value under `name`.
    ///
    /// Lookups hand out clones of this very `Arc`.
    pub fn register_arc<T: Component>(&self, name: impl Into<String>, value: Arc<T>) -> &Self {
        self.register_entry(name.into(), Entry::from_arc(value))
    }

    fn register_entry(&self, name: String, entry: Entry) -> &Self {
        let type_name = entry.type_name();
        let replaced = self.store.insert_entry(name.as_str(), entry);
        tracing::debug!(
            registry = %self.config.label(),
            name = %name,
            type_name,
            replaced,
            "registered service"
        );
        self
    }

    /// Registers a [`Service`] together with its capability declarations.
    pub fn register_service<T: Component>(&self, service: Service<T>) -> &Self {
        let (name, value, capabilities) = service.into_parts();
        for capability in capabilities {
            self.declare(capability);
        }
        self.register_arc(name, value)
    }

    /// Registers one service or a tuple of services.
    ///
    /// # Example
    ///
    /// ```
    /// use wiring_registry::{Registry, Service};
    ///
    /// let registry = Registry::new();
    /// registry.register_all((
    ///     Service::new("host", String::from("localhost")),
    ///     Service::new("port", 8080_u16),
    /// ));
    /// assert_eq!(registry.len(), 2);
    /// ```
    pub fn register_all<S: Services>(&self, services: S) -> &Self {
        services.register_into(self);
        self
    }

    /// Registers a producer that builds the value for `name` on first access.
    ///
    /// The producer never runs at registration time, and runs at most once.
    /// If a value is already registered under `name`, it is kept and the
    /// producer is dropped without running.
    pub fn register_lazy<T, F>(&self, name: impl Into<String>, producer: F) -> &Self
    where
        T: Component,
        F: FnOnce() -> T + Send + 'static,
    {
        let name = name.into();
        let outcome = self.store.insert_lazy(name.as_str(), producer);
        let replaced = outcome == LazyInsert::Replaced;
        match outcome {
            LazyInsert::Ignored => tracing::warn!(
                registry = %self.config.label(),
                name = %name,
                "value already registered; lazy producer ignored"
            ),
            LazyInsert::Stored | LazyInsert::Replaced => tracing::debug!(
                registry = %self.config.label(),
                name = %name,
                type_name = core::any::type_name::<T>(),
                replaced,
                "registered lazy service"
            ),
        }
        self
    }

    /// Declares that values of type `T` can be resolved as the trait object
    /// `I`.
    ///
    /// The declaration applies to every value of type `T`, including values
    /// produced lazily later on.
    pub fn implements<T, I>(&self, cast: impl Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static) -> &Self
    where
        T: Component,
        I: ?Sized + 'static,
    {
        self.declare(Capability::new::<T, I>(cast))
    }

    /// Adds a prepared [`Capability`] declaration.
    pub fn declare(&self, capability: Capability) -> &Self {
        tracing::debug!(
            registry = %self.config.label(),
            concrete = %capability.concrete(),
            interface = %capability.interface(),
            "declared capability"
        );
        self.capabilities.insert(capability);
        self
    }

    /// Installs a [`Module`], letting it register its services.
    pub fn install<M: Module>(&self, module: M) -> &Self {
        tracing::debug!(
            registry = %self.config.label(),
            module = module.name(),
            "installing module"
        );
        module.register(self);
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Store access
    // ─────────────────────────────────────────────────────────────────────

    /// Promotes a lazy service to a materialized one.
    ///
    /// Runs the producer registered under `name` if it has not run yet. Does
    /// nothing for names that are absent or already materialized.
    pub fn resolve(&self, name: &str) -> Promotion {
        let promotion = self.store.promote(name);
        match promotion {
            Promotion::Promoted => tracing::debug!(
                registry = %self.config.label(),
                name,
                "promoted lazy service"
            ),
            Promotion::Superseded => tracing::debug!(
                registry = %self.config.label(),
                name,
                "service re-registered while its producer ran; produced value discarded"
            ),
            Promotion::Poisoned => tracing::warn!(
                registry = %self.config.label(),
                name,
                "lazy producer panicked earlier; service treated as absent"
            ),
            Promotion::Absent | Promotion::AlreadyMaterialized => {}
        }
        promotion
    }

    /// Returns the materialized entry under `name` without promoting.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Entry> {
        let entry = self.store.lookup(name);
        tracing::trace!(
            registry = %self.config.label(),
            name,
            found = entry.is_some(),
            "lookup"
        );
        entry
    }

    /// Returns `true` if a value or producer is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.store.contains(name)
    }

    /// Returns `true` if `name` holds a producer that has not run yet.
    #[must_use]
    pub fn is_lazy(&self, name: &str) -> bool {
        self.store.is_lazy(name)
    }

    /// Removes whatever is registered under `name`.
    pub fn remove(&self, name: &str) -> bool {
        self.store.remove(name)
    }

    /// Returns all registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.store.names()
    }

    /// Returns the number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Resolution
    // ─────────────────────────────────────────────────────────────────────

    /// Promotes `name` if lazy and returns its entry.
    ///
    /// A registration that replaced the producer mid-run is promoted in turn.
    fn fetch(&self, name: &str) -> Result<Entry> {
        while self.resolve(name) == Promotion::Superseded {}
        self.lookup(name)
            .ok_or_else(|| InjectError::UnknownDependency {
                name: name.to_owned(),
            })
    }

    /// Writes the service registered under `name` into `dest`.
    ///
    /// # Errors
    ///
    /// - [`InjectError::InvalidDestination`] if `dest` does not accept a write
    /// - [`InjectError::UnknownDependency`] if nothing is registered under `name`
    /// - [`InjectError::TypeMismatch`] if the value neither is nor implements
    ///   the declared type; `dest` is left untouched
    pub fn get<S: Slot>(&self, name: &str, dest: &mut S) -> Result<()> {
        self.get_dyn(name, dest)
    }

    /// Type-erased form of [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_dyn(&self, name: &str, dest: &mut dyn DynSlot) -> Result<()> {
        if !dest.settable() {
            return Err(InjectError::InvalidDestination {
                name: name.to_owned(),
                declared: dest.declared().name(),
            });
        }

        let entry = self.fetch(name)?;
        let kind = self.fill(name, &entry, dest)?;
        tracing::debug!(
            registry = %self.config.label(),
            name,
            declared = %dest.declared(),
            found = entry.type_name(),
            kind = ?kind,
            "resolved service"
        );
        Ok(())
    }

    fn fill(&self, name: &str, entry: &Entry, dest: &mut dyn DynSlot) -> Result<MatchKind> {
        dest.fill_from(&Resolution::new(name, entry, &self.capabilities))
            .inspect_err(|err| {
                tracing::debug!(
                    registry = %self.config.label(),
                    error = %err,
                    "resolution failed"
                );
            })
    }

    /// Returns the service registered under `name` as `Arc<I>`.
    ///
    /// `I` may be the concrete type or a declared trait object.
    ///
    /// # Errors
    ///
    /// - [`InjectError::UnknownDependency`] if nothing is registered under `name`
    /// - [`InjectError::TypeMismatch`] if the value neither is nor implements `I`
    pub fn resolve_as<I: ?Sized + 'static>(&self, name: &str) -> Result<Arc<I>> {
        let mut slot: Option<Arc<I>> = None;
        self.get(name, &mut slot)?;
        slot.ok_or_else(|| InjectError::UnknownDependency {
            name: name.to_owned(),
        })
    }

    /// Returns a copy of the service registered under `name`.
    ///
    /// Only exact matches can be copied; a trait-object view has no `Clone`.
    ///
    /// # Errors
    ///
    /// - [`InjectError::UnknownDependency`] if nothing is registered under `name`
    /// - [`InjectError::TypeMismatch`] if the value is not a `T`
    pub fn get_cloned<T: Component + Clone>(&self, name: &str) -> Result<T> {
        let entry = self.fetch(name)?;
        entry
            .downcast::<T>()
            .map(|value| T::clone(&value))
            .ok_or_else(|| InjectError::TypeMismatch {
                name: name.to_owned(),
                expected: core::any::type_name::<T>(),
                found: entry.type_name(),
            })
    }

    /// Populates every bound field of `target` from the registry.
    ///
    /// Fields are visited in declaration order. Fields without a binding, or
    /// whose slot refuses writes, are skipped (or rejected under
    /// [`UnsettablePolicy::Reject`]).
    ///
    /// # Partial failure
    ///
    /// `apply` is **not transactional**. It stops at the first field that
    /// fails: fields visited before it keep their new values, fields after it
    /// are left untouched. Treat a failed `apply` as having partially mutated
    /// `target`.
    ///
    /// # Errors
    ///
    /// - [`InjectError::InvalidTarget`] if `target` is not a record
    /// - [`InjectError::UnknownDependency`] naming the first unbound binding
    /// - [`InjectError::TypeMismatch`] for the first incompatible field
    /// - [`InjectError::UnsettableField`] under [`UnsettablePolicy::Reject`]
    pub fn apply<T: Inject + ?Sized>(&self, target: &mut T) -> Result<()> {
        let (type_name, fields) = match target.manifest() {
            Manifest::Record { type_name, fields } => (type_name, fields),
            Manifest::Opaque { type_name } => {
                return Err(InjectError::InvalidTarget { type_name });
            }
        };

        let mut populated = 0_usize;
        for field in fields {
            let field_name = field.name();
            let Some((binding, slot)) = field.into_settable() else {
                match self.config.unsettable() {
                    UnsettablePolicy::Skip => {
                        tracing::trace!(
                            registry = %self.config.label(),
                            target = type_name,
                            field = field_name,
                            "skipping unsettable field"
                        );
                        continue;
                    }
                    UnsettablePolicy::Reject => {
                        return Err(InjectError::UnsettableField {
                            field: field_name,
                            target: type_name,
                        });
                    }
                }
            };

            let entry = self.fetch(binding)?;
            let kind = self.fill(binding, &entry, slot)?;
            tracing::trace!(
                registry = %self.config.label(),
                target = type_name,
                field = field_name,
                binding,
                kind = ?kind,
                "injected field"
            );
            populated += 1;
        }

        tracing::debug!(
            registry = %self.config.label(),
            target = type_name,
            populated,
            "applied registry to target"
        );
        Ok(())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("label", &self.config.label())
            .field("names", &self.store.names())
            .field("capabilities", &self.capabilities.len())
            .finish()
    }
}
