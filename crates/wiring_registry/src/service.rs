//! Name/value pairs for bulk registration.

use std::sync::Arc;
use variadics_please::all_tuples;

use crate::capability::Capability;
use crate::component::Component;
use crate::registry::Registry;

/// A value paired with the name it is registered under.
///
/// Capabilities declared with [`provides`](Self::provides) are added to the
/// registry when the service is registered.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wiring_registry::{Registry, Service};
///
/// trait Store: Send + Sync { fn backend(&self) -> &str; }
/// struct Memory;
/// impl Store for Memory { fn backend(&self) -> &str { "memory" } }
///
/// let registry = Registry::new();
/// registry.register_service(Service::new("store", Memory).provides::<dyn Store>(|v| v));
///
/// let store = registry.resolve_as::<dyn Store>("store").unwrap();
/// assert_eq!(store.backend(), "memory");
/// ```
pub struct Service<T: Component> {
    name: String,
    value: Arc<T>,
    capabilities: Vec<Capability>,
}

impl<T: Component> Service<T> {
    /// Pairs `value` with `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self::from_arc(name, Arc::new(value))
    }

    /// Pairs an already shared value with `name`.
    #[must_use]
    pub fn from_arc(name: impl Into<String>, value: Arc<T>) -> Self {
        Self {
            name: name.into(),
            value,
            capabilities: Vec::new(),
        }
    }

    /// Declares that this service's type can be resolved as `I`.
    #[must_use]
    pub fn provides<I: ?Sized + 'static>(
        mut self,
        cast: impl Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static,
    ) -> Self {
        self.capabilities.push(Capability::new::<T, I>(cast));
        self
    }

    /// The name the service is registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The service value.
    #[must_use]
    pub fn value(&self) -> &Arc<T> {
        &self.value
    }

    pub(crate) fn into_parts(self) -> (String, Arc<T>, Vec<Capability>) {
        (self.name, self.value, self.capabilities)
    }
}

/// One or more services that can be registered together.
///
/// Implemented for [`Service`] and for tuples of up to 16 `Services`.
pub trait Services {
    /// Registers every service into `registry`.
    fn register_into(self, registry: &Registry);
}

impl<T: Component> Services for Service<T> {
    fn register_into(self, registry: &Registry) {
        registry.register_service(self);
    }
}

macro_rules! impl_services_for_tuple {
    ($($S:ident),*) => {
        impl<$($S: Services),*> Services for ($($S,)*) {
            #[expect(non_snake_case, reason = "tuple elements reuse the type parameter names")]
            fn register_into(self, registry: &Registry) {
                let ($($S,)*) = self;
                $($S.register_into(registry);)*
            }
        }
    };
}

all_tuples!(impl_services_for_tuple, 1, 16, S);

#[cfg(test)]
mod tests {
    use super::*;

    trait Named: Send + Sync {
        fn name(&self) -> String;
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Config {
        port: u16,
    }

    impl Named for Config {
        fn name(&self) -> String {
            format!("config:{}", self.port)
        }
    }

    #[test]
    fn service_exposes_name_and_value() {
        let service = Service::new("config", Config { port: 80 });

        assert_eq!(service.name(), "config");
        assert_eq!(service.value().port, 80);
    }

    #[test]
    fn register_service_shares_the_value() {
        let value = Arc::new(Config { port: 80 });
        let registry = Registry::new();
        registry.register_service(Service::from_arc("config", Arc::clone(&value)));

        let stored = registry.resolve_as::<Config>("config").unwrap();
        assert!(Arc::ptr_eq(&stored, &value));
    }

    #[test]
    fn provides_declares_capability() {
        let registry = Registry::new();
        registry.register_service(
            Service::new("config", Config { port: 81 }).provides::<dyn Named>(|v| v),
        );

        let named = registry.resolve_as::<dyn Named>("config").unwrap();
        assert_eq!(named.name(), "config:81");
    }

    #[test]
    fn tuples_register_every_service() {
        let registry = Registry::new();
        registry.register_all((
            Service::new("a", 1_u8),
            Service::new("b", String::from("two")),
            (Service::new("c", Config { port: 3 }),),
        ));

        assert_eq!(registry.names(), vec!["a", "b", "c"]);
        assert_eq!(registry.get_cloned::<Config>("c").unwrap(), Config { port: 3 });
    }
}
