//! Bundles of registrations.
//!
//! A [`Module`] groups the registrations of one subsystem so that an
//! application can assemble its registry from a list of modules.
//!
//! # Example
//!
//! ```
//! use wiring_registry::{Module, Registry};
//!
//! struct HttpModule {
//!     port: u16,
//! }
//!
//! impl Module for HttpModule {
//!     fn register(&self, registry: &Registry) {
//!         let port = self.port;
//!         registry
//!             .register("http.port", port)
//!             .register_lazy("http.banner", move || format!("listening on {port}"));
//!     }
//! }
//!
//! let registry = Registry::new();
//! registry.install(HttpModule { port: 8080 });
//! assert_eq!(registry.get_cloned::<String>("http.banner").unwrap(), "listening on 8080");
//! ```

use crate::registry::Registry;

/// A reusable bundle of registrations.
pub trait Module: Send + Sync + 'static {
    /// Registers this module's services, producers, and capabilities.
    fn register(&self, registry: &Registry);

    /// Name used in log events.
    ///
    /// Defaults to the type name.
    fn name(&self) -> &str {
        core::any::type_name::<Self>()
    }
}
