//! A runtime service registry with name-based injection.
//!
//! `wiring_registry` stores shared services under string names and hands them
//! out to typed destinations:
//!
//! - [`registry`] - the [`Registry`] façade: register, resolve, get, apply
//! - [`store`] - named entries, eager or lazily produced
//! - [`capability`] - which concrete types satisfy which trait objects
//! - [`resolve`] - destination slots and injectable records
//! - [`service`] - name/value pairs for bulk registration
//! - [`module`] - bundles of registrations
//! - [`scope`] - carrying a registry through a call chain
//!
//! # Resolution
//!
//! A stored value of concrete type `T` satisfies a destination declared as:
//!
//! 1. `T` itself (exact match), or
//! 2. a trait object `dyn I` for which `T` was declared with
//!    [`Registry::implements`] or [`Service::provides`] (capability match).
//!
//! Anything else is a [`InjectError::TypeMismatch`] and leaves the destination
//! untouched.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use wiring_registry::prelude::*;
//!
//! trait Mailer: Send + Sync { fn send(&self, to: &str) -> String; }
//!
//! struct Smtp { host: String }
//! impl Mailer for Smtp {
//!     fn send(&self, to: &str) -> String { format!("{to} via {}", self.host) }
//! }
//!
//! #[derive(Default, Inject)]
//! struct SignupHandler {
//!     #[inject("mailer")]
//!     mailer: Option<Arc<dyn Mailer>>,
//!     #[inject]
//!     greeting: Option<Arc<String>>,
//! }
//!
//! let registry = Registry::new();
//! registry
//!     .register("greeting", String::from("welcome"))
//!     .register_lazy("mailer", || Smtp { host: "mx.local".into() })
//!     .implements::<Smtp, dyn Mailer>(|v| v);
//!
//! let mut handler = SignupHandler::default();
//! registry.apply(&mut handler).unwrap();
//!
//! assert_eq!(handler.mailer.unwrap().send("ana"), "ana via mx.local");
//! assert_eq!(handler.greeting.as_deref().map(String::as_str), Some("welcome"));
//! ```

// Lets `#[derive(Inject)]` emit `wiring_registry::` paths inside this crate.
extern crate self as wiring_registry;

/// Trait-object capability declarations.
pub mod capability;

/// The stored value type and its type metadata.
pub mod component;

/// Registry configuration.
pub mod config;

/// Error types.
pub mod error;

/// Bundles of registrations.
pub mod module;

/// The registry façade.
pub mod registry;

/// Destinations and injectable records.
pub mod resolve;

/// Scopes that carry a registry.
pub mod scope;

/// Name/value pairs for bulk registration.
pub mod service;

/// Named entry storage.
pub mod store;

pub use capability::Capability;
pub use component::{Component, TypeInfo};
pub use config::{RegistryConfig, UnsettablePolicy};
pub use error::{InjectError, Result};
pub use module::Module;
pub use registry::Registry;
pub use resolve::{DynSlot, Field, Inject, Manifest, MatchKind, Slot};
pub use scope::RegistryScope;
pub use service::{Service, Services};

/// Re-export the `#[derive(Inject)]` macro.
pub use wiring_registry_macros::Inject;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::capability::Capability;
    pub use crate::component::{Component, TypeInfo};
    pub use crate::config::{RegistryConfig, UnsettablePolicy};
    pub use crate::error::InjectError;
    pub use crate::module::Module;
    pub use crate::registry::Registry;
    pub use crate::resolve::{Inject, MatchKind, Slot};
    pub use crate::scope::{Ambient, RegistryScope, RequestScope, deps, enter};
    pub use crate::service::{Service, Services};
    pub use wiring_registry_macros::Inject;
}
