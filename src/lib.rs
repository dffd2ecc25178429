//! A runtime service registry with name-based injection.
//!
//! Re-exports the wiring crates so that applications can depend on a single
//! package.

/// Registry, resolution, and the `Inject` derive.
pub use wiring_registry;

/// Subscriber setup as a registry module.
#[cfg(feature = "tracing")]
pub use wiring_tracing;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use wiring_registry::prelude::*;
    #[cfg(feature = "tracing")]
    pub use wiring_tracing::{TracingConfig, TracingFormat, TracingModule};
}
