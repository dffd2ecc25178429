//! Tracing subscriber setup for wiring registries.
//!
//! [`TracingModule`] installs a `tracing-subscriber` when it is installed into
//! a [`Registry`](wiring_registry::Registry), and registers the chosen
//! [`TracingConfig`] under [`TRACING_CONFIG`] so that other services can
//! read it.

mod tracing_module;

pub use tracing_module::{TRACING_CONFIG, TracingConfig, TracingFormat, TracingModule};
