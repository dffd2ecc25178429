//! Installing the tracing module into a registry.

use std::sync::Arc;

use tracing::Level;
use wiring_registry::{Inject, Module, Registry};
use wiring_tracing::{TRACING_CONFIG, TracingConfig, TracingFormat, TracingModule};

#[derive(Default, Inject)]
struct Worker {
    #[inject("wiring::tracing")]
    tracing: Option<Arc<TracingConfig>>,
}

#[test]
fn registers_config_service() {
    let registry = Registry::new();
    registry.install(
        TracingModule::new()
            .with_level(Level::DEBUG)
            .with_format(TracingFormat::Json),
    );

    let config = registry.resolve_as::<TracingConfig>(TRACING_CONFIG).unwrap();
    assert_eq!(
        *config,
        TracingConfig {
            level: Level::DEBUG,
            format: TracingFormat::Json,
        }
    );
}

#[test]
fn config_is_injectable() {
    let registry = Registry::new();
    registry.install(TracingModule::default());

    let mut worker = Worker::default();
    registry.apply(&mut worker).unwrap();

    assert_eq!(worker.tracing.unwrap().level, Level::INFO);
}

#[test]
fn second_install_keeps_existing_subscriber() {
    let first = Registry::new();
    first.install(TracingModule::default());

    let second = Registry::new();
    second.install(TracingModule::default().with_format(TracingFormat::Compact));

    let config = second.resolve_as::<TracingConfig>(TRACING_CONFIG).unwrap();
    assert_eq!(config.format, TracingFormat::Compact);
}

#[test]
fn module_name_is_the_service_name() {
    assert_eq!(TracingModule::default().name(), TRACING_CONFIG);
}
