//! The tracing module.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tracing::Level;
//! use wiring_registry::Registry;
//! use wiring_tracing::{TRACING_CONFIG, TracingConfig, TracingFormat, TracingModule};
//!
//! let registry = Registry::new();
//! registry.install(
//!     TracingModule::default()
//!         .with_level(Level::DEBUG)
//!         .with_format(TracingFormat::Compact),
//! );
//!
//! let config: Arc<TracingConfig> = registry.resolve_as(TRACING_CONFIG).unwrap();
//! assert_eq!(config.level, Level::DEBUG);
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wiring_registry::{Module, Registry};

/// Name the [`TracingConfig`] service is registered under.
pub const TRACING_CONFIG: &str = "wiring::tracing";

// ─────────────────────────────────────────────────────────────────────────────
// TracingFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable colored output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output for log aggregation.
    Json,
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingConfig
// ─────────────────────────────────────────────────────────────────────────────

/// The tracing settings a [`TracingModule`] was installed with.
///
/// Registered under [`TRACING_CONFIG`]; inject it as
/// `Option<Arc<TracingConfig>>` to adapt logging to the configured level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingConfig {
    /// The configured log level.
    pub level: Level,
    /// The configured output format.
    pub format: TracingFormat,
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingModule
// ─────────────────────────────────────────────────────────────────────────────

/// Installs a global `tracing` subscriber.
///
/// If a global subscriber is already set, the existing one is kept and only
/// the [`TracingConfig`] service is registered.
///
/// # Configuration Options
///
/// ```
/// use tracing::Level;
/// use wiring_tracing::{TracingFormat, TracingModule};
///
/// // Development: pretty output with span enter/exit events.
/// let dev = TracingModule::default()
///     .with_level(Level::DEBUG)
///     .with_span_events(true);
///
/// // Production: JSON output, quiet registry.
/// let prod = TracingModule::default()
///     .with_format(TracingFormat::Json)
///     .with_env_filter("info,wiring_registry=warn");
/// ```
#[derive(Debug, Clone)]
pub struct TracingModule {
    /// Maximum log level.
    level: Level,
    /// Output format.
    format: TracingFormat,
    /// Target directives, e.g. `"wiring_registry=trace,hyper=warn"`.
    env_filter: Option<String>,
    /// Whether to emit span enter/exit events.
    span_events: bool,
}

impl Default for TracingModule {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            span_events: false,
        }
    }
}

impl TracingModule {
    /// Creates a module with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets target-specific directives, `target=level,target=level,...`.
    ///
    /// An unparsable filter falls back to the configured level.
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables span enter/exit events in output.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// The settings this module registers.
    #[must_use]
    pub fn config(&self) -> TracingConfig {
        TracingConfig {
            level: self.level,
            format: self.format,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(filter) => {
                EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
            }
            None => EnvFilter::new(self.level.as_str()),
        }
    }

    /// Installs the subscriber; returns `false` if one was already set.
    fn init_subscriber(&self) -> bool {
        let filter = self.env_filter();
        let span_events = if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        };

        let subscriber = tracing_subscriber::registry().with(filter);
        let result = match self.format {
            TracingFormat::Pretty => subscriber
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_span_events(span_events),
                )
                .try_init(),
            TracingFormat::Compact => subscriber
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_span_events(span_events),
                )
                .try_init(),
            TracingFormat::Json => subscriber
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_span_events(span_events),
                )
                .try_init(),
        };
        result.is_ok()
    }
}

impl Module for TracingModule {
    fn register(&self, registry: &Registry) {
        registry.register(TRACING_CONFIG, self.config());

        let installed = self.init_subscriber();
        tracing::info!(
            registry = %registry.config().label(),
            level = %self.level,
            format = ?self.format,
            installed,
            "tracing module installed"
        );
    }

    fn name(&self) -> &str {
        TRACING_CONFIG
    }
}
