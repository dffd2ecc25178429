//! Registry configuration.

use std::borrow::Cow;

/// What [`Registry::apply`](crate::Registry::apply) does with fields that
/// cannot be set.
///
/// A field cannot be set when it carries no `#[inject]` attribute, or when its
/// slot refuses writes (an initialized `OnceLock`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsettablePolicy {
    /// Skip the field silently (default).
    #[default]
    Skip,
    /// Fail with [`InjectError::UnsettableField`](crate::InjectError::UnsettableField).
    Reject,
}

/// Configuration for a [`Registry`](crate::Registry).
///
/// # Example
///
/// ```
/// use wiring_registry::{Registry, RegistryConfig, UnsettablePolicy};
///
/// let registry = Registry::with_config(
///     RegistryConfig::default()
///         .with_label("http")
///         .with_unsettable(UnsettablePolicy::Reject),
/// );
/// assert_eq!(registry.config().label(), "http");
/// ```
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Label attached to every log event emitted by the registry.
    label: Cow<'static, str>,
    /// Handling of unsettable record fields.
    unsettable: UnsettablePolicy,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            label: Cow::Borrowed("default"),
            unsettable: UnsettablePolicy::Skip,
        }
    }
}

impl RegistryConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label used in log events.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the policy for unsettable record fields.
    #[must_use]
    pub fn with_unsettable(mut self, policy: UnsettablePolicy) -> Self {
        self.unsettable = policy;
        self
    }

    /// Returns the log label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the policy for unsettable record fields.
    #[must_use]
    pub fn unsettable(&self) -> UnsettablePolicy {
        self.unsettable
    }
}
