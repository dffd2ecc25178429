//! Errors produced while registering and resolving services.

/// Errors that can occur when resolving services out of a registry.
///
/// All variants are synchronous and caller-recoverable. None of them are
/// retried by the registry: the registry state that produced the error will
/// produce it again until the caller changes that state.
#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    /// The destination cannot be written through (for example a `OnceLock`
    /// that already holds a value).
    #[error("cannot write `{name}` into destination of type `{declared}`: destination is not settable")]
    InvalidDestination {
        /// The binding name that was being resolved.
        name: String,
        /// The declared type of the destination.
        declared: &'static str,
    },

    /// [`Registry::apply`](crate::Registry::apply) was given a value that is
    /// not a record.
    #[error("cannot inject into `{type_name}`: target is not a record")]
    InvalidTarget {
        /// The type of the rejected target.
        type_name: &'static str,
    },

    /// Nothing (neither a value nor a lazy producer) is registered under the
    /// requested name.
    #[error("dependency `{name}` is not registered")]
    UnknownDependency {
        /// The requested binding name.
        name: String,
    },

    /// The stored value is neither the declared type nor registered as
    /// implementing it.
    #[error("type mismatch for `{name}`: cannot apply `{found}` to `{expected}`")]
    TypeMismatch {
        /// The binding name that was being resolved.
        name: String,
        /// The declared type of the destination.
        expected: &'static str,
        /// The concrete type of the stored value.
        found: &'static str,
    },

    /// A record field could not be set and the registry is configured with
    /// [`UnsettablePolicy::Reject`](crate::UnsettablePolicy::Reject).
    #[error("field `{field}` of `{target}` cannot be set")]
    UnsettableField {
        /// The field name.
        field: &'static str,
        /// The record type owning the field.
        target: &'static str,
    },

    /// No registry was stored in the scope it was loaded from.
    #[error("no registry stored in the current scope")]
    NoRegistry,
}

/// Result alias used throughout the registry.
pub type Result<T, E = InjectError> = core::result::Result<T, E>;
