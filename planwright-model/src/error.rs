//! Error types for the type registry and the scripting bridge.

use thiserror::Error;

use crate::FieldType;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised while registering categories, classes and fields.
///
/// Registration happens once at startup; any of these aborts
/// initialization.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("category already registered: {0}")]
    DuplicateCategory(String),

    #[error("category not registered: {0}")]
    UnknownCategory(String),

    #[error("class '{class}' already registered in category '{category}'")]
    DuplicateClass { category: String, class: String },

    #[error("field '{field}' already declared on category '{category}'")]
    DuplicateField { category: String, field: String },

    #[error("stale class handle")]
    UnknownClass,
}

/// Errors from generic attribute access.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field '{0}' is read-only")]
    ReadOnly(String),

    #[error("field '{field}' expects a {expected:?} value")]
    TypeMismatch { field: String, expected: FieldType },

    #[error("invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("field '{0}' was invoked on an instance of the wrong type")]
    InstanceMismatch(String),

    #[error("instance behind '{0}' has been released")]
    Released(String),

    #[error("type '{type_name}' does not support attribute {access}")]
    AccessDenied { type_name: String, access: &'static str },
}

/// Errors reported by a scripting bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("script type '{name}' rejected: {reason}")]
    TypeRejected { name: String, reason: String },

    #[error("script type already registered: {0}")]
    DuplicateType(String),

    #[error("script type not ready: {0}")]
    UnknownType(String),

    #[error("global already bound: {0}")]
    DuplicateGlobal(String),
}
