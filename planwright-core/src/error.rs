//! Error types for the planning core.

use planwright_model::{BridgeError, FieldError, RegistryError};
use thiserror::Error;

use crate::Category;

/// Result type for plan context operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Errors that can occur in plan context operations.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Erase requested for a name outside the category table. Reachable
    /// from scripting input; the engine keeps running.
    #[error("erase operation not supported for category '{0}'")]
    UnsupportedOperation(String),

    /// Checked erase refused because a referencing category is not empty.
    #[error("cannot erase '{category}': '{dependent}' still holds {count} instances")]
    DependentsPresent {
        category: Category,
        dependent: Category,
        count: usize,
    },

    /// The plan singleton was accessed before initialization or after
    /// shutdown.
    #[error("plan context is not initialized")]
    UninitializedSingleton,

    #[error("plan context is already initialized")]
    AlreadyInitialized,

    /// Type registration failed during startup.
    #[error("type registry error: {0}")]
    Registry(#[from] RegistryError),

    /// The scripting bridge refused the plan type or its global.
    #[error("scripting bridge error: {0}")]
    Bridge(#[from] BridgeError),

    #[error("field error: {0}")]
    Field(#[from] FieldError),

    /// Log file could not be opened or flushed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PlanError {
    /// Non-zero status surfaced to the embedding layer.
    pub fn status_code(&self) -> i32 {
        match self {
            PlanError::Bridge(_) => 1,
            PlanError::Registry(_) => 2,
            PlanError::AlreadyInitialized | PlanError::UninitializedSingleton => 3,
            PlanError::UnsupportedOperation(_) | PlanError::DependentsPresent { .. } => 4,
            PlanError::Field(_) => 5,
            PlanError::Io(_) | PlanError::Logging(_) => 6,
            PlanError::Config(_) => 7,
        }
    }

    /// True for failures that should abort startup or indicate a
    /// lifecycle-contract violation, as opposed to a rejected request.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            PlanError::UnsupportedOperation(_)
                | PlanError::DependentsPresent { .. }
                | PlanError::Field(_)
        )
    }
}
