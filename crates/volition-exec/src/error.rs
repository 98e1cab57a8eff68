//! Error types for action execution.
//!
//! These are internal to the execution pipeline: the executor converts
//! every error into a failed `ActionResult` rather than letting it escape.

use volition_core::VolitionError;
use volition_suggest::{ActionCategory, ActionStatus};

use crate::permission::PermissionKind;

/// Errors from the execution pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Required {entity} entity missing for {category} action")]
    MissingEntity {
        category: ActionCategory,
        entity: &'static str,
    },
    #[error("Permission denied: {0}")]
    PermissionDenied(PermissionKind),
    #[error("No handler registered for category: {0}")]
    UnregisteredHandler(ActionCategory),
    #[error("Handler failed: {0}")]
    HandlerFailed(String),
    #[error("Invalid state transition: {0} -> {1}")]
    InvalidTransition(ActionStatus, ActionStatus),
    #[error("Action cancelled")]
    Cancelled,
}

impl From<ExecError> for VolitionError {
    fn from(err: ExecError) -> Self {
        match err {
            ExecError::PermissionDenied(kind) => VolitionError::Permission(kind.to_string()),
            other => VolitionError::Execution(other.to_string()),
        }
    }
}
