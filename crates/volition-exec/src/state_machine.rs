//! Action state machine with validated transitions.
//!
//! Enforces the allowed status transitions for the action lifecycle:
//! Pending -> Ready -> Executed/Failed
//! Pending -> Failed (validation failure)
//! Pending/Ready -> Cancelled (explicit cancellation)
//!
//! Status never regresses; terminal states absorb.

use volition_suggest::ActionStatus;

use crate::error::ExecError;

/// Validate that a status transition is allowed.
pub fn validate_transition(from: ActionStatus, to: ActionStatus) -> Result<(), ExecError> {
    let valid = matches!(
        (from, to),
        (ActionStatus::Pending, ActionStatus::Ready)
            | (ActionStatus::Pending, ActionStatus::Failed)
            | (ActionStatus::Pending, ActionStatus::Cancelled)
            | (ActionStatus::Ready, ActionStatus::Executed)
            | (ActionStatus::Ready, ActionStatus::Failed)
            | (ActionStatus::Ready, ActionStatus::Cancelled)
    );

    if valid {
        Ok(())
    } else {
        Err(ExecError::InvalidTransition(from, to))
    }
}
