//! The action executor.
//!
//! Drives one action through validate -> prepare -> permission gate ->
//! dispatch -> verify, writing the status projection around every phase
//! and returning a structured `ActionResult` for every attempt. Batches
//! run sequentially and attempt every action. Cancellation is cooperative:
//! it removes bookkeeping and is observed at phase boundaries, but a
//! dispatch already in flight runs to completion.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use uuid::Uuid;
use volition_core::Timestamp;
use volition_suggest::{Action, ActionDetail, ActionStatus};

use crate::error::ExecError;
use crate::handler::HandlerRegistry;
use crate::permission::{required_permissions, PermissionService};
use crate::state_machine::validate_transition;
use crate::status::{ExecutionStage, ExecutionStatus, StatusBoard};
use crate::types::ActionResult;

/// Structural validation: non-nil id, non-empty title, well-formed
/// entities. Returns human-readable messages; empty means valid.
pub fn validate(action: &Action) -> Vec<String> {
    let mut issues = Vec::new();
    if action.id.is_nil() {
        issues.push("action id must not be nil".to_string());
    }
    if action.title.trim().is_empty() {
        issues.push("action title must not be empty".to_string());
    }
    for entity in &action.entities {
        if entity.value.trim().is_empty() {
            issues.push(format!("entity {} has an empty value", entity.id));
        }
        if !(0.0..=1.0).contains(&entity.confidence) {
            issues.push(format!(
                "entity {} confidence out of range: {}",
                entity.id, entity.confidence
            ));
        }
    }
    issues
}

/// Category-specific required-field presence check.
///
/// Missing fields are reported, not failed: the result carries them in
/// metadata so the caller can ask the user to complete them.
pub fn prepare(action: &Action) -> Vec<&'static str> {
    let mut missing = Vec::new();
    match &action.detail {
        ActionDetail::Calendar {
            title,
            start_time,
            end_time,
            ..
        } => {
            if title.trim().is_empty() {
                missing.push("title");
            }
            if start_time.0 <= 0 {
                missing.push("start_time");
            }
            if end_time.0 <= 0 {
                missing.push("end_time");
            }
        }
        ActionDetail::Payment {
            recipient,
            amount,
            currency,
            ..
        } => {
            if recipient.trim().is_empty() {
                missing.push("recipient");
            }
            if *amount <= 0 {
                missing.push("amount");
            }
            if currency.trim().is_empty() {
                missing.push("currency");
            }
        }
        ActionDetail::Shopping {
            product_name,
            price,
            currency,
            ..
        } => {
            if product_name.trim().is_empty() {
                missing.push("product_name");
            }
            if *price <= 0 {
                missing.push("price");
            }
            if currency.trim().is_empty() {
                missing.push("currency");
            }
        }
        ActionDetail::Task {
            title, deadline, ..
        } => {
            if title.trim().is_empty() {
                missing.push("title");
            }
            if deadline.0 <= 0 {
                missing.push("deadline");
            }
        }
        ActionDetail::Navigation { destination, .. } => {
            if destination.trim().is_empty() {
                missing.push("destination");
            }
        }
        ActionDetail::Communication { recipient, .. } => {
            if recipient.trim().is_empty() {
                missing.push("recipient");
            }
        }
        ActionDetail::Notification {
            notification_title,
            notification_body,
            ..
        } => {
            if notification_title.trim().is_empty() {
                missing.push("notification_title");
            }
            if notification_body.trim().is_empty() {
                missing.push("notification_body");
            }
        }
    }
    missing
}

/// Validates, permission-gates, and dispatches actions.
pub struct ActionExecutor {
    registry: HandlerRegistry,
    permissions: Arc<dyn PermissionService>,
    board: StatusBoard,
    cancelled: Mutex<HashSet<Uuid>>,
    show_rationale: bool,
}

impl ActionExecutor {
    pub fn new(registry: HandlerRegistry, permissions: Arc<dyn PermissionService>) -> Self {
        Self {
            registry,
            permissions,
            board: StatusBoard::new(),
            cancelled: Mutex::new(HashSet::new()),
            show_rationale: true,
        }
    }

    /// Whether a rationale is shown when re-requesting a denied permission.
    pub fn with_show_rationale(mut self, show: bool) -> Self {
        self.show_rationale = show;
        self
    }

    /// Last-known status projection for an action.
    pub fn status(&self, id: Uuid) -> Option<ExecutionStatus> {
        self.board.get(id)
    }

    /// Cooperatively cancel an action.
    ///
    /// Removes the status-board bookkeeping and marks the id so later
    /// phase boundaries observe it. A dispatch already past its permission
    /// check is not interrupted.
    pub fn cancel(&self, action: &mut Action) -> Result<(), ExecError> {
        validate_transition(action.status, ActionStatus::Cancelled)?;
        action.status = ActionStatus::Cancelled;
        self.board.remove(action.id);
        self.cancelled.lock().unwrap().insert(action.id);
        tracing::info!(action_id = %action.id, "Action cancelled");
        Ok(())
    }

    /// Execute one action, returning a result for every attempt.
    pub async fn execute(&self, action: &mut Action) -> ActionResult {
        let id = action.id;
        tracing::info!(action_id = %id, category = %action.category(), "Executing action");
        self.board
            .update(id, ExecutionStage::Preparing, 0, Some("validating".to_string()));

        let issues = validate(action);
        if !issues.is_empty() {
            return self.fail(action, ExecError::Validation(issues.join("; ")));
        }

        let missing = prepare(action);
        if !missing.is_empty() {
            tracing::warn!(action_id = %id, fields = ?missing, "Prepared with missing fields");
        }
        self.board
            .update(id, ExecutionStage::Preparing, 25, Some("prepared".to_string()));

        if let Err(e) = self.transition(action, ActionStatus::Ready) {
            return self.fail(action, e);
        }

        if self.is_cancelled(id) {
            return self.cancelled_result(action);
        }

        self.board.update(
            id,
            ExecutionStage::Preparing,
            40,
            Some("checking permissions".to_string()),
        );
        for kind in required_permissions(action.category()) {
            if !self.permissions.check_permission(*kind).await
                && !self
                    .permissions
                    .request_permission(*kind, self.show_rationale)
                    .await
            {
                return self.fail(action, ExecError::PermissionDenied(*kind));
            }
        }

        if self.is_cancelled(id) {
            return self.cancelled_result(action);
        }

        self.board
            .update(id, ExecutionStage::Executing, 60, Some("dispatching".to_string()));
        let Some(handler) = self.registry.get(action.category()) else {
            return self.fail(action, ExecError::UnregisteredHandler(action.category()));
        };

        match handler.execute(action).await {
            Ok(data) => {
                self.board.update(id, ExecutionStage::Verifying, 90, None);
                if let Err(e) = self.transition(action, ActionStatus::Executed) {
                    return self.fail(action, e);
                }
                action.executed_at = Some(Timestamp::now());
                self.board.update(
                    id,
                    ExecutionStage::Completed,
                    100,
                    Some("completed".to_string()),
                );
                tracing::info!(action_id = %id, "Action executed");

                let metadata = if missing.is_empty() {
                    None
                } else {
                    Some(serde_json::json!({ "missing_fields": missing }))
                };
                ActionResult::succeeded(id, data, metadata)
            }
            Err(e) => self.fail(action, e),
        }
    }

    /// Execute a batch sequentially, in input order.
    ///
    /// Every action is attempted; an individual failure never aborts the
    /// batch. Aggregate progress is reported as a percentage.
    pub async fn execute_batch(&self, actions: &mut [Action]) -> Vec<ActionResult> {
        let total = actions.len();
        let mut results = Vec::with_capacity(total);
        for (index, action) in actions.iter_mut().enumerate() {
            let result = self.execute(action).await;
            let progress = ((index + 1) * 100 / total.max(1)) as u8;
            tracing::info!(
                progress,
                completed = index + 1,
                total,
                success = result.success,
                "Batch progress"
            );
            results.push(result);
        }
        results
    }

    fn transition(&self, action: &mut Action, to: ActionStatus) -> Result<(), ExecError> {
        validate_transition(action.status, to)?;
        action.status = to;
        Ok(())
    }

    fn is_cancelled(&self, id: Uuid) -> bool {
        self.cancelled.lock().unwrap().contains(&id)
    }

    fn cancelled_result(&self, action: &mut Action) -> ActionResult {
        if validate_transition(action.status, ActionStatus::Cancelled).is_ok() {
            action.status = ActionStatus::Cancelled;
        }
        self.board.remove(action.id);
        tracing::info!(action_id = %action.id, "Execution stopped by cancellation");
        ActionResult::failed(action.id, ExecError::Cancelled.to_string())
    }

    fn fail(&self, action: &mut Action, err: ExecError) -> ActionResult {
        if validate_transition(action.status, ActionStatus::Failed).is_ok() {
            action.status = ActionStatus::Failed;
        }
        let message = err.to_string();
        action.error = Some(message.clone());
        self.board
            .update(action.id, ExecutionStage::Failed, 100, Some(message.clone()));
        tracing::warn!(action_id = %action.id, error = %message, "Action failed");
        ActionResult::failed(action.id, message)
    }
}
