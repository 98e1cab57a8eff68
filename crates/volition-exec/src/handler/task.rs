//! Task action handler.
//!
//! Task persistence lives in an external storage collaborator; this
//! handler reports the deadline/priority tuple that collaborator consumes.

use async_trait::async_trait;
use volition_suggest::{Action, ActionCategory, ActionDetail};

use crate::error::ExecError;
use crate::handler::CategoryHandler;

pub struct TaskHandler;

#[async_trait]
impl CategoryHandler for TaskHandler {
    fn category(&self) -> ActionCategory {
        ActionCategory::Task
    }

    async fn execute(&self, action: &Action) -> Result<serde_json::Value, ExecError> {
        let ActionDetail::Task {
            title,
            deadline,
            tags,
            ..
        } = &action.detail
        else {
            return Err(ExecError::HandlerFailed(
                "task handler received a non-task action".to_string(),
            ));
        };

        tracing::info!(
            title = %title,
            deadline = deadline.0,
            priority = action.priority,
            "Task recorded"
        );

        Ok(serde_json::json!({
            "title": title,
            "deadline": deadline.0,
            "priority": action.priority,
            "tags": tags,
        }))
    }
}
