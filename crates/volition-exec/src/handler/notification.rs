//! Notification action handler.
//!
//! Delivers the notification through the delivery collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use volition_suggest::{Action, ActionCategory, ActionDetail};

use crate::error::ExecError;
use crate::handler::CategoryHandler;
use crate::sinks::NotificationSink;

pub struct NotificationHandler {
    sink: Arc<dyn NotificationSink>,
}

impl NotificationHandler {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl CategoryHandler for NotificationHandler {
    fn category(&self) -> ActionCategory {
        ActionCategory::Notification
    }

    async fn execute(&self, action: &Action) -> Result<serde_json::Value, ExecError> {
        let ActionDetail::Notification {
            notification_title,
            notification_body,
            ..
        } = &action.detail
        else {
            return Err(ExecError::HandlerFailed(
                "notification handler received a non-notification action".to_string(),
            ));
        };

        self.sink
            .post(notification_title, notification_body)
            .await
            .map_err(ExecError::HandlerFailed)?;

        Ok(serde_json::json!({
            "delivered": true,
            "title": notification_title,
        }))
    }
}
