//! Communication action handler.
//!
//! Requires a person entity on the action; the contact URI is built from a
//! phone or email entity when one is attached.

use std::sync::Arc;

use async_trait::async_trait;
use volition_extract::EntityType;
use volition_suggest::{Action, ActionCategory, ActionDetail, CommType};

use crate::error::ExecError;
use crate::handler::{require_entity, CategoryHandler};
use crate::sinks::DeepLinkLauncher;

pub struct CommunicationHandler {
    launcher: Arc<dyn DeepLinkLauncher>,
}

impl CommunicationHandler {
    pub fn new(launcher: Arc<dyn DeepLinkLauncher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl CategoryHandler for CommunicationHandler {
    fn category(&self) -> ActionCategory {
        ActionCategory::Communication
    }

    async fn execute(&self, action: &Action) -> Result<serde_json::Value, ExecError> {
        require_entity(action, EntityType::Person, "person")?;

        let ActionDetail::Communication {
            recipient,
            comm_type,
            ..
        } = &action.detail
        else {
            return Err(ExecError::HandlerFailed(
                "communication handler received a non-communication action".to_string(),
            ));
        };

        let contact = |entity_type| {
            action
                .entities
                .iter()
                .find(|e| e.entity_type == entity_type)
                .map(|e| e.value.clone())
        };

        let uri = match comm_type {
            CommType::Email => contact(EntityType::Email).map(|e| format!("mailto:{}", e)),
            CommType::Sms => contact(EntityType::Phone).map(|p| format!("sms:{}", p)),
            CommType::Call => contact(EntityType::Phone).map(|p| format!("tel:{}", p)),
            CommType::Chat => None,
        };

        if let Some(uri) = &uri {
            self.launcher
                .launch(uri)
                .await
                .map_err(ExecError::HandlerFailed)?;
        }

        Ok(serde_json::json!({
            "recipient": recipient,
            "comm_type": comm_type,
            "uri": uri,
        }))
    }
}
