//! Navigation action handler.
//!
//! Builds a `geo:` URI for the destination and hands it to the launcher
//! collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use volition_suggest::{Action, ActionCategory, ActionDetail};

use crate::error::ExecError;
use crate::handler::CategoryHandler;
use crate::sinks::DeepLinkLauncher;

pub struct NavigationHandler {
    launcher: Arc<dyn DeepLinkLauncher>,
}

impl NavigationHandler {
    pub fn new(launcher: Arc<dyn DeepLinkLauncher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl CategoryHandler for NavigationHandler {
    fn category(&self) -> ActionCategory {
        ActionCategory::Navigation
    }

    async fn execute(&self, action: &Action) -> Result<serde_json::Value, ExecError> {
        let ActionDetail::Navigation {
            destination,
            latitude,
            longitude,
            ..
        } = &action.detail
        else {
            return Err(ExecError::HandlerFailed(
                "navigation handler received a non-navigation action".to_string(),
            ));
        };

        let uri = match (latitude, longitude) {
            (Some(lat), Some(lng)) => format!("geo:{},{}?q={}", lat, lng, destination),
            _ => format!("geo:0,0?q={}", destination),
        };

        self.launcher
            .launch(&uri)
            .await
            .map_err(ExecError::HandlerFailed)?;

        Ok(serde_json::json!({
            "uri": uri,
            "destination": destination,
        }))
    }
}
