use serde::{Deserialize, Serialize};
use uuid::Uuid;
use volition_core::Timestamp;

/// Structured outcome of one execution attempt.
///
/// Always returned, never thrown, including for validation failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub action_id: Uuid,
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: Timestamp,
    pub metadata: Option<serde_json::Value>,
}

impl ActionResult {
    pub fn succeeded(
        action_id: Uuid,
        data: serde_json::Value,
        metadata: Option<serde_json::Value>,
    ) -> Self {
        Self {
            action_id,
            success: true,
            data: Some(data),
            error: None,
            timestamp: Timestamp::now(),
            metadata,
        }
    }

    pub fn failed(action_id: Uuid, error: impl Into<String>) -> Self {
        Self {
            action_id,
            success: false,
            data: None,
            error: Some(error.into()),
            timestamp: Timestamp::now(),
            metadata: None,
        }
    }
}
