//! Execution status projection.
//!
//! A per-action-id projection used purely for progress reporting. The board
//! is owned by the executor and written before and after every phase
//! transition; external observers poll the last-known stage at any time.
//! Never persisted.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Execution phases visible to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStage {
    Preparing,
    Executing,
    Verifying,
    Completed,
    Failed,
}

impl fmt::Display for ExecutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStage::Preparing => write!(f, "preparing"),
            ExecutionStage::Executing => write!(f, "executing"),
            ExecutionStage::Verifying => write!(f, "verifying"),
            ExecutionStage::Completed => write!(f, "completed"),
            ExecutionStage::Failed => write!(f, "failed"),
        }
    }
}

/// Last-known progress for one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStatus {
    pub stage: ExecutionStage,
    /// 0-100.
    pub percent: u8,
    pub message: Option<String>,
}

/// In-memory status table keyed by action id.
///
/// Only ever written by the executor that owns it; there is no concurrent
/// writer, the mutex just makes reads safe from any thread.
pub struct StatusBoard {
    inner: Mutex<HashMap<Uuid, ExecutionStatus>>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Write the latest stage for an action.
    pub fn update(&self, id: Uuid, stage: ExecutionStage, percent: u8, message: Option<String>) {
        let status = ExecutionStatus {
            stage,
            percent: percent.min(100),
            message,
        };
        self.inner.lock().unwrap().insert(id, status);
    }

    /// Last-known status for an action, if tracked.
    pub fn get(&self, id: Uuid) -> Option<ExecutionStatus> {
        self.inner.lock().unwrap().get(&id).cloned()
    }

    /// Remove an action's bookkeeping. Returns whether it was tracked.
    pub fn remove(&self, id: Uuid) -> bool {
        self.inner.lock().unwrap().remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_and_get() {
        let board = StatusBoard::new();
        let id = Uuid::new_v4();
        board.update(id, ExecutionStage::Preparing, 10, Some("validating".to_string()));

        let status = board.get(id).unwrap();
        assert_eq!(status.stage, ExecutionStage::Preparing);
        assert_eq!(status.percent, 10);
        assert_eq!(status.message.as_deref(), Some("validating"));
    }

    #[test]
    fn test_update_overwrites() {
        let board = StatusBoard::new();
        let id = Uuid::new_v4();
        board.update(id, ExecutionStage::Preparing, 10, None);
        board.update(id, ExecutionStage::Executing, 60, None);

        let status = board.get(id).unwrap();
        assert_eq!(status.stage, ExecutionStage::Executing);
        assert_eq!(status.percent, 60);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_percent_capped_at_100() {
        let board = StatusBoard::new();
        let id = Uuid::new_v4();
        board.update(id, ExecutionStage::Completed, 250, None);
        assert_eq!(board.get(id).unwrap().percent, 100);
    }

    #[test]
    fn test_get_untracked_returns_none() {
        let board = StatusBoard::new();
        assert!(board.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_remove() {
        let board = StatusBoard::new();
        let id = Uuid::new_v4();
        board.update(id, ExecutionStage::Preparing, 0, None);
        assert!(board.remove(id));
        assert!(!board.remove(id));
        assert!(board.get(id).is_none());
        assert!(board.is_empty());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(ExecutionStage::Preparing.to_string(), "preparing");
        assert_eq!(ExecutionStage::Executing.to_string(), "executing");
        assert_eq!(ExecutionStage::Verifying.to_string(), "verifying");
        assert_eq!(ExecutionStage::Completed.to_string(), "completed");
        assert_eq!(ExecutionStage::Failed.to_string(), "failed");
    }

    #[test]
    fn test_status_serde_round_trip() {
        let status = ExecutionStatus {
            stage: ExecutionStage::Verifying,
            percent: 90,
            message: None,
        };
        let json = serde_json::to_string(&status).unwrap();
        let rt: ExecutionStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, rt);
    }
}
