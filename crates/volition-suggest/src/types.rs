//! Action domain model.
//!
//! An action is a typed, executable proposal derived from intent and
//! entities. Category-specific fields live in the `ActionDetail` tagged
//! union, one variant per category, so an action can never carry another
//! category's fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use volition_core::Timestamp;
use volition_extract::Entity;

// =============================================================================
// Enums
// =============================================================================

/// The seven action categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Calendar,
    Payment,
    Shopping,
    Task,
    Navigation,
    Communication,
    Notification,
}

impl ActionCategory {
    pub fn all() -> &'static [ActionCategory] {
        &[
            ActionCategory::Calendar,
            ActionCategory::Payment,
            ActionCategory::Shopping,
            ActionCategory::Task,
            ActionCategory::Navigation,
            ActionCategory::Communication,
            ActionCategory::Notification,
        ]
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionCategory::Calendar => write!(f, "calendar"),
            ActionCategory::Payment => write!(f, "payment"),
            ActionCategory::Shopping => write!(f, "shopping"),
            ActionCategory::Task => write!(f, "task"),
            ActionCategory::Navigation => write!(f, "navigation"),
            ActionCategory::Communication => write!(f, "communication"),
            ActionCategory::Notification => write!(f, "notification"),
        }
    }
}

impl std::str::FromStr for ActionCategory {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calendar" => Ok(ActionCategory::Calendar),
            "payment" => Ok(ActionCategory::Payment),
            "shopping" => Ok(ActionCategory::Shopping),
            "task" => Ok(ActionCategory::Task),
            "navigation" => Ok(ActionCategory::Navigation),
            "communication" => Ok(ActionCategory::Communication),
            "notification" => Ok(ActionCategory::Notification),
            _ => Err(format!("Unknown action category: {}", s)),
        }
    }
}

/// Action lifecycle states.
///
/// Status only advances forward through the execution state machine;
/// `cancelled` is the one sideways exit, reachable before completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Pending,
    Ready,
    Executed,
    Failed,
    Cancelled,
}

impl ActionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ActionStatus::Executed | ActionStatus::Failed | ActionStatus::Cancelled
        )
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionStatus::Pending => write!(f, "pending"),
            ActionStatus::Ready => write!(f, "ready"),
            ActionStatus::Executed => write!(f, "executed"),
            ActionStatus::Failed => write!(f, "failed"),
            ActionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for ActionStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ActionStatus::Pending),
            "ready" => Ok(ActionStatus::Ready),
            "executed" => Ok(ActionStatus::Executed),
            "failed" => Ok(ActionStatus::Failed),
            "cancelled" => Ok(ActionStatus::Cancelled),
            _ => Err(format!("Unknown action status: {}", s)),
        }
    }
}

/// Communication channel for communication actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommType {
    Email,
    Sms,
    Chat,
    Call,
}

/// Priority levels on the 1-5 scale.
pub mod priority {
    pub const URGENT: u8 = 5;
    pub const HIGH: u8 = 4;
    pub const MEDIUM: u8 = 3;
    pub const LOW: u8 = 2;
}

// =============================================================================
// Action detail union
// =============================================================================

/// Category-specific action fields, keyed by category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ActionDetail {
    Calendar {
        title: String,
        start_time: Timestamp,
        end_time: Timestamp,
        location: Option<String>,
        attendees: Vec<String>,
        reminder_minutes: Option<u32>,
    },
    Payment {
        recipient: String,
        amount: i64,
        currency: String,
        memo: Option<String>,
        deep_link: Option<String>,
    },
    Shopping {
        product_name: String,
        price: i64,
        currency: String,
        product_url: Option<String>,
        target_price: Option<i64>,
    },
    Task {
        title: String,
        deadline: Timestamp,
        description: Option<String>,
        tags: Vec<String>,
        parent_task_id: Option<Uuid>,
    },
    Navigation {
        destination: String,
        latitude: Option<f64>,
        longitude: Option<f64>,
        transport_mode: Option<String>,
    },
    Communication {
        recipient: String,
        comm_type: CommType,
        message_template: Option<String>,
        scheduled_time: Option<Timestamp>,
    },
    Notification {
        notification_title: String,
        notification_body: String,
        scheduled_time: Option<Timestamp>,
        priority: Option<u8>,
    },
}

impl ActionDetail {
    pub fn category(&self) -> ActionCategory {
        match self {
            ActionDetail::Calendar { .. } => ActionCategory::Calendar,
            ActionDetail::Payment { .. } => ActionCategory::Payment,
            ActionDetail::Shopping { .. } => ActionCategory::Shopping,
            ActionDetail::Task { .. } => ActionCategory::Task,
            ActionDetail::Navigation { .. } => ActionCategory::Navigation,
            ActionDetail::Communication { .. } => ActionCategory::Communication,
            ActionDetail::Notification { .. } => ActionCategory::Notification,
        }
    }
}

// =============================================================================
// Action
// =============================================================================

/// A typed, executable proposal.
///
/// Created by the suggester in `pending`; transitions to any other status
/// only through the executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub entities: Vec<Entity>,
    pub status: ActionStatus,
    /// Priority on the 1-5 scale.
    pub priority: u8,
    pub created_at: Timestamp,
    pub scheduled_at: Option<Timestamp>,
    pub executed_at: Option<Timestamp>,
    pub error: Option<String>,
    pub detail: ActionDetail,
}

impl Action {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: u8,
        entities: Vec<Entity>,
        detail: ActionDetail,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            entities,
            status: ActionStatus::Pending,
            priority: priority.clamp(1, 5),
            created_at: Timestamp::now(),
            scheduled_at: None,
            executed_at: None,
            error: None,
            detail,
        }
    }

    pub fn with_scheduled_at(mut self, at: Timestamp) -> Self {
        self.scheduled_at = Some(at);
        self
    }

    pub fn category(&self) -> ActionCategory {
        self.detail.category()
    }
}
