//! Action execution for Volition.
//!
//! Drives approved actions through a bounded lifecycle: structural
//! validation, category-specific preparation, permission gating, and
//! dispatch to a per-category handler, with a pollable status projection
//! and cooperative cancellation. Every execution attempt returns a
//! structured result; nothing escapes as a panic or unhandled error.

pub mod error;
pub mod executor;
pub mod handler;
pub mod permission;
pub mod sinks;
pub mod state_machine;
pub mod status;
pub mod types;

pub use error::ExecError;
pub use executor::ActionExecutor;
pub use handler::{CategoryHandler, HandlerRegistry};
pub use permission::{required_permissions, PermissionKind, PermissionService, StaticPermissions};
pub use sinks::{
    CalendarSink, DeepLinkLauncher, LogCalendarSink, LogDeepLinkLauncher, LogNotificationSink,
    NotificationSink,
};
pub use status::{ExecutionStage, ExecutionStatus, StatusBoard};
pub use types::ActionResult;
