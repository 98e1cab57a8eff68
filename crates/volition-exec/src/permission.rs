//! Permission gating for action categories.
//!
//! The executor checks a category's required permissions against an
//! injected `PermissionService` before dispatch. The OS-level dialog is an
//! external collaborator; `StaticPermissions` ships as the in-tree
//! implementation and test double.

use std::collections::HashSet;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use volition_suggest::ActionCategory;

/// Platform permission kinds the pipeline can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    CalendarRead,
    CalendarWrite,
    NotificationPost,
    Vibrate,
    WakeLock,
    Location,
}

impl PermissionKind {
    pub fn all() -> &'static [PermissionKind] {
        &[
            PermissionKind::CalendarRead,
            PermissionKind::CalendarWrite,
            PermissionKind::NotificationPost,
            PermissionKind::Vibrate,
            PermissionKind::WakeLock,
            PermissionKind::Location,
        ]
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionKind::CalendarRead => write!(f, "calendar_read"),
            PermissionKind::CalendarWrite => write!(f, "calendar_write"),
            PermissionKind::NotificationPost => write!(f, "notification_post"),
            PermissionKind::Vibrate => write!(f, "vibrate"),
            PermissionKind::WakeLock => write!(f, "wake_lock"),
            PermissionKind::Location => write!(f, "location"),
        }
    }
}

/// The permissions a category needs before dispatch.
pub fn required_permissions(category: ActionCategory) -> &'static [PermissionKind] {
    match category {
        ActionCategory::Calendar => &[PermissionKind::CalendarRead, PermissionKind::CalendarWrite],
        ActionCategory::Notification => &[
            PermissionKind::NotificationPost,
            PermissionKind::Vibrate,
            PermissionKind::WakeLock,
        ],
        ActionCategory::Navigation => &[PermissionKind::Location],
        ActionCategory::Payment
        | ActionCategory::Shopping
        | ActionCategory::Task
        | ActionCategory::Communication => &[],
    }
}

/// Platform permission collaborator.
#[async_trait]
pub trait PermissionService: Send + Sync {
    /// Whether the permission is currently granted.
    async fn check_permission(&self, kind: PermissionKind) -> bool;

    /// Ask the user for the permission, optionally with a rationale.
    async fn request_permission(&self, kind: PermissionKind, show_rationale: bool) -> bool;
}

/// Fixed-grant permission service.
pub struct StaticPermissions {
    granted: HashSet<PermissionKind>,
    grant_on_request: bool,
}

impl StaticPermissions {
    /// Every permission granted.
    pub fn allow_all() -> Self {
        Self {
            granted: PermissionKind::all().iter().copied().collect(),
            grant_on_request: true,
        }
    }

    /// Nothing granted; requests are refused.
    pub fn deny_all() -> Self {
        Self {
            granted: HashSet::new(),
            grant_on_request: false,
        }
    }

    /// Only the given permissions granted.
    pub fn granting(kinds: &[PermissionKind]) -> Self {
        Self {
            granted: kinds.iter().copied().collect(),
            grant_on_request: false,
        }
    }

    /// Whether a request dialog would succeed for ungranted permissions.
    pub fn with_grant_on_request(mut self, grant: bool) -> Self {
        self.grant_on_request = grant;
        self
    }
}

#[async_trait]
impl PermissionService for StaticPermissions {
    async fn check_permission(&self, kind: PermissionKind) -> bool {
        self.granted.contains(&kind)
    }

    async fn request_permission(&self, kind: PermissionKind, show_rationale: bool) -> bool {
        let granted = self.granted.contains(&kind) || self.grant_on_request;
        tracing::debug!(kind = %kind, show_rationale, granted, "Permission requested");
        granted
    }
}
