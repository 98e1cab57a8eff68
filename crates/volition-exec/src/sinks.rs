//! Collaborator side-effect interfaces.
//!
//! Calendar insertion, notification delivery, and deep-link hand-off are
//! implemented outside the core; the executor depends only on their
//! success or failure. The `Log*` implementations record the call and
//! succeed, serving headless runs and tests.

use async_trait::async_trait;
use uuid::Uuid;
use volition_core::Timestamp;

/// Calendar event insertion collaborator.
#[async_trait]
pub trait CalendarSink: Send + Sync {
    /// Insert an event; returns the collaborator's event id.
    async fn insert_event(
        &self,
        title: &str,
        start: Timestamp,
        end: Timestamp,
        location: Option<&str>,
    ) -> Result<String, String>;
}

/// Notification delivery collaborator.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn post(&self, title: &str, body: &str) -> Result<(), String>;
}

/// Deep-link hand-off collaborator. The URL construction is the core's
/// contract; the OS-level launch is the collaborator's.
#[async_trait]
pub trait DeepLinkLauncher: Send + Sync {
    async fn launch(&self, url: &str) -> Result<(), String>;
}

/// Logging calendar sink.
pub struct LogCalendarSink;

#[async_trait]
impl CalendarSink for LogCalendarSink {
    async fn insert_event(
        &self,
        title: &str,
        start: Timestamp,
        end: Timestamp,
        location: Option<&str>,
    ) -> Result<String, String> {
        let event_id = Uuid::new_v4().to_string();
        tracing::info!(
            title = %title,
            start = start.0,
            end = end.0,
            location = location.unwrap_or("-"),
            event_id = %event_id,
            "Calendar event inserted"
        );
        Ok(event_id)
    }
}

/// Logging notification sink.
pub struct LogNotificationSink;

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn post(&self, title: &str, body: &str) -> Result<(), String> {
        tracing::info!(title = %title, body = %body, "Notification posted");
        Ok(())
    }
}

/// Logging deep-link launcher.
pub struct LogDeepLinkLauncher;

#[async_trait]
impl DeepLinkLauncher for LogDeepLinkLauncher {
    async fn launch(&self, url: &str) -> Result<(), String> {
        tracing::info!(url = %url, "Deep link launched");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_calendar_sink_returns_event_id() {
        let sink = LogCalendarSink;
        let id = sink
            .insert_event("회의", Timestamp(1_700_000_000), Timestamp(1_700_003_600), None)
            .await
            .unwrap();
        assert!(!id.is_empty());
    }

    #[tokio::test]
    async fn test_log_notification_sink_succeeds() {
        let sink = LogNotificationSink;
        assert!(sink.post("title", "body").await.is_ok());
    }

    #[tokio::test]
    async fn test_log_deep_link_launcher_succeeds() {
        let launcher = LogDeepLinkLauncher;
        assert!(launcher.launch("geo:0,0?q=강남역").await.is_ok());
    }
}
