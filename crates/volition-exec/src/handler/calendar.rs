//! Calendar action handler.
//!
//! Inserts an event through the calendar collaborator. Requires a date
//! entity on the action.

use std::sync::Arc;

use async_trait::async_trait;
use volition_extract::EntityType;
use volition_suggest::{Action, ActionCategory, ActionDetail};

use crate::error::ExecError;
use crate::handler::{require_entity, CategoryHandler};
use crate::sinks::CalendarSink;

pub struct CalendarHandler {
    sink: Arc<dyn CalendarSink>,
}

impl CalendarHandler {
    pub fn new(sink: Arc<dyn CalendarSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl CategoryHandler for CalendarHandler {
    fn category(&self) -> ActionCategory {
        ActionCategory::Calendar
    }

    async fn execute(&self, action: &Action) -> Result<serde_json::Value, ExecError> {
        require_entity(action, EntityType::Date, "date")?;

        let ActionDetail::Calendar {
            title,
            start_time,
            end_time,
            location,
            ..
        } = &action.detail
        else {
            return Err(ExecError::HandlerFailed(
                "calendar handler received a non-calendar action".to_string(),
            ));
        };

        let event_id = self
            .sink
            .insert_event(title, *start_time, *end_time, location.as_deref())
            .await
            .map_err(ExecError::HandlerFailed)?;

        Ok(serde_json::json!({
            "event_id": event_id,
            "start_time": start_time.0,
            "end_time": end_time.0,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::LogCalendarSink;
    use volition_core::Timestamp;
    use volition_extract::Entity;

    fn calendar_action(entities: Vec<Entity>) -> Action {
        Action::new(
            "결혼식",
            "다음 달 15일 결혼식이야",
            3,
            entities,
            ActionDetail::Calendar {
                title: "결혼식".to_string(),
                start_time: Timestamp(1_800_000_000),
                end_time: Timestamp(1_800_003_600),
                location: None,
                attendees: vec![],
                reminder_minutes: None,
            },
        )
    }

    #[tokio::test]
    async fn test_execute_with_date_entity() {
        let handler = CalendarHandler::new(Arc::new(LogCalendarSink));
        let date = Entity::new(EntityType::Date, "다음 달 15일", "2026-09-15", 0.9);
        let action = calendar_action(vec![date]);

        let data = handler.execute(&action).await.unwrap();
        assert!(data.get("event_id").is_some());
        assert_eq!(data["start_time"], 1_800_000_000i64);
    }

    #[tokio::test]
    async fn test_execute_without_date_entity_fails_fast() {
        let handler = CalendarHandler::new(Arc::new(LogCalendarSink));
        let action = calendar_action(vec![]);

        let err = handler.execute(&action).await.unwrap_err();
        assert!(matches!(err, ExecError::MissingEntity { .. }));
        assert!(err.to_string().contains("date"));
    }

    #[test]
    fn test_category() {
        let handler = CalendarHandler::new(Arc::new(LogCalendarSink));
        assert_eq!(handler.category(), ActionCategory::Calendar);
    }
}
