//! Deterministic mapping from intent and entities to action proposals.
//!
//! Each intent label maps to a fixed set of candidate actions. An action
//! whose required entity is absent is suppressed, never an error. Urgency
//! at or above the configured threshold forces an urgent notification
//! regardless of the category outcome.

use chrono::{DateTime, Utc};
use volition_core::Timestamp;
use volition_extract::{Entity, EntityType};
use volition_intent::{IntentLabel, IntentResult};

use crate::temporal::{days_until, deadline_priority, TemporalAnalysis, TemporalReasoner};
use crate::types::{priority, Action, ActionDetail};

/// Default urgency level that forces an urgent notification.
pub const DEFAULT_URGENT_THRESHOLD: u8 = 4;

/// Maximum characters of raw text used as an action title.
const TITLE_CHARS: usize = 40;

/// Maps (intent, entities) to zero or more typed action proposals.
pub struct ActionSuggester {
    reasoner: TemporalReasoner,
    urgent_threshold: u8,
}

impl ActionSuggester {
    pub fn new() -> Self {
        Self {
            reasoner: TemporalReasoner::new(),
            urgent_threshold: DEFAULT_URGENT_THRESHOLD,
        }
    }

    /// Override the urgency threshold for the forced notification.
    pub fn with_urgent_threshold(mut self, threshold: u8) -> Self {
        self.urgent_threshold = threshold;
        self
    }

    /// Suggest actions against the current wall-clock time.
    pub fn suggest(
        &self,
        intent: &IntentResult,
        entities: &[Entity],
        raw_text: &str,
    ) -> Vec<Action> {
        self.suggest_at(intent, entities, raw_text, Utc::now())
    }

    /// Suggest actions against a fixed reference clock.
    pub fn suggest_at(
        &self,
        intent: &IntentResult,
        entities: &[Entity],
        raw_text: &str,
        now: DateTime<Utc>,
    ) -> Vec<Action> {
        let temporal = self.reasoner.analyze_at(entities, raw_text, now);
        let mut actions = Vec::new();

        match intent.label {
            IntentLabel::Calendar => {
                match self.calendar_action(entities, raw_text, &temporal, now) {
                    Some(action) => actions.push(action),
                    None => {
                        tracing::debug!(intent = %intent.label, "Suppressed: no date entity")
                    }
                }
            }
            IntentLabel::Shopping => {
                let amount = first_of(entities, EntityType::Amount);
                actions.push(self.shopping_action(entities, raw_text, amount));
                if let Some(amount) = amount {
                    actions.push(self.price_alert_action(entities, raw_text, amount));
                }
            }
            IntentLabel::Work => match self.task_action(entities, raw_text, &temporal, now) {
                Some(action) => actions.push(action),
                None => tracing::debug!(intent = %intent.label, "Suppressed: no date entity"),
            },
            IntentLabel::Social => {
                match self.calendar_action(entities, raw_text, &temporal, now) {
                    Some(action) => actions.push(action),
                    None => {
                        tracing::debug!(intent = %intent.label, "Suppressed: no date entity")
                    }
                }
                if first_of(entities, EntityType::Amount).is_some() {
                    if let Some(action) = self.payment_action(entities, raw_text, &temporal) {
                        actions.push(action);
                    }
                }
            }
            IntentLabel::Payment => match self.payment_action(entities, raw_text, &temporal) {
                Some(action) => actions.push(action),
                None => tracing::debug!(intent = %intent.label, "Suppressed: no amount entity"),
            },
            IntentLabel::Other => {}
        }

        // Urgency forces a notification regardless of category outcome.
        if temporal.urgency >= self.urgent_threshold {
            actions.push(self.urgent_notification(entities, raw_text, &temporal, now));
        }

        tracing::debug!(
            intent = %intent.label,
            urgency = temporal.urgency,
            count = actions.len(),
            "Actions suggested"
        );
        actions
    }

    fn calendar_action(
        &self,
        entities: &[Entity],
        raw_text: &str,
        temporal: &TemporalAnalysis,
        now: DateTime<Utc>,
    ) -> Option<Action> {
        first_of(entities, EntityType::Date)?;
        let deadline = temporal.deadline?;

        let start = Timestamp::from_datetime(deadline);
        let end = Timestamp(start.0 + 3600);
        let location = first_of(entities, EntityType::Location).map(|e| e.value.clone());
        let attendees: Vec<String> = entities
            .iter()
            .filter(|e| e.entity_type == EntityType::Person)
            .map(|e| e.value.clone())
            .collect();
        let reminder_minutes = temporal
            .optimal_reminder
            .map(|r| (deadline - r).num_minutes().max(0) as u32);

        let attached = entities_of(
            entities,
            &[EntityType::Date, EntityType::Location, EntityType::Person],
        );
        let title = snippet(raw_text);

        Some(
            Action::new(
                title.clone(),
                raw_text,
                deadline_priority(days_until(deadline, now)),
                attached,
                ActionDetail::Calendar {
                    title,
                    start_time: start,
                    end_time: end,
                    location,
                    attendees,
                    reminder_minutes,
                },
            )
            .with_scheduled_at(start),
        )
    }

    fn task_action(
        &self,
        entities: &[Entity],
        raw_text: &str,
        temporal: &TemporalAnalysis,
        now: DateTime<Utc>,
    ) -> Option<Action> {
        first_of(entities, EntityType::Date)?;
        let deadline = temporal.deadline?;
        let due = Timestamp::from_datetime(deadline);
        let title = snippet(raw_text);

        Some(
            Action::new(
                title.clone(),
                raw_text,
                deadline_priority(days_until(deadline, now)),
                entities_of(entities, &[EntityType::Date]),
                ActionDetail::Task {
                    title,
                    deadline: due,
                    description: Some(raw_text.to_string()),
                    tags: Vec::new(),
                    parent_task_id: None,
                },
            )
            .with_scheduled_at(due),
        )
    }

    fn payment_action(
        &self,
        entities: &[Entity],
        raw_text: &str,
        _temporal: &TemporalAnalysis,
    ) -> Option<Action> {
        let amount_entity = first_of(entities, EntityType::Amount)?;
        let amount: i64 = amount_entity.value.parse().ok()?;

        // Recipient falls back through person, then relationship; the
        // prepare phase reports it when both are absent.
        let recipient = first_of(entities, EntityType::Person)
            .or_else(|| first_of(entities, EntityType::Relationship))
            .map(|e| e.value.clone())
            .unwrap_or_default();

        Some(Action::new(
            snippet(raw_text),
            raw_text,
            priority::MEDIUM,
            entities_of(
                entities,
                &[
                    EntityType::Amount,
                    EntityType::Person,
                    EntityType::Relationship,
                ],
            ),
            ActionDetail::Payment {
                recipient,
                amount,
                currency: "KRW".to_string(),
                memo: Some(snippet(raw_text)),
                deep_link: None,
            },
        ))
    }

    fn shopping_action(
        &self,
        entities: &[Entity],
        raw_text: &str,
        amount: Option<&Entity>,
    ) -> Action {
        let price = amount.and_then(|e| e.value.parse().ok()).unwrap_or(0);
        let product_name = snippet(raw_text);

        Action::new(
            product_name.clone(),
            raw_text,
            priority::LOW,
            entities_of(entities, &[EntityType::Amount]),
            ActionDetail::Shopping {
                product_name,
                price,
                currency: "KRW".to_string(),
                product_url: None,
                target_price: amount.and_then(|e| e.value.parse().ok()),
            },
        )
    }

    fn price_alert_action(
        &self,
        entities: &[Entity],
        raw_text: &str,
        amount: &Entity,
    ) -> Action {
        let product = snippet(raw_text);
        Action::new(
            format!("Price alert: {}", product),
            raw_text,
            priority::MEDIUM,
            entities_of(entities, &[EntityType::Amount]),
            ActionDetail::Notification {
                notification_title: format!("Price alert: {}", product),
                notification_body: format!("Target price {} KRW", amount.value),
                scheduled_time: None,
                priority: Some(priority::MEDIUM),
            },
        )
    }

    fn urgent_notification(
        &self,
        entities: &[Entity],
        raw_text: &str,
        temporal: &TemporalAnalysis,
        now: DateTime<Utc>,
    ) -> Action {
        let title = format!("Urgent: {}", snippet(raw_text));
        Action::new(
            title.clone(),
            raw_text,
            priority::URGENT,
            entities.to_vec(),
            ActionDetail::Notification {
                notification_title: title,
                notification_body: raw_text.to_string(),
                scheduled_time: Some(Timestamp::from_datetime(now)),
                priority: Some(temporal.urgency),
            },
        )
    }
}

impl Default for ActionSuggester {
    fn default() -> Self {
        Self::new()
    }
}

fn first_of(entities: &[Entity], entity_type: EntityType) -> Option<&Entity> {
    entities.iter().find(|e| e.entity_type == entity_type)
}

fn entities_of(entities: &[Entity], types: &[EntityType]) -> Vec<Entity> {
    entities
        .iter()
        .filter(|e| types.contains(&e.entity_type))
        .cloned()
        .collect()
}

/// First line of the raw text, truncated for use as a title.
fn snippet(raw_text: &str) -> String {
    let line = raw_text.lines().next().unwrap_or("").trim();
    if line.chars().count() <= TITLE_CHARS {
        line.to_string()
    } else {
        line.chars().take(TITLE_CHARS).collect()
    }
}
