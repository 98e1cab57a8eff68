//! Temporal reasoning over extracted entities.
//!
//! Derives a deadline from the first date entity, an urgency level from a
//! keyword tier table, and a recommended reminder time from the deadline
//! distance.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use volition_extract::{Entity, EntityType};

use crate::types::priority;

/// Urgency keyword tiers, scanned highest level first. The first tier with
/// any hit wins, so a level-5 keyword beats a level-3 keyword in the same
/// text.
pub const URGENCY_RULES: &[(u8, &[&str])] = &[
    (
        5,
        &["긴급", "당장", "즉시", "장례식", "urgent", "immediately", "asap"],
    ),
    (4, &["오늘", "지금", "바로", "today"]),
    (3, &["내일", "모레", "tomorrow"]),
];

/// Urgency when no keyword matches.
pub const DEFAULT_URGENCY: u8 = 2;

/// Derived temporal facts for one piece of captured text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalAnalysis {
    pub deadline: Option<DateTime<Utc>>,
    /// 1-5, higher is more time-sensitive.
    pub urgency: u8,
    pub optimal_reminder: Option<DateTime<Utc>>,
}

/// Stateless temporal reasoner.
#[derive(Debug, Default, Clone)]
pub struct TemporalReasoner;

impl TemporalReasoner {
    pub fn new() -> Self {
        Self
    }

    /// Analyze against the current wall-clock time.
    pub fn analyze(&self, entities: &[Entity], raw_text: &str) -> TemporalAnalysis {
        self.analyze_at(entities, raw_text, Utc::now())
    }

    /// Analyze against a fixed reference clock.
    pub fn analyze_at(
        &self,
        entities: &[Entity],
        raw_text: &str,
        now: DateTime<Utc>,
    ) -> TemporalAnalysis {
        let deadline = entities
            .iter()
            .find(|e| e.entity_type == EntityType::Date)
            .and_then(|e| parse_deadline(&e.value));

        let urgency = urgency_for(raw_text);
        let optimal_reminder = deadline.map(|d| reminder_for(d, now));

        tracing::debug!(urgency, has_deadline = deadline.is_some(), "Temporal analysis");

        TemporalAnalysis {
            deadline,
            urgency,
            optimal_reminder,
        }
    }
}

/// Scan the urgency tiers, highest first.
pub fn urgency_for(text: &str) -> u8 {
    let lowered = text.to_lowercase();
    for (level, keywords) in URGENCY_RULES {
        if keywords.iter().any(|k| lowered.contains(k)) {
            return *level;
        }
    }
    DEFAULT_URGENCY
}

/// Reminder tiering by calendar-day distance to the deadline:
/// more than 7 days out, remind 3 days before; 3-7 days out, 1 day before;
/// 2 days or closer, remind immediately.
pub fn reminder_for(deadline: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let days = days_until(deadline, now);
    if days > 7 {
        deadline - Duration::days(3)
    } else if days > 2 {
        deadline - Duration::days(1)
    } else {
        now
    }
}

/// Task priority from calendar-day distance to the deadline.
pub fn deadline_priority(days: i64) -> u8 {
    if days <= 2 {
        priority::HIGH
    } else if days <= 7 {
        priority::MEDIUM
    } else {
        priority::LOW
    }
}

/// Whole calendar days between now and the deadline.
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (deadline.date_naive() - now.date_naive()).num_days()
}

/// Parse a normalized date entity value: `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM`.
fn parse_deadline(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
