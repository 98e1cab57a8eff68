//! Rule-driven entity extraction.
//!
//! Runs independent, order-insensitive passes per entity type over the
//! input text. A single text may yield multiple entities of the same type.
//! Relative dates resolve against a reference clock, so `extract_at` is
//! fully deterministic.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use regex::Regex;

use crate::rules::{
    self, DateRuleKind, EMAIL_CONFIDENCE, LOCATION_CONFIDENCE, MAGNITUDE_CONFIDENCE,
    NAME_CONFIDENCE, RELATIONSHIP_CONFIDENCE, TIME_CONFIDENCE,
};
use crate::types::{Entity, EntityMetadata, EntityType};

/// Default minimum value (KRW) for bare `N원` amounts.
pub const DEFAULT_MIN_BARE_AMOUNT: i64 = 1_000;

/// Extracts typed entities from raw captured text.
///
/// All patterns are compiled once at construction and reused.
pub struct EntityExtractor {
    date_rules: Vec<(Regex, DateRuleKind, f32)>,
    time_regex: Regex,
    amount_rules: Vec<(Regex, i64, f32, bool)>,
    magnitude_rules: Vec<(Regex, i64, String)>,
    phone_rules: Vec<(Regex, f32)>,
    email_regex: Regex,
    name_regex: Regex,
    min_bare_amount: i64,
}

impl EntityExtractor {
    /// Create a new extractor with all rule tables compiled.
    pub fn new() -> Self {
        let date_rules = rules::DATE_RULES
            .iter()
            .map(|r| {
                (
                    Regex::new(r.pattern).expect("Invalid date pattern"),
                    r.kind,
                    r.confidence,
                )
            })
            .collect();
        let amount_rules = rules::AMOUNT_RULES
            .iter()
            .map(|r| {
                (
                    Regex::new(r.pattern).expect("Invalid amount pattern"),
                    r.multiplier,
                    r.confidence,
                    r.floor,
                )
            })
            .collect();
        let magnitude_rules = rules::MAGNITUDE_WORDS
            .iter()
            .map(|(word, value)| {
                (
                    Regex::new(&format!(r"{}\s*원", word)).expect("Invalid magnitude pattern"),
                    *value,
                    word.to_string(),
                )
            })
            .collect();
        let phone_rules = rules::PHONE_PATTERNS
            .iter()
            .map(|(pat, conf)| (Regex::new(pat).expect("Invalid phone pattern"), *conf))
            .collect();

        Self {
            date_rules,
            time_regex: Regex::new(rules::TIME_PATTERN).expect("Invalid time pattern"),
            amount_rules,
            magnitude_rules,
            phone_rules,
            email_regex: Regex::new(rules::EMAIL_PATTERN).expect("Invalid email pattern"),
            name_regex: Regex::new(rules::NAME_PATTERN).expect("Invalid name pattern"),
            min_bare_amount: DEFAULT_MIN_BARE_AMOUNT,
        }
    }

    /// Override the bare-amount minimum floor.
    pub fn with_min_bare_amount(mut self, floor: i64) -> Self {
        self.min_bare_amount = floor;
        self
    }

    /// Extract all recognized entities, resolving relative dates against
    /// the current wall-clock time.
    pub fn extract(&self, text: &str) -> Vec<Entity> {
        self.extract_at(text, Utc::now())
    }

    /// Extract from a batch of texts sequentially, one resolved clock for
    /// the whole batch; results are in input order.
    pub fn extract_all(&self, texts: &[String]) -> Vec<Vec<Entity>> {
        let now = Utc::now();
        texts.iter().map(|t| self.extract_at(t, now)).collect()
    }

    /// Extract all recognized entities against a fixed reference clock.
    pub fn extract_at(&self, text: &str, now: DateTime<Utc>) -> Vec<Entity> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut entities = Vec::new();
        self.extract_dates_and_times(text, now, &mut entities);
        self.extract_amounts(text, &mut entities);
        self.extract_phones(text, &mut entities);
        self.extract_emails(text, &mut entities);
        extract_keyword_pass(
            text,
            rules::LOCATION_KEYWORDS.iter().map(|k| (*k, ())),
            &mut entities,
            |keyword, ()| {
                Entity::new(EntityType::Location, keyword, keyword, LOCATION_CONFIDENCE)
                    .with_metadata(EntityMetadata::Location {
                        latitude: None,
                        longitude: None,
                    })
            },
        );
        self.extract_names(text, &mut entities);
        extract_keyword_pass(
            text,
            rules::RELATIONSHIP_KEYWORDS.iter().map(|(k, r)| (*k, *r)),
            &mut entities,
            |keyword, relation| {
                Entity::new(
                    EntityType::Relationship,
                    keyword,
                    keyword,
                    RELATIONSHIP_CONFIDENCE,
                )
                .with_metadata(EntityMetadata::Relationship { relation })
            },
        );

        tracing::debug!(count = entities.len(), "Entities extracted");
        entities
    }

    // ------------------------------------------------------------------
    // Dates and times
    // ------------------------------------------------------------------

    fn extract_dates_and_times(
        &self,
        text: &str,
        now: DateTime<Utc>,
        entities: &mut Vec<Entity>,
    ) {
        let mut taken: Vec<(usize, usize)> = Vec::new();

        for (regex, kind, confidence) in &self.date_rules {
            for caps in regex.captures_iter(text) {
                let m = caps.get(0).expect("group 0 always present");
                if overlaps(&taken, m.start(), m.end()) {
                    continue;
                }
                let Some(date) = resolve_date(&caps, *kind, now) else {
                    continue;
                };
                taken.push((m.start(), m.end()));
                entities.push(Entity::new(
                    EntityType::Date,
                    m.as_str(),
                    date.format("%Y-%m-%d").to_string(),
                    *confidence,
                ));
            }
        }

        // Time-of-day attaches to the most recently extracted date, if any.
        for caps in self.time_regex.captures_iter(text) {
            let meridiem = caps.get(1).map_or("", |m| m.as_str());
            let hour: u32 = caps
                .get(2)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0);
            let minute: u32 = caps
                .get(3)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0);
            if hour > 12 || minute > 59 {
                continue;
            }
            let hour24 = match meridiem {
                "오후" if hour < 12 => hour + 12,
                "오전" if hour == 12 => 0,
                _ => hour,
            };
            let clock = format!("{:02}:{:02}", hour24, minute);

            match entities
                .iter_mut()
                .rev()
                .find(|e| e.entity_type == EntityType::Date)
            {
                Some(date_entity) => {
                    let day = date_entity.value[..10].to_string();
                    date_entity.value = format!("{}T{}", day, clock);
                }
                None => {
                    let raw = caps.get(0).map_or("", |m| m.as_str());
                    entities.push(Entity::new(EntityType::Time, raw, clock, TIME_CONFIDENCE));
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Amounts
    // ------------------------------------------------------------------

    fn extract_amounts(&self, text: &str, entities: &mut Vec<Entity>) {
        let mut taken: Vec<(usize, usize)> = Vec::new();

        for (regex, multiplier, confidence, floor) in &self.amount_rules {
            for caps in regex.captures_iter(text) {
                let full = caps.get(0).expect("group 0 always present");
                let numeral = caps.get(1).expect("amount rules have one group");
                // The leading guard character is not part of the amount.
                let (start, end) = (numeral.start(), full.end());
                if overlaps(&taken, start, end) {
                    continue;
                }
                let Ok(base) = numeral.as_str().replace(',', "").parse::<i64>() else {
                    continue;
                };
                let value = base * multiplier;
                if *floor && value < self.min_bare_amount {
                    continue;
                }
                taken.push((start, end));
                entities.push(
                    Entity::new(
                        EntityType::Amount,
                        &text[start..end],
                        value.to_string(),
                        *confidence,
                    )
                    .with_metadata(EntityMetadata::Amount {
                        currency: "KRW".to_string(),
                    }),
                );
            }
        }

        for (regex, value, _word) in &self.magnitude_rules {
            for m in regex.find_iter(text) {
                if overlaps(&taken, m.start(), m.end()) {
                    continue;
                }
                taken.push((m.start(), m.end()));
                entities.push(
                    Entity::new(
                        EntityType::Amount,
                        m.as_str(),
                        value.to_string(),
                        MAGNITUDE_CONFIDENCE,
                    )
                    .with_metadata(EntityMetadata::Amount {
                        currency: "KRW".to_string(),
                    }),
                );
            }
        }
    }

    // ------------------------------------------------------------------
    // Contacts
    // ------------------------------------------------------------------

    fn extract_phones(&self, text: &str, entities: &mut Vec<Entity>) {
        let mut seen: Vec<String> = Vec::new();

        for (regex, confidence) in &self.phone_rules {
            for caps in regex.captures_iter(text) {
                let m = caps.get(1).expect("phone rules have one group");
                let digits: String = m.as_str().chars().filter(|c| c.is_ascii_digit()).collect();
                if seen.contains(&digits) {
                    continue;
                }
                seen.push(digits.clone());
                entities.push(Entity::new(
                    EntityType::Phone,
                    m.as_str(),
                    digits,
                    *confidence,
                ));
            }
        }
    }

    fn extract_emails(&self, text: &str, entities: &mut Vec<Entity>) {
        let mut seen: Vec<String> = Vec::new();

        for m in self.email_regex.find_iter(text) {
            let normalized = m.as_str().to_ascii_lowercase();
            if seen.contains(&normalized) {
                continue;
            }
            seen.push(normalized.clone());
            entities.push(Entity::new(
                EntityType::Email,
                m.as_str(),
                normalized,
                EMAIL_CONFIDENCE,
            ));
        }
    }

    // ------------------------------------------------------------------
    // Names
    // ------------------------------------------------------------------

    fn extract_names(&self, text: &str, entities: &mut Vec<Entity>) {
        let mut seen: Vec<String> = Vec::new();

        for caps in self.name_regex.captures_iter(text) {
            let name = caps.get(1).expect("name rule has a name group");
            let suffix = caps.get(2).expect("name rule has a suffix group");
            let stripped = name.as_str();
            if rules::NAME_STOPLIST.contains(&stripped) {
                continue;
            }
            if seen.iter().any(|s| s == stripped) {
                continue;
            }
            seen.push(stripped.to_string());
            entities.push(Entity::new(
                EntityType::Person,
                &text[name.start()..suffix.end()],
                stripped,
                NAME_CONFIDENCE,
            ));
        }
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Substring-table pass shared by locations and relationships.
///
/// Keywords are scanned in table order (longest first), with overlapping
/// spans suppressed, so `강남역` never also yields `강남`.
fn extract_keyword_pass<T: Copy>(
    text: &str,
    table: impl Iterator<Item = (&'static str, T)>,
    entities: &mut Vec<Entity>,
    build: impl Fn(&'static str, T) -> Entity,
) {
    let mut taken: Vec<(usize, usize)> = Vec::new();

    for (keyword, tag) in table {
        for (start, _) in text.match_indices(keyword) {
            let end = start + keyword.len();
            if overlaps(&taken, start, end) {
                continue;
            }
            taken.push((start, end));
            entities.push(build(keyword, tag));
        }
    }
}

fn overlaps(taken: &[(usize, usize)], start: usize, end: usize) -> bool {
    taken.iter().any(|(s, e)| start < *e && *s < end)
}

fn resolve_date(caps: &regex::Captures<'_>, kind: DateRuleKind, now: DateTime<Utc>) -> Option<NaiveDate> {
    let today = now.date_naive();
    match kind {
        DateRuleKind::Iso => {
            let year: i32 = caps.get(1)?.as_str().parse().ok()?;
            let month: u32 = caps.get(2)?.as_str().parse().ok()?;
            let day: u32 = caps.get(3)?.as_str().parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        }
        DateRuleKind::MonthDay => {
            let month: u32 = caps.get(1)?.as_str().parse().ok()?;
            let day: u32 = caps.get(2)?.as_str().parse().ok()?;
            NaiveDate::from_ymd_opt(today.year(), month, day)
        }
        DateRuleKind::NextMonthDay => {
            let day: u32 = caps.get(1)?.as_str().parse().ok()?;
            let (year, month) = month_after(today);
            clamped_day(year, month, day)
        }
        DateRuleKind::RelativeDays(days) => today.checked_add_signed(Duration::days(days)),
        DateRuleKind::NextWeek => today.checked_add_signed(Duration::days(7)),
        DateRuleKind::NextMonth => {
            let (year, month) = month_after(today);
            clamped_day(year, month, today.day())
        }
    }
}

fn month_after(date: NaiveDate) -> (i32, u32) {
    if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    }
}

/// The given day in (year, month), clamped to the month's last day.
fn clamped_day(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        let (ny, nm) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        NaiveDate::from_ymd_opt(ny, nm, 1).map(|d| d - Duration::days(1))
    })
}
