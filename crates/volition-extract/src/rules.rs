//! Extraction rule tables.
//!
//! Rules are data, not control flow: each table row maps a pattern to an
//! entity kind and a fixed confidence. The extractor iterates the tables
//! in priority order and suppresses overlapping matches within a pass, so
//! individual rules can be tested and extended without touching dispatch.

use crate::types::RelationKind;

/// How a matched date pattern resolves to a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRuleKind {
    /// `YYYY-MM-DD` literal.
    Iso,
    /// `<M>월 <D>일`, resolved against the reference year.
    MonthDay,
    /// `다음 달 <D>일`, the given day in the month after the reference.
    NextMonthDay,
    /// Fixed offset in days from the reference date.
    RelativeDays(i64),
    /// Seven days from the reference date.
    NextWeek,
    /// Same day-of-month in the following month (clamped to month length).
    NextMonth,
}

/// One date extraction rule.
pub struct DateRule {
    pub pattern: &'static str,
    pub kind: DateRuleKind,
    pub confidence: f32,
}

/// Date rules in priority order. Earlier rules win overlapping spans, so
/// `다음 달 15일` resolves as a next-month day rather than a bare `다음 달`.
pub const DATE_RULES: &[DateRule] = &[
    DateRule {
        pattern: r"\b(\d{4})-(\d{2})-(\d{2})\b",
        kind: DateRuleKind::Iso,
        confidence: 0.95,
    },
    DateRule {
        pattern: r"(\d{1,2})월\s*(\d{1,2})일",
        kind: DateRuleKind::MonthDay,
        confidence: 0.9,
    },
    DateRule {
        pattern: r"다음\s*달\s*(\d{1,2})일",
        kind: DateRuleKind::NextMonthDay,
        confidence: 0.9,
    },
    DateRule {
        pattern: r"모레",
        kind: DateRuleKind::RelativeDays(2),
        confidence: 0.85,
    },
    DateRule {
        pattern: r"내일",
        kind: DateRuleKind::RelativeDays(1),
        confidence: 0.85,
    },
    DateRule {
        pattern: r"오늘",
        kind: DateRuleKind::RelativeDays(0),
        confidence: 0.85,
    },
    DateRule {
        pattern: r"다음\s*주",
        kind: DateRuleKind::NextWeek,
        confidence: 0.85,
    },
    DateRule {
        pattern: r"다음\s*달",
        kind: DateRuleKind::NextMonth,
        confidence: 0.85,
    },
    DateRule {
        pattern: r"(?i)\btomorrow\b",
        kind: DateRuleKind::RelativeDays(1),
        confidence: 0.85,
    },
    DateRule {
        pattern: r"(?i)\btoday\b",
        kind: DateRuleKind::RelativeDays(0),
        confidence: 0.85,
    },
    DateRule {
        pattern: r"(?i)\bnext\s+week\b",
        kind: DateRuleKind::NextWeek,
        confidence: 0.85,
    },
];

/// Time-of-day pattern: `오전/오후 <H>시` with optional `<M>분`.
///
/// A match attaches to the most recently extracted date entity rather than
/// producing a separate entity; with no prior date it stands alone.
pub const TIME_PATTERN: &str = r"(오전|오후)\s*(\d{1,2})시(?:\s*(\d{1,2})분)?";

pub const TIME_CONFIDENCE: f32 = 0.85;

/// One digit-based amount rule: captured numeral × multiplier.
pub struct AmountRule {
    pub pattern: &'static str,
    pub multiplier: i64,
    pub confidence: f32,
    /// Whether the minimum-value floor applies to matches of this rule.
    pub floor: bool,
}

/// Digit amount rules in priority order. All matches on a string are
/// collected, not just the first; overlapping spans resolve to the earlier
/// rule.
pub const AMOUNT_RULES: &[AmountRule] = &[
    AmountRule {
        pattern: r"(?:^|[^\d])(\d+)\s*천만\s*원",
        multiplier: 10_000_000,
        confidence: 0.9,
        floor: false,
    },
    AmountRule {
        pattern: r"(?:^|[^\d])(\d+)\s*백만\s*원",
        multiplier: 1_000_000,
        confidence: 0.9,
        floor: false,
    },
    AmountRule {
        pattern: r"(?:^|[^\d])(\d+)\s*만\s*원",
        multiplier: 10_000,
        confidence: 0.9,
        floor: false,
    },
    AmountRule {
        pattern: r"(?:^|[^\d])(\d+)\s*천\s*원",
        multiplier: 1_000,
        confidence: 0.9,
        floor: false,
    },
    AmountRule {
        pattern: r"(?:^|[^\d])(\d{1,3}(?:,\d{3})+)\s*원",
        multiplier: 1,
        confidence: 0.9,
        floor: false,
    },
    // Bare 4+ digit amounts; the extractor applies a minimum-value floor.
    AmountRule {
        pattern: r"(?:^|[^\d,])(\d{4,})\s*원",
        multiplier: 1,
        confidence: 0.8,
        floor: true,
    },
];

/// Native magnitude words accepted without a leading numeral.
/// Scanned after the digit rules; longest word first.
pub const MAGNITUDE_WORDS: &[(&str, i64)] = &[
    ("천만", 10_000_000),
    ("백만", 1_000_000),
    ("십만", 100_000),
    ("일만", 10_000),
];

pub const MAGNITUDE_CONFIDENCE: f32 = 0.85;

/// Phone number patterns: Korean mobile prefixes and the Seoul landline
/// prefix, with `-`, `.`, space, or no separator.
pub const PHONE_PATTERNS: &[(&str, f32)] = &[
    (r"(?:^|[^\d])(01[016789][-. ]?\d{3,4}[-. ]?\d{4})", 0.95),
    (r"(?:^|[^\d])(02[-. ]?\d{3,4}[-. ]?\d{4})", 0.9),
];

pub const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";

pub const EMAIL_CONFIDENCE: f32 = 0.98;

/// Curated location keywords: venue-type nouns and known place names.
/// Longest keywords are matched first so `강남역` wins over `강남`.
pub const LOCATION_KEYWORDS: &[&str] = &[
    "홍대입구",
    "장례식장",
    "결혼식장",
    "스타벅스",
    "편의점",
    "백화점",
    "영화관",
    "도서관",
    "헬스장",
    "미용실",
    "대학교",
    "사무실",
    "터미널",
    "강남역",
    "서울역",
    "예식장",
    "성수동",
    "이태원",
    "강남",
    "홍대",
    "잠실",
    "판교",
    "신촌",
    "회사",
    "학교",
    "병원",
    "약국",
    "은행",
    "마트",
    "카페",
    "식당",
    "공원",
    "교회",
    "공항",
];

pub const LOCATION_CONFIDENCE: f32 = 0.7;

/// Hangul name followed by an honorific suffix. The suffix is stripped
/// before the stoplist check and dedup.
pub const NAME_PATTERN: &str = r"(?:^|[^가-힣])([가-힣]{2,3})\s?(씨|님)";

pub const NAME_CONFIDENCE: f32 = 0.65;

/// Common words that precede 씨/님 without being names.
pub const NAME_STOPLIST: &[&str] = &[
    "아저", "아주머", "아줌", "어머", "아버", "할머", "할아버", "부모", "사모", "선생", "사장",
    "부장", "과장", "차장", "대리", "팀장", "고객", "기사", "회원", "관리",
];

/// Relationship keywords mapping to the closed relation set.
/// Longest keywords first so `대학 동기` wins over `동기`.
pub const RELATIONSHIP_KEYWORDS: &[(&str, RelationKind)] = &[
    ("대학 동기", RelationKind::Classmate),
    ("대학동기", RelationKind::Classmate),
    ("직장 동료", RelationKind::Colleague),
    ("회사 동료", RelationKind::Colleague),
    ("부모님", RelationKind::Family),
    ("어머니", RelationKind::Family),
    ("아버지", RelationKind::Family),
    ("할머니", RelationKind::Family),
    ("할아버지", RelationKind::Family),
    ("동기", RelationKind::Classmate),
    ("동료", RelationKind::Colleague),
    ("가족", RelationKind::Family),
    ("누나", RelationKind::Family),
    ("언니", RelationKind::Family),
    ("오빠", RelationKind::Family),
    ("친구", RelationKind::Friend),
    ("절친", RelationKind::Friend),
    ("선배", RelationKind::Acquaintance),
    ("후배", RelationKind::Acquaintance),
    ("지인", RelationKind::Acquaintance),
];

pub const RELATIONSHIP_CONFIDENCE: f32 = 0.75;
