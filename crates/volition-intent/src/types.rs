use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of intent labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLabel {
    Calendar,
    Shopping,
    Work,
    Social,
    Payment,
    Other,
}

impl IntentLabel {
    /// All labels, in the canonical scoring/tie-break order.
    pub fn all() -> &'static [IntentLabel] {
        &[
            IntentLabel::Calendar,
            IntentLabel::Shopping,
            IntentLabel::Work,
            IntentLabel::Social,
            IntentLabel::Payment,
            IntentLabel::Other,
        ]
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentLabel::Calendar => write!(f, "calendar"),
            IntentLabel::Shopping => write!(f, "shopping"),
            IntentLabel::Work => write!(f, "work"),
            IntentLabel::Social => write!(f, "social"),
            IntentLabel::Payment => write!(f, "payment"),
            IntentLabel::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for IntentLabel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calendar" => Ok(IntentLabel::Calendar),
            "shopping" => Ok(IntentLabel::Shopping),
            "work" => Ok(IntentLabel::Work),
            "social" => Ok(IntentLabel::Social),
            "payment" => Ok(IntentLabel::Payment),
            "other" => Ok(IntentLabel::Other),
            _ => Err(format!("Unknown intent label: {}", s)),
        }
    }
}

/// A ranked alternative label from classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub label: IntentLabel,
    pub confidence: f32,
}

/// The result of classifying one piece of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResult {
    pub label: IntentLabel,
    pub confidence: f32,
    /// Up to two runner-up labels, ranked.
    pub alternatives: Vec<Alternative>,
}

impl IntentResult {
    /// The baseline result for text matching nothing.
    pub fn baseline() -> Self {
        Self {
            label: IntentLabel::Other,
            confidence: 0.3,
            alternatives: Vec::new(),
        }
    }
}
