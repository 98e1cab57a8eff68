use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity kinds the extractor can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Date,
    Time,
    Amount,
    Phone,
    Email,
    Location,
    Person,
    Relationship,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::Amount => "amount",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Location => "location",
            Self::Person => "person",
            Self::Relationship => "relationship",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "date" => Some(Self::Date),
            "time" => Some(Self::Time),
            "amount" => Some(Self::Amount),
            "phone" => Some(Self::Phone),
            "email" => Some(Self::Email),
            "location" => Some(Self::Location),
            "person" => Some(Self::Person),
            "relationship" => Some(Self::Relationship),
            _ => None,
        }
    }
}

/// Closed set of relationship labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Family,
    Friend,
    Colleague,
    Classmate,
    Acquaintance,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Friend => "friend",
            Self::Colleague => "colleague",
            Self::Classmate => "classmate",
            Self::Acquaintance => "acquaintance",
        }
    }
}

/// Type-specific metadata carried by an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityMetadata {
    #[default]
    None,
    Amount {
        currency: String,
    },
    Location {
        latitude: Option<f64>,
        longitude: Option<f64>,
    },
    Relationship {
        relation: RelationKind,
    },
}

/// A typed, confidence-scored fact extracted from free text.
///
/// Produced fresh per extraction call and never mutated afterwards. The
/// extracting caller owns the entities until they are attached to an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: Uuid,
    pub entity_type: EntityType,
    /// The matched substring as it appeared in the input.
    pub raw_text: String,
    /// Normalized value: ISO date, numeric string, or free text.
    pub value: String,
    /// Confidence in [0, 1], fixed per rule.
    pub confidence: f32,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Entity {
    pub fn new(
        entity_type: EntityType,
        raw_text: impl Into<String>,
        value: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_type,
            raw_text: raw_text.into(),
            value: value.into(),
            confidence: confidence.clamp(0.0, 1.0),
            metadata: EntityMetadata::None,
        }
    }

    pub fn with_metadata(mut self, metadata: EntityMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}
