//! Entity extraction for Volition.
//!
//! Converts raw captured text into typed, confidence-scored entities:
//! dates, times, monetary amounts, phone numbers, emails, locations,
//! person names, and relationship labels. Extraction is rule-table driven
//! and fully deterministic for a fixed reference clock.

pub mod extractor;
pub mod rules;
pub mod types;

pub use extractor::EntityExtractor;
pub use types::{Entity, EntityMetadata, EntityType, RelationKind};
