//! Action suggestion for Volition.
//!
//! Maps classified intent plus extracted entities to typed action
//! proposals, with temporal reasoning for deadlines, urgency, and
//! reminder timing.

pub mod suggester;
pub mod temporal;
pub mod types;

pub use suggester::ActionSuggester;
pub use temporal::{TemporalAnalysis, TemporalReasoner};
pub use types::{priority, Action, ActionCategory, ActionDetail, ActionStatus, CommType};
