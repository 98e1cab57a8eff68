use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Enums
// =============================================================================

/// Where a captured snippet came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Voice transcript.
    Voice,
    /// Messenger/chat excerpt.
    Chat,
    /// Manually typed note.
    Manual,
    /// OCR'd screenshot text.
    Screenshot,
    /// Location-tagged capture.
    Location,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Voice => write!(f, "voice"),
            Source::Chat => write!(f, "chat"),
            Source::Manual => write!(f, "manual"),
            Source::Screenshot => write!(f, "screenshot"),
            Source::Location => write!(f, "location"),
        }
    }
}

impl std::str::FromStr for Source {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "voice" => Ok(Source::Voice),
            "chat" => Ok(Source::Chat),
            "manual" => Ok(Source::Manual),
            "screenshot" => Ok(Source::Screenshot),
            "location" => Ok(Source::Location),
            _ => Err(format!("Unknown source: {}", s)),
        }
    }
}

// =============================================================================
// Domain Structs
// =============================================================================

/// A captured snippet of text entering the pipeline.
///
/// Immutable once constructed. Ownership passes by value into the pipeline;
/// the capture side keeps no reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInput {
    pub text: String,
    pub source: Source,
    pub captured_at: Timestamp,
}

impl RawInput {
    pub fn new(text: impl Into<String>, source: Source) -> Self {
        Self {
            text: text.into(),
            source,
            captured_at: Timestamp::now(),
        }
    }
}

// =============================================================================
// Newtype Wrappers
// =============================================================================

/// Unix timestamp in seconds since epoch.
///
/// Compared by value. Two Timestamps with the same inner value are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp())
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.0, 0).unwrap_or_default()
    }
}

/// A score in [0, 1]. Clamped on construction.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(pub f32);

impl Confidence {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Source ----

    #[test]
    fn test_source_display() {
        assert_eq!(Source::Voice.to_string(), "voice");
        assert_eq!(Source::Chat.to_string(), "chat");
        assert_eq!(Source::Manual.to_string(), "manual");
        assert_eq!(Source::Screenshot.to_string(), "screenshot");
        assert_eq!(Source::Location.to_string(), "location");
    }

    #[test]
    fn test_source_from_str() {
        assert_eq!("voice".parse::<Source>().unwrap(), Source::Voice);
        assert_eq!("chat".parse::<Source>().unwrap(), Source::Chat);
        assert_eq!("manual".parse::<Source>().unwrap(), Source::Manual);
        assert_eq!("screenshot".parse::<Source>().unwrap(), Source::Screenshot);
        assert_eq!("location".parse::<Source>().unwrap(), Source::Location);
        assert!("invalid".parse::<Source>().is_err());
    }

    #[test]
    fn test_source_from_str_case_sensitive() {
        assert!("Voice".parse::<Source>().is_err());
        assert!("CHAT".parse::<Source>().is_err());
        assert!("".parse::<Source>().is_err());
    }

    #[test]
    fn test_source_serde_round_trip() {
        for variant in [
            Source::Voice,
            Source::Chat,
            Source::Manual,
            Source::Screenshot,
            Source::Location,
        ] {
            let json = serde_json::to_string(&variant).unwrap();
            let rt: Source = serde_json::from_str(&json).unwrap();
            assert_eq!(variant, rt);
        }
    }

    #[test]
    fn test_source_serde_json_format() {
        assert_eq!(
            serde_json::to_string(&Source::Screenshot).unwrap(),
            "\"screenshot\""
        );
        assert_eq!(serde_json::to_string(&Source::Voice).unwrap(), "\"voice\"");
    }

    #[test]
    fn test_source_display_from_str_round_trip() {
        for variant in [
            Source::Voice,
            Source::Chat,
            Source::Manual,
            Source::Screenshot,
            Source::Location,
        ] {
            let parsed: Source = variant.to_string().parse().unwrap();
            assert_eq!(variant, parsed);
        }
    }

    // ---- RawInput ----

    #[test]
    fn test_raw_input_new() {
        let input = RawInput::new("buy milk", Source::Manual);
        assert_eq!(input.text, "buy milk");
        assert_eq!(input.source, Source::Manual);
        assert!(input.captured_at.0 > 0);
    }

    #[test]
    fn test_raw_input_serde_round_trip() {
        let input = RawInput::new("내일 회의", Source::Voice);
        let json = serde_json::to_string(&input).unwrap();
        let rt: RawInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input.text, rt.text);
        assert_eq!(input.source, rt.source);
        assert_eq!(input.captured_at, rt.captured_at);
    }

    // ---- Timestamp ----

    #[test]
    fn test_timestamp_now_positive() {
        let ts = Timestamp::now();
        assert!(ts.0 > 1_600_000_000);
    }

    #[test]
    fn test_timestamp_datetime_round_trip() {
        let now = Utc::now();
        let ts = Timestamp::from_datetime(now);
        assert_eq!(ts.to_datetime().timestamp(), now.timestamp());
    }

    #[test]
    fn test_timestamp_ordering() {
        assert!(Timestamp(100) < Timestamp(200));
        assert_eq!(Timestamp(100), Timestamp(100));
    }

    #[test]
    fn test_timestamp_serde_round_trip() {
        let ts = Timestamp(1_700_000_000);
        let json = serde_json::to_string(&ts).unwrap();
        let rt: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, rt);
    }

    // ---- Confidence ----

    #[test]
    fn test_confidence_clamps_range() {
        assert_eq!(Confidence::new(1.5).0, 1.0);
        assert_eq!(Confidence::new(-0.5).0, 0.0);
        assert_eq!(Confidence::new(0.65).0, 0.65);
    }
}
