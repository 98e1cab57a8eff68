use thiserror::Error;

/// Top-level error type for the Volition pipeline.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for
/// VolitionError` so that the `?` operator works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VolitionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Classification error: {0}")]
    Classification(String),

    #[error("Suggestion error: {0}")]
    Suggestion(String),

    #[error("Execution error: {0}")]
    Execution(String),

    #[error("Permission denied: {0}")]
    Permission(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for VolitionError {
    fn from(err: toml::de::Error) -> Self {
        VolitionError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for VolitionError {
    fn from(err: toml::ser::Error) -> Self {
        VolitionError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for VolitionError {
    fn from(err: serde_json::Error) -> Self {
        VolitionError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VolitionError>;
