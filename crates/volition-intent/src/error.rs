//! Error types for intent classification.

use volition_core::VolitionError;

/// Errors from a classification backend.
///
/// These never escape `IntentClassifier::classify`: a failing primary tier
/// degrades to the keyword fallback instead of surfacing an error.
#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    #[error("Backend not ready: {0}")]
    NotReady(String),
    #[error("Prediction failed: {0}")]
    PredictionFailed(String),
}

impl From<IntentError> for VolitionError {
    fn from(err: IntentError) -> Self {
        VolitionError::Classification(err.to_string())
    }
}
