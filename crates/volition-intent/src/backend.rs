//! Classification backend capability interface.
//!
//! A backend produces per-label scores for a piece of text. The learned
//! model (when one is available) and the deterministic keyword adapter both
//! implement the same trait, so the classifier selects a strategy through
//! injection rather than dynamic loading.

use async_trait::async_trait;

use crate::error::IntentError;
use crate::keywords::KeywordClassifier;
use crate::types::IntentLabel;

/// A classification capability producing per-label scores.
#[async_trait]
pub trait ScoreBackend: Send + Sync {
    /// Whether the backend is loaded and able to serve predictions.
    fn is_ready(&self) -> bool;

    /// Score the text against every label. Scores lie in [0, 1].
    async fn predict(&self, text: &str) -> Result<Vec<(IntentLabel, f32)>, IntentError>;
}

/// Deterministic keyword adapter exposed as a `ScoreBackend`.
///
/// Always ready; scores each label by its keyword-hit count using the
/// fallback formula, zero for labels with no hits.
#[derive(Debug, Default)]
pub struct KeywordBackend {
    inner: KeywordClassifier,
}

impl KeywordBackend {
    pub fn new() -> Self {
        Self {
            inner: KeywordClassifier::new(),
        }
    }
}

#[async_trait]
impl ScoreBackend for KeywordBackend {
    fn is_ready(&self) -> bool {
        true
    }

    async fn predict(&self, text: &str) -> Result<Vec<(IntentLabel, f32)>, IntentError> {
        let scores = self
            .inner
            .hits(text)
            .into_iter()
            .map(|(label, hits)| {
                let score = if hits == 0 {
                    0.0
                } else {
                    (0.5 + hits as f32 * 0.1).min(0.95)
                };
                (label, score)
            })
            .collect();
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_keyword_backend_always_ready() {
        assert!(KeywordBackend::new().is_ready());
    }

    #[tokio::test]
    async fn test_keyword_backend_scores_hits() {
        let backend = KeywordBackend::new();
        let scores = backend.predict("결혼식 초대합니다").await.unwrap();
        let social = scores
            .iter()
            .find(|(l, _)| *l == IntentLabel::Social)
            .unwrap();
        assert!(social.1 >= 0.7);
        let work = scores.iter().find(|(l, _)| *l == IntentLabel::Work).unwrap();
        assert_eq!(work.1, 0.0);
    }

    #[tokio::test]
    async fn test_keyword_backend_scores_in_range() {
        let backend = KeywordBackend::new();
        let scores = backend
            .predict("결혼 결혼식 청첩장 초대 돌잔치 장례식 생일 파티")
            .await
            .unwrap();
        for (_, score) in scores {
            assert!((0.0..=1.0).contains(&score));
        }
    }
}
