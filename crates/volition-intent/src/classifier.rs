//! Two-tier classification cascade.
//!
//! Tier one runs the injected primary backend when it is ready; its argmax
//! label is kept if the confidence clears the configured threshold. On an
//! absent, unready, failing, or low-confidence primary, tier two runs the
//! deterministic keyword fallback. Capability failures are logged, never
//! surfaced to the caller.

use std::sync::Arc;

use crate::backend::ScoreBackend;
use crate::keywords::KeywordClassifier;
use crate::types::{Alternative, IntentLabel, IntentResult};

/// Default confidence threshold below which the primary tier is discarded.
pub const DEFAULT_FALLBACK_THRESHOLD: f32 = 0.6;

const MAX_ALTERNATIVES: usize = 2;

/// Intent classifier with a primary-model/fallback cascade.
pub struct IntentClassifier {
    primary: Option<Arc<dyn ScoreBackend>>,
    fallback: KeywordClassifier,
    fallback_threshold: f32,
}

impl IntentClassifier {
    /// Create a classifier with an optional primary backend.
    pub fn new(primary: Option<Arc<dyn ScoreBackend>>, fallback_threshold: f32) -> Self {
        Self {
            primary,
            fallback: KeywordClassifier::new(),
            fallback_threshold,
        }
    }

    /// A classifier with no primary tier; every call uses the keyword
    /// fallback.
    pub fn fallback_only() -> Self {
        Self::new(None, DEFAULT_FALLBACK_THRESHOLD)
    }

    /// Classify one piece of text.
    pub async fn classify(&self, text: &str) -> IntentResult {
        if let Some(primary) = &self.primary {
            if !primary.is_ready() {
                tracing::debug!("Primary backend not ready; using keyword fallback");
            } else {
                match primary.predict(text).await {
                    Ok(scores) => {
                        if let Some(result) = self.from_scores(scores) {
                            return result;
                        }
                        tracing::debug!(
                            threshold = self.fallback_threshold,
                            "Primary below threshold; using keyword fallback"
                        );
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "Primary backend failed; using keyword fallback");
                    }
                }
            }
        }

        self.fallback.classify(text)
    }

    /// Classify a batch sequentially; results are in input order.
    pub async fn classify_all(&self, texts: &[String]) -> Vec<IntentResult> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.classify(text).await);
        }
        results
    }

    /// Turn primary-tier scores into a result, if the argmax clears the
    /// threshold. First label wins ties.
    fn from_scores(&self, scores: Vec<(IntentLabel, f32)>) -> Option<IntentResult> {
        let mut best: Option<(IntentLabel, f32)> = None;
        for &(label, score) in &scores {
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((label, score));
            }
        }
        let (label, confidence) = best?;
        if confidence < self.fallback_threshold {
            return None;
        }

        let mut runners: Vec<(IntentLabel, f32)> = scores
            .into_iter()
            .filter(|(l, score)| *l != label && *score > 0.0)
            .collect();
        runners.sort_by(|a, b| b.1.total_cmp(&a.1));
        let alternatives = runners
            .into_iter()
            .take(MAX_ALTERNATIVES)
            .map(|(label, confidence)| Alternative { label, confidence })
            .collect();

        tracing::debug!(label = %label, confidence, "Primary backend classified");

        Some(IntentResult {
            label,
            confidence,
            alternatives,
        })
    }
}
