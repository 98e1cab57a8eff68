//! The understanding-to-action pipeline.
//!
//! Wires the extractor, classifier, temporal reasoner, suggester, and
//! executor into one flow: raw text in, entities + intent + suggestions
//! out, with optional execution of the suggestions.
//!
//! Batches are sequential; the one concurrent path is `process_concurrent`,
//! a fan-out over independent inputs with per-item error isolation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use volition_core::{RawInput, VolitionConfig};
use volition_exec::{
    ActionExecutor, ActionResult, HandlerRegistry, LogCalendarSink, LogDeepLinkLauncher,
    LogNotificationSink, PermissionService,
};
use volition_extract::{Entity, EntityExtractor};
use volition_intent::{IntentClassifier, IntentResult, ScoreBackend};
use volition_suggest::{Action, ActionSuggester, TemporalAnalysis, TemporalReasoner};

/// Everything the pipeline derived from one captured input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub input: RawInput,
    pub entities: Vec<Entity>,
    pub intent: IntentResult,
    pub temporal: TemporalAnalysis,
    pub suggestions: Vec<Action>,
    /// Set only for placeholder results from the concurrent fan-out.
    pub error: Option<String>,
}

impl PipelineOutput {
    /// Placeholder for an input whose processing task died.
    fn failure(input: RawInput, error: String) -> Self {
        Self {
            input,
            entities: Vec::new(),
            intent: IntentResult::baseline(),
            temporal: TemporalAnalysis {
                deadline: None,
                urgency: volition_suggest::temporal::DEFAULT_URGENCY,
                optimal_reminder: None,
            },
            suggestions: Vec::new(),
            error: Some(error),
        }
    }
}

/// The assembled understanding-to-action pipeline.
///
/// Every stage receives its collaborators through this constructor; there
/// are no global singletons.
pub struct Pipeline {
    extractor: EntityExtractor,
    classifier: IntentClassifier,
    reasoner: TemporalReasoner,
    suggester: ActionSuggester,
    executor: ActionExecutor,
}

impl Pipeline {
    /// Assemble the pipeline from config plus the injected collaborators:
    /// an optional primary classification backend and the permission
    /// service.
    pub fn new(
        config: &VolitionConfig,
        primary: Option<Arc<dyn ScoreBackend>>,
        permissions: Arc<dyn PermissionService>,
    ) -> Self {
        let registry = HandlerRegistry::with_defaults(
            Arc::new(LogCalendarSink),
            Arc::new(LogNotificationSink),
            Arc::new(LogDeepLinkLauncher),
        );

        Self {
            extractor: EntityExtractor::new()
                .with_min_bare_amount(config.extract.min_bare_amount),
            classifier: IntentClassifier::new(primary, config.intent.fallback_threshold),
            reasoner: TemporalReasoner::new(),
            suggester: ActionSuggester::new()
                .with_urgent_threshold(config.suggest.urgent_threshold),
            executor: ActionExecutor::new(registry, permissions)
                .with_show_rationale(config.executor.show_permission_rationale),
        }
    }

    /// Process one captured input against the current wall-clock time.
    pub async fn process(&self, input: RawInput) -> PipelineOutput {
        self.process_at(input, Utc::now()).await
    }

    /// Process one captured input against a fixed reference clock.
    pub async fn process_at(&self, input: RawInput, now: DateTime<Utc>) -> PipelineOutput {
        let entities = self.extractor.extract_at(&input.text, now);
        let intent = self.classifier.classify(&input.text).await;
        let temporal = self.reasoner.analyze_at(&entities, &input.text, now);
        let suggestions = self
            .suggester
            .suggest_at(&intent, &entities, &input.text, now);

        tracing::info!(
            source = %input.source,
            entities = entities.len(),
            intent = %intent.label,
            suggestions = suggestions.len(),
            "Input processed"
        );

        PipelineOutput {
            input,
            entities,
            intent,
            temporal,
            suggestions,
            error: None,
        }
    }

    /// Process a batch sequentially; one item completes before the next
    /// begins, and results are in input order.
    pub async fn process_all(&self, inputs: Vec<RawInput>) -> Vec<PipelineOutput> {
        let mut outputs = Vec::with_capacity(inputs.len());
        for input in inputs {
            outputs.push(self.process(input).await);
        }
        outputs
    }

    /// Fan out over independent inputs concurrently.
    ///
    /// Each item is isolated: a task that dies yields a placeholder
    /// failure output instead of aborting the batch. Results are in input
    /// order.
    pub async fn process_concurrent(self: &Arc<Self>, inputs: Vec<RawInput>) -> Vec<PipelineOutput> {
        let handles: Vec<(RawInput, tokio::task::JoinHandle<PipelineOutput>)> = inputs
            .into_iter()
            .map(|input| {
                let pipeline = Arc::clone(self);
                let task_input = input.clone();
                (
                    input,
                    tokio::spawn(async move { pipeline.process(task_input).await }),
                )
            })
            .collect();

        let mut outputs = Vec::with_capacity(handles.len());
        for (input, handle) in handles {
            match handle.await {
                Ok(output) => outputs.push(output),
                Err(e) => {
                    tracing::warn!(error = %e, "Pipeline task failed; emitting placeholder");
                    outputs.push(PipelineOutput::failure(input, e.to_string()));
                }
            }
        }
        outputs
    }

    /// Drive suggestions through the executor, sequentially.
    pub async fn execute_suggestions(&self, actions: &mut [Action]) -> Vec<ActionResult> {
        self.executor.execute_batch(actions).await
    }

    /// The executor, for status polling and cancellation.
    pub fn executor(&self) -> &ActionExecutor {
        &self.executor
    }
}
