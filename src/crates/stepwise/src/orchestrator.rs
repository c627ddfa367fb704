//! Query orchestration: extract, execute each step in order, synthesize.

use crate::audit::{AuditRecord, AuditSink};
use crate::executor::StepExecutor;
use crate::extractor::IntentExtractor;
use crate::step::SubTask;
use crate::synthesizer::ResultSynthesizer;
use crate::trace::ExecutionTrace;
use std::sync::Arc;
use tooling::logging::LogGuard;
use tracing::{debug, info, warn};

/// Pipeline milestones reported while a query runs
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    /// Extraction finished
    Extracted(&'a [SubTask]),
    /// `index` is 1-based
    StepStarted {
        index: usize,
        total: usize,
        step: &'a SubTask,
    },
    StepFinished {
        index: usize,
        total: usize,
        step: &'a SubTask,
    },
    Synthesizing,
}

/// Answer text plus the trace it was synthesized from
#[derive(Debug, Clone)]
pub struct Response {
    pub text: String,
    pub trace: ExecutionTrace,
}

pub struct Orchestrator {
    extractor: IntentExtractor,
    executor: StepExecutor,
    synthesizer: ResultSynthesizer,
    audit: Option<Arc<dyn AuditSink>>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("extractor", &self.extractor)
            .field("executor", &self.executor)
            .field("audit", &self.audit.is_some())
            .finish()
    }
}

impl Orchestrator {
    pub fn new(extractor: IntentExtractor, executor: StepExecutor) -> Self {
        Self {
            extractor,
            executor,
            synthesizer: ResultSynthesizer::new(),
            audit: None,
        }
    }

    /// Default extractor and offline handlers, no audit sink
    pub fn offline() -> Self {
        Self::new(IntentExtractor::new(), StepExecutor::offline())
    }

    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    /// Name of the backend answering knowledge questions
    pub fn backend_label(&self) -> &str {
        self.executor.knowledge().backend_label()
    }

    /// Decompose a query without executing it
    pub fn extract(&self, query: &str) -> Vec<SubTask> {
        self.extractor.extract(query)
    }

    /// Process one query end to end
    pub async fn handle(&self, query: &str) -> Response {
        self.handle_with_progress(query, |_| {}).await
    }

    /// Process one query, reporting each milestone to `on_progress`
    pub async fn handle_with_progress<F>(&self, query: &str, mut on_progress: F) -> Response
    where
        F: FnMut(Progress<'_>),
    {
        let guard = LogGuard::new("handle_query");
        info!(query_len = query.len(), "Processing query");

        let steps = self.extractor.extract(query);
        on_progress(Progress::Extracted(&steps));

        let total = steps.len();
        let mut executed = Vec::with_capacity(total);
        for (i, step) in steps.into_iter().enumerate() {
            on_progress(Progress::StepStarted {
                index: i + 1,
                total,
                step: &step,
            });
            let step = self.executor.execute(step).await;
            on_progress(Progress::StepFinished {
                index: i + 1,
                total,
                step: &step,
            });
            executed.push(step);
        }

        on_progress(Progress::Synthesizing);
        let text = self.synthesizer.synthesize(&executed, query);
        let trace = ExecutionTrace::new(query, executed);

        info!(
            trace_id = %trace.id,
            completed = trace.completed_count(),
            total = trace.total_count(),
            elapsed = %tooling::logging::format_duration(guard.elapsed()),
            "Query processed"
        );

        self.audit(&trace, &text).await;
        Response { text, trace }
    }

    async fn audit(&self, trace: &ExecutionTrace, text: &str) {
        let Some(sink) = &self.audit else {
            return;
        };

        let record = AuditRecord::new(trace.clone(), text, self.backend_label());
        match sink.record(&record).await {
            Ok(()) => debug!(trace_id = %trace.id, "Audit record stored"),
            Err(e) => warn!(trace_id = %trace.id, error = %e, "Failed to store audit record"),
        }
    }
}
