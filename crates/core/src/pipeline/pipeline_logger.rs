use std::collections::BTreeMap;
use std::time::Instant;

use super::workflow_stage::WorkflowStage;
use crate::transcription::domain::transcription_job::JobStatus;

/// Cross-cutting logger for caption workflow events.
///
/// Decouples the use case from specific output mechanisms (stdout, log
/// crate, test capture) so each caller can observe the run without changing
/// the orchestration code.
pub trait PipelineLogger: Send {
    /// A workflow stage has been entered.
    fn stage(&mut self, stage: WorkflowStage);

    /// Record how long a stage took.
    fn timing(&mut self, stage: WorkflowStage, duration_ms: f64);

    /// Report the status observed by one poll of the remote job.
    fn poll(&mut self, attempt: usize, status: JobStatus);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn stage(&mut self, _stage: WorkflowStage) {}
    fn timing(&mut self, _stage: WorkflowStage, _duration_ms: f64) {}
    fn poll(&mut self, _attempt: usize, _status: JobStatus) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger that forwards events to the `log` crate and keeps
/// per-stage timings for a summary at the end of the run.
pub struct StdoutPipelineLogger {
    timings: BTreeMap<WorkflowStage, f64>,
    polls: usize,
    start_time: Instant,
    last_stage: Option<WorkflowStage>,
}

impl StdoutPipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: BTreeMap::new(),
            polls: 0,
            start_time: Instant::now(),
            last_stage: None,
        }
    }

    /// Returns the formatted summary string, or `None` if no stage was timed.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Run summary ({:.1}s total, {} polls):",
            elapsed_ms / 1000.0,
            self.polls
        )];

        for (stage, total_ms) in &self.timings {
            let pct = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "  {:14}: {total_ms:9.0}ms  ({pct:4.1}%)",
                stage.name()
            ));
        }

        if let Some(stage) = self.last_stage {
            lines.push(format!("  Finished in stage: {stage}"));
        }

        Some(lines.join("\n"))
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn stage(&mut self, stage: WorkflowStage) {
        self.last_stage = Some(stage);
        log::debug!("Entering stage: {stage}");
    }

    fn timing(&mut self, stage: WorkflowStage, duration_ms: f64) {
        *self.timings.entry(stage).or_default() += duration_ms;
    }

    fn poll(&mut self, attempt: usize, status: JobStatus) {
        self.polls = attempt;
        log::info!("Poll {attempt}: job {status}");
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
