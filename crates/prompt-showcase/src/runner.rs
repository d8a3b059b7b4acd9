// Sequential runner: executes named units one after another with per-unit fault isolation.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

use futures::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use prompt_showcase_types::{BoxFuture, Error};

use crate::console::Console;

/// Width of the separator printed before the summary line.
const RULE_WIDTH: usize = 50;

/// Future produced by a unit's operation.
pub type UnitFuture = BoxFuture<'static, Result<bool, Error>>;

/// One named, independent operation in a batch.
///
/// The operation is `FnOnce`: a unit can be attempted once and is consumed
/// by the run. It reports `Ok(true)` on success and `Ok(false)` when it
/// handled its own failure. `Err` means a fault the operation did not
/// anticipate; the runner contains it.
pub struct WorkUnit {
    label: String,
    operation: Box<dyn FnOnce() -> UnitFuture + Send>,
}

impl WorkUnit {
    pub fn new<F, Fut>(label: impl Into<String>, operation: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<bool, Error>> + Send + 'static,
    {
        Self {
            label: label.into(),
            operation: Box::new(move || Box::pin(operation())),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl std::fmt::Debug for WorkUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkUnit")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Lifecycle of a unit within a run. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl UnitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

/// Terminal result of one attempted unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    /// The operation returned `Ok(true)`.
    Succeeded,
    /// The operation handled its own failure and returned `Ok(false)`.
    Failed,
    /// The operation returned `Err` or panicked; the runner contained it.
    Faulted(String),
}

impl UnitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    pub fn state(&self) -> UnitState {
        match self {
            Self::Succeeded => UnitState::Succeeded,
            Self::Failed | Self::Faulted(_) => UnitState::Failed,
        }
    }
}

/// What happened to one unit.
#[derive(Debug, Clone)]
pub struct UnitRecord {
    pub label: String,
    pub outcome: UnitOutcome,
    pub elapsed: Duration,
}

/// Aggregate outcome of a completed run.
///
/// Counts derive from the per-unit records, so `succeeded() <= total()`
/// holds by construction.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    records: Vec<UnitRecord>,
}

impl RunReport {
    /// Units attempted.
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn succeeded(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome.is_success())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    pub fn records(&self) -> &[UnitRecord] {
        &self.records
    }

    /// Labels in execution order.
    pub fn labels(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.label.as_str()).collect()
    }

    /// `Completed X/Y {noun} successfully.`
    pub fn summary(&self, noun: &str) -> String {
        format!(
            "Completed {}/{} {noun} successfully.",
            self.succeeded(),
            self.total()
        )
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary("units"))
    }
}

/// Executes work units strictly in order, never letting one unit's failure
/// stop the batch.
#[derive(Debug, Clone)]
pub struct Runner {
    console: Console,
    noun: String,
    unit_kind: Option<String>,
    interrupt_notice: String,
}

impl Runner {
    pub fn new(console: Console) -> Self {
        Self {
            console,
            noun: "units".to_string(),
            unit_kind: None,
            interrupt_notice: "\n\nRun interrupted by user".to_string(),
        }
    }

    /// Word used for units in the summary line (default: "units").
    pub fn noun(mut self, noun: impl Into<String>) -> Self {
        self.noun = noun.into();
        self
    }

    /// Word placed after the label in fault diagnostics, giving
    /// `❌ {label} {kind} failed: …` instead of `❌ {label} failed: …`.
    pub fn unit_kind(mut self, kind: impl Into<String>) -> Self {
        self.unit_kind = Some(kind.into());
        self
    }

    /// Text printed when a run is cancelled.
    pub fn interrupt_notice(mut self, notice: impl Into<String>) -> Self {
        self.interrupt_notice = notice.into();
        self
    }

    /// Run every unit and return the report. Never fails.
    pub async fn run(&self, units: Vec<WorkUnit>) -> RunReport {
        let total = units.len();
        let mut report = RunReport::default();
        for (index, unit) in units.into_iter().enumerate() {
            let record = self.attempt(index, total, unit).await;
            report.records.push(record);
        }
        self.finish(report)
    }

    /// Like [`Runner::run`], but stops as soon as `cancel` fires.
    ///
    /// Cancellation is checked before each unit and raced against the
    /// running one. A cancelled run prints the interrupt notice instead of
    /// a summary, discards the partial report and returns
    /// `ErrorKind::Interrupted`.
    pub async fn run_until_cancelled(
        &self,
        units: Vec<WorkUnit>,
        cancel: &CancellationToken,
    ) -> Result<RunReport, Error> {
        let total = units.len();
        let mut report = RunReport::default();
        for (index, unit) in units.into_iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(self.interrupted(report.total(), total));
            }
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(self.interrupted(report.total(), total));
                }
                record = self.attempt(index, total, unit) => report.records.push(record),
            }
        }
        Ok(self.finish(report))
    }

    async fn attempt(&self, index: usize, total: usize, unit: WorkUnit) -> UnitRecord {
        let WorkUnit { label, operation } = unit;
        let span = tracing::info_span!("unit", label = %label, position = index + 1, total);

        async move {
            tracing::debug!(
                from = UnitState::Pending.as_str(),
                to = UnitState::Running.as_str()
            );
            let started = Instant::now();

            // Calling the operation happens inside the guarded future so a
            // panic while building it is contained too.
            let guarded = AssertUnwindSafe(async move { operation().await }).catch_unwind();
            let outcome = match guarded.await {
                Ok(Ok(true)) => UnitOutcome::Succeeded,
                Ok(Ok(false)) => {
                    tracing::warn!(unit = %label, "unit reported failure");
                    UnitOutcome::Failed
                }
                Ok(Err(err)) => {
                    tracing::error!(unit = %label, error = %err, "unit raised an unhandled error");
                    self.report_fault(&label, &err);
                    UnitOutcome::Faulted(err.to_string())
                }
                Err(panic) => {
                    let reason = format!("panicked: {}", panic_message(panic.as_ref()));
                    tracing::error!(unit = %label, "unit {reason}");
                    self.report_fault(&label, &reason);
                    UnitOutcome::Faulted(reason)
                }
            };

            let elapsed = started.elapsed();
            tracing::debug!(
                from = UnitState::Running.as_str(),
                to = outcome.state().as_str(),
                elapsed_ms = elapsed.as_millis() as u64
            );
            UnitRecord {
                label,
                outcome,
                elapsed,
            }
        }
        .instrument(span)
        .await
    }

    fn report_fault(&self, label: &str, reason: &dyn std::fmt::Display) {
        match &self.unit_kind {
            Some(kind) => self.console.line(format!("❌ {label} {kind} failed: {reason}")),
            None => self.console.line(format!("❌ {label} failed: {reason}")),
        }
    }

    fn finish(&self, report: RunReport) -> RunReport {
        self.console.line(format!("\n{}", "=".repeat(RULE_WIDTH)));
        self.console.line(report.summary(&self.noun));
        tracing::info!(
            succeeded = report.succeeded(),
            total = report.total(),
            "run complete"
        );
        report
    }

    fn interrupted(&self, completed: usize, total: usize) -> Error {
        tracing::warn!(completed, total, "run interrupted");
        self.console.line(&self.interrupt_notice);
        Error::interrupted()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}
