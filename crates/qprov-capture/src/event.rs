//! Capture events — the tagged union adapters feed into an accumulator.

use chrono::{DateTime, Utc};
use qprov_model::{Circuit, Environment, ExperimentResult, Execution, Hardware, Transpilation};

/// A discrete observation reported by instrumented code.
///
/// Events may arrive in any order, possibly duplicated, possibly partial.
/// The accumulator's merge policy (last write wins for singular fields,
/// append for circuits) resolves them into one consistent record.
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// Software environment was observed.
    EnvironmentObserved(Environment),
    /// A circuit was seen (several may occur in one experiment).
    CircuitObserved(Circuit),
    /// A transpilation run was observed.
    TranspilationObserved(Transpilation),
    /// Backend hardware information was observed.
    HardwareObserved(Hardware),
    /// A job was submitted.
    ExecutionStarted(Execution),
    /// A job finished; merged into the pending execution if one exists.
    ExecutionCompleted {
        /// Provider job identifier, if known.
        job_id: Option<String>,
        /// Completion time.
        completed_at: DateTime<Utc>,
    },
    /// Results were retrieved. `final_` marks the terminal signal that
    /// freezes the accumulator.
    ResultObserved {
        /// The observed result.
        result: ExperimentResult,
        /// Whether this observation completes the experiment.
        final_: bool,
    },
}

impl CaptureEvent {
    /// Stable kind name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CaptureEvent::EnvironmentObserved(_) => "environment-observed",
            CaptureEvent::CircuitObserved(_) => "circuit-observed",
            CaptureEvent::TranspilationObserved(_) => "transpilation-observed",
            CaptureEvent::HardwareObserved(_) => "hardware-observed",
            CaptureEvent::ExecutionStarted(_) => "execution-started",
            CaptureEvent::ExecutionCompleted { .. } => "execution-completed",
            CaptureEvent::ResultObserved { .. } => "result-observed",
        }
    }

    /// Whether this event should trigger a freeze after it is applied.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CaptureEvent::ResultObserved { final_: true, .. })
    }
}
