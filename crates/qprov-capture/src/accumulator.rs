//! Record accumulator: tagged-event merge with a one-way freeze.
//!
//! One accumulator exists per in-flight experiment scope. It receives
//! [`CaptureEvent`]s in any order, from any adapter, and merges them into a
//! working record:
//!
//! - **singular fields** (environment, transpilation, hardware, execution,
//!   result) follow last-write-wins — the most recent application
//!   overwrites the previous one;
//! - **circuits** append, in application order, since one experiment may
//!   involve several;
//! - merge order is strict `apply()` arrival order — timestamps carried
//!   inside events are data, never ordering keys.
//!
//! Freezing is a one-way transition: it produces exactly one [`Record`]
//! and every later `apply()` fails with [`CaptureError::Closed`].

use qprov_model::{Execution, Metadata, Record, RecordBuilder};
use tracing::debug;

use crate::error::{CaptureError, CaptureResult};
use crate::event::CaptureEvent;

/// Mutable merge state for one experiment scope.
#[derive(Debug, Default)]
pub struct Accumulator {
    scope: String,
    builder: RecordBuilder,
    pending_execution: Option<Execution>,
    frozen: bool,
    events_applied: usize,
}

impl Accumulator {
    /// Create an accumulator for the implicit (unnamed) scope.
    pub fn new() -> Self {
        Self {
            scope: "<implicit>".to_string(),
            ..Default::default()
        }
    }

    /// Create an accumulator for a named experiment scope.
    pub fn named(name: impl Into<String>, metadata: Metadata) -> Self {
        let name = name.into();
        Self {
            scope: name,
            builder: RecordBuilder::default().metadata(metadata),
            ..Default::default()
        }
    }

    /// Scope name this accumulator belongs to.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Whether this accumulator has frozen.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Number of events merged so far.
    pub fn events_applied(&self) -> usize {
        self.events_applied
    }

    /// Merge one event into the working record.
    ///
    /// Fails with [`CaptureError::Closed`] after a freeze — late events are
    /// a logic error in event ordering, never silently dropped.
    pub fn apply(&mut self, event: CaptureEvent) -> CaptureResult<()> {
        if self.frozen {
            return Err(CaptureError::Closed {
                scope: self.scope.clone(),
            });
        }

        debug!(scope = %self.scope, kind = event.kind(), "applying capture event");
        let builder = std::mem::take(&mut self.builder);
        self.builder = match event {
            CaptureEvent::EnvironmentObserved(env) => builder.environment(env),
            CaptureEvent::CircuitObserved(circuit) => builder.circuit(circuit),
            CaptureEvent::TranspilationObserved(t) => builder.transpilation(t),
            CaptureEvent::HardwareObserved(hw) => builder.hardware(hw),
            CaptureEvent::ExecutionStarted(exec) => {
                self.pending_execution = Some(exec.clone());
                builder.execution(exec)
            }
            CaptureEvent::ExecutionCompleted {
                job_id,
                completed_at,
            } => {
                // Completion folds into the pending execution; a completion
                // with no preceding start still records what it knows.
                let mut exec = self.pending_execution.take().unwrap_or_default();
                if job_id.is_some() {
                    exec.job_id = job_id;
                }
                exec.completed_at = Some(completed_at);
                self.pending_execution = Some(exec.clone());
                builder.execution(exec)
            }
            CaptureEvent::ResultObserved { result, .. } => builder.result(result),
        };
        self.events_applied += 1;
        Ok(())
    }

    /// Freeze into an immutable [`Record`].
    ///
    /// One-way: a second freeze fails with [`CaptureError::Closed`].
    /// Partial data is allowed — interpreting absence is the consumers'
    /// concern, not the accumulator's.
    pub fn freeze(&mut self) -> CaptureResult<Record> {
        if self.frozen {
            return Err(CaptureError::Closed {
                scope: self.scope.clone(),
            });
        }
        self.frozen = true;
        let builder = std::mem::take(&mut self.builder);
        let record = builder.build();
        debug!(scope = %self.scope, id = %record.id, "froze accumulator");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use qprov_model::{Circuit, Counts, ExperimentResult, GateOp, Hardware};

    fn circuit(name: &str) -> Circuit {
        Circuit::from_ops(Some(name.into()), 2, 2, 2, &[GateOp::new("h", [0])])
    }

    fn result() -> ExperimentResult {
        ExperimentResult::from_counts(Counts::from_pairs([("00".to_string(), 10)]))
    }

    #[test]
    fn test_last_write_wins_for_hardware() {
        let mut acc = Accumulator::new();
        acc.apply(CaptureEvent::HardwareObserved(Hardware::simulator("sim_a", 8)))
            .unwrap();
        acc.apply(CaptureEvent::HardwareObserved(Hardware::simulator("sim_b", 8)))
            .unwrap();

        let record = acc.freeze().unwrap();
        assert_eq!(record.hardware.unwrap().backend, "sim_b");
    }

    #[test]
    fn test_circuits_append_in_order() {
        let mut acc = Accumulator::new();
        acc.apply(CaptureEvent::CircuitObserved(circuit("first"))).unwrap();
        acc.apply(CaptureEvent::CircuitObserved(circuit("second"))).unwrap();

        let record = acc.freeze().unwrap();
        assert_eq!(record.circuits.len(), 2);
        assert_eq!(record.circuits[0].name.as_deref(), Some("first"));
        assert_eq!(record.circuits[1].name.as_deref(), Some("second"));
    }

    #[test]
    fn test_apply_after_freeze_is_closed() {
        let mut acc = Accumulator::new();
        let record = acc.freeze().unwrap();
        let before = record.content_hash();

        let err = acc
            .apply(CaptureEvent::CircuitObserved(circuit("late")))
            .unwrap_err();
        assert!(matches!(err, CaptureError::Closed { .. }));

        // The frozen record is unaffected by the failed apply.
        assert_eq!(record.content_hash(), before);
    }

    #[test]
    fn test_double_freeze_is_closed() {
        let mut acc = Accumulator::new();
        acc.freeze().unwrap();
        assert!(matches!(acc.freeze(), Err(CaptureError::Closed { .. })));
    }

    #[test]
    fn test_execution_completion_merges() {
        let mut acc = Accumulator::new();
        let started = qprov_model::Execution::new(1024).with_job_id("job-1");
        acc.apply(CaptureEvent::ExecutionStarted(started)).unwrap();

        let done_at = Utc::now();
        acc.apply(CaptureEvent::ExecutionCompleted {
            job_id: None,
            completed_at: done_at,
        })
        .unwrap();

        let record = acc.freeze().unwrap();
        let exec = record.execution.unwrap();
        assert_eq!(exec.shots, 1024);
        assert_eq!(exec.job_id.as_deref(), Some("job-1"));
        assert_eq!(exec.completed_at, Some(done_at));
    }

    #[test]
    fn test_completion_without_start() {
        let mut acc = Accumulator::new();
        acc.apply(CaptureEvent::ExecutionCompleted {
            job_id: Some("orphan".into()),
            completed_at: Utc::now(),
        })
        .unwrap();

        let record = acc.freeze().unwrap();
        let exec = record.execution.unwrap();
        assert_eq!(exec.job_id.as_deref(), Some("orphan"));
        assert_eq!(exec.shots, 0);
    }

    #[test]
    fn test_partial_record_is_legal() {
        let mut acc = Accumulator::new();
        acc.apply(CaptureEvent::ResultObserved {
            result: result(),
            final_: false,
        })
        .unwrap();

        let record = acc.freeze().unwrap();
        assert!(record.environment.is_none());
        assert!(record.result.is_some());
    }

    #[test]
    fn test_named_scope_metadata() {
        let mut acc = Accumulator::named("bell-test", Metadata::named("Bell State Test"));
        assert_eq!(acc.scope(), "bell-test");
        let record = acc.freeze().unwrap();
        assert_eq!(record.metadata.name.as_deref(), Some("Bell State Test"));
    }
}
