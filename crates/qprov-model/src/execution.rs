//! Execution parameters and timing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Error mitigation configuration applied to a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMitigation {
    /// Mitigation method name (e.g. "zne", "twirling").
    pub method: String,
    /// Method-specific parameters.
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
}

/// Execution parameters and timing for one job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    /// Provider job identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    /// Number of shots.
    pub shots: u32,
    /// Sampler seed, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Error mitigation configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_mitigation: Option<ErrorMitigation>,
    /// Time the job was submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Time the job started running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Time the job finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Execution {
    /// Create execution parameters for a shot count.
    pub fn new(shots: u32) -> Self {
        Self {
            shots,
            ..Default::default()
        }
    }

    /// Set the provider job id.
    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    /// Mark the submission time.
    pub fn with_submitted_at(mut self, at: DateTime<Utc>) -> Self {
        self.submitted_at = Some(at);
        self
    }

    /// Mark the completion time.
    pub fn with_completed_at(mut self, at: DateTime<Utc>) -> Self {
        self.completed_at = Some(at);
        self
    }

    /// Seconds spent waiting in queue, when both timestamps are known.
    pub fn queue_time_seconds(&self) -> Option<f64> {
        let submitted = self.submitted_at?;
        let started = self.started_at?;
        Some((started - submitted).num_milliseconds() as f64 / 1000.0)
    }

    /// Seconds of actual execution, when both timestamps are known.
    pub fn execution_time_seconds(&self) -> Option<f64> {
        let started = self.started_at?;
        let completed = self.completed_at?;
        Some((completed - started).num_milliseconds() as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timing_derivations() {
        let t0 = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let exec = Execution {
            shots: 1024,
            submitted_at: Some(t0),
            started_at: Some(t0 + chrono::Duration::seconds(30)),
            completed_at: Some(t0 + chrono::Duration::seconds(42)),
            ..Default::default()
        };

        assert_eq!(exec.queue_time_seconds(), Some(30.0));
        assert_eq!(exec.execution_time_seconds(), Some(12.0));
    }

    #[test]
    fn test_timing_missing() {
        let exec = Execution::new(4096);
        assert_eq!(exec.queue_time_seconds(), None);
        assert_eq!(exec.execution_time_seconds(), None);
    }
}
