//! Calibration drift analysis.
//!
//! Quantum hardware recalibrates daily, and its physical parameters move
//! between calibrations. Rerunning the same circuit on the same backend
//! after the calibration has shifted will produce different statistics.
//! This module compares the calibration a record captured against a newer
//! snapshot and answers: how far has the hardware moved, and is a faithful
//! reproduction still feasible?
//!
//! The aggregate drift score is the mean of the absolute percent deltas of
//! every comparable metric, each clamped to 100. The clamp keeps one blown
//! qubit from drowning the rest; the mean keeps the score monotonic in
//! each individual delta.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use qprov_model::{Calibration, Record};

/// Thresholds for drift analysis. Defaults match long-observed practice:
/// a 10% coherence shift or a 15% gate-error shift is where reproduction
/// attempts start diverging visibly.
#[derive(Debug, Clone, Copy)]
pub struct DriftConfig {
    /// Per-qubit significance threshold, percent.
    pub qubit_significance: f64,
    /// Per-gate significance threshold, percent.
    pub gate_significance: f64,
    /// Clamp applied to each absolute percent delta before averaging.
    pub delta_clamp: f64,
    /// Drift score below which feasibility is High.
    pub high_below: f64,
    /// Drift score below which feasibility is Medium.
    pub medium_below: f64,
    /// Drift score below which feasibility is Low.
    pub low_below: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            qubit_significance: 10.0,
            gate_significance: 15.0,
            delta_clamp: 100.0,
            high_below: 10.0,
            medium_below: 25.0,
            low_below: 50.0,
        }
    }
}

impl DriftConfig {
    fn feasibility(&self, drift_score: f64) -> Feasibility {
        if drift_score < self.high_below {
            Feasibility::High
        } else if drift_score < self.medium_below {
            Feasibility::Medium
        } else if drift_score < self.low_below {
            Feasibility::Low
        } else {
            Feasibility::VeryLow
        }
    }
}

/// How feasible a faithful reproduction is, given observed drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Feasibility {
    /// Hardware essentially unchanged.
    High,
    /// Minor drift; expect small statistical variation.
    Medium,
    /// Substantial drift; results will differ measurably.
    Low,
    /// Hardware has moved too far; treat a rerun as a new experiment.
    VeryLow,
}

impl std::fmt::Display for Feasibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Feasibility::High => "High",
            Feasibility::Medium => "Medium",
            Feasibility::Low => "Low",
            Feasibility::VeryLow => "Very Low",
        };
        f.write_str(s)
    }
}

/// Drift of one qubit between two calibrations.
#[derive(Debug, Clone, Serialize)]
pub struct QubitDrift {
    /// Physical qubit index.
    pub qubit_index: u32,
    /// T1 in the original calibration, microseconds.
    pub t1_original: Option<f64>,
    /// T1 in the current calibration, microseconds.
    pub t1_current: Option<f64>,
    /// Relative T1 change, percent.
    pub t1_change_percent: Option<f64>,
    /// T2 in the original calibration, microseconds.
    pub t2_original: Option<f64>,
    /// T2 in the current calibration, microseconds.
    pub t2_current: Option<f64>,
    /// Relative T2 change, percent.
    pub t2_change_percent: Option<f64>,
    /// Readout error in the original calibration.
    pub readout_original: Option<f64>,
    /// Readout error in the current calibration.
    pub readout_current: Option<f64>,
    /// Relative readout error change, percent.
    pub readout_change_percent: Option<f64>,
}

impl QubitDrift {
    fn deltas(&self) -> impl Iterator<Item = f64> + '_ {
        [
            self.t1_change_percent,
            self.t2_change_percent,
            self.readout_change_percent,
        ]
        .into_iter()
        .flatten()
    }

    /// Whether any metric moved beyond the given threshold (percent).
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.deltas().any(|d| d.abs() > threshold)
    }

    /// Whether any metric moved beyond the default 10% threshold.
    pub fn has_significant_drift(&self) -> bool {
        self.exceeds(DriftConfig::default().qubit_significance)
    }

    /// Short description of the significant movements, or `"Stable"`.
    pub fn summary(&self) -> String {
        let threshold = DriftConfig::default().qubit_significance;
        let mut parts = Vec::new();
        for (label, change) in [
            ("T1", self.t1_change_percent),
            ("T2", self.t2_change_percent),
            ("Readout", self.readout_change_percent),
        ] {
            if let Some(change) = change {
                if change.abs() > threshold {
                    let direction = if change > 0.0 { "+" } else { "-" };
                    parts.push(format!("{label} {direction}{:.0}%", change.abs()));
                }
            }
        }
        if parts.is_empty() {
            "Stable".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Drift of one gate's error rate between two calibrations.
#[derive(Debug, Clone, Serialize)]
pub struct GateDrift {
    /// Gate name.
    pub gate: String,
    /// Qubits the entry applies to.
    pub qubits: Vec<u32>,
    /// Error rate in the original calibration.
    pub error_original: Option<f64>,
    /// Error rate in the current calibration.
    pub error_current: Option<f64>,
    /// Relative error change, percent.
    pub error_change_percent: Option<f64>,
}

impl GateDrift {
    /// Whether the error moved beyond the default 15% threshold.
    pub fn has_significant_drift(&self) -> bool {
        self.error_change_percent
            .is_some_and(|d| d.abs() > DriftConfig::default().gate_significance)
    }
}

/// Complete drift analysis between a record's calibration and a newer one.
#[derive(Debug, Clone, Serialize)]
pub struct DriftReport {
    /// Timestamp of the record's calibration, if captured.
    pub original_calibration_time: Option<DateTime<Utc>>,
    /// Timestamp of the comparison calibration, if provided.
    pub current_calibration_time: Option<DateTime<Utc>>,
    /// Seconds between the two calibrations (or since the original, when
    /// no comparison snapshot was provided).
    pub elapsed_seconds: Option<i64>,
    /// Per-qubit drift for qubits present in both snapshots.
    pub qubit_drift: Vec<QubitDrift>,
    /// Per-gate drift for gates present in both snapshots.
    pub gate_drift: Vec<GateDrift>,
    /// Qubit indices present in only one snapshot; reported but excluded
    /// from the aggregate.
    pub unmatched_qubits: Vec<u32>,
    /// Aggregate drift, 0-100; higher means more drift.
    pub drift_score: f64,
    /// Reproduction feasibility derived from the drift score.
    pub feasibility: Feasibility,
    /// What to do about it.
    pub recommendations: Vec<String>,
}

impl DriftReport {
    /// Whether the overall drift is concerning (score above 20).
    pub fn has_significant_drift(&self) -> bool {
        self.drift_score > 20.0
    }

    /// One-line summary.
    pub fn summary(&self) -> String {
        let elapsed = match self.elapsed_seconds {
            Some(secs) if secs >= 86_400 => format!("{} days", secs / 86_400),
            Some(secs) => format!("{} hours", secs / 3600),
            None => "unknown time".to_string(),
        };
        format!(
            "Drift Score: {:.0}/100 | Elapsed: {elapsed} | Reproduction: {}",
            self.drift_score, self.feasibility
        )
    }
}

fn percent_change(original: Option<f64>, current: Option<f64>) -> Option<f64> {
    let original = original?;
    let current = current?;
    if original == 0.0 {
        return None;
    }
    Some((current - original) / original * 100.0)
}

/// Analyze calibration drift for a record, with default thresholds.
///
/// Returns `None` when the record has no hardware section at all. With
/// hardware but no captured calibration, or with no comparison snapshot,
/// the report degrades to what can be said from the available side.
pub fn analyze_drift(record: &Record, current: Option<&Calibration>) -> Option<DriftReport> {
    analyze_drift_with(record, current, &DriftConfig::default())
}

/// Analyze calibration drift with explicit thresholds.
pub fn analyze_drift_with(
    record: &Record,
    current: Option<&Calibration>,
    config: &DriftConfig,
) -> Option<DriftReport> {
    let hw = record.hardware.as_ref()?;

    let Some(original) = &hw.calibration else {
        // Nothing to compare against: maximum uncertainty.
        return Some(DriftReport {
            original_calibration_time: None,
            current_calibration_time: current.map(|c| c.timestamp),
            elapsed_seconds: None,
            qubit_drift: Vec::new(),
            gate_drift: Vec::new(),
            unmatched_qubits: Vec::new(),
            drift_score: 100.0,
            feasibility: Feasibility::VeryLow,
            recommendations: vec![
                "Original calibration not captured - cannot assess drift".into(),
                "Re-running this experiment will likely produce different results".into(),
                "Consider this a new experiment rather than a reproduction".into(),
            ],
        });
    };

    let Some(current) = current else {
        return Some(age_only_report(original));
    };

    let elapsed = current.timestamp - original.timestamp;

    let mut qubit_drift = Vec::new();
    let mut unmatched_qubits = Vec::new();
    for orig_q in &original.qubits {
        let Some(curr_q) = current.qubit(orig_q.index) else {
            unmatched_qubits.push(orig_q.index);
            continue;
        };
        qubit_drift.push(QubitDrift {
            qubit_index: orig_q.index,
            t1_original: orig_q.t1_us,
            t1_current: curr_q.t1_us,
            t1_change_percent: percent_change(orig_q.t1_us, curr_q.t1_us),
            t2_original: orig_q.t2_us,
            t2_current: curr_q.t2_us,
            t2_change_percent: percent_change(orig_q.t2_us, curr_q.t2_us),
            readout_original: orig_q.readout_error,
            readout_current: curr_q.readout_error,
            readout_change_percent: percent_change(orig_q.readout_error, curr_q.readout_error),
        });
    }
    for curr_q in &current.qubits {
        if original.qubit(curr_q.index).is_none() {
            unmatched_qubits.push(curr_q.index);
        }
    }
    unmatched_qubits.sort_unstable();

    let mut gate_drift = Vec::new();
    for orig_g in &original.gates {
        let Some(curr_error) = current.gate_error(&orig_g.gate, &orig_g.qubits) else {
            continue;
        };
        gate_drift.push(GateDrift {
            gate: orig_g.gate.clone(),
            qubits: orig_g.qubits.clone(),
            error_original: orig_g.error,
            error_current: Some(curr_error),
            error_change_percent: percent_change(orig_g.error, Some(curr_error)),
        });
    }

    // Aggregate: mean of clamped absolute deltas across all metrics.
    let deltas: Vec<f64> = qubit_drift
        .iter()
        .flat_map(|qd| qd.deltas().collect::<Vec<_>>())
        .chain(gate_drift.iter().filter_map(|gd| gd.error_change_percent))
        .map(|d| d.abs().min(config.delta_clamp))
        .collect();
    let drift_score = if deltas.is_empty() {
        50.0 // comparable snapshots but no comparable metric: unknown
    } else {
        deltas.iter().sum::<f64>() / deltas.len() as f64
    };

    let feasibility = config.feasibility(drift_score);
    let mut recommendations = Vec::new();

    let moved: Vec<String> = qubit_drift
        .iter()
        .filter(|qd| qd.exceeds(config.qubit_significance))
        .map(|qd| qd.qubit_index.to_string())
        .collect();
    if !moved.is_empty() {
        recommendations.push(format!("Significant drift on qubits: {}", moved.join(", ")));
    }

    let moved_gates: Vec<String> = gate_drift
        .iter()
        .filter(|gd| {
            gd.error_change_percent
                .is_some_and(|d| d.abs() > config.gate_significance)
        })
        .map(|gd| format!("{}{:?}", gd.gate, gd.qubits))
        .collect();
    if !moved_gates.is_empty() {
        recommendations.push(format!(
            "Gate errors changed significantly: {}",
            moved_gates.join(", ")
        ));
    }

    if elapsed.num_days() > 1 {
        recommendations.push(format!(
            "Calibration is {} days old - expect variation",
            elapsed.num_days()
        ));
    }
    if matches!(feasibility, Feasibility::Low | Feasibility::VeryLow) {
        recommendations
            .push("Consider re-running as a new experiment rather than reproduction".into());
    }

    Some(DriftReport {
        original_calibration_time: Some(original.timestamp),
        current_calibration_time: Some(current.timestamp),
        elapsed_seconds: Some(elapsed.num_seconds()),
        qubit_drift,
        gate_drift,
        unmatched_qubits,
        drift_score,
        feasibility,
        recommendations,
    })
}

/// Report shape when only the original calibration is known: the score is
/// driven purely by its age.
fn age_only_report(original: &Calibration) -> DriftReport {
    let age: Duration = Utc::now() - original.timestamp;
    let days_old = age.num_days();

    // Age stands in for measurement: the mapping is fixed, not thresholded
    // on the configured score bands.
    let (drift_score, feasibility) = if days_old > 7 {
        (80.0, Feasibility::VeryLow)
    } else if days_old > 1 {
        (50.0, Feasibility::Low)
    } else {
        (25.0, Feasibility::Medium)
    };

    DriftReport {
        original_calibration_time: Some(original.timestamp),
        current_calibration_time: None,
        elapsed_seconds: Some(age.num_seconds()),
        qubit_drift: Vec::new(),
        gate_drift: Vec::new(),
        unmatched_qubits: Vec::new(),
        drift_score,
        feasibility,
        recommendations: vec![
            format!("Calibration is {days_old} days old"),
            "Fetch current calibration from backend to compare".into(),
            "Hardware properties change daily - expect some variation".into(),
        ],
    }
}

/// Explain why two records might show different results.
pub fn explain_result_difference(a: &Record, b: &Record) -> Vec<String> {
    let mut explanations = Vec::new();

    if let (Some(ha), Some(hb)) = (&a.hardware, &b.hardware) {
        if ha.backend != hb.backend {
            explanations.push(format!(
                "Different backends: {} vs {}",
                ha.backend, hb.backend
            ));
        }
        if ha.qubits_used != hb.qubits_used {
            explanations.push(format!(
                "Different physical qubits: {:?} vs {:?}",
                ha.qubits_used, hb.qubits_used
            ));
        }
        if let (Some(ca), Some(cb)) = (&ha.calibration, &hb.calibration) {
            let apart = (cb.timestamp - ca.timestamp).num_seconds().abs();
            if apart > 86_400 {
                explanations.push(format!(
                    "Calibrations are {:.1} days apart - hardware drift likely",
                    apart as f64 / 86_400.0
                ));
            }
        }
    }

    if let (Some(ta), Some(tb)) = (&a.transpilation, &b.transpilation) {
        if ta.optimization_level != tb.optimization_level {
            explanations.push(format!(
                "Different optimization levels: {:?} vs {:?}",
                ta.optimization_level, tb.optimization_level
            ));
        }
        if ta.final_layout != tb.final_layout {
            explanations.push("Different qubit mappings after transpilation".into());
        }
    }

    if let (Some(ea), Some(eb)) = (&a.execution, &b.execution) {
        if ea.shots != eb.shots {
            explanations.push(format!(
                "Different shot counts: {} vs {}",
                ea.shots, eb.shots
            ));
        }
    }

    if let (Some(ca), Some(cb)) = (a.circuits.first(), b.circuits.first()) {
        if ca.hash != cb.hash {
            explanations.push("Circuit definitions differ - not the same experiment".into());
        }
    }

    if explanations.is_empty() {
        explanations.push("No obvious differences found - variation may be due to quantum noise".into());
    }
    explanations
}
