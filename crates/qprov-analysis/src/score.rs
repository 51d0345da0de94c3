//! Reproducibility scoring.
//!
//! A record earns points for what it captured, across six categories that
//! sum to 100:
//!
//! | Category      | Points | Covers                          |
//! |---------------|--------|---------------------------------|
//! | Environment   | 20     | interpreter, SDK, packages      |
//! | Circuit       | 20     | structure, counts, hash, source |
//! | Transpilation | 15     | settings and layout             |
//! | Hardware      | 25     | backend and calibration         |
//! | Execution     | 10     | shot count                      |
//! | Results       | 10     | counts, hash, metadata          |
//!
//! Scoring is total: missing data earns zero points and a recommendation,
//! never an error. A simulator record without calibration tops out at
//! 13/25 on hardware, which is expected — there is no calibration to
//! capture, so no recommendation nags about it either.

use serde::Serialize;

use qprov_model::Record;

/// Completion state of one score component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    /// Nearly all points earned.
    Complete,
    /// Some points earned.
    Partial,
    /// Nothing captured for this category.
    Missing,
}

/// One scored category.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreComponent {
    /// Category name.
    pub name: &'static str,
    /// Broader grouping for display.
    pub category: &'static str,
    /// Points available.
    pub max_points: u32,
    /// Points earned.
    pub earned_points: u32,
    /// Completion state.
    pub status: ComponentStatus,
}

impl ScoreComponent {
    fn new(name: &'static str, category: &'static str, max_points: u32) -> Self {
        Self {
            name,
            category,
            max_points,
            earned_points: 0,
            status: ComponentStatus::Missing,
        }
    }

    /// Mark the completion state: `complete` at or above the given floor,
    /// `partial` for anything above zero.
    fn finish(mut self, complete_at: u32) -> Self {
        self.status = if self.earned_points >= complete_at {
            ComponentStatus::Complete
        } else if self.earned_points > 0 {
            ComponentStatus::Partial
        } else {
            ComponentStatus::Missing
        };
        self
    }

    /// Earned points as a percentage of the maximum.
    pub fn percentage(&self) -> f64 {
        if self.max_points == 0 {
            return 100.0;
        }
        f64::from(self.earned_points) / f64::from(self.max_points) * 100.0
    }
}

/// Letter-style grade bands over the total percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    /// 90-100: fully reproducible.
    Excellent,
    /// 70-89: minor details missing.
    Good,
    /// 50-69: some important information missing.
    Fair,
    /// 25-49: major gaps.
    Poor,
    /// 0-24: cannot reproduce.
    Critical,
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Grade::Excellent => "Excellent",
            Grade::Good => "Good",
            Grade::Fair => "Fair",
            Grade::Poor => "Poor",
            Grade::Critical => "Critical",
        };
        f.write_str(s)
    }
}

/// Grade band boundaries, as percentages.
#[derive(Debug, Clone, Copy)]
pub struct ScoreConfig {
    /// Minimum percentage for [`Grade::Excellent`].
    pub excellent: f64,
    /// Minimum percentage for [`Grade::Good`]; also the reproducibility bar.
    pub good: f64,
    /// Minimum percentage for [`Grade::Fair`].
    pub fair: f64,
    /// Minimum percentage for [`Grade::Poor`].
    pub poor: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            excellent: 90.0,
            good: 70.0,
            fair: 50.0,
            poor: 25.0,
        }
    }
}

impl ScoreConfig {
    fn grade(&self, percentage: f64) -> Grade {
        if percentage >= self.excellent {
            Grade::Excellent
        } else if percentage >= self.good {
            Grade::Good
        } else if percentage >= self.fair {
            Grade::Fair
        } else if percentage >= self.poor {
            Grade::Poor
        } else {
            Grade::Critical
        }
    }
}

/// Complete reproducibility score for one record.
#[derive(Debug, Clone, Serialize)]
pub struct ReproducibilityScore {
    /// Points earned across all components.
    pub total_score: u32,
    /// Points available across all components.
    pub max_score: u32,
    /// Grade band for the total.
    pub grade: Grade,
    /// Per-category breakdown, in fixed order.
    pub components: Vec<ScoreComponent>,
    /// What to capture next, one entry per missed sub-rubric.
    pub recommendations: Vec<String>,
}

impl ReproducibilityScore {
    /// Total as a percentage.
    pub fn percentage(&self) -> f64 {
        f64::from(self.total_score) / f64::from(self.max_score) * 100.0
    }

    /// Whether the record clears the reproducibility bar (Good or better).
    pub fn is_reproducible(&self) -> bool {
        self.percentage() >= 70.0
    }

    /// One-line summary, e.g. `"78/100 (Good)"`.
    pub fn summary(&self) -> String {
        format!("{}/{} ({})", self.total_score, self.max_score, self.grade)
    }
}

/// Score a record with the default grade bands.
pub fn compute_score(record: &Record) -> ReproducibilityScore {
    compute_score_with(record, &ScoreConfig::default())
}

/// Score a record with explicit grade bands.
pub fn compute_score_with(record: &Record, config: &ScoreConfig) -> ReproducibilityScore {
    let mut components = Vec::with_capacity(6);
    let mut recommendations = Vec::new();

    components.push(score_environment(record, &mut recommendations));
    components.push(score_circuit(record, &mut recommendations));
    components.push(score_transpilation(record, &mut recommendations));
    components.push(score_hardware(record, &mut recommendations));
    components.push(score_execution(record, &mut recommendations));
    components.push(score_results(record, &mut recommendations));

    let total_score: u32 = components.iter().map(|c| c.earned_points).sum();
    let max_score: u32 = components.iter().map(|c| c.max_points).sum();
    let percentage = f64::from(total_score) / f64::from(max_score) * 100.0;

    ReproducibilityScore {
        total_score,
        max_score,
        grade: config.grade(percentage),
        components,
        recommendations,
    }
}

fn score_environment(record: &Record, recs: &mut Vec<String>) -> ScoreComponent {
    let mut c = ScoreComponent::new("Environment", "Software", 20);

    let Some(env) = &record.environment else {
        recs.push("No environment captured - cannot reproduce software setup".into());
        return c;
    };

    if !env.interpreter.is_empty() {
        c.earned_points += 5;
    }

    if env.quantum_sdk().is_some() {
        c.earned_points += 8;
    } else {
        recs.push("Install a quantum SDK (qiskit, cirq, pennylane) for better tracking".into());
    }

    // One pinned package version is already a reproducible software
    // picture; more packages do not earn more points.
    if !env.packages.is_empty() {
        c.earned_points += 7;
    } else {
        recs.push("Package versions not captured - reproducibility limited".into());
    }

    c.finish(18)
}

fn score_circuit(record: &Record, recs: &mut Vec<String>) -> ScoreComponent {
    let mut c = ScoreComponent::new("Circuit", "Quantum Program", 20);

    let Some(circuit) = record.circuits.first() else {
        recs.push("No circuit captured - the core of your experiment is missing".into());
        return c;
    };

    if circuit.num_qubits > 0 && circuit.depth > 0 {
        c.earned_points += 8;
    }
    if circuit.gates.total > 0 {
        c.earned_points += 5;
    }
    if !circuit.hash.is_empty() {
        c.earned_points += 4;
    }
    if circuit.qasm.is_some() || circuit.json_repr.is_some() {
        c.earned_points += 3;
    } else {
        recs.push("Consider storing QASM for exact circuit reproduction".into());
    }

    c.finish(18)
}

fn score_transpilation(record: &Record, recs: &mut Vec<String>) -> ScoreComponent {
    let mut c = ScoreComponent::new("Transpilation", "Circuit Compilation", 15);

    let Some(t) = &record.transpilation else {
        // Simulators legitimately skip transpilation; only real hardware
        // warrants a nudge.
        if record.hardware.as_ref().is_some_and(|h| !h.is_simulator) {
            recs.push("Transpilation not captured - critical for hardware experiments".into());
        }
        return c;
    };

    if t.optimization_level.is_some() {
        c.earned_points += 4;
    }
    if t.layout_method.is_some() || t.routing_method.is_some() {
        c.earned_points += 4;
    }
    if t.final_layout.is_some() {
        c.earned_points += 4;
    } else {
        recs.push(
            "Qubit mapping not captured - results depend on physical qubit assignment".into(),
        );
    }
    if t.input_circuit.is_some() && t.output_circuit.is_some() {
        c.earned_points += 3;
    }

    c.finish(13)
}

fn score_hardware(record: &Record, recs: &mut Vec<String>) -> ScoreComponent {
    let mut c = ScoreComponent::new("Hardware", "Backend & Calibration", 25);

    let Some(hw) = &record.hardware else {
        recs.push("No hardware information - cannot determine where experiment ran".into());
        return c;
    };

    if !hw.backend.is_empty() {
        c.earned_points += 6;
    }
    if !hw.provider.is_empty() {
        c.earned_points += 3;
    }

    if !hw.qubits_used.is_empty() {
        c.earned_points += 4;
    } else if !hw.is_simulator {
        recs.push("Physical qubits not recorded - critical for reproduction".into());
    }

    // Calibration is worth 12 points: the hardware state changes daily, so
    // a snapshot is the single most valuable thing a record can carry.
    if let Some(cal) = &hw.calibration {
        c.earned_points += 3; // timestamp is mandatory on the type
        if !cal.qubits.is_empty() {
            c.earned_points += 5;
        }
        if !cal.gates.is_empty() {
            c.earned_points += 4;
        }
    } else if !hw.is_simulator {
        recs.push(
            "No calibration snapshot - hardware state changes daily, \
             reproduction without this is nearly impossible"
                .into(),
        );
    }

    c.finish(22)
}

fn score_execution(record: &Record, recs: &mut Vec<String>) -> ScoreComponent {
    let mut c = ScoreComponent::new("Execution", "Run Parameters", 10);

    let Some(exec) = &record.execution else {
        recs.push("Execution parameters not captured".into());
        return c;
    };

    // The shot count alone pins down the statistical setup, so it carries
    // the whole category. Job id and timing are fallback credit for the
    // odd record where the shot count itself went missing.
    if exec.shots > 0 {
        c.earned_points = 10;
    } else {
        if exec.job_id.is_some() {
            c.earned_points += 2;
        }
        if exec.submitted_at.is_some() || exec.completed_at.is_some() {
            c.earned_points += 3;
        }
        recs.push("Shot count not captured - statistical comparison impossible".into());
    }

    c.finish(8)
}

fn score_results(record: &Record, recs: &mut Vec<String>) -> ScoreComponent {
    let mut c = ScoreComponent::new("Results", "Output Verification", 10);

    let Some(result) = &record.result else {
        recs.push("No results captured - cannot verify reproduction".into());
        return c;
    };

    if !result.counts.raw.is_empty() {
        c.earned_points += 5;
    }
    if !result.hash.is_empty() {
        c.earned_points += 3;
    }
    if !result.metadata.is_empty() {
        c.earned_points += 2;
    }

    c.finish(8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use qprov_model::{
        Calibration, Circuit, Counts, Environment, Execution, ExperimentResult, GateOp,
        GateProperties, Hardware, Package, QubitMapping, QubitProperties, Record, Transpilation,
    };
    use serde_json::json;

    fn full_environment() -> Environment {
        Environment::new("3.11.12", "linux-x86_64")
            .with_package(Package::new("qiskit", "2.2.3"))
            .with_package(Package::new("numpy", "1.26.0"))
            .with_package(Package::new("scipy", "1.13.1"))
    }

    fn bell_circuit() -> Circuit {
        Circuit::from_ops(
            Some("bell".into()),
            2,
            2,
            3,
            &[GateOp::new("h", [0]), GateOp::new("cx", [0, 1])],
        )
        .with_qasm("OPENQASM 3.0;")
    }

    fn full_transpilation() -> Transpilation {
        Transpilation {
            optimization_level: Some(3),
            layout_method: Some("sabre".into()),
            routing_method: Some("sabre".into()),
            final_layout: Some(QubitMapping::from_pairs([(0, 12), (1, 13)])),
            input_circuit: Some(bell_circuit()),
            output_circuit: Some(bell_circuit()),
            ..Default::default()
        }
    }

    fn full_hardware() -> Hardware {
        Hardware::new("IBM Quantum", "ibm_brisbane", 127)
            .with_qubits_used([12, 13])
            .with_calibration(
                Calibration::new(Utc::now())
                    .with_qubit(QubitProperties::new(12).with_t1(145.2))
                    .with_gate(GateProperties::new("cx", [12, 13]).with_error(0.0089)),
            )
    }

    fn full_record() -> Record {
        Record::builder()
            .environment(full_environment())
            .circuit(bell_circuit())
            .transpilation(full_transpilation())
            .hardware(full_hardware())
            .execution(
                Execution::new(4096)
                    .with_job_id("job-abc")
                    .with_submitted_at(Utc::now()),
            )
            .result(
                ExperimentResult::from_counts(Counts::from_pairs([("00".to_string(), 4096)]))
                    .with_metadata("backend_version", json!("1.2.3")),
            )
            .build()
    }

    #[test]
    fn test_full_record_is_excellent() {
        let score = compute_score(&full_record());
        assert_eq!(score.total_score, 100);
        assert_eq!(score.grade, Grade::Excellent);
        assert!(score.is_reproducible());
        assert!(score.recommendations.is_empty());
        assert_eq!(score.summary(), "100/100 (Excellent)");
    }

    #[test]
    fn test_empty_record_is_critical() {
        let score = compute_score(&Record::builder().build());
        assert_eq!(score.total_score, 0);
        assert_eq!(score.grade, Grade::Critical);
        assert!(!score.is_reproducible());
        // One recommendation per missing category.
        assert_eq!(score.recommendations.len(), 5);
    }

    #[test]
    fn test_partial_record_scores_fair() {
        // Environment 20 + hardware without calibration 13 + execution 10
        // + results without metadata 8 = 51, inside the Fair band.
        let record = Record::builder()
            .environment(full_environment())
            .hardware(Hardware::new("IBM Quantum", "ibm_brisbane", 127).with_qubits_used([0, 1]))
            .execution(
                Execution::new(1024)
                    .with_job_id("job-1")
                    .with_completed_at(Utc::now()),
            )
            .result(ExperimentResult::from_counts(Counts::from_pairs([(
                "0".to_string(),
                1024,
            )])))
            .build();

        let score = compute_score(&record);
        assert_eq!(score.total_score, 51);
        assert_eq!(score.grade, Grade::Fair);
    }

    #[test]
    fn test_minimal_simulator_run_earns_full_environment_and_execution() {
        // Interpreter plus a single pinned SDK package is a complete
        // software picture, and a shot count alone is a complete run
        // description. Only the missing calibration-free hardware detail
        // keeps the total out of the Good band.
        let record = Record::builder()
            .environment(
                Environment::new("3.11.12", "linux-x86_64")
                    .with_package(Package::new("qiskit", "2.2.3")),
            )
            .circuit(Circuit::from_ops(
                Some("bell".into()),
                2,
                2,
                3,
                &[
                    GateOp::new("h", [0]),
                    GateOp::new("cx", [0, 1]),
                    GateOp::new("x", [1]),
                    GateOp::new("measure", [0]),
                    GateOp::new("measure", [1]),
                ],
            ))
            .hardware(Hardware::simulator("aer_simulator", 32))
            .execution(Execution::new(4096))
            .result(ExperimentResult::from_counts(Counts::from_pairs([
                ("00".to_string(), 2012),
                ("11".to_string(), 1993),
                ("01".to_string(), 43),
                ("10".to_string(), 48),
            ])))
            .build();

        let score = compute_score(&record);
        let environment = &score.components[0];
        let hardware = &score.components[3];
        let execution = &score.components[4];

        assert_eq!(environment.earned_points, 20);
        assert_eq!(execution.earned_points, 10);
        assert!(hardware.earned_points < 25);
        assert!(score.total_score >= 50 && score.total_score < 90);
        assert_eq!(score.grade, Grade::Fair);
    }

    #[test]
    fn test_adding_calibration_is_monotonic() {
        let without = Record::builder()
            .hardware(Hardware::new("IBM Quantum", "ibm_brisbane", 127).with_qubits_used([0]))
            .build();
        let with = Record::builder()
            .hardware(full_hardware())
            .build();

        let a = compute_score(&without);
        let b = compute_score(&with);
        assert!(b.total_score > a.total_score);
        assert_eq!(b.total_score - a.total_score, 12);
    }

    #[test]
    fn test_simulator_without_calibration_gets_no_nag() {
        let record = Record::builder()
            .hardware(Hardware::simulator("aer_simulator", 32))
            .build();

        let score = compute_score(&record);
        let hardware = &score.components[3];
        assert_eq!(hardware.name, "Hardware");
        // backend 6 + provider 3; no qubits_used on a bare simulator run.
        assert_eq!(hardware.earned_points, 9);
        assert!(!score
            .recommendations
            .iter()
            .any(|r| r.contains("calibration") || r.contains("Physical qubits")));
    }

    #[test]
    fn test_hardware_without_calibration_gets_recommendation() {
        let record = Record::builder()
            .hardware(Hardware::new("IBM Quantum", "ibm_brisbane", 127))
            .build();

        let score = compute_score(&record);
        assert!(score.recommendations.iter().any(|r| r.contains("calibration")));
        assert!(score
            .recommendations
            .iter()
            .any(|r| r.contains("Physical qubits")));
    }

    #[test]
    fn test_component_percentage() {
        let score = compute_score(&full_record());
        for c in &score.components {
            assert_eq!(c.percentage(), 100.0);
            assert_eq!(c.status, ComponentStatus::Complete);
        }
    }

    #[test]
    fn test_grade_bands() {
        let config = ScoreConfig::default();
        assert_eq!(config.grade(95.0), Grade::Excellent);
        assert_eq!(config.grade(90.0), Grade::Excellent);
        assert_eq!(config.grade(89.9), Grade::Good);
        assert_eq!(config.grade(70.0), Grade::Good);
        assert_eq!(config.grade(50.0), Grade::Fair);
        assert_eq!(config.grade(25.0), Grade::Poor);
        assert_eq!(config.grade(24.9), Grade::Critical);
    }
}
