//! Record validation with actionable guidance.
//!
//! Validation answers a different question than scoring: not "how many
//! points", but "what exactly is wrong and how do I fix it". Every issue
//! carries a severity and a concrete fix string. Errors block
//! reproducibility, warnings reduce it, info entries are polish.

use serde::Serialize;

use qprov_model::Record;

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    /// Must fix: blocks reproducibility.
    Error,
    /// Should fix: reduces reproducibility.
    Warning,
    /// Nice to have: improves documentation.
    Info,
}

/// A single issue found in a record.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    /// Severity.
    pub level: IssueLevel,
    /// Affected category.
    pub category: &'static str,
    /// What is wrong.
    pub message: String,
    /// How to fix it.
    pub fix: String,
}

impl ValidationIssue {
    fn new(
        level: IssueLevel,
        category: &'static str,
        message: impl Into<String>,
        fix: impl Into<String>,
    ) -> Self {
        Self {
            level,
            category,
            message: message.into(),
            fix: fix.into(),
        }
    }
}

/// Complete validation outcome for one record.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// No errors (warnings and info allowed).
    pub is_valid: bool,
    /// No errors and no warnings.
    pub is_complete: bool,
    /// All issues found, in evaluation order.
    pub issues: Vec<ValidationIssue>,
    /// One-line verdict.
    pub summary: String,
}

impl ValidationReport {
    /// Number of error-level issues.
    pub fn error_count(&self) -> usize {
        self.count(IssueLevel::Error)
    }

    /// Number of warning-level issues.
    pub fn warning_count(&self) -> usize {
        self.count(IssueLevel::Warning)
    }

    /// Number of info-level issues.
    pub fn info_count(&self) -> usize {
        self.count(IssueLevel::Info)
    }

    fn count(&self, level: IssueLevel) -> usize {
        self.issues.iter().filter(|i| i.level == level).count()
    }

    fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let errors = issues.iter().filter(|i| i.level == IssueLevel::Error).count();
        let warnings = issues
            .iter()
            .filter(|i| i.level == IssueLevel::Warning)
            .count();
        let infos = issues.iter().filter(|i| i.level == IssueLevel::Info).count();

        let is_valid = errors == 0;
        let is_complete = errors == 0 && warnings == 0;

        let summary = if is_complete && infos == 0 {
            "Record is complete and ready for publication".to_string()
        } else if is_complete {
            format!("Record is valid with {infos} suggestion(s)")
        } else if is_valid {
            format!("Record is valid but has {warnings} warning(s)")
        } else {
            format!("Record has {errors} error(s) that must be fixed")
        };

        Self {
            is_valid,
            is_complete,
            issues,
            summary,
        }
    }
}

/// Validate a record for completeness and correctness.
pub fn validate_record(record: &Record) -> ValidationReport {
    ValidationReport::from_issues(collect_issues(record))
}

/// Stricter validation for records intended for publication.
///
/// On top of [`validate_record`], a missing circuit representation is a
/// warning rather than info, and experiment metadata must be filled in.
pub fn validate_for_publication(record: &Record) -> ValidationReport {
    let mut issues = collect_issues(record);

    if record.metadata.name.is_none() {
        issues.push(ValidationIssue::new(
            IssueLevel::Warning,
            "Metadata",
            "Experiment name not set",
            "Add a descriptive name for your experiment.",
        ));
    }
    if record.metadata.description.is_none() {
        issues.push(ValidationIssue::new(
            IssueLevel::Info,
            "Metadata",
            "No experiment description",
            "Add a description explaining the experiment purpose.",
        ));
    }

    if let Some(circuit) = record.circuits.first() {
        if circuit.qasm.is_none() && circuit.json_repr.is_none() {
            issues.retain(|i| !(i.category == "Circuit" && i.message.contains("QASM")));
            issues.push(ValidationIssue::new(
                IssueLevel::Warning,
                "Circuit",
                "No circuit representation for exact reproduction",
                "Store QASM or JSON representation for publication. \
                 This allows others to recreate your exact circuit.",
            ));
        }
    }

    let mut report = ValidationReport::from_issues(issues);
    report.summary = if report.is_complete {
        "Record is ready for publication".to_string()
    } else if report.is_valid {
        format!(
            "Record has {} warning(s) to address before publication",
            report.warning_count()
        )
    } else {
        format!(
            "Record has {} error(s) that block publication",
            report.error_count()
        )
    };
    report
}

fn collect_issues(record: &Record) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    check_environment(record, &mut issues);
    check_circuit(record, &mut issues);
    check_transpilation(record, &mut issues);
    check_hardware(record, &mut issues);
    check_execution(record, &mut issues);
    check_result(record, &mut issues);
    issues
}

fn check_environment(record: &Record, issues: &mut Vec<ValidationIssue>) {
    let Some(env) = &record.environment else {
        issues.push(ValidationIssue::new(
            IssueLevel::Error,
            "Environment",
            "No environment captured",
            "Initialize capture before running your experiment; the \
             environment snapshot is taken automatically.",
        ));
        return;
    };

    if env.interpreter.is_empty() {
        issues.push(ValidationIssue::new(
            IssueLevel::Error,
            "Environment",
            "Interpreter version not captured",
            "This should be automatic. Check that capture initialized correctly.",
        ));
    }
    if env.quantum_sdk().is_none() {
        issues.push(ValidationIssue::new(
            IssueLevel::Warning,
            "Environment",
            "No quantum SDK detected",
            "Install a quantum SDK (qiskit, cirq, pennylane) before running.",
        ));
    }
    if env.packages.is_empty() {
        issues.push(ValidationIssue::new(
            IssueLevel::Warning,
            "Environment",
            "No package versions captured",
            "Package capture should be automatic. Verify the installation.",
        ));
    } else if env.packages.len() < 3 {
        issues.push(ValidationIssue::new(
            IssueLevel::Info,
            "Environment",
            "Few packages captured - environment may be incomplete",
            "Consider capturing more dependencies for better reproducibility.",
        ));
    }
}

fn check_circuit(record: &Record, issues: &mut Vec<ValidationIssue>) {
    let Some(circuit) = record.circuits.first() else {
        issues.push(ValidationIssue::new(
            IssueLevel::Error,
            "Circuit",
            "No circuits captured",
            "Ensure your quantum circuit is defined before execution; \
             circuits are captured during transpilation or execution.",
        ));
        return;
    };

    if circuit.num_qubits == 0 {
        issues.push(ValidationIssue::new(
            IssueLevel::Error,
            "Circuit",
            "Circuit has 0 qubits",
            "Your circuit appears empty. Verify circuit construction.",
        ));
    }
    if circuit.hash.is_empty() {
        issues.push(ValidationIssue::new(
            IssueLevel::Warning,
            "Circuit",
            "Circuit hash not computed",
            "Circuit verification requires a hash. Check circuit capture.",
        ));
    }
    if circuit.qasm.is_none() && circuit.json_repr.is_none() {
        issues.push(ValidationIssue::new(
            IssueLevel::Info,
            "Circuit",
            "No QASM or JSON representation stored",
            "Consider storing QASM for exact circuit reproduction.",
        ));
    }
    if circuit.gates.total == 0 {
        issues.push(ValidationIssue::new(
            IssueLevel::Warning,
            "Circuit",
            "Circuit has no gates",
            "An empty circuit won't produce meaningful results.",
        ));
    }
}

fn check_transpilation(record: &Record, issues: &mut Vec<ValidationIssue>) {
    // Transpilation only matters for real hardware.
    if !record.hardware.as_ref().is_some_and(|h| !h.is_simulator) {
        return;
    }

    let Some(transp) = &record.transpilation else {
        issues.push(ValidationIssue::new(
            IssueLevel::Error,
            "Transpilation",
            "No transpilation captured for hardware execution",
            "Transpilation is critical for reproducibility. Transpile the \
             circuit for its target before execution.",
        ));
        return;
    };

    if transp.optimization_level.is_none() {
        issues.push(ValidationIssue::new(
            IssueLevel::Warning,
            "Transpilation",
            "Optimization level not recorded",
            "Specify the optimization level in the transpile call.",
        ));
    }
    if transp.final_layout.is_none() {
        issues.push(ValidationIssue::new(
            IssueLevel::Error,
            "Transpilation",
            "Final qubit layout not captured",
            "The physical qubit mapping is essential for reproduction. \
             Ensure transpilation output includes layout information.",
        ));
    }
}

fn check_hardware(record: &Record, issues: &mut Vec<ValidationIssue>) {
    let Some(hw) = &record.hardware else {
        issues.push(ValidationIssue::new(
            IssueLevel::Error,
            "Hardware",
            "No hardware information captured",
            "Ensure you execute on a backend; hardware information is \
             captured during job submission.",
        ));
        return;
    };

    if hw.backend.is_empty() {
        issues.push(ValidationIssue::new(
            IssueLevel::Error,
            "Hardware",
            "Backend name not captured",
            "Backend identification is required for reproduction.",
        ));
    }

    if hw.is_simulator {
        return;
    }

    if hw.qubits_used.is_empty() {
        issues.push(ValidationIssue::new(
            IssueLevel::Error,
            "Hardware",
            "Physical qubits not recorded",
            "For real hardware, knowing which physical qubits were used \
             is essential. Check transpilation output.",
        ));
    }

    let Some(cal) = &hw.calibration else {
        issues.push(ValidationIssue::new(
            IssueLevel::Error,
            "Hardware",
            "No calibration snapshot captured",
            "Calibration data is the most critical piece for hardware \
             reproducibility. Hardware properties change daily; without \
             this, reproduction is nearly impossible.",
        ));
        return;
    };

    if cal.qubits.is_empty() {
        issues.push(ValidationIssue::new(
            IssueLevel::Warning,
            "Hardware",
            "No qubit properties in calibration",
            "Capture T1, T2, and readout error for used qubits.",
        ));
    }
    if cal.gates.is_empty() {
        issues.push(ValidationIssue::new(
            IssueLevel::Warning,
            "Hardware",
            "No gate errors in calibration",
            "Capture gate error rates for used gates.",
        ));
    }
}

fn check_execution(record: &Record, issues: &mut Vec<ValidationIssue>) {
    let Some(exec) = &record.execution else {
        issues.push(ValidationIssue::new(
            IssueLevel::Warning,
            "Execution",
            "No execution parameters captured",
            "Execution parameters (shots, timing) help with reproduction.",
        ));
        return;
    };

    if exec.shots == 0 {
        issues.push(ValidationIssue::new(
            IssueLevel::Error,
            "Execution",
            "Shot count not recorded",
            "The number of shots directly affects result statistics. \
             Specify shots in your run call.",
        ));
    }
    if exec.job_id.is_none() {
        issues.push(ValidationIssue::new(
            IssueLevel::Info,
            "Execution",
            "Job ID not captured",
            "Job IDs enable traceability to cloud provider records.",
        ));
    }
}

fn check_result(record: &Record, issues: &mut Vec<ValidationIssue>) {
    let Some(result) = &record.result else {
        issues.push(ValidationIssue::new(
            IssueLevel::Warning,
            "Results",
            "No results captured",
            "Results allow verification of reproduction attempts. Wait \
             for the job result before exporting the record.",
        ));
        return;
    };

    if result.counts.raw.is_empty() {
        issues.push(ValidationIssue::new(
            IssueLevel::Warning,
            "Results",
            "No measurement counts captured",
            "Capture raw counts from the job result.",
        ));
    }
    if result.hash.is_empty() {
        issues.push(ValidationIssue::new(
            IssueLevel::Info,
            "Results",
            "Result hash not computed",
            "Result hashes enable tamper detection.",
        ));
    }
}
