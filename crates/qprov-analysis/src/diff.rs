//! Side-by-side record comparison.
//!
//! The comparison is a fixed, ordered list of properties so two diffs are
//! always row-compatible. Absent values render as the `"unknown"` sentinel
//! and compare like any other value; the diff itself never fails.

use serde::Serialize;

use qprov_model::Record;

/// Sentinel rendered for a property the record did not capture.
pub const UNKNOWN: &str = "unknown";

/// One compared property.
#[derive(Debug, Clone, Serialize)]
pub struct DiffRow {
    /// Property name.
    pub property: &'static str,
    /// Value from the first record.
    pub left: String,
    /// Value from the second record.
    pub right: String,
}

impl DiffRow {
    /// Whether both sides carry the same value.
    pub fn matches(&self) -> bool {
        self.left == self.right
    }
}

/// Result of comparing two records.
#[derive(Debug, Clone, Serialize)]
pub struct DiffReport {
    /// Identifier of the first record.
    pub left_id: String,
    /// Identifier of the second record.
    pub right_id: String,
    /// Compared properties, in fixed order.
    pub rows: Vec<DiffRow>,
}

impl DiffReport {
    /// Rows whose values differ.
    pub fn mismatches(&self) -> impl Iterator<Item = &DiffRow> {
        self.rows.iter().filter(|r| !r.matches())
    }

    /// Whether every compared property matches.
    pub fn is_identical(&self) -> bool {
        self.rows.iter().all(DiffRow::matches)
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), |v| v.to_string())
}

/// Compare two records property by property.
pub fn diff_records(a: &Record, b: &Record) -> DiffReport {
    let row = |property: &'static str, left: String, right: String| DiffRow {
        property,
        left,
        right,
    };

    let backend = |r: &Record| opt(r.hardware.as_ref().map(|h| h.backend.clone()));
    let provider = |r: &Record| opt(r.hardware.as_ref().map(|h| h.provider.clone()));
    let qubits_used = |r: &Record| {
        r.hardware
            .as_ref()
            .filter(|h| !h.qubits_used.is_empty())
            .map_or_else(|| UNKNOWN.to_string(), |h| format!("{:?}", h.qubits_used))
    };
    let opt_level = |r: &Record| opt(r.transpilation.as_ref().and_then(|t| t.optimization_level));
    let shots = |r: &Record| opt(r.execution.as_ref().map(|e| e.shots));
    let circuit_hash = |r: &Record| opt(r.circuits.first().map(|c| c.hash.clone()));
    let circuit_qubits = |r: &Record| opt(r.circuits.first().map(|c| c.num_qubits));
    let result_hash = |r: &Record| opt(r.result.as_ref().map(|res| res.hash.clone()));
    let sdk = |r: &Record| opt(r.environment.as_ref().and_then(|e| e.quantum_sdk()));

    DiffReport {
        left_id: a.id.clone(),
        right_id: b.id.clone(),
        rows: vec![
            row("Backend", backend(a), backend(b)),
            row("Provider", provider(a), provider(b)),
            row("Qubits Used", qubits_used(a), qubits_used(b)),
            row("Optimization Level", opt_level(a), opt_level(b)),
            row("Shots", shots(a), shots(b)),
            row("Circuit Hash", circuit_hash(a), circuit_hash(b)),
            row("Circuit Qubits", circuit_qubits(a), circuit_qubits(b)),
            row("Result Hash", result_hash(a), result_hash(b)),
            row("Environment SDK", sdk(a), sdk(b)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qprov_model::{Circuit, Environment, Execution, GateOp, Hardware, Package, Record};

    fn brisbane_record() -> Record {
        Record::builder()
            .environment(
                Environment::new("3.11.12", "linux-x86_64")
                    .with_package(Package::new("qiskit", "2.2.3")),
            )
            .circuit(Circuit::from_ops(
                Some("bell".into()),
                2,
                2,
                3,
                &[GateOp::new("h", [0]), GateOp::new("cx", [0, 1])],
            ))
            .hardware(Hardware::new("IBM Quantum", "ibm_brisbane", 127).with_qubits_used([12, 13]))
            .execution(Execution::new(4096))
            .build()
    }

    #[test]
    fn test_identical_records_match_everywhere() {
        let a = brisbane_record();
        let report = diff_records(&a, &a);
        assert!(report.is_identical());
        assert_eq!(report.rows.len(), 9);
    }

    #[test]
    fn test_backend_change_is_exactly_one_mismatch() {
        let a = brisbane_record();
        let mut b = brisbane_record();
        b.hardware.as_mut().unwrap().backend = "ibm_kyoto".into();

        let report = diff_records(&a, &b);
        let mismatches: Vec<_> = report.mismatches().collect();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].property, "Backend");
        assert_eq!(mismatches[0].left, "ibm_brisbane");
        assert_eq!(mismatches[0].right, "ibm_kyoto");
    }

    #[test]
    fn test_fixed_row_order() {
        let report = diff_records(&brisbane_record(), &brisbane_record());
        let properties: Vec<&str> = report.rows.iter().map(|r| r.property).collect();
        assert_eq!(
            properties,
            vec![
                "Backend",
                "Provider",
                "Qubits Used",
                "Optimization Level",
                "Shots",
                "Circuit Hash",
                "Circuit Qubits",
                "Result Hash",
                "Environment SDK",
            ]
        );
    }

    #[test]
    fn test_absent_values_render_unknown() {
        let empty = Record::builder().build();
        let report = diff_records(&empty, &brisbane_record());

        let backend = &report.rows[0];
        assert_eq!(backend.left, UNKNOWN);
        assert_eq!(backend.right, "ibm_brisbane");

        // unknown vs unknown still counts as a match.
        let result_hash = &report.rows[7];
        assert_eq!(result_hash.left, UNKNOWN);
        assert_eq!(result_hash.right, UNKNOWN);
        assert!(result_hash.matches());
    }
}
