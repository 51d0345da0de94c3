//! Framework-agnostic circuit representation.
//!
//! A [`Circuit`] records the structural shape of a quantum program — qubit
//! and classical-bit counts, depth, and a gate-count breakdown — together
//! with a content hash that is a pure function of the gate sequence and the
//! register sizes. Two structurally identical circuits always hash
//! identically, regardless of where or how they were captured.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::hash;

/// One gate application in a circuit's instruction sequence.
///
/// Only the structural identity of the operation matters for hashing:
/// the gate name and the qubits it acts on, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateOp {
    /// Gate name (OpenQASM 3 naming convention).
    pub name: String,
    /// Qubit indices the gate acts on, in operand order.
    pub qubits: Vec<u32>,
}

impl GateOp {
    /// Create a new gate operation.
    pub fn new(name: impl Into<String>, qubits: impl IntoIterator<Item = u32>) -> Self {
        Self {
            name: name.into(),
            qubits: qubits.into_iter().collect(),
        }
    }
}

/// Gate count summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateCounts {
    /// Number of single-qubit gates.
    pub single_qubit: u64,
    /// Number of two-qubit gates.
    pub two_qubit: u64,
    /// Total number of gates.
    pub total: u64,
    /// Gate count by name, deterministically ordered.
    #[serde(default)]
    pub by_name: BTreeMap<String, u64>,
}

impl GateCounts {
    /// Tally counts from an instruction sequence.
    pub fn from_ops(ops: &[GateOp]) -> Self {
        let mut counts = Self::default();
        for op in ops {
            counts.total += 1;
            match op.qubits.len() {
                1 => counts.single_qubit += 1,
                2 => counts.two_qubit += 1,
                _ => {}
            }
            *counts.by_name.entry(op.name.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Quantum circuit representation (framework-agnostic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Circuit name, if the source framework provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Number of qubits.
    pub num_qubits: u32,
    /// Number of classical bits.
    #[serde(default)]
    pub num_clbits: u32,
    /// Circuit depth.
    pub depth: u32,
    /// Gate count breakdown.
    pub gates: GateCounts,
    /// Content hash of the gate sequence and register sizes.
    pub hash: String,
    /// OpenQASM representation, if captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qasm: Option<String>,
    /// Native JSON representation, if captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_repr: Option<Value>,
}

impl Circuit {
    /// Build a circuit from its instruction sequence, computing gate counts
    /// and the content hash.
    pub fn from_ops(
        name: Option<String>,
        num_qubits: u32,
        num_clbits: u32,
        depth: u32,
        ops: &[GateOp],
    ) -> Self {
        Self {
            name,
            num_qubits,
            num_clbits,
            depth,
            gates: GateCounts::from_ops(ops),
            hash: Self::ops_hash(num_qubits, num_clbits, ops),
            qasm: None,
            json_repr: None,
        }
    }

    /// Content hash over the gate sequence and register sizes.
    ///
    /// Pure: depends only on `(num_qubits, num_clbits, ops)`. Circuit name,
    /// depth, and stored representations do not participate.
    pub fn ops_hash(num_qubits: u32, num_clbits: u32, ops: &[GateOp]) -> String {
        let sequence: Vec<Value> = ops
            .iter()
            .map(|op| json!([op.name, op.qubits]))
            .collect();
        hash::digest(&json!({
            "num_qubits": num_qubits,
            "num_clbits": num_clbits,
            "ops": sequence,
        }))
    }

    /// Attach an OpenQASM representation.
    pub fn with_qasm(mut self, qasm: impl Into<String>) -> Self {
        self.qasm = Some(qasm.into());
        self
    }

    /// Attach a native JSON representation.
    pub fn with_json_repr(mut self, repr: Value) -> Self {
        self.json_repr = Some(repr);
        self
    }

    /// Human-readable one-line summary.
    pub fn summary(&self) -> String {
        let name = self.name.as_deref().unwrap_or("circuit");
        format!(
            "{} ({}q, depth {}, {} gates)",
            name, self.num_qubits, self.depth, self.gates.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bell_ops() -> Vec<GateOp> {
        vec![
            GateOp::new("h", [0]),
            GateOp::new("cx", [0, 1]),
            GateOp::new("measure", [0]),
            GateOp::new("measure", [1]),
        ]
    }

    #[test]
    fn test_gate_counts() {
        let counts = GateCounts::from_ops(&bell_ops());
        assert_eq!(counts.total, 4);
        assert_eq!(counts.single_qubit, 3);
        assert_eq!(counts.two_qubit, 1);
        assert_eq!(counts.by_name["measure"], 2);
    }

    #[test]
    fn test_hash_pure_over_structure() {
        let a = Circuit::from_ops(Some("bell".into()), 2, 2, 3, &bell_ops());
        let b = Circuit::from_ops(Some("other_name".into()), 2, 2, 7, &bell_ops());
        // Name and depth do not affect the hash.
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn test_hash_sensitive_to_ops() {
        let a = Circuit::from_ops(None, 2, 2, 3, &bell_ops());
        let mut ops = bell_ops();
        ops[1] = GateOp::new("cz", [0, 1]);
        let b = Circuit::from_ops(None, 2, 2, 3, &ops);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn test_hash_sensitive_to_register_sizes() {
        let a = Circuit::from_ops(None, 2, 2, 3, &bell_ops());
        let b = Circuit::from_ops(None, 3, 2, 3, &bell_ops());
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn test_summary() {
        let c = Circuit::from_ops(Some("bell".into()), 2, 2, 3, &bell_ops());
        assert_eq!(c.summary(), "bell (2q, depth 3, 4 gates)");
    }
}
