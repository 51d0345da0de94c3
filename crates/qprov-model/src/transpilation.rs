//! Transpilation record: how a circuit was transformed for its target.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;

/// Logical to physical qubit mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitMapping {
    /// Logical qubit index → physical qubit index.
    pub logical_to_physical: BTreeMap<u32, u32>,
}

impl QubitMapping {
    /// Build a mapping from (logical, physical) pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self {
            logical_to_physical: pairs.into_iter().collect(),
        }
    }

    /// Sorted list of physical qubits used.
    pub fn physical_qubits(&self) -> Vec<u32> {
        let mut qubits: Vec<u32> = self.logical_to_physical.values().copied().collect();
        qubits.sort_unstable();
        qubits
    }
}

/// Complete transpilation record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transpilation {
    /// Optimization level requested (0-3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization_level: Option<u8>,
    /// Target basis gate set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis_gates: Option<Vec<String>>,
    /// Coupling map edges of the target device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupling_map: Option<Vec<(u32, u32)>>,
    /// Transpiler seed, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Layout method name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_method: Option<String>,
    /// Routing method name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_method: Option<String>,
    /// Initial logical→physical layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_layout: Option<QubitMapping>,
    /// Final logical→physical layout after routing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_layout: Option<QubitMapping>,
    /// Circuit before transpilation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_circuit: Option<Circuit>,
    /// Circuit after transpilation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_circuit: Option<Circuit>,
}

impl Transpilation {
    /// Ratio of output depth to input depth.
    ///
    /// Not computed when either circuit is missing or the input depth is
    /// zero — a zero-depth input makes the ratio undefined.
    pub fn depth_ratio(&self) -> Option<f64> {
        let input = self.input_circuit.as_ref()?;
        let output = self.output_circuit.as_ref()?;
        if input.depth == 0 {
            return None;
        }
        Some(f64::from(output.depth) / f64::from(input.depth))
    }
}
