//! Hardware backend description and calibration snapshots.
//!
//! A [`Calibration`] is a timestamped set of per-qubit and per-gate physical
//! measurements. Qubit entries are unique by index and gate entries are
//! unique by `(gate name, qubit tuple)`; inserting a duplicate key replaces
//! the previous entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Properties of a single physical qubit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QubitProperties {
    /// Physical qubit index.
    pub index: u32,
    /// T1 relaxation time in microseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t1_us: Option<f64>,
    /// T2 coherence time in microseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t2_us: Option<f64>,
    /// Readout error probability (0-1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readout_error: Option<f64>,
    /// Qubit frequency in GHz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_ghz: Option<f64>,
}

impl QubitProperties {
    /// Create an empty property set for a qubit index.
    pub fn new(index: u32) -> Self {
        Self {
            index,
            t1_us: None,
            t2_us: None,
            readout_error: None,
            frequency_ghz: None,
        }
    }

    /// Set T1 in microseconds.
    pub fn with_t1(mut self, t1_us: f64) -> Self {
        self.t1_us = Some(t1_us);
        self
    }

    /// Set T2 in microseconds.
    pub fn with_t2(mut self, t2_us: f64) -> Self {
        self.t2_us = Some(t2_us);
        self
    }

    /// Set the readout error probability.
    pub fn with_readout_error(mut self, error: f64) -> Self {
        self.readout_error = Some(error);
        self
    }

    /// Set the qubit frequency in GHz.
    pub fn with_frequency(mut self, frequency_ghz: f64) -> Self {
        self.frequency_ghz = Some(frequency_ghz);
        self
    }
}

/// Properties of a gate on specific qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateProperties {
    /// Gate name.
    pub gate: String,
    /// Qubits the entry applies to, in operand order.
    pub qubits: Vec<u32>,
    /// Gate error probability (0-1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<f64>,
    /// Gate duration in nanoseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ns: Option<f64>,
}

impl GateProperties {
    /// Create a gate property entry.
    pub fn new(gate: impl Into<String>, qubits: impl IntoIterator<Item = u32>) -> Self {
        Self {
            gate: gate.into(),
            qubits: qubits.into_iter().collect(),
            error: None,
            duration_ns: None,
        }
    }

    /// Set the error probability.
    pub fn with_error(mut self, error: f64) -> Self {
        self.error = Some(error);
        self
    }

    /// Set the duration in nanoseconds.
    pub fn with_duration(mut self, duration_ns: f64) -> Self {
        self.duration_ns = Some(duration_ns);
        self
    }
}

/// Hardware calibration snapshot at time of execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// When the backend reported these values.
    pub timestamp: DateTime<Utc>,
    /// Per-qubit properties, unique by index.
    #[serde(default)]
    pub qubits: Vec<QubitProperties>,
    /// Per-gate properties, unique by (gate, qubit tuple).
    #[serde(default)]
    pub gates: Vec<GateProperties>,
}

impl Calibration {
    /// Create an empty snapshot with the given timestamp.
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            qubits: Vec::new(),
            gates: Vec::new(),
        }
    }

    /// Add qubit properties, replacing any existing entry for the same index.
    pub fn with_qubit(mut self, props: QubitProperties) -> Self {
        if let Some(existing) = self.qubits.iter_mut().find(|q| q.index == props.index) {
            *existing = props;
        } else {
            self.qubits.push(props);
        }
        self
    }

    /// Add gate properties, replacing any existing entry for the same
    /// (gate, qubit tuple) key.
    pub fn with_gate(mut self, props: GateProperties) -> Self {
        if let Some(existing) = self
            .gates
            .iter_mut()
            .find(|g| g.gate == props.gate && g.qubits == props.qubits)
        {
            *existing = props;
        } else {
            self.gates.push(props);
        }
        self
    }

    /// Get properties for a specific qubit.
    pub fn qubit(&self, index: u32) -> Option<&QubitProperties> {
        self.qubits.iter().find(|q| q.index == index)
    }

    /// Get the error rate for a specific gate on specific qubits.
    pub fn gate_error(&self, gate: &str, qubits: &[u32]) -> Option<f64> {
        self.gates
            .iter()
            .find(|g| g.gate == gate && g.qubits == qubits)
            .and_then(|g| g.error)
    }
}

/// Hardware backend information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hardware {
    /// Provider name (e.g. "IBM Quantum", "AWS").
    pub provider: String,
    /// Backend name.
    pub backend: String,
    /// Total number of qubits on the device.
    pub num_qubits: u32,
    /// Physical qubit indices used by the experiment.
    #[serde(default)]
    pub qubits_used: Vec<u32>,
    /// Whether this is a simulator rather than physical hardware.
    /// MUST come from authoritative backend data, not string heuristics.
    #[serde(default)]
    pub is_simulator: bool,
    /// Calibration snapshot at time of execution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration: Option<Calibration>,
}

impl Hardware {
    /// Create a hardware description.
    pub fn new(provider: impl Into<String>, backend: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            provider: provider.into(),
            backend: backend.into(),
            num_qubits,
            qubits_used: Vec::new(),
            is_simulator: false,
            calibration: None,
        }
    }

    /// Create a simulator description.
    pub fn simulator(backend: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            provider: "local".into(),
            backend: backend.into(),
            num_qubits,
            qubits_used: Vec::new(),
            is_simulator: true,
            calibration: None,
        }
    }

    /// Set the physical qubits used.
    pub fn with_qubits_used(mut self, qubits: impl IntoIterator<Item = u32>) -> Self {
        self.qubits_used = qubits.into_iter().collect();
        self
    }

    /// Attach a calibration snapshot.
    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = Some(calibration);
        self
    }

    /// Human-readable summary.
    pub fn summary(&self) -> String {
        if self.is_simulator {
            format!("{} (simulator)", self.backend)
        } else {
            self.backend.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibration_qubit_unique_by_index() {
        let cal = Calibration::new(Utc::now())
            .with_qubit(QubitProperties::new(3).with_t1(100.0))
            .with_qubit(QubitProperties::new(3).with_t1(120.0));

        assert_eq!(cal.qubits.len(), 1);
        assert_eq!(cal.qubit(3).unwrap().t1_us, Some(120.0));
    }

    #[test]
    fn test_calibration_gate_unique_by_key() {
        let cal = Calibration::new(Utc::now())
            .with_gate(GateProperties::new("cx", [0, 1]).with_error(0.01))
            .with_gate(GateProperties::new("cx", [1, 0]).with_error(0.02))
            .with_gate(GateProperties::new("cx", [0, 1]).with_error(0.015));

        // (cx, [0,1]) and (cx, [1,0]) are distinct keys.
        assert_eq!(cal.gates.len(), 2);
        assert_eq!(cal.gate_error("cx", &[0, 1]), Some(0.015));
        assert_eq!(cal.gate_error("cx", &[1, 0]), Some(0.02));
    }

    #[test]
    fn test_gate_error_missing() {
        let cal = Calibration::new(Utc::now());
        assert_eq!(cal.gate_error("cx", &[0, 1]), None);
    }

    #[test]
    fn test_hardware_summary() {
        let hw = Hardware::simulator("aer_simulator", 32);
        assert_eq!(hw.summary(), "aer_simulator (simulator)");

        let hw = Hardware::new("IBM Quantum", "ibm_brisbane", 127);
        assert_eq!(hw.summary(), "ibm_brisbane");
    }
}
