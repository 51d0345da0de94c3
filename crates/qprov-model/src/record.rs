//! The frozen provenance record.
//!
//! A [`Record`] is the immutable result of one experiment's capture. It is
//! produced exactly once, when an accumulator freezes, and is never mutated
//! afterwards: analysis engines, exporters, and persistence all consume it
//! by shared reference or by value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::circuit::Circuit;
use crate::environment::Environment;
use crate::execution::Execution;
use crate::hardware::Hardware;
use crate::hash;
use crate::metadata::Metadata;
use crate::result::ExperimentResult;
use crate::transpilation::Transpilation;

/// Format version written into every record.
pub const FORMAT_VERSION: &str = "1.0";

/// Generate a short record identifier.
fn generate_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let hex = uuid.simple().to_string();
    format!("qprov_{}", &hex[..8])
}

/// Complete provenance record of a quantum experiment.
///
/// Every field beyond `id`, `format_version`, and `created_at` is optional:
/// a record with gaps is still a valid record, it just scores poorly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier, generated at freeze time.
    pub id: String,
    /// Format version of this record.
    pub format_version: String,
    /// Wall-clock creation time.
    pub created_at: DateTime<Utc>,
    /// Software environment snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    /// Circuits executed, in capture order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub circuits: Vec<Circuit>,
    /// Transpilation record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transpilation: Option<Transpilation>,
    /// Hardware backend and calibration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware: Option<Hardware>,
    /// Execution parameters and timing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution: Option<Execution>,
    /// Measurement results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ExperimentResult>,
    /// User metadata.
    #[serde(default)]
    pub metadata: Metadata,
    /// Identifier of a parent record, if this one is derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Record {
    /// Start building a record.
    pub fn builder() -> RecordBuilder {
        RecordBuilder::default()
    }

    /// Content-addressable hash of the record.
    ///
    /// Covers the scientific fields only: circuit hashes, the transpilation
    /// record, the hardware backend and qubits used, the execution shots and
    /// seed, and the result hash. The generated identifier, creation time,
    /// and user metadata never participate, so two independently captured
    /// records of the same experiment hash identically.
    pub fn content_hash(&self) -> String {
        let content = json!({
            "circuits": self.circuits.iter().map(|c| &c.hash).collect::<Vec<_>>(),
            "transpilation": self.transpilation,
            "hardware": {
                "backend": self.hardware.as_ref().map(|h| &h.backend),
                "qubits_used": self.hardware.as_ref().map(|h| &h.qubits_used),
            },
            "execution": {
                "shots": self.execution.as_ref().map(|e| e.shots),
                "seed": self.execution.as_ref().and_then(|e| e.seed),
            },
            "result_hash": self.result.as_ref().map(|r| &r.hash),
        });
        hash::digest(&content)
    }

    /// Human-readable one-line summary.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        match self.circuits.len() {
            0 => {}
            1 => parts.push(format!("{}q circuit", self.circuits[0].num_qubits)),
            n => parts.push(format!("{n} circuits")),
        }
        if let Some(hw) = &self.hardware {
            parts.push(format!("on {}", hw.backend));
        }
        if let Some(exec) = &self.execution {
            parts.push(format!("{} shots", exec.shots));
        }

        if parts.is_empty() {
            "Empty record".to_string()
        } else {
            parts.join(" | ")
        }
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Record({}: {})", self.id, self.summary())
    }
}

/// Mutable builder used by the capture accumulator to assemble a [`Record`].
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    environment: Option<Environment>,
    circuits: Vec<Circuit>,
    transpilation: Option<Transpilation>,
    hardware: Option<Hardware>,
    execution: Option<Execution>,
    result: Option<ExperimentResult>,
    metadata: Metadata,
    parent_id: Option<String>,
}

impl RecordBuilder {
    /// Set the environment snapshot, replacing any previous one.
    pub fn environment(mut self, env: Environment) -> Self {
        self.environment = Some(env);
        self
    }

    /// Append a circuit.
    pub fn circuit(mut self, circuit: Circuit) -> Self {
        self.circuits.push(circuit);
        self
    }

    /// Set the transpilation record, replacing any previous one.
    pub fn transpilation(mut self, transpilation: Transpilation) -> Self {
        self.transpilation = Some(transpilation);
        self
    }

    /// Set the hardware description, replacing any previous one.
    pub fn hardware(mut self, hardware: Hardware) -> Self {
        self.hardware = Some(hardware);
        self
    }

    /// Set the execution parameters, replacing any previous ones.
    pub fn execution(mut self, execution: Execution) -> Self {
        self.execution = Some(execution);
        self
    }

    /// Set the result, replacing any previous one.
    pub fn result(mut self, result: ExperimentResult) -> Self {
        self.result = Some(result);
        self
    }

    /// Set the user metadata.
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the parent record identifier.
    pub fn parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Freeze into an immutable [`Record`] with a fresh identifier.
    pub fn build(self) -> Record {
        Record {
            id: generate_id(),
            format_version: FORMAT_VERSION.to_string(),
            created_at: Utc::now(),
            environment: self.environment,
            circuits: self.circuits,
            transpilation: self.transpilation,
            hardware: self.hardware,
            execution: self.execution,
            result: self.result,
            metadata: self.metadata,
            parent_id: self.parent_id,
        }
    }
}
