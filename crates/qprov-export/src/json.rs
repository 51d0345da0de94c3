//! Native JSON export.
//!
//! The native format is the serde representation of [`Record`] itself, so
//! encode/decode is lossless: a decoded record is field-for-field equal to
//! the original and reproduces the same content hash.

use qprov_model::Record;

use crate::error::ExportResult;

/// Render a record as pretty-printed native JSON.
pub fn to_json(record: &Record) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Decode a record from native JSON.
pub fn from_json(json: &str) -> ExportResult<Record> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qprov_model::{Circuit, Counts, Execution, ExperimentResult, GateOp, Hardware};

    fn record() -> Record {
        Record::builder()
            .circuit(Circuit::from_ops(
                Some("bell".into()),
                2,
                2,
                3,
                &[GateOp::new("h", [0]), GateOp::new("cx", [0, 1])],
            ))
            .hardware(Hardware::new("IBM Quantum", "ibm_brisbane", 127).with_qubits_used([12, 13]))
            .execution(Execution::new(4096).with_job_id("job-1"))
            .result(ExperimentResult::from_counts(Counts::from_pairs([
                ("00".to_string(), 2050),
                ("11".to_string(), 2046),
            ])))
            .build()
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let original = record();
        let json = to_json(&original).unwrap();
        let decoded = from_json(&json).unwrap();

        assert_eq!(decoded, original);
        assert_eq!(decoded.content_hash(), original.content_hash());
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(from_json("{ not json").is_err());
    }
}
