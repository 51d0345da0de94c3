//! YAML rendering of the native record shape.

use qprov_model::Record;

use crate::error::ExportResult;

/// Render a record as YAML with the same field shape as the native JSON.
pub fn to_yaml(record: &Record) -> ExportResult<String> {
    Ok(serde_yaml_ng::to_string(record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qprov_model::{Execution, Hardware, Record};

    #[test]
    fn test_yaml_matches_native_shape() {
        let record = Record::builder()
            .hardware(Hardware::new("IBM Quantum", "ibm_brisbane", 127))
            .execution(Execution::new(4096))
            .build();

        let yaml = to_yaml(&record).unwrap();
        let decoded: Record = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(decoded, record);
    }
}
