//! Exporters for provenance records.
//!
//! Four output formats:
//!
//! - native JSON ([`json`]) — lossless, round-trips through
//!   [`json::from_json`] with an identical content hash;
//! - CycloneDX 1.5 ([`cyclonedx`]) — SBOM view with the full record under
//!   a `qprov` extension;
//! - SPDX 2.3 ([`spdx`]) — SBOM view with the full record in an
//!   annotation;
//! - YAML ([`yaml`]) — the native shape, rendered as YAML.

pub mod cyclonedx;
mod error;
pub mod json;
pub mod spdx;
pub mod yaml;

use std::str::FromStr;

use qprov_model::Record;

pub use error::{ExportError, ExportResult};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Native JSON.
    Json,
    /// CycloneDX 1.5 JSON.
    CycloneDx,
    /// SPDX 2.3 JSON.
    Spdx,
    /// YAML rendering of the native shape.
    Yaml,
}

impl ExportFormat {
    /// Conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json | ExportFormat::CycloneDx | ExportFormat::Spdx => "json",
            ExportFormat::Yaml => "yaml",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "cyclonedx" => Ok(ExportFormat::CycloneDx),
            "spdx" => Ok(ExportFormat::Spdx),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExportFormat::Json => "json",
            ExportFormat::CycloneDx => "cyclonedx",
            ExportFormat::Spdx => "spdx",
            ExportFormat::Yaml => "yaml",
        };
        f.write_str(s)
    }
}

/// Render a record in the requested format.
pub fn export_record(record: &Record, format: ExportFormat) -> ExportResult<String> {
    match format {
        ExportFormat::Json => json::to_json(record),
        ExportFormat::CycloneDx => cyclonedx::to_cyclonedx(record),
        ExportFormat::Spdx => spdx::to_spdx(record),
        ExportFormat::Yaml => yaml::to_yaml(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!(
            "CycloneDX".parse::<ExportFormat>().unwrap(),
            ExportFormat::CycloneDx
        );
        assert_eq!("yml".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(ExportError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_export_all_formats() {
        let record = qprov_model::Record::builder().build();
        for format in [
            ExportFormat::Json,
            ExportFormat::CycloneDx,
            ExportFormat::Spdx,
            ExportFormat::Yaml,
        ] {
            assert!(!export_record(&record, format).unwrap().is_empty());
        }
    }
}
