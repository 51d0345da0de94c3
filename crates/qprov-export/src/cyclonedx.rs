//! CycloneDX 1.5 export.
//!
//! The record is rendered as a CycloneDX software bill of materials: one
//! application component for the experiment, one library component per
//! captured environment package, and the full native record embedded under
//! the `qprov` extension so a CycloneDX consumer loses nothing.

use qprov_model::Record;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ExportResult;

/// Render a record as a CycloneDX 1.5 JSON document.
pub fn to_cyclonedx(record: &Record) -> ExportResult<String> {
    let mut external_references: Vec<Value> = Vec::new();
    if let Some(paper) = &record.metadata.paper {
        external_references.push(json!({
            "type": "documentation",
            "url": paper,
        }));
    }

    // serialNumber must be a real RFC 4122 URN, so the short record id is
    // stretched into a name-based UUID and carried verbatim in a property.
    let serial = Uuid::new_v5(&Uuid::NAMESPACE_URL, record.id.as_bytes());

    let sbom = json!({
        "$schema": "http://cyclonedx.org/schema/bom-1.5.schema.json",
        "bomFormat": "CycloneDX",
        "specVersion": "1.5",
        "version": 1,
        "serialNumber": format!("urn:uuid:{serial}"),
        "metadata": {
            "timestamp": record.created_at.to_rfc3339(),
            "component": {
                "type": "application",
                "name": record.metadata.name.as_deref().unwrap_or("quantum-experiment"),
                "version": record.id,
                "description": record.metadata.description,
            },
            "properties": [
                { "name": "qprov:version", "value": record.format_version },
                { "name": "qprov:content-hash", "value": record.content_hash() },
                { "name": "qprov:record-id", "value": record.id },
            ],
        },
        "components": components(record),
        "externalReferences": external_references,
        "extensions": { "qprov": serde_json::to_value(record)? },
    });

    Ok(serde_json::to_string_pretty(&sbom)?)
}

fn components(record: &Record) -> Vec<Value> {
    let Some(env) = &record.environment else {
        return Vec::new();
    };
    env.packages
        .iter()
        .map(|pkg| {
            json!({
                "type": "library",
                "name": pkg.name,
                "version": pkg.version,
                "purl": pkg.purl_or_default(),
            })
        })
        .collect()
}
