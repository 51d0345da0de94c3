//! SPDX 2.3 export.
//!
//! The document describes one `SPDXRef-QuantumExperiment` package plus one
//! package per captured environment dependency, joined by
//! `DESCRIBES`/`DEPENDS_ON` relationships. SPDX has no extension slot, so
//! the full native record rides along inside an `OTHER` annotation.

use qprov_model::Record;
use serde_json::{json, Value};

use crate::error::ExportResult;

const NOASSERTION: &str = "NOASSERTION";

/// Render a record as an SPDX 2.3 JSON document.
pub fn to_spdx(record: &Record) -> ExportResult<String> {
    let name = record
        .metadata
        .name
        .clone()
        .unwrap_or_else(|| format!("qprov-record-{}", record.id));

    let mut spdx = json!({
        "spdxVersion": "SPDX-2.3",
        "dataLicense": "CC0-1.0",
        "SPDXID": "SPDXRef-DOCUMENT",
        "name": name,
        "documentNamespace": format!("https://qprov.dev/spdx/{}", record.id),
        "creationInfo": {
            "created": record.created_at.to_rfc3339(),
            "creators": creators(record),
            "licenseListVersion": "3.19",
        },
        "packages": packages(record),
        "relationships": relationships(record),
        "annotations": [annotation(record)?],
    });

    if let Some(paper) = &record.metadata.paper {
        spdx["externalDocumentRefs"] = json!([{
            "externalDocumentId": "DocumentRef-paper",
            "spdxDocument": paper,
            "checksum": {
                "algorithm": "SHA256",
                "checksumValue": "0".repeat(64),
            },
        }]);
    }

    Ok(serde_json::to_string_pretty(&spdx)?)
}

fn creators(record: &Record) -> Vec<String> {
    let mut creators = vec![format!("Tool: qprov-{}", record.format_version)];
    creators.extend(
        record
            .metadata
            .authors
            .iter()
            .map(|author| format!("Person: {author}")),
    );
    creators
}

fn packages(record: &Record) -> Vec<Value> {
    let mut comment = record
        .metadata
        .description
        .clone()
        .unwrap_or_else(|| "Quantum computing experiment".to_string());
    if let Some(hw) = &record.hardware {
        comment.push_str(&format!(" | Backend: {}", hw.backend));
        if let Some(cal) = &hw.calibration {
            comment.push_str(&format!(" | Calibration: {}", cal.timestamp.to_rfc3339()));
        }
    }

    let mut packages = vec![json!({
        "SPDXID": "SPDXRef-QuantumExperiment",
        "name": record.metadata.name.as_deref().unwrap_or("quantum-experiment"),
        "versionInfo": record.id,
        "downloadLocation": NOASSERTION,
        "filesAnalyzed": false,
        "supplier": NOASSERTION,
        "originator": NOASSERTION,
        "licenseConcluded": NOASSERTION,
        "licenseDeclared": NOASSERTION,
        "copyrightText": NOASSERTION,
        "comment": comment,
        "externalRefs": [{
            "referenceCategory": "OTHER",
            "referenceType": "qprov",
            "referenceLocator": format!("qprov:{}", record.id),
            "comment": format!("qprov content hash: {}", record.content_hash()),
        }],
    })];

    if let Some(env) = &record.environment {
        for (idx, pkg) in env.packages.iter().enumerate() {
            packages.push(json!({
                "SPDXID": format!("SPDXRef-Package-{idx}"),
                "name": pkg.name,
                "versionInfo": pkg.version,
                "downloadLocation": NOASSERTION,
                "filesAnalyzed": false,
                "supplier": NOASSERTION,
                "originator": NOASSERTION,
                "licenseConcluded": NOASSERTION,
                "licenseDeclared": NOASSERTION,
                "copyrightText": NOASSERTION,
                "externalRefs": [{
                    "referenceCategory": "PACKAGE-MANAGER",
                    "referenceType": "purl",
                    "referenceLocator": pkg.purl_or_default(),
                }],
            }));
        }
    }

    packages
}

fn relationships(record: &Record) -> Vec<Value> {
    let mut relationships = vec![json!({
        "spdxElementId": "SPDXRef-DOCUMENT",
        "relatedSpdxElement": "SPDXRef-QuantumExperiment",
        "relationshipType": "DESCRIBES",
    })];

    if let Some(env) = &record.environment {
        for idx in 0..env.packages.len() {
            relationships.push(json!({
                "spdxElementId": "SPDXRef-QuantumExperiment",
                "relatedSpdxElement": format!("SPDXRef-Package-{idx}"),
                "relationshipType": "DEPENDS_ON",
            }));
        }
    }

    relationships
}

fn annotation(record: &Record) -> ExportResult<Value> {
    let payload = json!({
        "format_version": record.format_version,
        "record_id": record.id,
        "content_hash": record.content_hash(),
        "summary": record.summary(),
        "circuits": record.circuits.len(),
        "hardware": {
            "backend": record.hardware.as_ref().map(|h| h.backend.clone()),
            "qubits_used": record.hardware.as_ref().map(|h| h.qubits_used.clone()),
            "is_simulator": record.hardware.as_ref().map(|h| h.is_simulator),
        },
        "execution": {
            "shots": record.execution.as_ref().map(|e| e.shots),
        },
        "full_record": serde_json::to_value(record)?,
    });

    Ok(json!({
        "annotationDate": record.created_at.to_rfc3339(),
        "annotationType": "OTHER",
        "annotator": "Tool: qprov",
        "comment": serde_json::to_string(&payload)?,
    }))
}
