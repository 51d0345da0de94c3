//! Shared helpers for resolving record references.

use std::path::Path;

use anyhow::{bail, Context, Result};
use qprov_capture::{CaptureError, TraceStore};
use qprov_model::Record;

/// Open the trace store configured from the environment.
pub fn open_store() -> TraceStore {
    TraceStore::from_env()
}

/// Load a record by exact ID, unique ID prefix, or file path.
///
/// Tries the reference as a file path first, then as an exact store ID,
/// then as an ID prefix over the whole store. An ambiguous prefix is an
/// error listing how many records matched.
pub fn load_record(store: &TraceStore, reference: &str) -> Result<Record> {
    let path = Path::new(reference);
    if path.is_file() {
        return TraceStore::load_path(path)
            .with_context(|| format!("failed to read record file '{reference}'"));
    }

    match store.load(reference) {
        Ok(record) => return Ok(record),
        Err(CaptureError::NotFound(_)) => {}
        Err(e) => {
            return Err(e).with_context(|| format!("failed to load record '{reference}'"));
        }
    }

    let mut matches: Vec<Record> = store
        .list_recent(usize::MAX)?
        .into_iter()
        .filter(|r| r.id.starts_with(reference))
        .collect();

    match matches.len() {
        0 => bail!("no record found matching '{reference}'"),
        1 => Ok(matches.remove(0)),
        n => bail!("'{reference}' is ambiguous: {n} records match, use more characters"),
    }
}
