//! File-backed trace store: one JSON file per frozen record.
//!
//! Records are stored under a single root directory, named by their
//! generated identifier. `QPROV_HOME` overrides the root;
//! `QPROV_NO_AUTOSAVE` (boolean-like) disables automatic persistence of
//! frozen records — capture and scoring then work purely in memory.

use std::fs;
use std::path::{Path, PathBuf};

use qprov_model::Record;
use tracing::warn;

use crate::error::{CaptureError, CaptureResult};

/// Environment variable overriding the persistence root.
pub const ENV_HOME: &str = "QPROV_HOME";

/// Environment variable disabling automatic persistence ("1", "true", "yes").
pub const ENV_NO_AUTOSAVE: &str = "QPROV_NO_AUTOSAVE";

/// File-per-record JSON store.
#[derive(Debug, Clone)]
pub struct TraceStore {
    root: PathBuf,
    autosave: bool,
}

impl TraceStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            autosave: true,
        }
    }

    /// Create a store configured from the environment.
    ///
    /// Root: `$QPROV_HOME`, falling back to `~/.qprov/traces`.
    pub fn from_env() -> Self {
        let root = std::env::var(ENV_HOME).map(PathBuf::from).unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".qprov")
                .join("traces")
        });
        let autosave = !std::env::var(ENV_NO_AUTOSAVE)
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self { root, autosave }
    }

    /// Whether frozen records are persisted automatically.
    pub fn autosave_enabled(&self) -> bool {
        self.autosave
    }

    /// Disable or enable autosave.
    pub fn set_autosave(&mut self, enabled: bool) {
        self.autosave = enabled;
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    /// Persist a record, creating the root directory if needed.
    pub fn save(&self, record: &Record) -> CaptureResult<PathBuf> {
        fs::create_dir_all(&self.root)?;
        let path = self.record_path(&record.id);
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Load a record by identifier.
    ///
    /// A missing file is [`CaptureError::NotFound`]; a present but
    /// undecodable file is [`CaptureError::InvalidFormat`] — the two are
    /// deliberately distinct outcomes.
    pub fn load(&self, id: &str) -> CaptureResult<Record> {
        let path = self.record_path(id);
        match fs::read_to_string(&path) {
            Ok(content) => Self::decode(&path, &content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CaptureError::NotFound(id.to_string()))
            }
            Err(e) => Err(CaptureError::Io(e)),
        }
    }

    /// Load a record from an explicit file path.
    pub fn load_path(path: &Path) -> CaptureResult<Record> {
        match fs::read_to_string(path) {
            Ok(content) => Self::decode(path, &content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CaptureError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(CaptureError::Io(e)),
        }
    }

    fn decode(path: &Path, content: &str) -> CaptureResult<Record> {
        serde_json::from_str(content).map_err(|e| CaptureError::InvalidFormat {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Delete a persisted record. Returns whether a file was removed.
    pub fn delete(&self, id: &str) -> CaptureResult<bool> {
        match fs::remove_file(self.record_path(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CaptureError::Io(e)),
        }
    }

    /// List persisted records, newest first by creation timestamp, ties
    /// broken by identifier. Undecodable files are skipped with a warning.
    pub fn list_recent(&self, limit: usize) -> CaptureResult<Vec<Record>> {
        let mut records = Vec::new();

        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(records),
            Err(e) => return Err(CaptureError::Io(e)),
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                match fs::read_to_string(&path) {
                    Ok(content) => match Self::decode(&path, &content) {
                        Ok(record) => records.push(record),
                        Err(e) => warn!("skipping unreadable record {}: {e}", path.display()),
                    },
                    Err(e) => warn!("skipping unreadable record {}: {e}", path.display()),
                }
            }
        }

        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        records.truncate(limit);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qprov_model::Record;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, TraceStore) {
        let dir = TempDir::new().unwrap();
        let store = TraceStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_save_load_round_trip() {
        let (_dir, store) = temp_store();
        let record = Record::builder().build();
        let id = record.id.clone();

        store.save(&record).unwrap();
        let loaded = store.load(&id).unwrap();
        assert_eq!(loaded, record);
        assert_eq!(loaded.content_hash(), record.content_hash());
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let (_dir, store) = temp_store();
        let err = store.load("qprov_missing").unwrap_err();
        assert!(matches!(err, CaptureError::NotFound(_)));
    }

    #[test]
    fn test_load_corrupt_is_invalid_format() {
        let (dir, store) = temp_store();
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(dir.path().join("qprov_bad.json"), "{ not json").unwrap();

        let err = store.load("qprov_bad").unwrap_err();
        assert!(matches!(err, CaptureError::InvalidFormat { .. }));
    }

    #[test]
    fn test_delete() {
        let (_dir, store) = temp_store();
        let record = Record::builder().build();
        store.save(&record).unwrap();

        assert!(store.delete(&record.id).unwrap());
        assert!(!store.delete(&record.id).unwrap());
        assert!(matches!(
            store.load(&record.id),
            Err(CaptureError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_recent_order() {
        let (_dir, store) = temp_store();

        let mut older = Record::builder().build();
        older.created_at = chrono::Utc::now() - chrono::Duration::hours(1);
        let newer = Record::builder().build();

        store.save(&older).unwrap();
        store.save(&newer).unwrap();

        let listed = store.list_recent(10).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);

        let limited = store.list_recent(1).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_list_recent_ties_broken_by_id() {
        let (_dir, store) = temp_store();
        let at = chrono::Utc::now();

        let mut a = Record::builder().build();
        let mut b = Record::builder().build();
        a.created_at = at;
        b.created_at = at;

        store.save(&a).unwrap();
        store.save(&b).unwrap();

        let listed = store.list_recent(10).unwrap();
        let listed_ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
        let mut expected = vec![a.id.as_str(), b.id.as_str()];
        expected.sort();
        assert_eq!(listed_ids, expected);
    }

    #[test]
    fn test_list_skips_corrupt_files() {
        let (dir, store) = temp_store();
        let record = Record::builder().build();
        store.save(&record).unwrap();
        fs::write(dir.path().join("qprov_junk.json"), "junk").unwrap();

        let listed = store.list_recent(10).unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[test]
    fn test_list_empty_root() {
        let store = TraceStore::new("/nonexistent/qprov-test-root");
        assert!(store.list_recent(5).unwrap().is_empty());
    }
}
