//! Coverage Store
//!
//! Persists the append-only log of produced topics; sole source of truth for
//! what has been covered. The log is an ordered JSON array of
//! `{kind, id, version, date, filename}` records. Outside tooling may read
//! the file but must only write through [`CoverageStore::append`].
//!
//! For any `(kind, id)` the recorded versions are exactly `1..=max` with no
//! gaps and no duplicate triple; `append` enforces this.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::types::{CoverageEntry, MillError, Result, TopicKind};

/// In-memory snapshot of the coverage log, insertion order preserved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageLog {
    entries: Vec<CoverageEntry>,
}

impl CoverageLog {
    pub fn new(entries: Vec<CoverageEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CoverageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest recorded version for `(kind, id)`; 0 if never covered
    pub fn max_version(&self, kind: TopicKind, id: &str) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.kind == kind && e.id == id)
            .map(|e| e.version)
            .max()
            .unwrap_or(0)
    }
}

/// File-backed coverage store with atomic appends
#[derive(Debug, Clone)]
pub struct CoverageStore {
    path: PathBuf,
}

impl CoverageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted log. A missing file is an empty log (first run);
    /// an unparsable file is a fatal corrupt-state error, never a silent
    /// reset.
    pub fn load(&self) -> Result<CoverageLog> {
        if !self.path.exists() {
            return Ok(CoverageLog::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        let entries: Vec<CoverageEntry> = serde_json::from_str(&raw).map_err(|e| {
            MillError::corrupt_state(self.path.display().to_string(), e.to_string())
        })?;
        Ok(CoverageLog::new(entries))
    }

    /// Append one entry and persist. Rejects entries that would break the
    /// gap-free version invariant. The file is replaced via a staged write
    /// and rename so a failure cannot leave a half-written log.
    pub fn append(&self, entry: CoverageEntry) -> Result<()> {
        let mut log = self.load()?;

        let expected = log.max_version(entry.kind, &entry.id) + 1;
        if entry.version != expected {
            return Err(MillError::Persistence(format!(
                "coverage append for {}/{} expected version {}, got {}",
                entry.kind, entry.id, expected, entry.version
            )));
        }

        log.entries.push(entry);
        self.persist(&log)
    }

    fn persist(&self, log: &CoverageLog) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let staged = self.path.with_extension("json.tmp");
        let raw = serde_json::to_string_pretty(&log.entries)?;
        fs::write(&staged, raw)
            .map_err(|e| MillError::Persistence(format!("staging coverage log: {}", e)))?;
        fs::rename(&staged, &self.path)
            .map_err(|e| MillError::Persistence(format!("replacing coverage log: {}", e)))?;

        debug!(
            entries = log.len(),
            path = %self.path.display(),
            "coverage log persisted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Topic, TopicKind};
    use chrono::Utc;

    fn topic(kind: TopicKind, id: &str, version: u32) -> Topic {
        Topic {
            kind,
            id: id.to_string(),
            title: id.to_string(),
            url: None,
            summary: None,
            tags: vec![],
            version,
        }
    }

    fn entry(kind: TopicKind, id: &str, version: u32) -> CoverageEntry {
        CoverageEntry::new(&topic(kind, id, version), Utc::now(), format!("{id}.md"))
    }

    #[test]
    fn test_missing_file_is_empty_log() {
        let dir = tempfile::tempdir().unwrap();
        let store = CoverageStore::new(dir.path().join("coverage.json"));
        let log = store.load().unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_append_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = CoverageStore::new(dir.path().join("coverage.json"));

        store.append(entry(TopicKind::Package, "httpx", 1)).unwrap();
        store.append(entry(TopicKind::Paper, "attention", 1)).unwrap();
        store.append(entry(TopicKind::Package, "httpx", 2)).unwrap();

        let log = store.load().unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(log.max_version(TopicKind::Package, "httpx"), 2);
        assert_eq!(log.max_version(TopicKind::Paper, "attention"), 1);
        assert_eq!(log.max_version(TopicKind::Paper, "unseen"), 0);
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = CoverageStore::new(dir.path().join("coverage.json"));

        store.append(entry(TopicKind::Tutorial, "b", 1)).unwrap();
        store.append(entry(TopicKind::Tutorial, "a", 1)).unwrap();

        let log = store.load().unwrap();
        let ids: Vec<_> = log.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_append_rejects_duplicate_triple() {
        let dir = tempfile::tempdir().unwrap();
        let store = CoverageStore::new(dir.path().join("coverage.json"));

        store.append(entry(TopicKind::Package, "httpx", 1)).unwrap();
        let err = store
            .append(entry(TopicKind::Package, "httpx", 1))
            .unwrap_err();
        assert!(matches!(err, MillError::Persistence(_)));
    }

    #[test]
    fn test_append_rejects_version_gap() {
        let dir = tempfile::tempdir().unwrap();
        let store = CoverageStore::new(dir.path().join("coverage.json"));

        let err = store
            .append(entry(TopicKind::Package, "httpx", 3))
            .unwrap_err();
        assert!(matches!(err, MillError::Persistence(_)));
    }

    #[test]
    fn test_corrupt_log_is_fatal_not_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coverage.json");
        std::fs::write(&path, "{ definitely not a coverage log").unwrap();

        let store = CoverageStore::new(&path);
        let err = store.load().unwrap_err();
        assert!(matches!(err, MillError::CorruptState { .. }));

        // the broken file must survive untouched for inspection
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("{ definitely"));
    }

    #[test]
    fn test_no_stale_staging_file_after_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coverage.json");
        let store = CoverageStore::new(&path);
        store.append(entry(TopicKind::Paper, "bert", 1)).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
    }
}
