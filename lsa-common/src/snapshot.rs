//! Local snapshot of the last assessment result
//!
//! A keyed JSON file so a restart does not lose the assessment that was just
//! computed. Every new submission overwrites it; a reset removes it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::assessment::AssessmentResult;
use crate::Result;

/// Key used by the terminal client
pub const DEFAULT_SNAPSHOT_KEY: &str = "leadershipResults";

/// File-backed snapshot slot
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Snapshot stored as `<dir>/<key>.json`
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the snapshot with `result`
    ///
    /// Written to a sibling temp file first, then renamed into place.
    pub fn save(&self, result: &AssessmentResult) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(result)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("Saved result snapshot to {}", self.path.display());
        Ok(())
    }

    /// Last saved result, if any
    ///
    /// A snapshot that cannot be parsed is logged and treated as absent.
    pub fn load(&self) -> Result<Option<AssessmentResult>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(result) => Ok(Some(result)),
            Err(e) => {
                warn!(
                    "Ignoring unreadable result snapshot {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    /// Remove the snapshot; absent snapshot is fine
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Cleared result snapshot {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::assemble_result;
    use crate::catalog::Catalog;
    use crate::scoring::Answers;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn result_with(value: i64) -> AssessmentResult {
        let answers: Answers = Catalog::standard()
            .questions()
            .iter()
            .map(|q| (q.id.clone(), value))
            .collect();
        let ts = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        assemble_result(answers, Catalog::standard(), ts).unwrap()
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path(), DEFAULT_SNAPSHOT_KEY);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path(), DEFAULT_SNAPSHOT_KEY);
        let result = result_with(4);

        store.save(&result).unwrap();
        assert_eq!(store.load().unwrap(), Some(result));
    }

    #[test]
    fn test_new_submission_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path(), DEFAULT_SNAPSHOT_KEY);

        store.save(&result_with(2)).unwrap();
        store.save(&result_with(5)).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.average_score, 100);
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path(), DEFAULT_SNAPSHOT_KEY);

        store.save(&result_with(3)).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        // Clearing twice is not an error
        store.clear().unwrap();
    }

    #[test]
    fn test_keys_are_independent() {
        let dir = TempDir::new().unwrap();
        let a = SnapshotStore::new(dir.path(), "alice");
        let b = SnapshotStore::new(dir.path(), "bob");

        a.save(&result_with(1)).unwrap();
        assert!(b.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_snapshot_treated_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path(), DEFAULT_SNAPSHOT_KEY);
        std::fs::write(store.path(), b"{not json").unwrap();

        assert!(store.load().unwrap().is_none());
    }
}
