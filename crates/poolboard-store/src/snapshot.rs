//! Claim snapshots on disk.
//!
//! A snapshot is a pretty-printed JSON array of claim records in insertion
//! order. Writes go to a temp file in the same directory and are renamed over
//! the target, so readers never see a half-written file.

use std::io::Write;
use std::path::{Path, PathBuf};

use poolboard_core::ClaimRecord;
use tracing::info;

use crate::StoreError;

/// A claim snapshot at a fixed path.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all records. A missing file is an empty snapshot.
    pub fn load(&self) -> Result<Vec<ClaimRecord>, StoreError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no snapshot yet");
            return Ok(Vec::new());
        }
        let text = std::fs::read_to_string(&self.path).map_err(|source| self.io(source))?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records: Vec<ClaimRecord> =
            serde_json::from_str(&text).map_err(|e| StoreError::Malformed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        info!(path = %self.path.display(), count = records.len(), "loaded snapshot");
        Ok(records)
    }

    /// Replace the snapshot with `records`.
    pub fn save(&self, records: &[ClaimRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|source| self.io(source))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|source| self.io(source))?;
        writeln!(tmp, "{json}").map_err(|source| self.io(source))?;
        tmp.persist(&self.path).map_err(|e| self.io(e.error))?;

        info!(path = %self.path.display(), count = records.len(), "saved snapshot");
        Ok(())
    }

    fn io(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use poolboard_core::{Board, BoardConfig, Outcome};

    fn records() -> Vec<ClaimRecord> {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 11, 5, 9, 0, 0).unwrap();
        for (entry, outcome, name) in [
            ("Pennsylvania", Outcome::Blue, "Ann"),
            ("Arizona", Outcome::Red, "Bo"),
        ] {
            board.select_square(entry, outcome).unwrap();
            board.set_participant_name(name);
            board.set_participant_email(format!("{}@x.com", name.to_lowercase()));
            board.submit_at(now).unwrap();
        }
        board.claims().cloned().collect()
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snap = SnapshotFile::new(dir.path().join("claims.json"));
        assert!(snap.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let snap = SnapshotFile::new(dir.path().join("nested").join("claims.json"));
        let saved = records();
        snap.save(&saved).unwrap();

        let loaded = snap.load().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded[0].entry_name, "Pennsylvania");
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let snap = SnapshotFile::new(dir.path().join("claims.json"));
        let all = records();
        snap.save(&all).unwrap();
        snap.save(&all[..1]).unwrap();
        assert_eq!(snap.load().unwrap().len(), 1);
    }

    #[test]
    fn file_uses_record_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let snap = SnapshotFile::new(dir.path().join("claims.json"));
        snap.save(&records()).unwrap();

        let text = std::fs::read_to_string(snap.path()).unwrap();
        assert!(text.contains("\"entryName\": \"Pennsylvania\""));
        assert!(text.contains("\"timestampIso8601\": \"2024-11-05T09:00:00.000Z\""));
    }

    #[test]
    fn malformed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claims.json");
        std::fs::write(&path, "{\"not\": \"a list\"}").unwrap();

        let result = SnapshotFile::new(&path).load();
        assert!(matches!(result, Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claims.json");
        std::fs::write(&path, "\n").unwrap();
        assert!(SnapshotFile::new(&path).load().unwrap().is_empty());
    }
}
