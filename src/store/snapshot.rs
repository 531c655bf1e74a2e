//! JSON snapshot persistence for the attendance ledger.
//!
//! The whole ledger is written to a temporary file next to the target and
//! then renamed over it, so a reader never observes a half-written file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::AttendanceRecord;

/// Current on-disk format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk representation of the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Format version.
    pub version: u32,
    /// When the snapshot was written.
    pub saved_at: DateTime<Utc>,
    /// Every record in the ledger.
    pub records: Vec<AttendanceRecord>,
}

/// A snapshot file location.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Points at `path`. Nothing is read or created until used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the records stored at the path. A missing file is an empty ledger.
    pub fn load(&self) -> EngineResult<Vec<AttendanceRecord>> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "No ledger snapshot found, starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            EngineError::storage(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        let snapshot: LedgerSnapshot = serde_json::from_str(&content).map_err(|e| {
            EngineError::storage(format!("failed to parse {}: {}", self.path.display(), e))
        })?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(EngineError::storage(format!(
                "unsupported snapshot version {} in {}",
                snapshot.version,
                self.path.display()
            )));
        }

        info!(
            path = %self.path.display(),
            records = snapshot.records.len(),
            saved_at = %snapshot.saved_at,
            "Loaded ledger snapshot"
        );
        Ok(snapshot.records)
    }

    /// Replaces the file contents with `records`.
    pub fn write<'a>(&self, records: impl IntoIterator<Item = &'a AttendanceRecord>) -> EngineResult<()> {
        let snapshot = LedgerSnapshot {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            records: records.into_iter().cloned().collect(),
        };
        let body = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| EngineError::storage(format!("failed to encode snapshot: {e}")))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                EngineError::storage(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(|e| {
            EngineError::storage(format!("failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            EngineError::storage(format!("failed to replace {}: {}", self.path.display(), e))
        })?;

        debug!(
            path = %self.path.display(),
            records = snapshot.records.len(),
            "Wrote ledger snapshot"
        );
        Ok(())
    }
}
