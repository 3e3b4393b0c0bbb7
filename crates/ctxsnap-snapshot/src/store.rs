//! Snapshot retention storage.

use crate::{name, SnapshotError, SnapshotResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Source of file modification times.
///
/// Retention ordering comes from filesystem mtimes. The lookup sits
/// behind this trait so tests can pin times instead of racing the
/// filesystem's timestamp resolution.
pub trait ModTimeSource {
    fn modified(&self, path: &Path) -> io::Result<SystemTime>;
}

/// Modification times read from filesystem metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsModTime;

impl ModTimeSource for FsModTime {
    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        fs::metadata(path)?.modified()
    }
}

/// A snapshot file found in the root directory.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    /// Absolute path of the snapshot file.
    pub path: PathBuf,
    /// Filesystem modification time.
    pub modified: SystemTime,
}

/// Result of a prune pass.
#[derive(Debug, Default)]
pub struct PruneOutcome {
    /// Old snapshots that were deleted.
    pub deleted: Vec<PathBuf>,
    /// Old snapshots that could not be deleted.
    pub failed: Vec<(PathBuf, io::Error)>,
}

/// Storage for snapshot history in a project root.
///
/// The store never creates snapshots; it only enumerates and prunes the
/// ones already on disk.
pub struct SnapshotStore {
    /// Directory holding the snapshot files.
    root: PathBuf,
    /// File name prefix snapshots are created with.
    prefix: String,
    /// Number of snapshots to keep.
    keep_latest: usize,
    /// Modification time lookup.
    mod_time: Box<dyn ModTimeSource>,
}

impl SnapshotStore {
    /// Create a store reading modification times from the filesystem.
    pub fn new(root: PathBuf, prefix: impl Into<String>, keep_latest: usize) -> Self {
        Self::with_mod_time_source(root, prefix, keep_latest, Box::new(FsModTime))
    }

    /// Create a store with an injected modification time source.
    pub fn with_mod_time_source(
        root: PathBuf,
        prefix: impl Into<String>,
        keep_latest: usize,
        mod_time: Box<dyn ModTimeSource>,
    ) -> Self {
        Self {
            root,
            prefix: prefix.into(),
            keep_latest,
            mod_time,
        }
    }

    /// List all snapshot files in the root, newest first.
    ///
    /// Entries whose metadata cannot be read (e.g. removed between
    /// enumeration and lookup) are skipped with a warning.
    pub fn list(&self) -> SnapshotResult<Vec<SnapshotFile>> {
        let entries = fs::read_dir(&self.root)
            .map_err(|e| SnapshotError::root_unreadable(&self.root, e))?;

        let mut snapshots = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "Failed to read directory entry");
                    continue;
                }
            };

            let file_name = entry.file_name();
            if !name::matches(&self.prefix, &file_name.to_string_lossy()) {
                continue;
            }
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }

            let path = entry.path();
            match self.mod_time.modified(&path) {
                Ok(modified) => snapshots.push(SnapshotFile { path, modified }),
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to read mtime"),
            }
        }

        // Newest first; ties on equal mtimes keep enumeration order
        snapshots.sort_by(|a, b| b.modified.cmp(&a.modified));

        Ok(snapshots)
    }

    /// Snapshot files that fall outside the newest `keep_latest`.
    pub fn excess(&self) -> SnapshotResult<Vec<SnapshotFile>> {
        let mut snapshots = self.list()?;
        if snapshots.len() <= self.keep_latest {
            return Ok(Vec::new());
        }
        Ok(snapshots.split_off(self.keep_latest))
    }

    /// Delete all snapshots beyond the newest `keep_latest`.
    ///
    /// Each deletion is attempted independently: one failure is recorded
    /// in the outcome and does not stop the remaining deletions.
    pub fn prune(&self) -> SnapshotResult<PruneOutcome> {
        let mut outcome = PruneOutcome::default();

        for old in self.excess()? {
            match fs::remove_file(&old.path) {
                Ok(()) => {
                    debug!(path = %old.path.display(), "Deleted old snapshot");
                    outcome.deleted.push(old.path);
                }
                Err(e) => {
                    warn!(path = %old.path.display(), error = %e, "Failed to delete old snapshot");
                    outcome.failed.push((old.path, e));
                }
            }
        }

        Ok(outcome)
    }
}
