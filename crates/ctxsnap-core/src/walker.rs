//! Project tree traversal.

use crate::config::RunConfig;
use std::ffi::OsStr;
use std::path::PathBuf;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Enumerates regular files under a root directory.
///
/// Directories whose name is on the exclusion list are pruned before
/// descent: their contents are never visited, at any depth. The root
/// itself is exempt from pruning. Symlinks are not followed, so
/// symlinked directory cycles cannot loop the walk.
#[derive(Debug, Clone)]
pub struct Walker {
    root: PathBuf,
    exclude_dirs: Vec<String>,
}

impl Walker {
    pub fn new(root: PathBuf, exclude_dirs: Vec<String>) -> Self {
        Self { root, exclude_dirs }
    }

    /// Build a walker from a resolved run configuration.
    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.root.clone(), config.exclude_dirs.clone())
    }

    /// Iterate over all reachable regular files.
    ///
    /// Enumeration order is walkdir's default and not part of the
    /// contract. Entries that cannot be read are logged and skipped.
    pub fn files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_excluded_dir(entry))
            .filter_map(|entry| match entry {
                Ok(e) if e.file_type().is_file() => Some(e.into_path()),
                Ok(_) => None,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    None
                }
            })
    }

    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_dir()
            && self
                .exclude_dirs
                .iter()
                .any(|d| entry.file_name() == OsStr::new(d))
    }
}
