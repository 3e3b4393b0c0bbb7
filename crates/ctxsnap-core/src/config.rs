//! Run configuration.
//!
//! Configuration is resolved once at process start from three layers,
//! later layers overriding earlier:
//! 1. Built-in defaults (the constants below)
//! 2. Optional project config: `ctxsnap.json` in the root directory
//! 3. Command-line flags (applied by the binary)
//!
//! The resolved `RunConfig` is passed explicitly into the run; nothing
//! is read from globals after startup.

use crate::{CoreError, CoreResult};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Number of snapshots kept after pruning.
pub const DEFAULT_KEEP_LATEST: usize = 4;

/// File name prefix for output snapshots.
pub const DEFAULT_OUTPUT_PREFIX: &str = "project_context_";

/// Extensions included in the snapshot.
pub const DEFAULT_INCLUDE_EXTENSIONS: &[&str] = &[".vue", ".js", ".ts", ".scss", ".css", ".html"];

/// Extensions excluded from the snapshot. Takes precedence over the
/// include list. `.txt` also keeps prior snapshots out of new ones.
pub const DEFAULT_EXCLUDE_EXTENSIONS: &[&str] = &[".md", ".log", ".txt"];

/// Directory names pruned before descent.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["node_modules", ".git", "dist", ".cache"];

/// Project config file name, looked up in the root directory.
pub const CONFIG_FILE_NAME: &str = "ctxsnap.json";

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Project root; all relative paths are computed against it.
    pub root: PathBuf,
    /// Snapshot file name prefix.
    pub output_prefix: String,
    /// Number of snapshots to keep after pruning.
    pub keep_latest: usize,
    /// Extension allow list (normalized: lowercase, leading dot).
    pub include_extensions: Vec<String>,
    /// Extension deny list (normalized; wins over the allow list).
    pub exclude_extensions: Vec<String>,
    /// Directory names excluded from traversal.
    pub exclude_dirs: Vec<String>,
    /// Walk and report without writing or deleting anything.
    pub dry_run: bool,
}

impl RunConfig {
    /// Build a config with built-in defaults for the given root.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            keep_latest: DEFAULT_KEEP_LATEST,
            include_extensions: DEFAULT_INCLUDE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude_extensions: DEFAULT_EXCLUDE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            dry_run: false,
        }
    }

    /// Build a config for the given root, merging `ctxsnap.json` from
    /// the root directory if present.
    ///
    /// A missing config file is fine; a malformed one is an error.
    pub fn load(root: PathBuf) -> CoreResult<Self> {
        let mut config = Self::new(root);

        let config_path = config.root.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            let raw = fs::read_to_string(&config_path)?;
            let file: ConfigFile = serde_json::from_str(&raw)
                .map_err(|e| CoreError::invalid_config(&config_path, e))?;
            debug!(path = %config_path.display(), "Loaded project config");
            config.apply_file(file);
        }

        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(keep) = file.keep_latest {
            self.keep_latest = keep as usize;
        }
        if let Some(prefix) = file.output_prefix {
            self.output_prefix = prefix;
        }
        if let Some(exts) = file.include_extensions {
            self.include_extensions = normalize_extensions(&exts);
        }
        if let Some(exts) = file.exclude_extensions {
            self.exclude_extensions = normalize_extensions(&exts);
        }
        if let Some(dirs) = file.exclude_dirs {
            self.exclude_dirs = dirs;
        }
    }
}

/// On-disk shape of `ctxsnap.json`. All fields optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    keep_latest: Option<u32>,
    output_prefix: Option<String>,
    include_extensions: Option<Vec<String>>,
    exclude_extensions: Option<Vec<String>>,
    exclude_dirs: Option<Vec<String>>,
}

/// Normalize a configured extension: lowercase, with a leading dot.
pub fn normalize_extension(ext: &str) -> String {
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

fn normalize_extensions(exts: &[String]) -> Vec<String> {
    exts.iter().map(|e| normalize_extension(e)).collect()
}
