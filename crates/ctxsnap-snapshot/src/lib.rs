//! Snapshot naming and retention for ctxsnap.
//!
//! A snapshot is a single timestamped text file in the project root.
//! This crate knows how those files are named, how to enumerate the
//! existing ones, and how to prune history down to the newest N.
//!
//! # Example
//!
//! ```no_run
//! use ctxsnap_snapshot::SnapshotStore;
//! use std::path::PathBuf;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SnapshotStore::new(PathBuf::from("/project/root"), "project_context_", 4);
//!
//! let outcome = store.prune()?;
//! for path in &outcome.deleted {
//!     println!("deleted {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
pub mod name;
mod store;

pub use error::{SnapshotError, SnapshotResult};
pub use store::{FsModTime, ModTimeSource, PruneOutcome, SnapshotFile, SnapshotStore};
