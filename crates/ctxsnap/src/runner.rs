//! Run orchestration.
//!
//! One run has two sequential phases: aggregate the included files into
//! a new snapshot, then prune old snapshots down to the retention
//! count. User-facing status goes to stdout; diagnostics go through
//! tracing.

use anyhow::{Context, Result};
use ctxsnap_core::{aggregate, Aggregation, CoreError, ExtensionFilter, RunConfig, Walker};
use ctxsnap_snapshot::{name, PruneOutcome, SnapshotStore};
use ctxsnap_util::Clock;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{debug, info};

/// What a run did, for reporting and tests.
#[derive(Debug)]
pub struct RunSummary {
    /// Path of the snapshot this run produced (or would produce).
    pub output_path: PathBuf,
    /// Aggregation counters.
    pub aggregation: Aggregation,
    /// Retention outcome.
    pub prune: PruneOutcome,
}

/// Execute one run with the given configuration.
///
/// The snapshot timestamp is stamped from `clock` once, up front.
pub fn run(config: &RunConfig, clock: &dyn Clock) -> Result<RunSummary> {
    if !config.root.is_dir() {
        return Err(CoreError::invalid_root(&config.root).into());
    }

    let timestamp = clock.now();
    let output_path = config
        .root
        .join(name::file_name(&config.output_prefix, timestamp));

    debug!(
        root = %config.root.display(),
        keep = config.keep_latest,
        dry_run = config.dry_run,
        "Starting run"
    );

    let walker = Walker::from_config(config);
    let filter = ExtensionFilter::from_config(config);
    let store = SnapshotStore::new(
        config.root.clone(),
        config.output_prefix.clone(),
        config.keep_latest,
    );

    if config.dry_run {
        return dry_run(config, &walker, &filter, &store, output_path);
    }

    let file = File::create(&output_path)
        .with_context(|| format!("Cannot create output file {}", output_path.display()))?;
    let mut out = BufWriter::new(file);

    let included = walker.files().filter(|p| filter.matches(p));
    let aggregation = aggregate(&mut out, &config.root, included)
        .with_context(|| format!("Failed writing {}", output_path.display()))?;

    info!(
        records = aggregation.records,
        unreadable = aggregation.unreadable,
        bytes = aggregation.bytes,
        "Aggregation complete"
    );
    println!(
        "Combined {} files into {}",
        aggregation.records,
        output_path.display()
    );

    let prune = store.prune()?;
    for path in &prune.deleted {
        println!("Deleted old snapshot: {}", path.display());
    }
    for (path, error) in &prune.failed {
        println!("Failed to delete {}: {}", path.display(), error);
    }

    Ok(RunSummary {
        output_path,
        aggregation,
        prune,
    })
}

/// Report what a run would do, creating and deleting nothing.
fn dry_run(
    config: &RunConfig,
    walker: &Walker,
    filter: &ExtensionFilter,
    store: &SnapshotStore,
    output_path: PathBuf,
) -> Result<RunSummary> {
    let mut aggregation = Aggregation::default();
    for path in walker.files().filter(|p| filter.matches(p)) {
        let rel = ctxsnap_util::path::relative_to(&path, &config.root).unwrap_or(path);
        println!("Would include: {}", rel.display());
        aggregation.records += 1;
    }
    println!(
        "Would combine {} files into {}",
        aggregation.records,
        output_path.display()
    );

    // The new snapshot would be the newest, so of the existing ones
    // only keep_latest - 1 would survive.
    let existing = store.list()?;
    let keep_existing = config.keep_latest.saturating_sub(1);
    if existing.len() > keep_existing {
        for old in &existing[keep_existing..] {
            println!("Would delete old snapshot: {}", old.path.display());
        }
    }

    Ok(RunSummary {
        output_path,
        aggregation,
        prune: PruneOutcome::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctxsnap_util::FixedClock;
    use std::fs;
    use std::path::Path;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::tempdir;

    fn clock() -> FixedClock {
        FixedClock::from_ymd_hms(2024, 6, 1, 12, 0, 0)
    }

    fn snapshot_names(root: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .filter(|n| name::matches("project_context_", n))
            .collect();
        names.sort();
        names
    }

    /// Seed an old snapshot with a pinned modification time.
    fn seed_snapshot(root: &Path, stamp: &str, mtime_secs: u64) -> PathBuf {
        let path = root.join(format!("project_context_{stamp}.txt"));
        fs::write(&path, "old").unwrap();
        let file = fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.set_modified(UNIX_EPOCH + Duration::from_secs(mtime_secs))
            .unwrap();
        path
    }

    #[test]
    fn test_run_writes_exactly_the_included_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "x").unwrap();
        fs::write(dir.path().join("b.md"), "y").unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules/c.js"), "z").unwrap();

        let config = RunConfig::new(dir.path().to_path_buf());
        let summary = run(&config, &clock()).unwrap();

        assert_eq!(summary.aggregation.records, 1);
        assert_eq!(summary.aggregation.unreadable, 0);
        assert_eq!(
            summary.output_path,
            dir.path().join("project_context_2024-06-01_12-00-00.txt")
        );

        let written = fs::read_to_string(&summary.output_path).unwrap();
        assert_eq!(written, "\n\n=== FILE: a.js ===\nx");
    }

    #[test]
    fn test_run_keeps_retention_invariant() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "x").unwrap();

        // Six prior snapshots with distinct increasing mtimes
        let mut old = Vec::new();
        for i in 0..6u64 {
            old.push(seed_snapshot(
                dir.path(),
                &format!("2024-01-01_10-00-0{i}"),
                1_000 + i,
            ));
        }

        let config = RunConfig::new(dir.path().to_path_buf());
        let summary = run(&config, &clock()).unwrap();

        // Exactly 4 remain: the new one plus the 3 newest priors
        assert_eq!(summary.prune.deleted.len(), 3);
        assert!(summary.prune.failed.is_empty());

        let remaining = snapshot_names(dir.path());
        assert_eq!(remaining.len(), 4);
        assert!(summary.output_path.exists());
        for path in &old[..3] {
            assert!(!path.exists(), "{} should be deleted", path.display());
        }
        for path in &old[3..] {
            assert!(path.exists(), "{} should survive", path.display());
        }
    }

    #[test]
    fn test_run_below_retention_deletes_nothing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "x").unwrap();
        seed_snapshot(dir.path(), "2024-01-01_10-00-00", 1_000);

        let config = RunConfig::new(dir.path().to_path_buf());
        let summary = run(&config, &clock()).unwrap();

        assert!(summary.prune.deleted.is_empty());
        assert_eq!(snapshot_names(dir.path()).len(), 2);
    }

    #[test]
    fn test_new_snapshot_never_contains_old_ones() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "x").unwrap();
        seed_snapshot(dir.path(), "2024-01-01_10-00-00", 1_000);

        let config = RunConfig::new(dir.path().to_path_buf());
        let summary = run(&config, &clock()).unwrap();

        let written = fs::read_to_string(&summary.output_path).unwrap();
        assert!(!written.contains("project_context_2024-01-01"));
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "x").unwrap();
        for i in 0..6u64 {
            seed_snapshot(dir.path(), &format!("2024-01-01_10-00-0{i}"), 1_000 + i);
        }

        let mut config = RunConfig::new(dir.path().to_path_buf());
        config.dry_run = true;
        let summary = run(&config, &clock()).unwrap();

        assert_eq!(summary.aggregation.records, 1);
        assert!(!summary.output_path.exists());
        assert_eq!(snapshot_names(dir.path()).len(), 6);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let config = RunConfig::new(dir.path().join("does_not_exist"));
        assert!(run(&config, &clock()).is_err());
    }

    #[test]
    fn test_custom_prefix_flows_through_to_retention() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "x").unwrap();

        // History under a different prefix is not ctxsnap's to prune
        seed_snapshot(dir.path(), "2024-01-01_10-00-00", 1_000);

        let mut config = RunConfig::new(dir.path().to_path_buf());
        config.output_prefix = "dump_".to_string();
        config.keep_latest = 1;
        let summary = run(&config, &clock()).unwrap();

        assert_eq!(
            summary.output_path,
            dir.path().join("dump_2024-06-01_12-00-00.txt")
        );
        assert!(summary.prune.deleted.is_empty());
        assert!(dir
            .path()
            .join("project_context_2024-01-01_10-00-00.txt")
            .exists());
    }
}
