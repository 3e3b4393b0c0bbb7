//! Snapshot file naming.
//!
//! Snapshot files are named `<prefix><YYYY-MM-DD_HH-MM-SS>.txt`. The
//! timestamp has second resolution and is stamped once per run. The
//! matcher parses the timestamp back instead of globbing, so unrelated
//! text files in the root are never mistaken for history.

use chrono::{DateTime, Local, NaiveDateTime};

/// Timestamp layout embedded in snapshot file names.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// File extension for snapshot files.
const SUFFIX: &str = ".txt";

/// Build the snapshot file name for a run started at `timestamp`.
pub fn file_name(prefix: &str, timestamp: DateTime<Local>) -> String {
    format!("{prefix}{}{SUFFIX}", timestamp.format(TIMESTAMP_FORMAT))
}

/// Check whether `file_name` is a snapshot produced with `prefix`.
///
/// True iff the name starts with the prefix, ends with `.txt`, and the
/// middle parses as a timestamp in the exact snapshot format.
pub fn matches(prefix: &str, file_name: &str) -> bool {
    let Some(rest) = file_name.strip_prefix(prefix) else {
        return false;
    };
    let Some(stamp) = rest.strip_suffix(SUFFIX) else {
        return false;
    };
    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(year, month, day, h, m, s)
            .single()
            .unwrap()
    }

    #[test]
    fn test_file_name_format() {
        let name = file_name("project_context_", ts(2024, 3, 1, 9, 5, 30));
        assert_eq!(name, "project_context_2024-03-01_09-05-30.txt");
    }

    #[test]
    fn test_generated_name_matches() {
        let name = file_name("project_context_", ts(2024, 12, 31, 23, 59, 59));
        assert!(matches("project_context_", &name));
    }

    #[test]
    fn test_wrong_prefix_rejected() {
        assert!(!matches(
            "project_context_",
            "other_prefix_2024-03-01_09-05-30.txt"
        ));
    }

    #[test]
    fn test_malformed_timestamp_rejected() {
        assert!(!matches("project_context_", "project_context_notes.txt"));
        assert!(!matches(
            "project_context_",
            "project_context_2024-13-01_09-05-30.txt"
        ));
        assert!(!matches(
            "project_context_",
            "project_context_2024-03-01.txt"
        ));
    }

    #[test]
    fn test_wrong_suffix_rejected() {
        assert!(!matches(
            "project_context_",
            "project_context_2024-03-01_09-05-30.log"
        ));
        assert!(!matches(
            "project_context_",
            "project_context_2024-03-01_09-05-30"
        ));
    }
}
