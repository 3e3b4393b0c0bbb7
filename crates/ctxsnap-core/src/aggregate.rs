//! Snapshot aggregation.
//!
//! Reads each included file and writes one record into the output:
//! two newlines, a `=== FILE: <relative-path> ===` header line, then
//! the file's content verbatim. A file that cannot be read as UTF-8
//! text contributes a placeholder body instead, and the pass continues
//! with the remaining files. Write errors are not recovered.

use crate::CoreResult;
use std::borrow::Cow;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Content captured for one included file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Full file contents, read as UTF-8 text.
    Text(String),
    /// The file could not be read; holds the error description.
    Unreadable(String),
}

/// One entry of the output snapshot.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Path relative to the project root, as shown in the header.
    pub rel_path: PathBuf,
    /// Content or error placeholder.
    pub content: FileContent,
}

impl FileRecord {
    /// Read the file at `path`, recovering read failures locally.
    pub fn read(root: &Path, path: &Path) -> Self {
        let rel_path =
            ctxsnap_util::path::relative_to(path, root).unwrap_or_else(|| path.to_path_buf());

        let content = match fs::read_to_string(path) {
            Ok(text) => FileContent::Text(text),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read file");
                FileContent::Unreadable(e.to_string())
            }
        };

        Self { rel_path, content }
    }
}

/// Summary of one aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Records written to the snapshot.
    pub records: usize,
    /// Records substituted with an error placeholder.
    pub unreadable: usize,
    /// Bytes written.
    pub bytes: u64,
}

/// Write one record. Returns the number of bytes written.
pub fn write_record<W: Write>(out: &mut W, record: &FileRecord) -> io::Result<u64> {
    let header = format!("\n\n=== FILE: {} ===\n", record.rel_path.display());
    let body: Cow<'_, str> = match &record.content {
        FileContent::Text(text) => Cow::Borrowed(text.as_str()),
        FileContent::Unreadable(error) => Cow::Owned(format!("<<unreadable: {error}>>")),
    };

    out.write_all(header.as_bytes())?;
    out.write_all(body.as_bytes())?;

    Ok((header.len() + body.len()) as u64)
}

/// Aggregate `files` into `out`, in the order given.
///
/// Per-file read failures become placeholder records; any write failure
/// terminates the pass.
pub fn aggregate<W, I>(out: &mut W, root: &Path, files: I) -> CoreResult<Aggregation>
where
    W: Write,
    I: IntoIterator<Item = PathBuf>,
{
    let mut summary = Aggregation::default();

    for path in files {
        let record = FileRecord::read(root, &path);
        summary.bytes += write_record(out, &record)?;
        summary.records += 1;
        if matches!(record.content, FileContent::Unreadable(_)) {
            summary.unreadable += 1;
        }
    }

    out.flush()?;
    Ok(summary)
}
