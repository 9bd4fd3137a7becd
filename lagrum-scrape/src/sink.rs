//! Report persistence: one fixed file, or a directory of files named after
//! each result's label.

use std::path::PathBuf;

use tokio::fs;
use tracing::debug;

use lagrum_common::{Result, ScrapeError};

/// Fallback file stem when a label sanitises down to nothing.
const FALLBACK_STEM: &str = "report";

/// Where extracted report text ends up.
#[derive(Debug, Clone)]
pub enum ReportSink {
    /// Everything goes to this one path; effectively caps the run at a
    /// single report.
    SingleFile(PathBuf),
    /// One `<label>.txt` per report inside this directory.
    Directory(PathBuf),
}

impl ReportSink {
    /// Create the output directory (or the single file's parent) on demand.
    /// Safe to call on every run; an existing directory is left alone.
    pub async fn prepare(&self) -> Result<()> {
        let dir = match self {
            ReportSink::SingleFile(path) => match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => return Ok(()),
            },
            ReportSink::Directory(dir) => dir.as_path(),
        };
        fs::create_dir_all(dir).await.map_err(|source| ScrapeError::Io {
            path: dir.to_path_buf(),
            source,
        })
    }

    /// Write one report and return the path it landed at.
    ///
    /// A name collision silently overwrites; the search result list is the
    /// source of truth, not previously written files.
    pub async fn write(&self, label: &str, text: &str) -> Result<PathBuf> {
        let path = match self {
            ReportSink::SingleFile(path) => path.clone(),
            ReportSink::Directory(dir) => dir.join(report_file_name(label)),
        };
        fs::write(&path, format!("{text}\n"))
            .await
            .map_err(|source| ScrapeError::Io {
                path: path.clone(),
                source,
            })?;
        debug!(target: "scrape.sink", path = %path.display(), bytes = text.len(), "report written");
        Ok(path)
    }
}

/// Make a result label safe to use as a file stem.
///
/// Path separators, characters that are reserved on common filesystems, and
/// control characters become `-`. An empty result falls back to a fixed stem
/// so the write cannot escape the sink directory or fail on naming.
fn sanitize_label(label: &str) -> String {
    let cleaned: String = label
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        cleaned
    }
}

/// File name a label maps to inside a directory sink.
pub fn report_file_name(label: &str) -> String {
    format!("{}.txt", sanitize_label(label))
}
