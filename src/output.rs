//! Result types returned by a batch conversion.

use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of converting one source PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    /// Source PDF.
    pub source: PathBuf,

    /// Pages in the document, when it could be opened.
    pub page_count: Option<usize>,

    /// JPEGs written for this file, in page order. On failure this holds
    /// the pages written before the failing one.
    pub outputs: Vec<PathBuf>,

    /// Set when the file could not be fully converted.
    pub error: Option<FileError>,
}

impl FileResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregated outcome of one batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of `.pdf` files found in the source directory.
    pub total: usize,
    /// Files converted without error.
    pub succeeded: usize,
    /// Files that failed.
    pub failed: usize,
    /// Total JPEGs written across all files.
    pub pages_written: usize,
    /// Per-file results in processing order.
    pub files: Vec<FileResult>,
    /// Wall-clock duration of the batch.
    pub duration_ms: u64,
}

impl BatchSummary {
    /// Build a summary from per-file results.
    pub fn from_results(files: Vec<FileResult>, duration_ms: u64) -> Self {
        let succeeded = files.iter().filter(|f| f.is_success()).count();
        Self {
            total: files.len(),
            succeeded,
            failed: files.len() - succeeded,
            pages_written: files.iter().map(|f| f.outputs.len()).sum(),
            files,
            duration_ms,
        }
    }

    /// `<succeeded>/<total> files converted successfully`
    pub fn summary_line(&self) -> String {
        format!(
            "{}/{} files converted successfully",
            self.succeeded, self.total
        )
    }
}
