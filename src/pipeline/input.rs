//! Input discovery: find the PDFs to convert in a source directory.
//!
//! Only the top level of the directory is scanned. A file qualifies when its
//! name ends in `.pdf`, compared case-insensitively, so `Report.PDF` is picked
//! up. Directory listings come back in filesystem order; the result is sorted
//! by file name so two runs over the same directory convert (and report) in
//! the same order.

use crate::error::Pdf2JpgError;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Check that the source directory exists and is a directory.
pub fn ensure_input_dir(dir: &Path) -> Result<(), Pdf2JpgError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(Pdf2JpgError::InputDirectoryNotFound {
            path: dir.to_path_buf(),
        })
    }
}

/// True when `name` ends with `.pdf`, ignoring ASCII case.
pub fn is_pdf_name(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    name.len() >= 4
        && name
            .get(name.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".pdf"))
}

/// List the PDFs directly inside `dir`, sorted by file name.
///
/// Entries that are not regular files (sub-directories named `x.pdf`,
/// dangling symlinks) are skipped.
pub fn collect_pdf_files(dir: &Path) -> Result<Vec<PathBuf>, Pdf2JpgError> {
    ensure_input_dir(dir)?;

    let entries = std::fs::read_dir(dir).map_err(|e| Pdf2JpgError::ReadDirFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Pdf2JpgError::ReadDirFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        if !is_pdf_name(&entry.file_name()) {
            continue;
        }
        if !path.is_file() {
            debug!("Skipping non-file entry: {}", path.display());
            continue;
        }
        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Found {} PDF files in {}", files.len(), dir.display());
    Ok(files)
}
