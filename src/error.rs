//! Error types for the edgequake-pdf2jpg library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Pdf2JpgError`] — **Fatal**: the batch cannot run at all (source
//!   directory missing, output directory cannot be created, no pdfium
//!   engine). Returned as `Err(Pdf2JpgError)` from
//!   [`crate::convert::convert_directory`].
//!
//! * [`FileError`] — **Non-fatal**: one PDF could not be converted (corrupt
//!   document, render glitch, disk full) but the rest of the batch is fine.
//!   Stored inside [`crate::output::FileResult`] so one bad file never costs
//!   the operator the whole run.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the edgequake-pdf2jpg library.
///
/// Per-file failures use [`FileError`] and are stored in
/// [`crate::output::FileResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum Pdf2JpgError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The source directory does not exist or is not a directory.
    #[error("PDF directory does not exist: '{path}'")]
    InputDirectoryNotFound { path: PathBuf },

    /// The source directory exists but could not be listed.
    #[error("Failed to list PDF directory '{path}': {source}")]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create the output directory (or one of its parents).
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Install a pdfium build from https://github.com/bblanchon/pdfium-binaries and either:\n\
  • put libpdfium next to the pdf2jpg executable, or\n\
  • set PDFIUM_LIB_PATH=/path/to/libpdfium (or its directory).\n"
    )]
    PdfiumBindingFailed(String),
}

/// A non-fatal error for a single source PDF.
///
/// The first failing page aborts the remaining pages of that file; the
/// batch moves on to the next file.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum FileError {
    /// pdfium could not open the document (missing, unreadable, not a PDF,
    /// encrypted).
    #[error("cannot open document: {detail}")]
    DocumentOpen { detail: String },

    /// Page rasterisation failed.
    #[error("page {page}: rasterisation failed: {detail}")]
    RenderFailed { page: usize, detail: String },

    /// JPEG encoding failed.
    #[error("page {page}: JPEG encoding failed: {detail}")]
    EncodeFailed { page: usize, detail: String },

    /// The encoded JPEG could not be written to the output directory.
    #[error("failed to write '{path}': {detail}")]
    WriteFailed { path: PathBuf, detail: String },
}
