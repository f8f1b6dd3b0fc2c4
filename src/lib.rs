//! # edgequake-pdf2jpg
//!
//! Batch-convert a directory of PDF documents into JPEG images, one image
//! per page.
//!
//! ## Pipeline Overview
//!
//! ```text
//! pdf_dir/
//!  │
//!  ├─ 1. Input   list *.pdf (case-insensitive, top level, sorted)
//!  ├─ 2. Render  rasterise each page via pdfium at dpi / 72
//!  ├─ 3. Encode  baseline JPEG, optimised Huffman tables, 4:2:0
//!  └─ 4. Output  <stem>.jpg or <stem>_page_<n>.jpg in output_dir
//! ```
//!
//! Files are converted one at a time. A file that fails (corrupt PDF,
//! unwritable output) is recorded in the [`BatchSummary`] and the batch
//! moves on. A missing source directory, an output directory that cannot be
//! created, or a missing pdfium library stops the run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_pdf2jpg::{convert_directory, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder().dpi(200).quality(90).build()?;
//!     let summary = convert_directory("./pdfs", "./static/images", &config)?;
//!     println!("{}", summary.summary_line());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2jpg` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! edgequake-pdf2jpg = { version = "0.1", default-features = false }
//! ```
//!
//! ## PDFium
//!
//! Rendering uses the pdfium shared library, loaded at runtime. See
//! [`engine`] for the lookup order (`PDFIUM_LIB_PATH`, next to the
//! executable, system library path).

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    ConversionConfig, ConversionConfigBuilder, DEFAULT_DPI, DEFAULT_OUTPUT_DIR, DEFAULT_PDF_DIR,
    DEFAULT_QUALITY,
};
pub use convert::{convert_directory, convert_directory_with_engine, convert_file};
pub use engine::bind_pdfium;
pub use error::{FileError, Pdf2JpgError};
pub use output::{BatchSummary, FileResult};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
