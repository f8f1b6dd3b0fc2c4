//! Pipeline stages for PDF-to-JPEG conversion.
//!
//! Each submodule implements exactly one step, so each is testable without
//! the others (only [`render`] needs a pdfium engine).
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ naming ──▶ encode
//! (list)    (pdfium)   (file name) (JPEG + write)
//! ```
//!
//! 1. [`input`]  — list `*.pdf` files in the source directory
//! 2. [`render`] — open one document and rasterise its pages at `dpi / 72`
//! 3. [`naming`] — `<stem>.jpg` or `<stem>_page_<n>.jpg`
//! 4. [`encode`] — JPEG-encode and atomically write each page

pub mod encode;
pub mod input;
pub mod naming;
pub mod render;
