//! Output file naming.
//!
//! A single-page document becomes `<stem>.jpg`; every page of a multi-page
//! document gets a 1-indexed suffix, `<stem>_page_<n>.jpg`. Pages of the same
//! document therefore never collide. Two *different* sources with the same
//! stem (`a.pdf` and `a.PDF`) do collide; the later one wins.

use std::path::Path;

/// File stem used for output names: the source file name minus its final
/// extension. Falls back to `"document"` for paths without a usable name.
pub fn base_name(pdf_path: &Path) -> String {
    pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "document".to_string())
}

/// Output file name for the page at `page_index` (0-based) of a document
/// with `page_count` pages.
pub fn output_file_name(base: &str, page_index: usize, page_count: usize) -> String {
    if page_count == 1 {
        format!("{base}.jpg")
    } else {
        format!("{base}_page_{}.jpg", page_index + 1)
    }
}
