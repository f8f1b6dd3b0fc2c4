//! Progress-callback trait for batch conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the batch walks the source directory. The library itself only
//! logs through `tracing`; all operator-facing output (progress bar, `✓`/`✗`
//! lines) is produced by a callback, which keeps the library silent when
//! embedded.
//!
//! # Example
//!
//! ```rust
//! use edgequake_pdf2jpg::{ConversionProgressCallback, ConversionConfig};
//! use std::path::Path;
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct PageCounter {
//!     pages: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for PageCounter {
//!     fn on_page_written(&self, _source: &Path, output: &Path, page_num: usize, page_count: usize) {
//!         self.pages.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("page {}/{} -> {}", page_num, page_count, output.display());
//!     }
//! }
//!
//! let counter = Arc::new(PageCounter { pages: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::output::BatchSummary;
use std::path::Path;
use std::sync::Arc;

/// Called by the batch orchestrator as it processes each file and page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Events arrive sequentially from the thread running
/// the batch; the `Send + Sync` bound lets callers share one callback with
/// other threads (e.g. a progress bar ticker).
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after the source directory is listed, before any file is
    /// opened. `total_files` may be 0.
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a PDF is opened.
    ///
    /// # Arguments
    /// * `path`  — source PDF
    /// * `index` — 1-indexed position in the batch
    /// * `total` — number of PDFs in the batch
    fn on_file_start(&self, path: &Path, index: usize, total: usize) {
        let _ = (path, index, total);
    }

    /// Called after a page's JPEG has been written.
    ///
    /// # Arguments
    /// * `source`     — source PDF
    /// * `output`     — the JPEG just written
    /// * `page_num`   — 1-indexed page number
    /// * `page_count` — pages in the source document
    fn on_page_written(&self, source: &Path, output: &Path, page_num: usize, page_count: usize) {
        let _ = (source, output, page_num, page_count);
    }

    /// Called once per file that could not be fully converted.
    fn on_file_error(&self, path: &Path, error: &str) {
        let _ = (path, error);
    }

    /// Called once after every file has been attempted.
    fn on_batch_complete(&self, summary: &BatchSummary) {
        let _ = summary;
    }
}

/// A no-op implementation for callers that need a callback value but no
/// progress events. Leaving `progress_callback` as `None` has the same effect.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct TrackingCallback {
        files: AtomicUsize,
        pages: AtomicUsize,
        errors: Mutex<Vec<String>>,
        succeeded: AtomicUsize,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_file_start(&self, _path: &Path, _index: usize, _total: usize) {
            self.files.fetch_add(1, Ordering::SeqCst);
        }

        fn on_page_written(&self, _source: &Path, _output: &Path, _page: usize, _count: usize) {
            self.pages.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_error(&self, path: &Path, error: &str) {
            self.errors
                .lock()
                .unwrap()
                .push(format!("{}: {error}", path.display()));
        }

        fn on_batch_complete(&self, summary: &BatchSummary) {
            self.succeeded.store(summary.succeeded, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_batch_start(2);
        cb.on_file_start(Path::new("a.pdf"), 1, 2);
        cb.on_page_written(Path::new("a.pdf"), Path::new("a.jpg"), 1, 1);
        cb.on_file_error(Path::new("b.pdf"), "broken");
        cb.on_batch_complete(&BatchSummary::default());
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_file_start(Path::new("a.pdf"), 1, 2);
        tracker.on_page_written(Path::new("a.pdf"), Path::new("a_page_1.jpg"), 1, 2);
        tracker.on_page_written(Path::new("a.pdf"), Path::new("a_page_2.jpg"), 2, 2);
        tracker.on_file_start(Path::new("b.pdf"), 2, 2);
        tracker.on_file_error(Path::new("b.pdf"), "cannot open document");

        let summary = BatchSummary {
            total: 2,
            succeeded: 1,
            failed: 1,
            ..BatchSummary::default()
        };
        tracker.on_batch_complete(&summary);

        assert_eq!(tracker.files.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.pages.load(Ordering::SeqCst), 2);
        assert_eq!(
            tracker.errors.lock().unwrap().as_slice(),
            ["b.pdf: cannot open document"]
        );
        assert_eq!(tracker.succeeded.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_batch_start(10);
        cb.on_file_start(Path::new("x.pdf"), 1, 10);
    }
}
