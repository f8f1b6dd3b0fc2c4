//! Batch conversion entry points.
//!
//! [`convert_directory`] is the whole program in one call: validate the
//! source directory, create the output directory, list the PDFs, convert
//! them one after another and return a [`BatchSummary`].
//!
//! Everything runs sequentially on the calling thread: one file at a time,
//! one page at a time.
//!
//! ## Failure boundary
//!
//! [`convert_file`] is the per-file catch-all: any open, render, encode or
//! write error becomes [`crate::error::FileError`] inside the file's
//! [`FileResult`], and the loop moves on. Only setup problems (missing
//! source directory, uncreatable output directory, no pdfium) surface as
//! `Err(Pdf2JpgError)`.

use crate::config::ConversionConfig;
use crate::engine;
use crate::error::Pdf2JpgError;
use crate::output::{BatchSummary, FileResult};
use crate::pipeline::{input, render};
use pdfium_render::prelude::Pdfium;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert every `*.pdf` directly inside `pdf_dir` to JPEGs in `output_dir`.
///
/// The pdfium engine is bound only once at least one PDF has been found, so
/// an empty directory succeeds even on a machine without pdfium.
///
/// # Returns
/// `Ok(BatchSummary)` whenever the batch ran, even if some or all files
/// failed (check `summary.failed`).
///
/// # Errors
/// - [`Pdf2JpgError::InputDirectoryNotFound`]: checked before anything else;
///   nothing is created on disk.
/// - [`Pdf2JpgError::OutputDirCreateFailed`], [`Pdf2JpgError::ReadDirFailed`]
/// - [`Pdf2JpgError::PdfiumBindingFailed`]
pub fn convert_directory(
    pdf_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<BatchSummary, Pdf2JpgError> {
    run_batch(pdf_dir.as_ref(), output_dir.as_ref(), config, None)
}

/// Like [`convert_directory`] but with an already-bound pdfium engine.
///
/// pdfium bindings are process-global and can be set up only once, so a
/// process converting several directories binds once with
/// [`crate::engine::bind_pdfium`] and passes the engine here.
pub fn convert_directory_with_engine(
    pdfium: &Pdfium,
    pdf_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<BatchSummary, Pdf2JpgError> {
    run_batch(pdf_dir.as_ref(), output_dir.as_ref(), config, Some(pdfium))
}

/// Convert a single PDF, never failing: errors are recorded in the result.
pub fn convert_file(
    pdfium: &Pdfium,
    pdf_path: &Path,
    output_dir: &Path,
    config: &ConversionConfig,
) -> FileResult {
    let mut result = FileResult {
        source: pdf_path.to_path_buf(),
        page_count: None,
        outputs: Vec::new(),
        error: None,
    };

    if let Err(e) = render::rasterize_document(pdfium, pdf_path, output_dir, config, &mut result) {
        warn!("Conversion failed for {}: {}", pdf_path.display(), e);
        result.error = Some(e);
    }

    result
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn run_batch(
    pdf_dir: &Path,
    output_dir: &Path,
    config: &ConversionConfig,
    bound_engine: Option<&Pdfium>,
) -> Result<BatchSummary, Pdf2JpgError> {
    let start = Instant::now();
    info!(
        "Starting batch: {} → {} (dpi={}, quality={})",
        pdf_dir.display(),
        output_dir.display(),
        config.dpi,
        config.quality
    );

    // ── Step 1: Validate source ──────────────────────────────────────────
    input::ensure_input_dir(pdf_dir)?;

    // ── Step 2: Prepare output ───────────────────────────────────────────
    std::fs::create_dir_all(output_dir).map_err(|e| Pdf2JpgError::OutputDirCreateFailed {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    // ── Step 3: List PDFs ────────────────────────────────────────────────
    let files = input::collect_pdf_files(pdf_dir)?;
    let total = files.len();

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    if files.is_empty() {
        warn!("No PDF files found in {}", pdf_dir.display());
        let summary = BatchSummary::from_results(Vec::new(), elapsed_ms(start));
        if let Some(ref cb) = config.progress_callback {
            cb.on_batch_complete(&summary);
        }
        return Ok(summary);
    }

    // ── Step 4: Bind pdfium (lazily) ─────────────────────────────────────
    let bound;
    let pdfium = match bound_engine {
        Some(pdfium) => pdfium,
        None => {
            bound = engine::bind_pdfium()?;
            &bound
        }
    };

    // ── Step 5: Convert one file at a time ───────────────────────────────
    let results = convert_each(&files, config, |pdf_path| {
        convert_file(pdfium, pdf_path, output_dir, config)
    });

    // ── Step 6: Summarise ────────────────────────────────────────────────
    let summary = BatchSummary::from_results(results, elapsed_ms(start));
    info!(
        "Batch complete: {} ({} pages written, {}ms)",
        summary.summary_line(),
        summary.pages_written,
        summary.duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(&summary);
    }

    Ok(summary)
}

/// Run `convert` over `files` in order, firing the per-file callbacks.
///
/// `convert` must not fail: whatever goes wrong inside it is reported
/// through `FileResult::error`.
fn convert_each<F>(files: &[PathBuf], config: &ConversionConfig, mut convert: F) -> Vec<FileResult>
where
    F: FnMut(&Path) -> FileResult,
{
    let total = files.len();
    let mut results = Vec::with_capacity(total);

    for (i, pdf_path) in files.iter().enumerate() {
        debug!("[{}/{}] {}", i + 1, total, pdf_path.display());
        if let Some(ref cb) = config.progress_callback {
            cb.on_file_start(pdf_path, i + 1, total);
        }

        let result = convert(pdf_path);

        if let (Some(cb), Some(e)) = (config.progress_callback.as_ref(), result.error.as_ref()) {
            cb.on_file_error(pdf_path, &e.to_string());
        }
        results.push(result);
    }

    results
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileError;
    use crate::progress::ConversionProgressCallback;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Default)]
    struct BatchEvents {
        started_with: Mutex<Option<usize>>,
        file_starts: Mutex<Vec<(String, usize)>>,
        file_errors: Mutex<Vec<String>>,
        completed: AtomicUsize,
    }

    impl ConversionProgressCallback for BatchEvents {
        fn on_batch_start(&self, total_files: usize) {
            *self.started_with.lock().unwrap() = Some(total_files);
        }

        fn on_file_start(&self, path: &Path, index: usize, _total: usize) {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            self.file_starts.lock().unwrap().push((name, index));
        }

        fn on_file_error(&self, path: &Path, _error: &str) {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            self.file_errors.lock().unwrap().push(name);
        }

        fn on_batch_complete(&self, _summary: &BatchSummary) {
            self.completed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn missing_source_is_fatal_and_creates_nothing() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");

        let err = convert_directory(tmp.path().join("missing"), &out, &ConversionConfig::default())
            .unwrap_err();

        assert!(matches!(err, Pdf2JpgError::InputDirectoryNotFound { .. }));
        assert!(!out.exists(), "output directory must not be created");
    }

    #[test]
    fn empty_source_succeeds_and_creates_output_dir() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("pdfs");
        std::fs::create_dir(&src).unwrap();
        std::fs::write(src.join("readme.txt"), b"not a pdf").unwrap();
        let out = tmp.path().join("static").join("images");

        let events = Arc::new(BatchEvents::default());
        let config = ConversionConfig::builder()
            .progress_callback(events.clone())
            .build()
            .unwrap();

        let summary = convert_directory(&src, &out, &config).unwrap();

        assert_eq!(summary.total, 0);
        assert_eq!(summary.summary_line(), "0/0 files converted successfully");
        assert!(out.is_dir());
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
        assert_eq!(*events.started_with.lock().unwrap(), Some(0));
        assert_eq!(events.completed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn existing_output_dir_is_reused() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        std::fs::create_dir(&out).unwrap();
        std::fs::write(out.join("keep.jpg"), b"x").unwrap();

        convert_directory(tmp.path(), &out, &ConversionConfig::default()).unwrap();
        assert!(out.join("keep.jpg").exists());
    }

    #[test]
    fn output_path_occupied_by_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        std::fs::create_dir(&src).unwrap();
        let out = tmp.path().join("out");
        std::fs::write(&out, b"file, not a dir").unwrap();

        let err = convert_directory(&src, &out, &ConversionConfig::default()).unwrap_err();
        assert!(matches!(err, Pdf2JpgError::OutputDirCreateFailed { .. }));
    }

    /// Stand-in for the rasterizer: fails on `broken.pdf`, writes one page
    /// for everything else.
    fn fake_convert(path: &Path) -> FileResult {
        let mut result = FileResult {
            source: path.to_path_buf(),
            page_count: None,
            outputs: Vec::new(),
            error: None,
        };
        if path.ends_with("broken.pdf") {
            result.error = Some(FileError::DocumentOpen {
                detail: "not a PDF".into(),
            });
        } else {
            result.page_count = Some(1);
            result.outputs.push(path.with_extension("jpg"));
        }
        result
    }

    #[test]
    fn failing_file_does_not_stop_the_loop() {
        let tmp = TempDir::new().unwrap();
        for name in ["good.pdf", "broken.pdf", "another.pdf"] {
            std::fs::write(tmp.path().join(name), b"%PDF").unwrap();
        }
        let files = input::collect_pdf_files(tmp.path()).unwrap();

        let events = Arc::new(BatchEvents::default());
        let config = ConversionConfig::builder()
            .progress_callback(events.clone())
            .build()
            .unwrap();

        let mut seen = Vec::new();
        let results = convert_each(&files, &config, |path| {
            seen.push(path.file_name().unwrap().to_string_lossy().into_owned());
            fake_convert(path)
        });
        let summary = BatchSummary::from_results(results, 0);

        assert_eq!(seen, vec!["another.pdf", "broken.pdf", "good.pdf"]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.pages_written, 2);
        assert_eq!(summary.summary_line(), "2/3 files converted successfully");
        assert!(matches!(
            summary.files[1].error,
            Some(FileError::DocumentOpen { .. })
        ));

        assert_eq!(*events.file_errors.lock().unwrap(), vec!["broken.pdf"]);
        assert_eq!(
            *events.file_starts.lock().unwrap(),
            vec![
                ("another.pdf".to_string(), 1),
                ("broken.pdf".to_string(), 2),
                ("good.pdf".to_string(), 3),
            ]
        );
    }

    #[test]
    fn one_failure_out_of_two_is_half_success() {
        let files = vec![PathBuf::from("broken.pdf"), PathBuf::from("fine.pdf")];
        let results = convert_each(&files, &ConversionConfig::default(), fake_convert);
        let summary = BatchSummary::from_results(results, 0);

        assert_eq!(summary.summary_line(), "1/2 files converted successfully");
        assert!(summary.files[1].is_success());
    }
}
