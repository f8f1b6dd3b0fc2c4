//! PDF rasterisation: open one document and turn every page into a JPEG.
//!
//! Page geometry in PDF is measured in points (1/72 inch). A page rendered
//! at `dpi` is therefore scaled by `dpi / 72`: a US-Letter page (612 × 792 pt)
//! at 300 DPI becomes 2550 × 3300 px.
//!
//! The `PdfDocument` handle is owned by [`rasterize_document`] and dropped
//! when it returns, on the success path and on every early `?` return alike,
//! so pdfium closes the file no matter which page fails.

use crate::config::ConversionConfig;
use crate::error::FileError;
use crate::output::FileResult;
use crate::pipeline::{encode, naming};
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Pixel size of a page of `width_pts` × `height_pts` points rendered at
/// `scale` pixels per point. Each axis is rounded to the nearest pixel and is
/// at least 1 px.
pub fn target_size(width_pts: f32, height_pts: f32, scale: f32) -> (i32, i32) {
    let px = |pts: f32| ((pts * scale).round() as i32).max(1);
    (px(width_pts), px(height_pts))
}

/// Rasterise every page of `pdf_path` into `output_dir`.
///
/// Written JPEGs and the page count are recorded in `result` as they happen,
/// so on error the caller still knows which pages made it to disk. The first
/// failing page aborts the rest of the document.
pub fn rasterize_document(
    pdfium: &Pdfium,
    pdf_path: &Path,
    output_dir: &Path,
    config: &ConversionConfig,
    result: &mut FileResult,
) -> Result<(), FileError> {
    let document =
        pdfium
            .load_pdf_from_file(pdf_path, None)
            .map_err(|e| FileError::DocumentOpen {
                detail: format!("{:?}", e),
            })?;

    let pages = document.pages();
    let page_count = pages.len() as usize;
    result.page_count = Some(page_count);
    info!("PDF loaded: {} ({} pages)", pdf_path.display(), page_count);

    let base = naming::base_name(pdf_path);
    let scale = config.scale();

    for (idx, page) in pages.iter().enumerate() {
        let page_num = idx + 1;

        let (width, height) = target_size(page.width().value, page.height().value, scale);
        let render_config = PdfRenderConfig::new()
            .set_target_width(width)
            .set_target_height(height);

        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| FileError::RenderFailed {
                page: page_num,
                detail: format!("{:?}", e),
            })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} → {}x{} px",
            page_num,
            image.width(),
            image.height()
        );

        let jpeg = encode::encode_jpeg(&image, config.quality, page_num)?;
        let file_name = naming::output_file_name(&base, idx, page_count);
        let output_path = encode::write_atomic(output_dir, &file_name, &jpeg)?;

        if let Some(ref cb) = config.progress_callback {
            cb.on_page_written(pdf_path, &output_path, page_num, page_count);
        }
        result.outputs.push(output_path);
    }

    Ok(())
}
