//! Image encoding: `DynamicImage` → baseline JPEG bytes → file on disk.
//!
//! `jpeg-encoder` is used instead of `image`'s built-in JPEG encoder because
//! it exposes optimised Huffman tables and the chroma subsampling factor.
//! Pages are encoded with 4:2:0 subsampling and per-image Huffman tables.

use crate::error::FileError;
use image::DynamicImage;
use jpeg_encoder::{ColorType, Encoder, SamplingFactor};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Encode a rasterised page as JPEG at `quality` (1–100).
///
/// `page` (1-indexed) is only used to label errors. Alpha is dropped: pdfium
/// renders onto an opaque white background, so RGB loses nothing.
pub fn encode_jpeg(img: &DynamicImage, quality: u8, page: usize) -> Result<Vec<u8>, FileError> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let too_large = |axis: &str, px: u32| FileError::EncodeFailed {
        page,
        detail: format!("{axis} of {px} px exceeds the JPEG limit of {} px", u16::MAX),
    };
    let w = u16::try_from(width).map_err(|_| too_large("width", width))?;
    let h = u16::try_from(height).map_err(|_| too_large("height", height))?;

    let mut buf = Vec::with_capacity(rgb.as_raw().len() / 8);
    let mut encoder = Encoder::new(&mut buf, quality);
    encoder.set_sampling_factor(SamplingFactor::R_4_2_0);
    encoder.set_optimized_huffman_tables(true);
    encoder
        .encode(rgb.as_raw(), w, h, ColorType::Rgb)
        .map_err(|e| FileError::EncodeFailed {
            page,
            detail: e.to_string(),
        })?;

    debug!("Encoded page {} → {}x{} px, {} bytes", page, width, height, buf.len());
    Ok(buf)
}

/// Write `bytes` to `output_dir/file_name`, replacing any existing file.
///
/// The bytes go to a temporary file in `output_dir` first and are renamed
/// over the target, so an interrupted write never leaves a truncated JPEG
/// under the final name.
pub fn write_atomic(output_dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, FileError> {
    let path = output_dir.join(file_name);
    let write_failed = |detail: String| FileError::WriteFailed {
        path: path.clone(),
        detail,
    };

    let mut tmp = NamedTempFile::new_in(output_dir).map_err(|e| write_failed(e.to_string()))?;
    tmp.write_all(bytes).map_err(|e| write_failed(e.to_string()))?;
    tmp.flush().map_err(|e| write_failed(e.to_string()))?;
    tmp.persist(&path)
        .map_err(|e| write_failed(e.error.to_string()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn noisy(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            let v = (x * 31 + y * 17 + (x ^ y) * 7) % 256;
            Rgb([v as u8, (255 - v) as u8, ((x * y) % 256) as u8])
        }))
    }

    #[test]
    fn encode_small_image() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 6, Rgba([255, 0, 0, 255])));
        let bytes = encode_jpeg(&img, 95, 1).expect("encode should succeed");

        assert_eq!(&bytes[..2], &[0xFF, 0xD8], "missing SOI marker");
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9], "missing EOI marker");

        let decoded = image::load_from_memory(&bytes).expect("valid JPEG");
        assert_eq!((decoded.width(), decoded.height()), (10, 6));
    }

    #[test]
    fn lower_quality_yields_smaller_file() {
        let img = noisy(128, 96);
        let high = encode_jpeg(&img, 95, 1).unwrap();
        let low = encode_jpeg(&img, 10, 1).unwrap();
        assert!(low.len() < high.len(), "q10={} q95={}", low.len(), high.len());
    }

    #[test]
    fn write_atomic_overwrites_and_leaves_no_temp_files() {
        let tmp = TempDir::new().unwrap();

        let first = write_atomic(tmp.path(), "page.jpg", b"first").unwrap();
        let second = write_atomic(tmp.path(), "page.jpg", b"second").unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read(&second).unwrap(), b"second");
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_atomic_reports_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("gone");
        let err = write_atomic(&missing, "page.jpg", b"x").unwrap_err();
        match err {
            FileError::WriteFailed { path, .. } => assert_eq!(path, missing.join("page.jpg")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
