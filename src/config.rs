//! Configuration types for PDF-to-JPEG batch conversion.
//!
//! Rendering and encoding knobs live in [`ConversionConfig`], built via its
//! [`ConversionConfigBuilder`]. Directory paths are *not* part of the config:
//! they are passed explicitly to [`crate::convert::convert_directory`] so the
//! same config can drive several batches.

use crate::error::Pdf2JpgError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Default rendering resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 300;

/// Default JPEG quality (1–100).
pub const DEFAULT_QUALITY: u8 = 95;

/// Default source directory used by the CLI.
pub const DEFAULT_PDF_DIR: &str = "./pdfs";

/// Default output directory used by the CLI.
pub const DEFAULT_OUTPUT_DIR: &str = "./static/images";

/// Highest accepted DPI.
pub const MAX_DPI: u32 = 2400;

/// Configuration for a batch conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_pdf2jpg::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .dpi(150)
///     .quality(85)
///     .build()
///     .unwrap();
/// assert_eq!(config.dpi, 150);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Rendering DPI. Range: 1–2400. Default: 300.
    ///
    /// Page coordinates are in points (1/72 inch), so every page is scaled by
    /// `dpi / 72` before rasterisation.
    pub dpi: u32,

    /// JPEG quality. Range: 1–100. Default: 95.
    pub quality: u8,

    /// Receives batch, file and page events. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            quality: DEFAULT_QUALITY,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("dpi", &self.dpi)
            .field("quality", &self.quality)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Scale factor from page points to pixels.
    pub fn scale(&self) -> f32 {
        self.dpi as f32 / 72.0
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.config.quality = quality;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2JpgError> {
        let c = &self.config;
        if c.dpi == 0 || c.dpi > MAX_DPI {
            return Err(Pdf2JpgError::InvalidConfig(format!(
                "DPI must be 1–{MAX_DPI}, got {}",
                c.dpi
            )));
        }
        if c.quality == 0 || c.quality > 100 {
            return Err(Pdf2JpgError::InvalidConfig(format!(
                "JPEG quality must be 1–100, got {}",
                c.quality
            )));
        }
        Ok(self.config)
    }
}
