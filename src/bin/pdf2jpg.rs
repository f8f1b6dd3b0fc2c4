//! CLI binary for edgequake-pdf2jpg.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints progress and the batch summary.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_pdf2jpg::{
    convert_directory, BatchSummary, ConversionConfig, ConversionProgressCallback,
    ProgressCallback, DEFAULT_OUTPUT_DIR, DEFAULT_PDF_DIR,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

/// Wraps text in ANSI escapes, or passes it through when colour is off
/// (stdout is not a terminal).
#[derive(Clone, Copy)]
struct Palette {
    enabled: bool,
}

impl Palette {
    fn for_stdout() -> Self {
        Self {
            enabled: io::stdout().is_terminal(),
        }
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{s}\x1b[0m")
        } else {
            s.to_string()
        }
    }

    fn green(&self, s: &str) -> String {
        self.paint("32", s)
    }
    fn red(&self, s: &str) -> String {
        self.paint("31", s)
    }
    fn dim(&self, s: &str) -> String {
        self.paint("2", s)
    }
    fn bold(&self, s: &str) -> String {
        self.paint("1", s)
    }
    fn cyan(&self, s: &str) -> String {
        self.paint("36", s)
    }
}

const RULE_WIDTH: usize = 50;

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal reporter: a file-level progress bar plus one line per written
/// page and per failed file. The bar (when enabled) is cleared around each
/// line so the two never interleave.
///
/// In quiet mode only the "no PDF files" notice, failed files and the
/// summary line are printed.
struct CliReporter {
    /// File-level progress bar; `None` with `--no-progress` or `--quiet`.
    bar: Option<ProgressBar>,
    out: Mutex<Box<dyn Write + Send>>,
    palette: Palette,
    quiet: bool,
    pdf_dir: PathBuf,
    output_dir: PathBuf,
    dpi: u32,
    quality: u8,
}

impl CliReporter {
    fn new(cli: &Cli, with_bar: bool) -> Arc<Self> {
        let bar = with_bar.then(|| {
            let bar = ProgressBar::new(0); // length set in on_batch_start
            let style = ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  \
                 [{bar:42.green/238}] {pos:>3}/{len} files  \
                 ⏱ {elapsed_precise}  {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
            bar.set_style(style);
            bar.set_prefix("Converting");
            bar
        });

        Arc::new(Self::with_output(
            cli,
            bar,
            Box::new(io::stdout()),
            Palette::for_stdout(),
        ))
    }

    fn with_output(
        cli: &Cli,
        bar: Option<ProgressBar>,
        out: Box<dyn Write + Send>,
        palette: Palette,
    ) -> Self {
        Self {
            bar,
            out: Mutex::new(out),
            palette,
            quiet: cli.quiet,
            pdf_dir: cli.pdf_dir.clone(),
            output_dir: cli.output_dir.clone(),
            dpi: cli.dpi,
            quality: cli.quality,
        }
    }

    fn line(&self, text: String) {
        let write = || {
            if let Ok(mut out) = self.out.lock() {
                // Write errors (closed pipe) are ignored.
                let _ = writeln!(out, "{text}");
            }
        };
        match self.bar {
            Some(ref bar) => bar.suspend(write),
            None => write(),
        }
    }
}

impl ConversionProgressCallback for CliReporter {
    fn on_batch_start(&self, total_files: usize) {
        let p = self.palette;
        if total_files == 0 {
            self.line(format!(
                "{} No PDF files found in {}",
                p.cyan("◆"),
                self.pdf_dir.display()
            ));
            return;
        }
        if self.quiet {
            return;
        }

        self.line(format!(
            "{} {}",
            p.cyan("◆"),
            p.bold(&format!("Found {total_files} PDF files"))
        ));
        self.line(format!("Output directory: {}", self.output_dir.display()));
        self.line(format!("DPI: {}, quality: {}", self.dpi, self.quality));
        self.line("-".repeat(RULE_WIDTH));

        if let Some(ref bar) = self.bar {
            bar.set_length(total_files as u64);
            bar.enable_steady_tick(Duration::from_millis(80));
        }
    }

    fn on_file_start(&self, path: &Path, index: usize, _total: usize) {
        if let Some(ref bar) = self.bar {
            bar.set_position(index.saturating_sub(1) as u64);
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            bar.set_message(name);
        }
    }

    fn on_page_written(&self, source: &Path, output: &Path, page_num: usize, page_count: usize) {
        if self.quiet {
            return;
        }
        let p = self.palette;
        self.line(format!(
            "  {} Converted: {} -> {}  {}",
            p.green("✓"),
            source.display(),
            output.display(),
            p.dim(&format!("{page_num}/{page_count}")),
        ));
    }

    fn on_file_error(&self, path: &Path, error: &str) {
        let p = self.palette;
        self.line(format!(
            "  {} Conversion failed for {}: {}",
            p.red("✗"),
            path.display(),
            p.red(error)
        ));
    }

    fn on_batch_complete(&self, summary: &BatchSummary) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
        if summary.total == 0 {
            return;
        }

        let p = self.palette;
        if self.quiet {
            self.line(summary.summary_line());
            return;
        }

        self.line("-".repeat(RULE_WIDTH));
        let mark = if summary.failed == 0 {
            p.green("✔")
        } else if summary.succeeded == 0 {
            p.red("✘")
        } else {
            p.cyan("⚠")
        };
        self.line(format!(
            "{} {}  {}",
            mark,
            p.bold(&summary.summary_line()),
            p.dim(&format!(
                "{} images, {}ms",
                summary.pages_written, summary.duration_ms
            )),
        ));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert ./pdfs into ./static/images at 300 DPI, quality 95
  pdf2jpg

  # Explicit directories
  pdf2jpg --pdf_dir ~/Desktop/slides --output_dir ./site/img

  # Smaller images for the web
  pdf2jpg --dpi 150 --quality 80

  # Machine-readable summary
  pdf2jpg --json > summary.json

OUTPUT NAMES:
  report.pdf (1 page)   → report.jpg
  deck.pdf   (3 pages)  → deck_page_1.jpg, deck_page_2.jpg, deck_page_3.jpg
  Existing files with the same name are overwritten.

EXIT STATUS:
  0  batch ran (including "no PDF files found" and partial failures)
  1  PDF directory missing, output directory not creatable, or no pdfium

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Path to libpdfium (file or directory)
  RUST_LOG          Override the log filter (e.g. RUST_LOG=debug)
"#;

/// Batch-convert PDF files to JPEG images, one image per page.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2jpg",
    version,
    about = "Batch-convert PDF files to JPEG images, one image per page",
    long_about = "Convert every PDF in a directory to JPEG images, one image per page. \
Pages are rendered with pdfium at the requested DPI and written to the output directory, \
which is created if needed.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Directory containing the PDF files (top level only).
    #[arg(long = "pdf_dir", visible_alias = "pdf-dir", default_value = DEFAULT_PDF_DIR)]
    pdf_dir: PathBuf,

    /// Directory the JPEG files are written to.
    #[arg(long = "output_dir", visible_alias = "output-dir", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Rendering DPI (1–2400).
    #[arg(long, default_value_t = edgequake_pdf2jpg::DEFAULT_DPI,
          value_parser = clap::value_parser!(u32).range(1..=2400))]
    dpi: u32,

    /// JPEG quality (1–100).
    #[arg(long, default_value_t = edgequake_pdf2jpg::DEFAULT_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Print the batch summary as JSON instead of progress lines.
    #[arg(long)]
    json: bool,

    /// Disable the progress bar (per-page lines are still printed).
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Only print failed files and the summary line.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Library logs are noise next to the progress bar; keep them at error
    // unless asked for.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let reporter: Option<ProgressCallback> = if cli.json {
        None
    } else {
        Some(CliReporter::new(&cli, show_progress) as Arc<dyn ConversionProgressCallback>)
    };

    let config = build_config(&cli, reporter)?;

    // ── Run batch ────────────────────────────────────────────────────────
    let summary = convert_directory(&cli.pdf_dir, &cli.output_dir, &config)
        .with_context(|| format!("Cannot convert PDFs in '{}'", cli.pdf_dir.display()))?;

    if cli.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?;
        println!("{json}");
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder().dpi(cli.dpi).quality(cli.quality);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
