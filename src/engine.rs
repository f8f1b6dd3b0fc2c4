//! Binding to the pdfium shared library.
//!
//! `pdfium-render` loads pdfium dynamically at runtime. Candidates are tried
//! in order, first success wins:
//!
//! 1. `PDFIUM_LIB_PATH`: either the library file itself or the directory
//!    holding it.
//! 2. The directory of the running executable, so a `libpdfium` shipped next
//!    to `pdf2jpg` just works.
//! 3. The system library search path (`LD_LIBRARY_PATH`,
//!    `DYLD_LIBRARY_PATH`, `PATH`, standard locations).

use crate::error::Pdf2JpgError;
use pdfium_render::prelude::Pdfium;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an existing pdfium library or its directory.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Resolve a user-supplied location to a library file: directories get the
/// platform library name (`libpdfium.so`, `libpdfium.dylib`, `pdfium.dll`)
/// appended.
pub fn library_path_for(location: &Path) -> PathBuf {
    if location.is_dir() {
        location.join(Pdfium::pdfium_platform_library_name())
    } else {
        location.to_path_buf()
    }
}

/// Explicit library files to try before the system search path.
pub fn candidate_library_paths() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(env_path) = std::env::var_os(PDFIUM_LIB_PATH_ENV) {
        if !env_path.is_empty() {
            candidates.push(library_path_for(Path::new(&env_path)));
        }
    }

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        let beside_exe = exe_dir.join(Pdfium::pdfium_platform_library_name());
        if beside_exe.exists() {
            candidates.push(beside_exe);
        }
    }

    candidates
}

/// Bind to pdfium, trying every candidate in turn.
///
/// The error lists each attempt so the operator can see why a
/// `PDFIUM_LIB_PATH` was rejected.
pub fn bind_pdfium() -> Result<Pdfium, Pdf2JpgError> {
    let mut attempts = Vec::new();

    for path in candidate_library_paths() {
        match Pdfium::bind_to_library(&path) {
            Ok(bindings) => {
                info!("Bound pdfium from {}", path.display());
                return Ok(Pdfium::new(bindings));
            }
            Err(e) => {
                debug!("pdfium bind failed for {}: {}", path.display(), e);
                attempts.push(format!("{}: {}", path.display(), e));
            }
        }
    }

    match Pdfium::bind_to_system_library() {
        Ok(bindings) => {
            info!("Bound pdfium from the system library path");
            Ok(Pdfium::new(bindings))
        }
        Err(e) => {
            attempts.push(format!("system library: {}", e));
            Err(Pdf2JpgError::PdfiumBindingFailed(attempts.join("; ")))
        }
    }
}
