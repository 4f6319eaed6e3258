//! Output helpers.
//!
//! - SVG document writing (`write_document`)
//! - joined-table CSV export (`export`)

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::AppError;

pub mod export;

pub use export::*;

/// Write the SVG to `path`, or to stdout when no path is given.
pub fn write_document(path: Option<&Path>, document: &str) -> Result<(), AppError> {
    match path {
        Some(path) => fs::write(path, document)
            .map_err(|e| AppError::input(format!("Failed to write SVG '{}': {e}", path.display()))),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(document.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|e| AppError::input(format!("Failed to write SVG to stdout: {e}")))
        }
    }
}
