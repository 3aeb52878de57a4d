//! Scanner module: dispatch by file extension.

pub mod annotation;
pub mod python;

use anyhow::{anyhow, Result};
use kwdoc_core::LibrarySource;
use std::path::Path;

/// File extensions recognized as library sources.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["py"];

/// Scan a library source file. Module-level libraries are named after the
/// file stem.
pub fn scan_file(path: &Path, content: &str) -> Result<LibrarySource> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("py") => {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Library");
            Ok(python::scan(content, stem))
        }
        _ => Err(anyhow!("unsupported file type: {}", path.display())),
    }
}
