//! Output formats for a rendered library.
//!
//! Keyword descriptions arrive as finished HTML; each format decides how to
//! frame them together with the library metadata and signatures.

pub mod html;
pub mod json;
pub mod markdown;

use anyhow::{bail, Result};
use kwdoc_core::LibraryDocument;

/// Names accepted by `-f/--format`, in the order shown in errors.
const FORMAT_NAMES: &[&str] = &["markdown", "html", "json"];

/// Writes one library document in a single output format.
pub trait Renderer {
    fn render(&self, doc: &LibraryDocument) -> Result<String>;
    /// Extension of generated files, without the dot.
    fn file_extension(&self) -> &str;
}

/// Pick the renderer for a `--format` value. `md` is accepted for markdown
/// and names are case-insensitive.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    let renderer: Box<dyn Renderer> = match format.to_ascii_lowercase().as_str() {
        "markdown" | "md" => Box::new(markdown::MarkdownRenderer),
        "html" => Box::new(html::HtmlRenderer),
        "json" => Box::new(json::JsonRenderer),
        _ => bail!(
            "unknown format: {}. Use one of: {}",
            format,
            FORMAT_NAMES.join(", ")
        ),
    };
    Ok(renderer)
}
