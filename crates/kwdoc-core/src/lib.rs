//! kwdoc-core: rendering core for Robot Framework library documentation.
//!
//! Turns keyword docstrings written in a small markup dialect into HTML,
//! highlights embedded Robot Framework snippets, and renders parameter type
//! annotations and default values as display strings.
//!
//! ```
//! let html = kwdoc_core::render_markup("**bold** and *italic*");
//! assert_eq!(html, "<p><strong>bold</strong> and <em>italic</em></p>");
//! ```

pub mod config;
pub mod expr;
pub mod highlight;
pub mod markup;
pub mod model;
pub mod renderer;
pub mod signature;
mod stdlib;
pub mod vocabulary;

pub use config::Config;
pub use expr::{render_default, render_type, Constant, DefaultExpr, TypeExpr};
pub use highlight::GenericLexer;
pub use model::{
    FunctionRecord, KeywordSignature, LibraryDocument, LibrarySource, ParamRecord, Parameter,
};
pub use renderer::DocRenderer;
pub use vocabulary::{KeywordNamespaces, KeywordVocabulary, NamespaceError, StandardLibraries};

/// Render docstring markup with a default configuration.
pub fn render_markup(text: &str) -> String {
    DocRenderer::default().render_markup(text)
}
