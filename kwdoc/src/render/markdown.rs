//! Markdown renderer.
//!
//! Descriptions are already HTML and are embedded as-is; GitHub-flavored
//! markdown passes block-level HTML through untouched.

use crate::render::Renderer;
use crate::toc;
use anyhow::Result;
use kwdoc_core::{KeywordSignature, LibraryDocument};

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &LibraryDocument) -> Result<String> {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("# {}\n", doc.name));
        lines.push(format!("**Version:** {}  ", doc.version));
        lines.push(format!("**Scope:** {}\n", doc.scope));

        if !doc.description.is_empty() {
            lines.push("## Description\n".to_string());
            lines.push(doc.description.clone());
            lines.push(String::new());
        }

        if !doc.keywords.is_empty() {
            lines.push("## Index\n".to_string());
            for kw in &doc.keywords {
                lines.push(toc::render_toc_item(&kw.name));
            }
            lines.push(String::new());

            lines.push("## Keywords\n".to_string());
            for kw in &doc.keywords {
                lines.push(render_keyword(kw));
            }
        }

        let mut out = lines.join("\n");
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_keyword(kw: &KeywordSignature) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("### {}\n", kw.name));

    if !kw.description.is_empty() {
        lines.push(kw.description.clone());
        lines.push(String::new());
    }

    if !kw.parameters.is_empty() {
        lines.push("**Parameters:**\n".to_string());
        for param in &kw.parameters {
            lines.push(format!("- `{}`", param));
        }
        lines.push(String::new());
    }

    if kw.return_type != "None" {
        lines.push(format!("**Returns:** `{}`\n", kw.return_type));
    }

    lines.join("\n")
}
