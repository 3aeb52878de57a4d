//! Pipe-delimited table rendering.

use super::inline::format_inline;
use regex::Regex;
use std::sync::LazyLock;

static RE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|[\s\-|]+\|$").unwrap());

const OPEN_TABLE: &str = r#"<table class="doc-table">"#;

/// Render a run of `| a | b |` lines as an HTML table.
///
/// Separator rows are skipped; the first remaining row becomes the header.
pub fn render_table(lines: &[String]) -> String {
    let mut rows = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !RE_SEPARATOR.is_match(line))
        .map(split_cells);

    let Some(header) = rows.next() else {
        return format!("{OPEN_TABLE}</table>");
    };

    let mut out = vec![OPEN_TABLE.to_string(), "<thead><tr>".to_string()];
    for cell in &header {
        out.push(format!("<th>{}</th>", format_inline(cell)));
    }
    out.push("</tr></thead><tbody>".to_string());

    for row in rows {
        out.push("<tr>".to_string());
        for cell in &row {
            out.push(format!("<td>{}</td>", format_inline(cell)));
        }
        out.push("</tr>".to_string());
    }

    out.push("</tbody></table>".to_string());
    out.join("\n")
}

/// Split a row on `|`, dropping the empty fields left by the outer pipes.
fn split_cells(line: &str) -> Vec<String> {
    let mut cells: Vec<&str> = line.split('|').collect();
    if cells.first().is_some_and(|c| c.trim().is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.trim().is_empty()) {
        cells.pop();
    }
    cells.into_iter().map(|c| c.trim().to_string()).collect()
}
