//! Inline span formatting for a single line of documentation text.
//!
//! Each transform is one non-recursive, left-to-right regex pass applied to
//! already-escaped text, in a fixed order.

use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_BOLD_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

static RE_BOLD_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.*?)__").unwrap());

static RE_ITALIC_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());

static RE_ITALIC_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(.*?)_").unwrap());

static RE_UNDERLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+\+(.*?)\+\+").unwrap());

static RE_STRIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~(.*?)~~").unwrap());

static RE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

static RE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Escape the five HTML-special characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Convert one line of raw text into escaped HTML with emphasis, inline code
/// and links.
pub fn format_inline(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let out = escape_html(text);
    let out = RE_BOLD_STARS.replace_all(&out, "<strong>${1}</strong>");
    let out = RE_BOLD_UNDERSCORES.replace_all(&out, "<strong>${1}</strong>");
    let out = RE_ITALIC_STAR.replace_all(&out, "<em>${1}</em>");
    let out = RE_ITALIC_UNDERSCORE.replace_all(&out, "<em>${1}</em>");
    let out = RE_UNDERLINE.replace_all(&out, "<u>${1}</u>");
    let out = RE_STRIKE.replace_all(&out, "<del>${1}</del>");
    let out = RE_CODE.replace_all(&out, "<code>${1}</code>");
    let out = RE_LINK.replace_all(&out, r#"<a href="${2}">${1}</a>"#);
    out.into_owned()
}
