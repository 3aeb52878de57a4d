//! Keyword anchors and index links.

/// Markdown index entry linking to a keyword heading.
pub fn render_toc_item(keyword: &str) -> String {
    format!("* [{}](#{})", keyword, github_slug(keyword))
}

/// GitHub heading anchor slug: lowercase, keep alphanumerics, spaces,
/// hyphens and underscores, then spaces become hyphens.
pub fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}

/// Element id of a keyword section in the HTML page.
pub fn keyword_anchor(keyword: &str) -> String {
    keyword.to_lowercase().replace(' ', "-")
}
