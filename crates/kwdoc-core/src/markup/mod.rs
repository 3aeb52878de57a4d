//! Docstring markup: a small line-oriented dialect rendered to HTML.
//!
//! Parsing is a line-by-line state machine producing [`MarkupBlock`]s;
//! rendering walks the blocks and hands fenced code to a caller-supplied
//! code renderer so highlighting can use run-scoped state.

pub mod inline;
pub mod table;

use inline::{escape_html, format_inline};
use table::render_table;

const FENCE: &str = "```";
const DEFAULT_LANGUAGE: &str = "text";

/// A block-level element of docstring markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupBlock {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    List { items: Vec<String> },
    /// Raw `|`-delimited lines; separator rows are dropped at render time.
    Table { lines: Vec<String> },
    CodeBlock { language: String, lines: Vec<String> },
    HorizontalRule,
    /// An explicit line break between two pieces of content.
    Blank,
}

// -- Parser state -------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentKind {
    Heading,
    Paragraph,
}

#[derive(Default)]
struct ParserState {
    blocks: Vec<MarkupBlock>,

    code: Option<(String, Vec<String>)>,
    table: Option<Vec<String>>,
    list: Option<Vec<String>>,

    just_closed_table: bool,
    prev_line_was_content: bool,
    prev_content: Option<ContentKind>,
}

impl ParserState {
    fn close_table(&mut self) {
        if let Some(lines) = self.table.take() {
            self.blocks.push(MarkupBlock::Table { lines });
            self.just_closed_table = true;
        }
    }

    fn close_list(&mut self) {
        if let Some(items) = self.list.take() {
            self.blocks.push(MarkupBlock::List { items });
        }
    }

    fn close_code(&mut self) {
        if let Some((language, lines)) = self.code.take() {
            self.blocks.push(MarkupBlock::CodeBlock { language, lines });
        }
    }

    fn finish(mut self) -> Vec<MarkupBlock> {
        self.close_code();
        self.close_table();
        self.close_list();
        self.blocks
    }
}

/// Split dedented docstring text into blocks.
pub fn parse_blocks(text: &str) -> Vec<MarkupBlock> {
    let lines: Vec<&str> = text.trim().split('\n').collect();
    let mut state = ParserState::default();

    for (i, raw) in lines.iter().enumerate() {
        process_line(&mut state, raw.trim_end(), &lines[i + 1..]);
    }

    state.finish()
}

fn process_line(state: &mut ParserState, line: &str, rest: &[&str]) {
    // Inside a fence everything is literal until the closing fence
    if state.code.is_some() {
        if line.starts_with(FENCE) {
            state.close_code();
        } else if let Some((_, body)) = state.code.as_mut() {
            body.push(line.to_string());
        }
        return;
    }

    if let Some(tag) = line.strip_prefix(FENCE) {
        state.close_table();
        state.close_list();
        let language = match tag.trim() {
            "" => DEFAULT_LANGUAGE,
            tag => tag,
        };
        state.code = Some((language.to_string(), Vec::new()));
        return;
    }

    if is_table_row(line) {
        state.close_list();
        state.table.get_or_insert_with(Vec::new).push(line.to_string());
        return;
    }
    state.close_table();

    let trimmed = line.trim();

    if let Some((level, text)) = heading(trimmed) {
        state.close_list();
        state.blocks.push(MarkupBlock::Heading {
            level,
            text: text.to_string(),
        });
        state.prev_line_was_content = true;
        state.prev_content = Some(ContentKind::Heading);
        state.just_closed_table = false;
        return;
    }

    if line.starts_with("---") || line.starts_with("***") {
        state.close_list();
        state.blocks.push(MarkupBlock::HorizontalRule);
        return;
    }

    if let Some(item) = trimmed.strip_prefix("- ") {
        state.list.get_or_insert_with(Vec::new).push(item.to_string());
        state.prev_line_was_content = true;
        state.just_closed_table = false;
        return;
    }

    if trimmed.is_empty() {
        if wants_break(state, rest) {
            state.blocks.push(MarkupBlock::Blank);
        }
        state.prev_line_was_content = false;
        state.prev_content = None;
        state.just_closed_table = false;
        return;
    }

    state.close_list();
    state.blocks.push(MarkupBlock::Paragraph {
        text: line.to_string(),
    });
    state.prev_line_was_content = true;
    state.prev_content = Some(ContentKind::Paragraph);
    state.just_closed_table = false;
}

fn is_table_row(line: &str) -> bool {
    line.strip_prefix('|').is_some_and(|rest| rest.contains('|'))
}

/// `# Title` through `###### Title`.
fn heading(trimmed: &str) -> Option<(u8, &str)> {
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let text = trimmed[level..].strip_prefix(' ')?;
    Some((level as u8, text))
}

/// A blank line becomes a `<br>` only between pieces of standalone content.
fn wants_break(state: &ParserState, rest: &[&str]) -> bool {
    if state.list.is_some() || state.table.is_some() || state.just_closed_table {
        return false;
    }
    if state.prev_content == Some(ContentKind::Paragraph) || !state.prev_line_was_content {
        return false;
    }
    let next = rest.iter().find(|l| !l.trim().is_empty());
    !next.is_some_and(|l| l.starts_with(FENCE))
}

// -- Rendering ----------------------------------------------------------------

/// Render blocks to HTML, one fragment per line.
///
/// `render_code` receives the raw lines and language tag of each fenced block
/// and returns the highlighted body.
pub fn render_blocks<F>(blocks: &[MarkupBlock], mut render_code: F) -> String
where
    F: FnMut(&[String], &str) -> String,
{
    let mut out: Vec<String> = Vec::with_capacity(blocks.len());

    for block in blocks {
        match block {
            MarkupBlock::Heading { level, text } => {
                out.push(format!("<h{level}>{}</h{level}>", format_inline(text)));
            }
            MarkupBlock::Paragraph { text } => {
                out.push(format!("<p>{}</p>", format_inline(text)));
            }
            MarkupBlock::List { items } => {
                out.push("<ul>".to_string());
                for item in items {
                    out.push(format!("<li>{}</li>", format_inline(item)));
                }
                out.push("</ul>".to_string());
            }
            MarkupBlock::Table { lines } => out.push(render_table(lines)),
            MarkupBlock::CodeBlock { language, lines } => {
                out.push(format!(
                    r#"<div class="code-block"><pre class="language-{}">"#,
                    escape_html(language)
                ));
                let body = render_code(lines, language);
                if !body.is_empty() {
                    out.push(body);
                }
                out.push("</pre></div>".to_string());
            }
            MarkupBlock::HorizontalRule => out.push("<hr>".to_string()),
            MarkupBlock::Blank => out.push("<br>".to_string()),
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(lines: &[String], _language: &str) -> String {
        escape_html(&lines.join("\n"))
    }

    fn render(text: &str) -> String {
        render_blocks(&parse_blocks(text), plain)
    }

    #[test]
    fn single_paragraph() {
        assert_eq!(render("Opens the application."), "<p>Opens the application.</p>");
    }

    #[test]
    fn headings_by_level() {
        assert_eq!(
            parse_blocks("# One\n### Three\n###### Six\n####### Seven"),
            vec![
                MarkupBlock::Heading { level: 1, text: "One".into() },
                MarkupBlock::Heading { level: 3, text: "Three".into() },
                MarkupBlock::Heading { level: 6, text: "Six".into() },
                MarkupBlock::Paragraph { text: "####### Seven".into() },
            ]
        );
    }

    #[test]
    fn hashtag_without_space_is_paragraph() {
        assert_eq!(render("#tag"), "<p>#tag</p>");
    }

    #[test]
    fn list_items_group_into_one_list() {
        assert_eq!(
            render("Steps:\n- first\n- second\nDone."),
            "<p>Steps:</p>\n<ul>\n<li>first</li>\n<li>second</li>\n</ul>\n<p>Done.</p>"
        );
    }

    #[test]
    fn blank_line_does_not_close_list() {
        assert_eq!(
            parse_blocks("- a\n\n- b"),
            vec![MarkupBlock::List { items: vec!["a".into(), "b".into()] }]
        );
    }

    #[test]
    fn heading_closes_list() {
        assert_eq!(
            render("- a\n# Next"),
            "<ul>\n<li>a</li>\n</ul>\n<h1>Next</h1>"
        );
    }

    #[test]
    fn horizontal_rule() {
        assert_eq!(render("Above\n---\nBelow"), "<p>Above</p>\n<hr>\n<p>Below</p>");
    }

    #[test]
    fn blank_after_paragraph_emits_nothing() {
        assert_eq!(render("First.\n\nSecond."), "<p>First.</p>\n<p>Second.</p>");
    }

    #[test]
    fn blank_after_heading_emits_break() {
        assert_eq!(render("# Title\n\nBody"), "<h1>Title</h1>\n<br>\n<p>Body</p>");
    }

    #[test]
    fn blank_before_fence_emits_nothing() {
        let html = render("# Title\n\n```\nx\n```");
        assert!(!html.contains("<br>"));
    }

    #[test]
    fn blank_after_table_emits_nothing() {
        let blocks = parse_blocks("| a | b |\n| 1 | 2 |\n\nAfter");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], MarkupBlock::Table { .. }));
    }

    #[test]
    fn table_closes_on_plain_line() {
        let blocks = parse_blocks("| a | b |\n|---|---|\n| 1 | 2 |\nAfter");
        assert_eq!(
            blocks,
            vec![
                MarkupBlock::Table {
                    lines: vec!["| a | b |".into(), "|---|---|".into(), "| 1 | 2 |".into()],
                },
                MarkupBlock::Paragraph { text: "After".into() },
            ]
        );
    }

    #[test]
    fn fenced_code_block() {
        assert_eq!(
            render("```python\nx = 1 < 2\n```"),
            "<div class=\"code-block\"><pre class=\"language-python\">\nx = 1 &lt; 2\n</pre></div>"
        );
    }

    #[test]
    fn fence_without_language_defaults_to_text() {
        assert_eq!(
            parse_blocks("```\nplain\n```"),
            vec![MarkupBlock::CodeBlock {
                language: "text".into(),
                lines: vec!["plain".into()],
            }]
        );
    }

    #[test]
    fn unterminated_fence_closes_at_end() {
        assert_eq!(
            parse_blocks("```robot\n    Log    one\n    Log    two"),
            vec![MarkupBlock::CodeBlock {
                language: "robot".into(),
                lines: vec!["    Log    one".into(), "    Log    two".into()],
            }]
        );
    }

    #[test]
    fn code_lines_are_not_markup() {
        let blocks = parse_blocks("```\n# not a heading\n- not a list\n```");
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn surrounding_blank_lines_are_ignored() {
        assert_eq!(render("\n\n  Text  \n\n"), "<p>Text</p>");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(render(""), "");
    }
}
