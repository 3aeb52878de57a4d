//! Fenced code block highlighting.
//!
//! A block is offered to an ordered list of strategies; the first one that
//! accepts the language produces the HTML. Plain-text escaping always accepts,
//! so rendering never fails.

pub mod robot;
pub mod spans;

use crate::markup::inline::escape_html;
use robot::LineHighlighter;

const PLAIN_TEXT: &str = "text";

/// An external syntax highlighter for general-purpose languages.
pub trait GenericLexer {
    /// Highlighted HTML for `code`, or `None` if `language` is not supported.
    fn highlight(&self, code: &str, language: &str) -> Option<String>;
}

/// One way of turning a code block into HTML.
trait Strategy {
    fn render(&self, code: &str, language: &str) -> Option<String>;
}

struct RobotStrategy<'a> {
    vocabulary: &'a [String],
}

impl Strategy for RobotStrategy<'_> {
    fn render(&self, code: &str, language: &str) -> Option<String> {
        (language == robot::LANGUAGE).then(|| LineHighlighter::new(self.vocabulary).highlight(code))
    }
}

/// Unknown languages fall back to the lexer's own plain-text mode.
struct LexerStrategy<'a> {
    lexer: &'a dyn GenericLexer,
}

impl Strategy for LexerStrategy<'_> {
    fn render(&self, code: &str, language: &str) -> Option<String> {
        self.lexer
            .highlight(code, language)
            .or_else(|| self.lexer.highlight(code, PLAIN_TEXT))
    }
}

struct PlainText;

impl Strategy for PlainText {
    fn render(&self, code: &str, _language: &str) -> Option<String> {
        Some(escape_html(code))
    }
}

/// Highlight the body of a fenced block. Trailing blank lines are dropped.
pub fn render_code_block(
    lines: &[String],
    language: &str,
    vocabulary: &[String],
    lexer: Option<&dyn GenericLexer>,
) -> String {
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(0, |i| i + 1);
    let code = lines[..end].join("\n");

    let robot = RobotStrategy { vocabulary };
    let external = lexer.map(|lexer| LexerStrategy { lexer });
    let strategies: [Option<&dyn Strategy>; 3] = [
        Some(&robot),
        external.as_ref().map(|s| s as &dyn Strategy),
        Some(&PlainText),
    ];

    let html = strategies
        .into_iter()
        .flatten()
        .find_map(|s| s.render(&code, language))
        .unwrap_or_default();
    html
}
