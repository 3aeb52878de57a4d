//! Line highlighter for Robot Framework test data.
//!
//! Lines are classified first (comment, section header, setting, test or
//! keyword name, indented step). Step content then goes through token
//! highlighting, which marks variables, keyword names and `name=value`
//! arguments in separate passes over a placeholder skeleton.

use super::spans::{self, SpanTable};
use crate::markup::inline::escape_html;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Language tag of fenced blocks handled here.
pub const LANGUAGE: &str = "robot";

const SETTINGS: &[&str] = &[
    "Library",
    "Resource",
    "Variables",
    "Documentation",
    "Metadata",
    "Suite Setup",
    "Suite Teardown",
    "Test Setup",
    "Test Teardown",
    "Test Template",
    "Test Timeout",
    "Test Tags",
    "Task Setup",
    "Task Teardown",
    "Task Template",
    "Task Timeout",
    "Task Tags",
    "Keyword Tags",
    "Default Tags",
    "Force Tags",
    "Tags",
];

const CONTROL_FLOW: &[&str] = &[
    "IF",
    "ELSE IF",
    "ELSE",
    "END",
    "FOR",
    "IN",
    "IN RANGE",
    "IN ENUMERATE",
    "IN ZIP",
    "WHILE",
    "TRY",
    "EXCEPT",
    "FINALLY",
    "BREAK",
    "CONTINUE",
    "RETURN",
    "VAR",
];

const VARIABLE_SIGILS: &[&str] = &["${", "@{", "&{"];

static SETTINGS_LONGEST_FIRST: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut settings = SETTINGS.to_vec();
    settings.sort_by_key(|s| std::cmp::Reverse(s.len()));
    settings
});

static RE_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$@&]\{[^}]+\}").unwrap());

// `name=value` preceded by start or whitespace; the value is either a single
// marker or plain text up to the next whitespace or marker
static RE_ARGUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(^|\s)([A-Za-z_][A-Za-z0-9_]*)=(\x{E000}[\x{E010}-\x{E019}]+\x{E001}|[^\s\x{E000}]*)",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Comment,
    Section,
    Setting,
    TestName,
    Keyword,
    ControlFlow,
    Variable,
    Argument,
}

impl Style {
    fn css(self) -> &'static str {
        match self {
            Style::Comment => "color: #6a9955; font-style: italic;",
            Style::Section => "color: #569cd6; font-weight: bold;",
            Style::Setting => "color: #c586c0; font-weight: bold;",
            Style::TestName => "color: #dcdcaa; font-weight: bold;",
            Style::Keyword => "color: #4ec9b0; font-weight: bold;",
            Style::ControlFlow => "color: #d7ba7d; font-weight: bold;",
            Style::Variable => "color: #9cdcfe;",
            Style::Argument => "color: #dcdcaa;",
        }
    }
}

fn span(style: Style, html: &str) -> String {
    format!(r#"<span style="{}">{}</span>"#, style.css(), html)
}

fn is_boundary(c: Option<char>) -> bool {
    c.map_or(true, char::is_whitespace)
}

/// A keyword may also start an argument value (`name=Keyword`).
fn is_keyword_start(c: Option<char>) -> bool {
    is_boundary(c) || c == Some('=')
}

/// Highlights Robot Framework lines against a keyword vocabulary.
pub struct LineHighlighter<'a> {
    /// Vocabulary and control-flow words, longest first.
    keywords: Vec<(&'a str, Style)>,
}

impl<'a> LineHighlighter<'a> {
    pub fn new(vocabulary: &'a [String]) -> Self {
        let mut keywords: Vec<(&'a str, Style)> = CONTROL_FLOW
            .iter()
            .map(|k| (*k, Style::ControlFlow))
            .chain(
                vocabulary
                    .iter()
                    .filter(|k| !k.is_empty())
                    .map(|k| (k.as_str(), Style::Keyword)),
            )
            .collect();
        // stable: a control-flow word shadows an identical vocabulary entry
        keywords.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));
        keywords.dedup_by(|later, earlier| later.0 == earlier.0);
        Self { keywords }
    }

    /// Highlight a block, line by line.
    pub fn highlight(&self, code: &str) -> String {
        code.split('\n')
            .map(|line| self.highlight_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn highlight_line(&self, line: &str) -> String {
        if line.is_empty() {
            return String::new();
        }
        let trimmed = line.trim();

        if trimmed.starts_with('#') {
            return span(Style::Comment, &escape_html(line));
        }
        if trimmed.starts_with("***") {
            return span(Style::Section, &escape_html(line));
        }

        let content = line.trim_start_matches([' ', '\t']);
        let indent = &line[..line.len() - content.len()];

        if indent.is_empty() {
            if let Some(setting) = match_setting(line) {
                let value = &line[setting.len()..];
                return format!(
                    "{}{}",
                    span(Style::Setting, &escape_html(setting)),
                    escape_html(value)
                );
            }
            if !line.starts_with('[') {
                return span(Style::TestName, &escape_html(line));
            }
            return self.highlight_tokens(line);
        }

        if content.is_empty() {
            return indent.to_string();
        }
        if VARIABLE_SIGILS.iter().any(|s| content.starts_with(s)) {
            return format!("{indent}{}", self.highlight_tokens(content));
        }
        if let Some((keyword, style)) = self.match_keyword_prefix(content) {
            let rest = &content[keyword.len()..];
            return format!(
                "{indent}{}{}",
                span(style, &escape_html(keyword)),
                self.highlight_tokens(rest)
            );
        }
        format!("{indent}{}", self.highlight_tokens(content))
    }

    fn match_keyword_prefix(&self, content: &str) -> Option<(&'a str, Style)> {
        self.keywords.iter().copied().find(|(keyword, _)| {
            content.starts_with(keyword) && is_boundary(content[keyword.len()..].chars().next())
        })
    }

    /// Variables, keyword names, arguments, then a trailing comment.
    fn highlight_tokens(&self, text: &str) -> String {
        let mut table = SpanTable::default();
        let text = spans::sanitize(text);

        let skeleton = RE_VARIABLE
            .replace_all(&text, |caps: &Captures| {
                table.insert(&caps[0], span(Style::Variable, &escape_html(&caps[0])))
            })
            .into_owned();
        let skeleton = self.mark_keywords(skeleton, &mut table);
        let skeleton = mark_arguments(&skeleton, &mut table);

        let (code, comment) = split_comment(&skeleton);
        let mut out = table.expand(code, escape_html);
        if let Some(comment) = comment {
            out.push_str(&span(Style::Comment, &escape_html(&table.restore(comment))));
        }
        out
    }

    fn mark_keywords(&self, mut text: String, table: &mut SpanTable) -> String {
        for &(keyword, style) in &self.keywords {
            if !text.contains(keyword) {
                continue;
            }
            let mut out = String::with_capacity(text.len());
            let mut rest = text.as_str();
            let mut prev: Option<char> = None;

            while let Some(pos) = rest.find(keyword) {
                let before = rest[..pos].chars().next_back().or(prev);
                let after = rest[pos + keyword.len()..].chars().next();
                if is_keyword_start(before) && is_boundary(after) {
                    out.push_str(&rest[..pos]);
                    out.push_str(&table.insert(keyword, span(style, &escape_html(keyword))));
                    prev = keyword.chars().next_back();
                    rest = &rest[pos + keyword.len()..];
                } else {
                    let step = pos + rest[pos..].chars().next().map_or(1, char::len_utf8);
                    out.push_str(&rest[..step]);
                    prev = rest[..step].chars().next_back();
                    rest = &rest[step..];
                }
            }
            out.push_str(rest);
            text = out;
        }
        text
    }
}

fn match_setting(line: &str) -> Option<&'static str> {
    SETTINGS_LONGEST_FIRST.iter().copied().find(|setting| {
        line.starts_with(setting) && is_boundary(line[setting.len()..].chars().next())
    })
}

/// Replace each `name=value` with a single argument span. A value that is
/// already a marker is embedded as its finished HTML.
fn mark_arguments(skeleton: &str, table: &mut SpanTable) -> String {
    RE_ARGUMENT
        .replace_all(skeleton, |caps: &Captures| {
            let lead = &caps[1];
            let name = &caps[2];
            let value = &caps[3];

            let (value_raw, value_html) = match spans::leading_marker(value) {
                Some((id, len)) if len == value.len() => {
                    (table.raw(id).to_string(), table.html(id).to_string())
                }
                _ => (value.to_string(), escape_html(value)),
            };

            let html = format!("{}={}", span(Style::Argument, &escape_html(name)), value_html);
            let marker = table.insert(format!("{name}={value_raw}"), html);
            format!("{lead}{marker}")
        })
        .into_owned()
}

/// Split off a trailing `#` comment that starts the text or follows whitespace.
fn split_comment(skeleton: &str) -> (&str, Option<&str>) {
    let mut prev: Option<char> = None;
    for (i, c) in skeleton.char_indices() {
        if c == '#' && is_boundary(prev) {
            return (&skeleton[..i], Some(&skeleton[i..]));
        }
        prev = Some(c);
    }
    (skeleton, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vocab(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn styled(style: Style, text: &str) -> String {
        span(style, text)
    }

    #[test]
    fn empty_line() {
        let v = vocab(&[]);
        assert_eq!(LineHighlighter::new(&v).highlight_line(""), "");
    }

    #[test]
    fn comment_and_section_lines() {
        let v = vocab(&[]);
        let h = LineHighlighter::new(&v);
        assert_eq!(
            h.highlight_line("    # note <x>"),
            styled(Style::Comment, "    # note &lt;x&gt;")
        );
        assert_eq!(
            h.highlight_line("*** Test Cases ***"),
            styled(Style::Section, "*** Test Cases ***")
        );
    }

    #[test]
    fn setting_name_and_value() {
        let v = vocab(&[]);
        let h = LineHighlighter::new(&v);
        assert_eq!(
            h.highlight_line("Suite Setup    Open Browser"),
            format!("{}    Open Browser", styled(Style::Setting, "Suite Setup"))
        );
        // Only at a word boundary
        assert_eq!(
            h.highlight_line("Libraryish Test"),
            styled(Style::TestName, "Libraryish Test")
        );
    }

    #[test]
    fn unindented_line_is_test_name() {
        let v = vocab(&["Log"]);
        assert_eq!(
            LineHighlighter::new(&v).highlight_line("Valid Login"),
            styled(Style::TestName, "Valid Login")
        );
    }

    #[test]
    fn keyword_prefers_longest_match() {
        let v = vocab(&["Run Keyword", "Run Keyword If"]);
        let line = LineHighlighter::new(&v).highlight_line("    Run Keyword If    1 == 1    Log");
        assert!(line.starts_with(&format!("    {}", styled(Style::Keyword, "Run Keyword If"))));
        assert_eq!(line.matches("<span").count(), 1);
    }

    #[test]
    fn argument_value_embeds_keyword_span() {
        let v = vocab(&["Register Keyword To Run On Failure", "Log"]);
        let line = LineHighlighter::new(&v)
            .highlight_line("    Register Keyword To Run On Failure    keyword=Log");
        assert_eq!(
            line,
            format!(
                "    {}    {}={}",
                styled(Style::Keyword, "Register Keyword To Run On Failure"),
                styled(Style::Argument, "keyword"),
                styled(Style::Keyword, "Log"),
            )
        );
    }

    #[test]
    fn keyword_value_needs_trailing_boundary() {
        let v = vocab(&["Log"]);
        let line = LineHighlighter::new(&v).highlight_line("    Log    msg=Logout");
        assert_eq!(
            line,
            format!(
                "    {}    {}=Logout",
                styled(Style::Keyword, "Log"),
                styled(Style::Argument, "msg"),
            )
        );
    }

    #[test]
    fn keyword_needs_word_boundary() {
        let v = vocab(&["Log"]);
        let line = LineHighlighter::new(&v).highlight_line("    Logout User");
        assert_eq!(line, "    Logout User");
    }

    #[test]
    fn control_flow_style() {
        let v = vocab(&[]);
        let line = LineHighlighter::new(&v).highlight_line("    FOR    ${item}    IN    @{items}");
        assert!(line.starts_with(&format!("    {}", styled(Style::ControlFlow, "FOR"))));
        assert!(line.contains(&styled(Style::ControlFlow, "IN")));
        assert!(line.contains(&styled(Style::Variable, "${item}")));
        assert!(line.contains(&styled(Style::Variable, "@{items}")));
    }

    #[test]
    fn variable_assignment_line() {
        let v = vocab(&["Get Value"]);
        let line = LineHighlighter::new(&v).highlight_line("    ${result}=    Get Value    key");
        assert_eq!(
            line,
            format!(
                "    {}=    {}    key",
                styled(Style::Variable, "${result}"),
                styled(Style::Keyword, "Get Value")
            )
        );
    }

    #[test]
    fn argument_value_embeds_variable_span() {
        let v = vocab(&["Open Application"]);
        let line = LineHighlighter::new(&v)
            .highlight_line("    Open Application    ${path}    timeout=${limit}");
        assert_eq!(
            line,
            format!(
                "    {}    {}    {}={}",
                styled(Style::Keyword, "Open Application"),
                styled(Style::Variable, "${path}"),
                styled(Style::Argument, "timeout"),
                styled(Style::Variable, "${limit}"),
            )
        );
    }

    #[test]
    fn trailing_comment_restores_markers() {
        let v = vocab(&["Log"]);
        let line = LineHighlighter::new(&v).highlight_line("    Log    ${x}    # prints ${x}");
        assert!(line.ends_with(&styled(Style::Comment, "# prints ${x}")));
        assert_eq!(line.matches(&styled(Style::Variable, "${x}")).count(), 1);
    }

    #[test]
    fn markup_in_arguments_is_escaped() {
        let v = vocab(&["Log"]);
        let line = LineHighlighter::new(&v).highlight_line("    Log    <b>&</b>");
        assert!(line.ends_with("    &lt;b&gt;&amp;&lt;/b&gt;"));
    }

    #[test]
    fn keyword_inside_arguments() {
        let v = vocab(&["Run Keyword", "Log"]);
        let line = LineHighlighter::new(&v).highlight_line("    Run Keyword    Log    hello");
        assert_eq!(
            line,
            format!(
                "    {}    {}    hello",
                styled(Style::Keyword, "Run Keyword"),
                styled(Style::Keyword, "Log")
            )
        );
    }

    #[test]
    fn private_use_characters_cannot_forge_markers() {
        let v = vocab(&[]);
        let line = LineHighlighter::new(&v).highlight_line("    x=\u{E000}\u{E010}\u{E001}");
        assert!(line.contains('\u{FFFD}'));
        assert!(!line.contains('\u{E000}'));
    }

    #[test]
    fn whole_block() {
        let v = vocab(&["Log"]);
        let html = LineHighlighter::new(&v).highlight("*** Test Cases ***\nExample\n    Log    hi");
        assert_eq!(html.lines().count(), 3);
    }
}
