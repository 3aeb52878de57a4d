//! Python library scanner: line-oriented, indentation-aware.
//!
//! Finds the Robot Framework keyword library in a module: the first class with
//! `@keyword` methods, or else the module's own `@keyword` functions. No Python
//! runtime is involved; statements are recognized by regex and bracket/string
//! nesting is tracked to find where multi-line constructs end.

use super::annotation::{parse_default, parse_type};
use kwdoc_core::{Constant, DefaultExpr, FunctionRecord, LibrarySource, ParamRecord};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

const DEFAULT_VERSION: &str = "Unknown";
const DEFAULT_SCOPE: &str = "TEST";

// -- Regex patterns -----------------------------------------------------------

static RE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^class\s+([A-Za-z_]\w*)").unwrap());

static RE_DEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:async\s+)?def\s+([A-Za-z_]\w*)\s*\(").unwrap());

static RE_DECORATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@\s*(.+?)\s*$").unwrap());

static RE_KEYWORD_DECORATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z_][\w.]*\.)?keyword\s*(?:\((.*)\))?$").unwrap()
});

// First positional string argument, or name="..."
static RE_DECORATOR_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?:name\s*=\s*)?[rRuU]?(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

static RE_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_]\w*)\s*(?::\s*[^=]+)?=\s*([^=].*)$").unwrap()
});

// -- Scanned structure --------------------------------------------------------

#[derive(Default)]
struct Body {
    docstring: Option<String>,
    assignments: HashMap<String, DefaultExpr>,
    classes: Vec<ClassDef>,
    keywords: Vec<FunctionRecord>,
}

struct ClassDef {
    name: String,
    docstring: String,
    attributes: HashMap<String, DefaultExpr>,
    keywords: Vec<FunctionRecord>,
}

/// Open brackets and string literals carried across lines.
#[derive(Default)]
struct Nesting {
    depth: i32,
    string: Option<&'static str>,
}

const STRING_DELIMITERS: &[&str] = &["\"\"\"", "'''", "\"", "'"];

impl Nesting {
    fn feed(&mut self, line: &str) {
        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            if let Some(delim) = self.string {
                if chars[i] == '\\' {
                    i += 2;
                } else if starts_with_at(&chars, i, delim) {
                    self.string = None;
                    i += delim.len();
                } else {
                    i += 1;
                }
                continue;
            }
            match chars[i] {
                '#' => break,
                '(' | '[' | '{' => self.depth += 1,
                ')' | ']' | '}' => self.depth -= 1,
                '"' | '\'' => {
                    if let Some(delim) = STRING_DELIMITERS
                        .iter()
                        .find(|d| starts_with_at(&chars, i, d))
                    {
                        self.string = Some(*delim);
                        i += delim.len();
                        continue;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        // only triple-quoted strings span lines
        if matches!(self.string, Some("\"" | "'")) {
            self.string = None;
        }
    }

    fn is_open(&self) -> bool {
        self.depth > 0 || self.string.is_some()
    }
}

fn starts_with_at(chars: &[char], i: usize, pattern: &str) -> bool {
    pattern
        .chars()
        .enumerate()
        .all(|(k, p)| chars.get(i + k) == Some(&p))
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn is_code(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

// -- Scanner ------------------------------------------------------------------

struct Source<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Source<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().collect(),
        }
    }

    /// Last line of the statement starting at `start`.
    fn statement_end(&self, start: usize) -> usize {
        let mut nesting = Nesting::default();
        for (i, line) in self.lines.iter().enumerate().skip(start) {
            nesting.feed(line);
            if !nesting.is_open() {
                return i;
            }
        }
        self.lines.len().saturating_sub(1)
    }

    /// First code line at or after `start` indented no deeper than `indent`.
    fn block_end(&self, start: usize, indent: usize) -> usize {
        let mut nesting = Nesting::default();
        for (i, line) in self.lines.iter().enumerate().skip(start) {
            if !nesting.is_open() && is_code(line) && indent_of(line) <= indent {
                return i;
            }
            nesting.feed(line);
        }
        self.lines.len()
    }

    /// A statement consisting of a string literal, dedented.
    fn string_literal(&self, start: usize) -> Option<(String, usize)> {
        let end = self.statement_end(start);
        let text = self.lines[start..=end].join("\n");
        match parse_default(&text) {
            DefaultExpr::Const(Constant::Str(s)) => Some((clean_docstring(&s), end + 1)),
            _ => None,
        }
    }

    fn parse_body(&self, start: usize, end: usize, with_classes: bool) -> Body {
        let mut body = Body::default();
        let Some(indent) = (start..end)
            .find(|&j| is_code(self.lines[j]))
            .map(|j| indent_of(self.lines[j]))
        else {
            return body;
        };

        let mut decorators: Vec<String> = Vec::new();
        let mut first_statement = true;
        let mut i = start;

        while i < end {
            let line = self.lines[i];
            if !is_code(line) || indent_of(line) > indent {
                i += 1;
                continue;
            }
            let trimmed = line.trim();

            if std::mem::take(&mut first_statement) {
                if let Some((doc, next)) = self.string_literal(i) {
                    body.docstring = Some(doc);
                    i = next;
                    continue;
                }
            }

            if trimmed.starts_with('@') {
                let last = self.statement_end(i).min(end.saturating_sub(1));
                let text = self.lines[i..=last]
                    .iter()
                    .map(|l| l.trim())
                    .collect::<Vec<_>>()
                    .join(" ");
                if let Some(caps) = RE_DECORATOR.captures(&text) {
                    decorators.push(caps[1].to_string());
                }
                i = last + 1;
                continue;
            }

            if let Some(caps) = RE_CLASS.captures(trimmed) {
                let class_end = self.block_end(i + 1, indent).min(end);
                if with_classes {
                    let class_body = self.parse_body(i + 1, class_end, false);
                    body.classes.push(ClassDef {
                        name: caps[1].to_string(),
                        docstring: class_body.docstring.unwrap_or_default(),
                        attributes: class_body.assignments,
                        keywords: class_body.keywords,
                    });
                }
                decorators.clear();
                i = class_end;
                continue;
            }

            if RE_DEF.is_match(trimmed) {
                let (record, signature_end) = self.function(i, &decorators);
                decorators.clear();
                body.keywords.extend(record);
                i = self.block_end(signature_end + 1, indent).min(end);
                continue;
            }

            decorators.clear();
            if let Some(caps) = RE_ASSIGN.captures(strip_comment(trimmed).trim_end()) {
                let last = self.statement_end(i);
                let value = if last == i {
                    parse_default(&caps[2])
                } else {
                    DefaultExpr::Unknown
                };
                body.assignments.insert(caps[1].to_string(), value);
            }
            i = self.statement_end(i) + 1;
        }

        body
    }

    /// A `def` statement; returns the keyword record (if decorated as one)
    /// and the last line of the signature.
    fn function(&self, start: usize, decorators: &[String]) -> (Option<FunctionRecord>, usize) {
        let signature_end = self.statement_end(start);
        let Some(keyword_name) = decorators.iter().find_map(|d| keyword_decorator(d)) else {
            return (None, signature_end);
        };

        let signature = self.lines[start..=signature_end]
            .iter()
            .map(|l| strip_comment(l).trim())
            .collect::<Vec<_>>()
            .join(" ");
        let Some(caps) = RE_DEF.captures(&signature) else {
            return (None, signature_end);
        };
        let name = caps[1].to_string();
        let after_open = &signature[caps.get(0).map_or(0, |m| m.end())..];
        let Some(close) = closing_bracket(after_open) else {
            return (None, signature_end);
        };

        let params = split_top_level(&after_open[..close], ',')
            .into_iter()
            .filter_map(parse_param)
            .collect();

        let tail = after_open[close + 1..].trim_start();
        let (returns, after_colon) = match tail.strip_prefix("->") {
            Some(rest) => match find_top_level(rest, ':') {
                Some(colon) => (Some(parse_type(rest[..colon].trim())), &rest[colon + 1..]),
                None => (Some(parse_type(rest.trim())), ""),
            },
            None => (None, tail.strip_prefix(':').unwrap_or("")),
        };

        let docstring = if after_colon.trim().is_empty() {
            self.docstring_after(signature_end, indent_of(self.lines[start]))
        } else {
            String::new()
        };

        let record = FunctionRecord {
            name,
            keyword_name,
            params,
            returns,
            docstring,
            line: start + 1,
        };
        (Some(record), signature_end)
    }

    fn docstring_after(&self, signature_end: usize, def_indent: usize) -> String {
        (signature_end + 1..self.lines.len())
            .find(|&j| is_code(self.lines[j]))
            .filter(|&j| indent_of(self.lines[j]) > def_indent)
            .and_then(|j| self.string_literal(j))
            .map(|(doc, _)| doc)
            .unwrap_or_default()
    }
}

/// `Some(name)` for a keyword decorator; the inner option is the explicit
/// keyword name, if one was given.
fn keyword_decorator(decorator: &str) -> Option<Option<String>> {
    let caps = RE_KEYWORD_DECORATOR.captures(decorator.trim())?;
    let name = caps
        .get(1)
        .and_then(|args| RE_DECORATOR_NAME.captures(args.as_str()))
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string());
    Some(name)
}

fn parse_param(text: &str) -> Option<ParamRecord> {
    let text = text.trim();
    if text.is_empty() || text == "*" || text == "/" {
        return None;
    }
    let (head, default) = match find_top_level(text, '=') {
        Some(eq) => (&text[..eq], Some(text[eq + 1..].trim())),
        None => (text, None),
    };
    let (name, annotation) = match find_top_level(head, ':') {
        Some(colon) => (&head[..colon], Some(head[colon + 1..].trim())),
        None => (head, None),
    };
    Some(ParamRecord {
        name: name.trim().to_string(),
        annotation: annotation.map(parse_type),
        default: default.map(parse_default),
    })
}

// -- Top-level text helpers ---------------------------------------------------

/// Walk `text`, calling `visit(index, char, depth)` for characters outside
/// string literals. Stops early when `visit` returns true.
fn walk_top_level(text: &str, mut visit: impl FnMut(usize, char, i32) -> bool) -> Option<usize> {
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        if visit(i, c, depth) {
            return Some(i);
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn find_top_level(text: &str, target: char) -> Option<usize> {
    walk_top_level(text, |_, c, depth| depth == 0 && c == target)
}

/// Index of the bracket closing one opened just before `text`.
fn closing_bracket(text: &str) -> Option<usize> {
    walk_top_level(text, |_, c, depth| depth == 0 && matches!(c, ')' | ']' | '}'))
}

fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    walk_top_level(text, |i, c, depth| {
        if depth == 0 && c == sep {
            parts.push(&text[start..i]);
            start = i + c.len_utf8();
        }
        false
    });
    parts.push(&text[start..]);
    parts
}

fn strip_comment(line: &str) -> &str {
    match walk_top_level(line, |_, c, _| c == '#') {
        Some(i) => &line[..i],
        None => line,
    }
}

/// Dedent a docstring: strip the first line, remove the common indentation of
/// the rest, drop surrounding blank lines.
pub fn clean_docstring(raw: &str) -> String {
    let expanded = raw.replace('\t', "        ");
    let lines: Vec<&str> = expanded.split('\n').collect();
    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| indent_of(l))
        .min()
        .unwrap_or(0);

    let cleaned: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(i, l)| {
            if i == 0 {
                l.trim_start().to_string()
            } else {
                l.get(margin..).unwrap_or("").trim_end().to_string()
            }
        })
        .collect();

    let first = cleaned.iter().position(|l| !l.trim().is_empty());
    let last = cleaned.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => cleaned[first..=last].join("\n"),
        _ => String::new(),
    }
}

fn resolve_setting(
    value: Option<&DefaultExpr>,
    module_vars: &HashMap<String, DefaultExpr>,
    default: &str,
) -> String {
    let lookup = |name: &str| match module_vars.get(name) {
        Some(DefaultExpr::Const(c)) => Some(c.to_string()),
        _ => None,
    };
    match value {
        Some(DefaultExpr::Const(c)) => c.to_string(),
        Some(DefaultExpr::Identifier(name)) => lookup(name).unwrap_or_else(|| name.clone()),
        Some(DefaultExpr::Call { callee, .. }) => {
            lookup(callee).unwrap_or_else(|| default.to_string())
        }
        _ => default.to_string(),
    }
}

/// Scan Python source for a keyword library. `fallback_name` names a library
/// made of module-level keyword functions.
pub fn scan(content: &str, fallback_name: &str) -> LibrarySource {
    let source = Source::new(content);
    let module = source.parse_body(0, source.lines.len(), true);
    let vars = &module.assignments;

    if let Some(class) = module.classes.iter().find(|c| !c.keywords.is_empty()) {
        return LibrarySource {
            name: class.name.clone(),
            version: resolve_setting(
                class.attributes.get("ROBOT_LIBRARY_VERSION"),
                vars,
                DEFAULT_VERSION,
            ),
            scope: resolve_setting(
                class.attributes.get("ROBOT_LIBRARY_SCOPE"),
                vars,
                DEFAULT_SCOPE,
            ),
            docstring: class.docstring.clone(),
            functions: class.keywords.clone(),
        };
    }

    LibrarySource {
        name: fallback_name.to_string(),
        version: resolve_setting(vars.get("ROBOT_LIBRARY_VERSION"), vars, DEFAULT_VERSION),
        scope: resolve_setting(vars.get("ROBOT_LIBRARY_SCOPE"), vars, DEFAULT_SCOPE),
        docstring: module.docstring.clone().unwrap_or_default(),
        functions: module.keywords.clone(),
    }
}
