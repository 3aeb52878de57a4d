//! Parses Python annotation and default-value source text into expression
//! trees.
//!
//! A small tokenizer plus recursive descent. Anything outside the supported
//! subset yields `TypeExpr::Unknown` / `DefaultExpr::Unknown`.

use kwdoc_core::{Constant, DefaultExpr, TypeExpr};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Name(String),
    Str(String),
    Number(String),
    Punct(char),
}

fn tokenize(text: &str) -> Option<Vec<Token>> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_digit()
            || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()))
        {
            let start = i;
            while i < chars.len()
                && (chars[i].is_ascii_alphanumeric() || chars[i] == '.' || chars[i] == '_')
            {
                // exponent sign: 1e-3
                i += 1;
                if matches!(chars[i - 1], 'e' | 'E') && matches!(chars.get(i), Some('+' | '-')) {
                    i += 1;
                }
            }
            tokens.push(Token::Number(chars[start..i].iter().collect()));
        } else if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            // string prefixes: r"..", b'..', f"..", rb"..", u".."
            if word.len() <= 2
                && word.chars().all(|p| "rRbBuUfF".contains(p))
                && matches!(chars.get(i), Some('"' | '\''))
            {
                let raw = word.contains(['r', 'R']);
                let (s, next) = read_string(&chars, i, raw)?;
                tokens.push(Token::Str(s));
                i = next;
            } else {
                tokens.push(Token::Name(word));
            }
        } else if c == '"' || c == '\'' {
            let (s, next) = read_string(&chars, i, false)?;
            tokens.push(Token::Str(s));
            i = next;
        } else {
            tokens.push(Token::Punct(c));
            i += 1;
        }
    }
    Some(tokens)
}

/// Read a quoted literal starting at `start`; returns its content and the
/// index after the closing quote.
fn read_string(chars: &[char], start: usize, raw: bool) -> Option<(String, usize)> {
    let quote = chars[start];
    let triple = chars.get(start + 1) == Some(&quote) && chars.get(start + 2) == Some(&quote);
    let mut i = start + if triple { 3 } else { 1 };
    let mut out = String::new();

    while i < chars.len() {
        let c = chars[i];
        if c == '\\' && i + 1 < chars.len() {
            if raw {
                out.push(c);
                out.push(chars[i + 1]);
            } else {
                out.push(match chars[i + 1] {
                    'n' => '\n',
                    't' => '\t',
                    other => other,
                });
            }
            i += 2;
            continue;
        }
        if c == quote {
            if !triple {
                return Some((out, i + 1));
            }
            if chars.get(i + 1) == Some(&quote) && chars.get(i + 2) == Some(&quote) {
                return Some((out, i + 3));
            }
        }
        out.push(c);
        i += 1;
    }
    None
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(text: &str) -> Option<Self> {
        Some(Self {
            tokens: tokenize(text)?,
            pos: 0,
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(&Token::Punct(c)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// `a.b.c` after the first name has been consumed.
    fn dotted(&mut self, first: String) -> Option<Vec<String>> {
        let mut parts = vec![first];
        while self.eat('.') {
            match self.next()? {
                Token::Name(n) => parts.push(n),
                _ => return None,
            }
        }
        Some(parts)
    }

    /// Skip to the bracket closing one already consumed.
    fn skip_balanced(&mut self, open: char, close: char) -> Option<usize> {
        let mut depth = 1;
        let mut inner = 0;
        while depth > 0 {
            match self.next()? {
                Token::Punct(c) if c == open => depth += 1,
                Token::Punct(c) if c == close => depth -= 1,
                _ => {}
            }
            inner += 1;
        }
        Some(inner - 1)
    }

    // -- types --

    fn union(&mut self) -> Option<TypeExpr> {
        let first = self.primary()?;
        if self.peek() != Some(&Token::Punct('|')) {
            return Some(first);
        }
        let mut members = vec![first];
        while self.eat('|') {
            members.push(self.primary()?);
        }
        Some(TypeExpr::Union(members))
    }

    fn primary(&mut self) -> Option<TypeExpr> {
        let atom = match self.next()? {
            Token::Name(n) => match n.as_str() {
                "None" => TypeExpr::Literal(Constant::None),
                "True" => TypeExpr::Literal(Constant::Bool(true)),
                "False" => TypeExpr::Literal(Constant::Bool(false)),
                _ => {
                    let mut parts = self.dotted(n)?;
                    let attr = parts.pop()?;
                    if parts.is_empty() {
                        TypeExpr::Name(attr)
                    } else {
                        TypeExpr::Qualified {
                            scope: parts.join("."),
                            attr,
                        }
                    }
                }
            },
            Token::Str(s) => TypeExpr::Literal(Constant::Str(s)),
            Token::Number(n) => TypeExpr::Literal(Constant::Number(n)),
            Token::Punct('(') => {
                let inner = self.union()?;
                if !self.eat(')') {
                    return None;
                }
                inner
            }
            Token::Punct('[') => {
                // argument lists such as Callable[[int], str]
                self.skip_balanced('[', ']')?;
                TypeExpr::Unknown
            }
            Token::Punct('-') => match self.next()? {
                Token::Number(n) => TypeExpr::Literal(Constant::Number(format!("-{n}"))),
                _ => return None,
            },
            // Tuple[int, ...]
            Token::Punct('.') if self.eat('.') && self.eat('.') => {
                TypeExpr::Name("...".to_string())
            }
            _ => return None,
        };

        if !self.eat('[') {
            return Some(atom);
        }
        let base = match &atom {
            TypeExpr::Name(n) => Some(n.clone()),
            TypeExpr::Qualified { scope, attr } => Some(format!("{scope}.{attr}")),
            _ => None,
        };
        let mut args = Vec::new();
        if !self.eat(']') {
            loop {
                args.push(self.union()?);
                if self.eat(']') {
                    break;
                }
                if !self.eat(',') {
                    return None;
                }
                if self.eat(']') {
                    break;
                }
            }
        }
        Some(match base {
            Some(base) => TypeExpr::Generic { base, args },
            None => TypeExpr::Unknown,
        })
    }

    // -- defaults --

    fn default_value(&mut self) -> Option<DefaultExpr> {
        let value = match self.next()? {
            Token::Str(mut s) => {
                // implicit concatenation: "a" "b"
                while let Some(Token::Str(more)) = self.peek().cloned() {
                    s.push_str(&more);
                    self.pos += 1;
                }
                DefaultExpr::Const(Constant::Str(s))
            }
            Token::Number(n) => DefaultExpr::Const(Constant::Number(n)),
            Token::Punct(sign @ ('-' | '+')) => match self.next()? {
                Token::Number(n) if sign == '-' => {
                    DefaultExpr::Const(Constant::Number(format!("-{n}")))
                }
                Token::Number(n) => DefaultExpr::Const(Constant::Number(n)),
                _ => return None,
            },
            Token::Punct('[') => {
                self.skip_balanced('[', ']')?;
                DefaultExpr::EmptySeq
            }
            Token::Punct('{') => {
                self.skip_balanced('{', '}')?;
                DefaultExpr::EmptyMap
            }
            Token::Punct('(') => {
                let start = self.pos;
                let inner = self.skip_balanced('(', ')')?;
                let end = self.pos - 1;
                let has_comma = self.tokens[start..end].contains(&Token::Punct(','));
                if inner == 0 || has_comma {
                    DefaultExpr::EmptyTuple
                } else {
                    // parenthesized expression
                    let mut sub = Parser {
                        tokens: self.tokens[start..end].to_vec(),
                        pos: 0,
                    };
                    let value = sub.default_value()?;
                    if !sub.at_end() {
                        return None;
                    }
                    value
                }
            }
            Token::Name(n) => match n.as_str() {
                "None" => DefaultExpr::Const(Constant::None),
                "True" => DefaultExpr::Const(Constant::Bool(true)),
                "False" => DefaultExpr::Const(Constant::Bool(false)),
                "lambda" => return None,
                _ => {
                    let mut parts = self.dotted(n)?;
                    let last = parts.pop()?;
                    let scope = (!parts.is_empty()).then(|| parts.join("."));
                    if self.eat('(') {
                        self.skip_balanced('(', ')')?;
                        DefaultExpr::Call { scope, callee: last }
                    } else {
                        match scope {
                            Some(scope) => DefaultExpr::QualifiedName { scope, attr: last },
                            None => DefaultExpr::Identifier(last),
                        }
                    }
                }
            },
            _ => return None,
        };
        Some(value)
    }
}

/// Parse an annotation such as `Optional[Dict[str, int]]` or `str | None`.
pub fn parse_type(text: &str) -> TypeExpr {
    let parsed = Parser::new(text).and_then(|mut p| {
        let expr = p.union()?;
        p.at_end().then_some(expr)
    });
    parsed.unwrap_or(TypeExpr::Unknown)
}

/// Parse a default value such as `"text"`, `-1`, `[]` or `LogLevel.INFO`.
pub fn parse_default(text: &str) -> DefaultExpr {
    let parsed = Parser::new(text).and_then(|mut p| {
        let expr = p.default_value()?;
        p.at_end().then_some(expr)
    });
    parsed.unwrap_or(DefaultExpr::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwdoc_core::{render_default, render_type};

    fn ty(text: &str) -> String {
        render_type(&parse_type(text))
    }

    fn default(text: &str) -> String {
        render_default(&parse_default(text))
    }

    #[test]
    fn simple_and_generic_types() {
        assert_eq!(ty("str"), "str");
        assert_eq!(ty("Optional[str]"), "Optional[str]");
        assert_eq!(ty("Dict[str,   List[int]]"), "Dict[str, List[int]]");
        assert_eq!(ty("Tuple[int, ...]"), "Tuple[int, ...]");
        assert_eq!(ty("typing.List[str]"), "typing.List[str]");
    }

    #[test]
    fn union_types() {
        assert_eq!(ty("str | None"), "str | None");
        assert_eq!(ty("int | float | None"), "int | float | None");
        assert_eq!(
            parse_type("str | None"),
            TypeExpr::Union(vec![
                TypeExpr::Name("str".into()),
                TypeExpr::Literal(Constant::None)
            ])
        );
    }

    #[test]
    fn qualified_and_string_types() {
        assert_eq!(ty("pathlib.Path"), "pathlib.Path");
        assert_eq!(ty("'MyClass'"), "MyClass");
        assert_eq!(ty("Literal['a', 'b']"), "Literal[a, b]");
    }

    #[test]
    fn unsupported_types() {
        assert_eq!(ty("Callable[[int], str]"), "Callable[Any, str]");
        assert_eq!(ty("int("), "Any");
        assert_eq!(ty(""), "Any");
    }

    #[test]
    fn constant_defaults() {
        assert_eq!(default("'hello'"), "\"hello\"");
        assert_eq!(default(r#""a" "b""#), "\"ab\"");
        assert_eq!(default("42"), "42");
        assert_eq!(default("-1"), "-1");
        assert_eq!(default("0.5"), "0.5");
        assert_eq!(default("1e-3"), "1e-3");
        assert_eq!(default("True"), "True");
        assert_eq!(default("None"), "None");
    }

    #[test]
    fn container_defaults() {
        assert_eq!(default("[]"), "[]");
        assert_eq!(default("[1, 2]"), "[]");
        assert_eq!(default("{}"), "{}");
        assert_eq!(default("()"), "()");
        assert_eq!(default("(1, 2)"), "()");
        assert_eq!(default("(5)"), "5");
    }

    #[test]
    fn names_and_calls() {
        assert_eq!(default("DEFAULT_TIMEOUT"), "DEFAULT_TIMEOUT");
        assert_eq!(default("LogLevel.INFO"), "LogLevel.INFO");
        assert_eq!(default("dict()"), "dict()");
        assert_eq!(default("datetime.now()"), "datetime.now()");
        assert_eq!(default("os.path.join('a', 'b')"), "os.path.join()");
    }

    #[test]
    fn unsupported_defaults() {
        assert_eq!(default("lambda: 1"), "...");
        assert_eq!(default("1 + 2"), "...");
        assert_eq!(default("'unterminated"), "...");
    }
}
