//! Type annotation and default value expressions, and their display strings.

use std::fmt;

/// A literal constant as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    Str(String),
    /// Numeric literal text, kept verbatim (`42`, `-1`, `0.5`, `1e3`).
    Number(String),
    Bool(bool),
    None,
}

impl fmt::Display for Constant {
    /// The unquoted literal form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Str(s) => f.write_str(s),
            Constant::Number(n) => f.write_str(n),
            Constant::Bool(true) => f.write_str("True"),
            Constant::Bool(false) => f.write_str("False"),
            Constant::None => f.write_str("None"),
        }
    }
}

/// A parameter or return type annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Name(String),
    Literal(Constant),
    Generic { base: String, args: Vec<TypeExpr> },
    Qualified { scope: String, attr: String },
    Union(Vec<TypeExpr>),
    Unknown,
}

/// A parameter default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultExpr {
    Const(Constant),
    Identifier(String),
    EmptySeq,
    EmptyMap,
    EmptyTuple,
    /// `callee()` or `scope.callee()`.
    Call { scope: Option<String>, callee: String },
    QualifiedName { scope: String, attr: String },
    Unknown,
}

const ANY: &str = "Any";
const ELLIPSIS: &str = "...";

/// Render a type annotation the way it reads in source.
///
/// Shapes that cannot be displayed (including malformed ones such as empty
/// names) render as `Any`.
pub fn render_type(expr: &TypeExpr) -> String {
    match expr {
        TypeExpr::Name(name) if !name.is_empty() => name.clone(),
        TypeExpr::Literal(constant) => constant.to_string(),
        TypeExpr::Generic { base, args } if !base.is_empty() => {
            let args: Vec<String> = args.iter().map(render_type).collect();
            format!("{}[{}]", base, args.join(", "))
        }
        TypeExpr::Qualified { scope, attr } if !scope.is_empty() && !attr.is_empty() => {
            format!("{scope}.{attr}")
        }
        TypeExpr::Union(members) if !members.is_empty() => {
            let mut flat = Vec::new();
            flatten_union(members, &mut flat);
            flat.into_iter()
                .map(render_type)
                .collect::<Vec<_>>()
                .join(" | ")
        }
        _ => ANY.to_string(),
    }
}

/// Splice nested unions into one member list.
fn flatten_union<'a>(members: &'a [TypeExpr], out: &mut Vec<&'a TypeExpr>) {
    for member in members {
        match member {
            TypeExpr::Union(inner) if !inner.is_empty() => flatten_union(inner, out),
            other => out.push(other),
        }
    }
}

/// Render a default value. Unmodelled shapes render as `...`.
pub fn render_default(expr: &DefaultExpr) -> String {
    match expr {
        DefaultExpr::Const(Constant::Str(s)) => format!("\"{s}\""),
        DefaultExpr::Const(constant) => constant.to_string(),
        DefaultExpr::Identifier(name) if !name.is_empty() => name.clone(),
        DefaultExpr::EmptySeq => "[]".to_string(),
        DefaultExpr::EmptyMap => "{}".to_string(),
        DefaultExpr::EmptyTuple => "()".to_string(),
        DefaultExpr::Call { scope, callee } if !callee.is_empty() => match scope {
            Some(scope) if !scope.is_empty() => format!("{scope}.{callee}()"),
            _ => format!("{callee}()"),
        },
        DefaultExpr::QualifiedName { scope, attr } if !scope.is_empty() && !attr.is_empty() => {
            format!("{scope}.{attr}")
        }
        _ => ELLIPSIS.to_string(),
    }
}
