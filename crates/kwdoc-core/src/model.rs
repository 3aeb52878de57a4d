//! Data passed into and produced by the core.

use crate::expr::{DefaultExpr, TypeExpr};
use serde::Serialize;
use std::fmt;

// -- Scanner input ------------------------------------------------------------

/// One parameter of a scanned function, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamRecord {
    pub name: String,
    pub annotation: Option<TypeExpr>,
    pub default: Option<DefaultExpr>,
}

/// A keyword function as found in library source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FunctionRecord {
    /// Source-level function name.
    pub name: String,
    /// Name given explicitly by the keyword decorator.
    pub keyword_name: Option<String>,
    pub params: Vec<ParamRecord>,
    pub returns: Option<TypeExpr>,
    /// Docstring with indentation already removed.
    pub docstring: String,
    pub line: usize,
}

/// A library as found in source, before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LibrarySource {
    pub name: String,
    pub version: String,
    pub scope: String,
    pub docstring: String,
    pub functions: Vec<FunctionRecord>,
}

// -- Rendered output ----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_name)?;
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordSignature {
    pub name: String,
    /// Rendered HTML.
    pub description: String,
    /// Raw text of the first `robot` code block in the docstring.
    pub example: String,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
    pub source_line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryDocument {
    pub name: String,
    pub version: String,
    pub scope: String,
    /// Rendered HTML.
    pub description: String,
    pub keywords: Vec<KeywordSignature>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_display() {
        let plain = Parameter {
            name: "path".into(),
            type_name: "str".into(),
            default: None,
        };
        assert_eq!(plain.to_string(), "path: str");

        let defaulted = Parameter {
            name: "timeout".into(),
            type_name: "int".into(),
            default: Some("30".into()),
        };
        assert_eq!(defaulted.to_string(), "timeout: int = 30");
    }
}
