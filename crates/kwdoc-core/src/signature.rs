//! Keyword signature pieces derived from a scanned function.

use crate::expr::{render_default, render_type};
use crate::highlight::robot;
use crate::markup::MarkupBlock;
use crate::model::{FunctionRecord, Parameter};

const RECEIVER_NAMES: &[&str] = &["self", "cls"];

/// Display name of a keyword: the decorator's explicit name, or the function
/// name with underscores turned into capitalized words.
pub fn keyword_name(record: &FunctionRecord) -> String {
    match record.keyword_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => humanize(&record.name),
    }
}

/// `get_user_id` → `Get User Id`.
pub fn humanize(function_name: &str) -> String {
    function_name
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Rendered parameters, without the receiver.
pub fn parameters(record: &FunctionRecord) -> Vec<Parameter> {
    let skip = record
        .params
        .first()
        .is_some_and(|p| RECEIVER_NAMES.contains(&p.name.as_str()));

    record
        .params
        .iter()
        .skip(usize::from(skip))
        .map(|p| Parameter {
            name: p.name.clone(),
            type_name: p
                .annotation
                .as_ref()
                .map_or_else(|| "Any".to_string(), render_type),
            default: p.default.as_ref().map(render_default),
        })
        .collect()
}

pub fn return_type(record: &FunctionRecord) -> String {
    record
        .returns
        .as_ref()
        .map_or_else(|| "None".to_string(), render_type)
}

/// Raw text of the first Robot Framework snippet.
pub fn example(blocks: &[MarkupBlock]) -> String {
    blocks
        .iter()
        .find_map(|block| match block {
            MarkupBlock::CodeBlock { language, lines } if language == robot::LANGUAGE => {
                Some(lines.join("\n").trim_end().to_string())
            }
            _ => None,
        })
        .unwrap_or_default()
}
