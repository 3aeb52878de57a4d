//! JSON renderer: the document model serialized for tooling.

use crate::render::Renderer;
use anyhow::{Context, Result};
use kwdoc_core::LibraryDocument;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &LibraryDocument) -> Result<String> {
        let mut out = serde_json::to_string_pretty(doc).context("failed to serialize document")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures::sample;

    #[test]
    fn serializes_keywords() {
        let out = JsonRenderer.render(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["name"], "DeviceLibrary");
        assert_eq!(value["keywords"][0]["parameters"][0]["type"], "int");
        assert_eq!(value["keywords"][0]["parameters"][0]["default"], "30");
        assert_eq!(value["keywords"][1]["return_type"], "None");
        assert!(value["keywords"][1]["parameters"].as_array().unwrap().is_empty());
    }
}
