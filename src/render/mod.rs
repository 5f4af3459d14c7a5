//! Rendering module for converting documents to output formats.

mod json;
mod markdown;
mod options;
mod text;

pub use json::{to_dict, to_json, JsonFormat, DICT_INDENT};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::{PageSelection, RenderOptions};
pub use text::to_text;

use crate::error::Result;
use crate::model::Document;

/// The export operations of a converted document.
impl Document {
    /// The document as a generic JSON mapping.
    pub fn export_to_dict(&self) -> Result<serde_json::Value> {
        to_dict(self)
    }

    /// The document as pretty-printed JSON.
    pub fn export_to_json(&self) -> Result<String> {
        to_json(self, JsonFormat::Pretty)
    }

    /// The document as Markdown with default options.
    pub fn export_to_markdown(&self) -> Result<String> {
        to_markdown(self, &RenderOptions::default())
    }

    /// The document as Markdown.
    pub fn export_to_markdown_with(&self, options: &RenderOptions) -> Result<String> {
        to_markdown(self, options)
    }

    /// The document body as plain text.
    pub fn export_to_text(&self) -> Result<String> {
        to_text(self, &RenderOptions::default())
    }
}
