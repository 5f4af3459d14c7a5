//! JSON rendering.
//!
//! serde_json writes non-ASCII characters as-is, so Devanagari or curly
//! quotes in the source come out literally rather than as `\u` escapes.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{Error, Result};
use crate::model::Document;

/// Indentation used for the dict export.
pub const DICT_INDENT: usize = 4;

/// JSON output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Two-space indented
    #[default]
    Pretty,
    /// Indented with the given number of spaces
    Indented(usize),
    /// Single line
    Compact,
}

/// Serialize any value to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    match format {
        JsonFormat::Pretty => Ok(serde_json::to_string_pretty(value)?),
        JsonFormat::Compact => Ok(serde_json::to_string(value)?),
        JsonFormat::Indented(width) => {
            let indent = vec![b' '; width];
            let mut buf = Vec::new();
            let mut ser =
                serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
            value.serialize(&mut ser)?;
            String::from_utf8(buf).map_err(|e| Error::Serialize(e.to_string()))
        }
    }
}

/// Convert a document into a generic JSON mapping.
pub fn to_dict(doc: &Document) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(doc)?)
}
