//! Conversion result and its native JSON export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Document;
use crate::parser::PageError;
use crate::render::{to_json, JsonFormat};

/// Outcome of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionStatus {
    /// Every selected page was read
    Success,
    /// Some pages failed in lenient mode
    PartialSuccess,
}

impl std::fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionStatus::Success => f.write_str("success"),
            ConversionStatus::PartialSuccess => f.write_str("partial_success"),
        }
    }
}

/// Facts about the converted input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDocument {
    pub file: String,
    pub filesize: u64,
    pub page_count: u32,
    pub document_hash: String,
}

/// Wall-clock information for a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

/// Everything a conversion produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    pub status: ConversionStatus,
    pub input: InputDocument,
    pub errors: Vec<PageError>,
    pub timings: Timings,
    pub document: Document,
}

impl ConversionResult {
    /// Native export: the whole result as single-line JSON.
    pub fn to_json(&self) -> Result<String> {
        to_json(self, JsonFormat::Compact)
    }

    /// The whole result as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        to_json(self, JsonFormat::Pretty)
    }

    pub fn is_success(&self) -> bool {
        self.status == ConversionStatus::Success
    }
}
