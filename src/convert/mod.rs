//! Document conversion.
//!
//! [`DocumentConverter`] runs the parser once over a PDF and wraps the
//! resulting [`Document`](crate::model::Document) in a [`ConversionResult`]
//! carrying status, per-page errors and timings.
//!
//! # Example
//!
//! ```no_run
//! use ipcdoc::convert::DocumentConverter;
//!
//! fn main() -> ipcdoc::Result<()> {
//!     let converter = DocumentConverter::new();
//!     let result = converter.convert("ipc.pdf")?;
//!     let dict = result.document.export_to_dict()?;
//!     println!("{}", dict["name"]);
//!     Ok(())
//! }
//! ```

mod result;

pub use result::{ConversionResult, ConversionStatus, InputDocument, Timings};

use std::path::Path;
use std::time::Instant;

use chrono::Utc;

use crate::error::Result;
use crate::parser::{ParseOptions, PdfParser};

/// Converts PDF files into documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentConverter {
    options: ParseOptions,
}

impl DocumentConverter {
    /// Create a converter with default parse options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom parse options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Convert a PDF file.
    pub fn convert<P: AsRef<Path>>(&self, path: P) -> Result<ConversionResult> {
        let path = path.as_ref();
        log::info!("Converting {}", path.display());
        let started_at = Utc::now();
        let clock = Instant::now();

        let parser = PdfParser::open_with_options(path, self.options.clone())?;
        self.finish(&parser, started_at, clock)
    }

    /// Convert a PDF held in memory; `filename` is recorded as its origin.
    pub fn convert_bytes(&self, data: &[u8], filename: &str) -> Result<ConversionResult> {
        log::info!("Converting {} ({} bytes)", filename, data.len());
        let started_at = Utc::now();
        let clock = Instant::now();

        let parser = PdfParser::from_bytes_with_options(data, filename, self.options.clone())?;
        self.finish(&parser, started_at, clock)
    }

    fn finish(
        &self,
        parser: &PdfParser,
        started_at: chrono::DateTime<Utc>,
        clock: Instant,
    ) -> Result<ConversionResult> {
        let report = parser.parse_with_report()?;

        let status = if report.errors.is_empty() {
            ConversionStatus::Success
        } else {
            ConversionStatus::PartialSuccess
        };

        let input = InputDocument {
            file: parser.origin().filename.clone(),
            filesize: parser.byte_len(),
            page_count: parser.page_count(),
            document_hash: parser.origin().binary_hash.clone(),
        };

        let elapsed_ms = clock.elapsed().as_millis() as u64;
        log::info!("Conversion finished in {} ms ({})", elapsed_ms, status);

        Ok(ConversionResult {
            status,
            input,
            errors: report.errors,
            timings: Timings {
                started_at,
                elapsed_ms,
            },
            document: report.document,
        })
    }
}
