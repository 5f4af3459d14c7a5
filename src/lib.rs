//! # ipcdoc
//!
//! Structured extraction of the Indian Penal Code from its PDF edition.
//!
//! A PDF is converted once into a [`Document`]: an ordered list of labelled
//! text items (title, chapter headers, section headers, body text, list
//! items, running headers and page numbers) plus page and origin
//! information. The document can then be exported as a JSON mapping, the
//! full conversion result as JSON, Markdown, plain text, or flattened into
//! per-section records.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ipcdoc::{extract, ExportFormat};
//!
//! fn main() -> ipcdoc::Result<()> {
//!     // ipc.pdf -> ipc_data.json
//!     let report = extract("ipc.pdf", "ipc_data.json", ExportFormat::Dict)?;
//!     println!("{} pages, {} bytes", report.page_count, report.bytes_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Working with the document
//!
//! ```no_run
//! use ipcdoc::{convert_file, ipc};
//!
//! fn main() -> ipcdoc::Result<()> {
//!     let result = convert_file("ipc.pdf")?;
//!     let markdown = result.document.export_to_markdown()?;
//!     let sections = ipc::extract_sections(&result.document);
//!     println!("{} chars, {} sections", markdown.len(), sections.len());
//!     Ok(())
//! }
//! ```

pub mod convert;
pub mod detect;
pub mod error;
pub mod ipc;
pub mod model;
pub mod output;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{ConversionResult, ConversionStatus, DocumentConverter};
pub use detect::{is_pdf_bytes, sniff_pdf, PdfHeader};
pub use error::{Error, Result};
pub use ipc::{extract_sections, IpcSection};
pub use model::{Document, ItemLabel, Metadata, PageInfo, TextItem};
pub use output::{
    extract, extract_with_options, write_output, ExportFormat, ExtractOptions, ExtractionReport,
    DEFAULT_INPUT,
};
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use render::{JsonFormat, PageSelection, RenderOptions};

use std::path::Path;

/// Parse a PDF file into a document.
///
/// # Example
///
/// ```no_run
/// let doc = ipcdoc::parse_file("ipc.pdf").unwrap();
/// println!("{} items", doc.texts.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    PdfParser::open(path)?.parse()
}

/// Parse a PDF file with custom options.
///
/// ```no_run
/// use ipcdoc::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient();
/// let doc = parse_file_with_options("ipc.pdf", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    PdfParser::open_with_options(path, options)?.parse()
}

/// Parse a PDF held in memory; `filename` becomes the document origin.
pub fn parse_bytes(data: &[u8], filename: &str) -> Result<Document> {
    PdfParser::from_bytes(data, filename)?.parse()
}

/// Convert a PDF file with default options.
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<ConversionResult> {
    DocumentConverter::new().convert(path)
}

/// Convert a PDF file to Markdown.
///
/// ```no_run
/// let markdown = ipcdoc::to_markdown("ipc.pdf").unwrap();
/// std::fs::write("ipc.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    parse_file(path)?.export_to_markdown()
}

/// Convert a PDF file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    render::to_text(&parse_file(path)?, options)
}

/// Convert a PDF file to the document JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    render::to_json(&parse_file(path)?, format)
}

/// Read the section records of an IPC PDF.
pub fn sections_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<IpcSection>> {
    Ok(extract_sections(&parse_file(path)?))
}
