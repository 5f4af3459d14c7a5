//! PDF document parser using lopdf.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::detect::{sniff_pdf, PdfHeader};
use crate::error::{Error, Result};
use crate::model::{Document, Metadata, Origin, PageInfo, Size};
use crate::render::PageSelection;

use super::layout::{detect_running_headers, LayoutAnalyzer};
use super::options::{ErrorMode, ParseOptions};

/// Deepest `/Parent` chain followed when looking up inherited page attributes.
const MAX_INHERITANCE_DEPTH: usize = 16;

/// A page that could not be read in lenient mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageError {
    pub page_no: u32,
    pub message: String,
}

/// A parsed document together with the pages that failed.
#[derive(Debug, Clone)]
pub struct ParseReport {
    pub document: Document,
    pub errors: Vec<PageError>,
}

/// PDF document parser.
pub struct PdfParser {
    doc: LopdfDocument,
    options: ParseOptions,
    header: PdfHeader,
    origin: Origin,
    name: String,
    byte_len: u64,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::from_bytes_with_options(&data, filename, options)
    }

    /// Parse a PDF held in memory. `filename` is recorded as the origin.
    pub fn from_bytes(data: &[u8], filename: impl Into<String>) -> Result<Self> {
        Self::from_bytes_with_options(data, filename, ParseOptions::default())
    }

    /// Parse a PDF held in memory with custom options.
    pub fn from_bytes_with_options(
        data: &[u8],
        filename: impl Into<String>,
        options: ParseOptions,
    ) -> Result<Self> {
        let filename = filename.into();
        let header = sniff_pdf(data)?;
        let doc = LopdfDocument::load_mem(data)?;

        // lopdf only handles the empty user password
        if options.password.is_some() && doc.is_encrypted() {
            log::warn!("Password was provided but lopdf cannot decrypt with a user password");
        }

        let name = Path::new(&filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| filename.clone());

        log::debug!("Loaded {} ({}, {} bytes)", filename, header, data.len());

        Ok(Self {
            doc,
            options,
            header,
            origin: Origin::pdf(filename, sha256_hex(data)),
            name,
            byte_len: data.len() as u64,
        })
    }

    /// Number of pages in the file.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// PDF version from the file header.
    pub fn version(&self) -> &str {
        &self.header.version
    }

    /// Size of the input in bytes.
    pub fn byte_len(&self) -> u64 {
        self.byte_len
    }

    /// Origin recorded for the document.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Parse the document.
    pub fn parse(&self) -> Result<Document> {
        self.parse_with_report().map(|report| report.document)
    }

    /// Parse the document, returning failed pages alongside it.
    pub fn parse_with_report(&self) -> Result<ParseReport> {
        let mut document = Document::new(self.name.clone());
        document.origin = self.origin.clone();
        document.metadata = self.extract_metadata();

        let pages = self.doc.get_pages();
        let total = pages.len() as u32;
        check_selection(&self.options.pages, total)?;

        let mut errors = Vec::new();
        let mut page_lines: Vec<(u32, Vec<String>)> = Vec::new();

        for (&page_no, &page_id) in pages.iter() {
            if !self.options.pages.includes(page_no) {
                continue;
            }

            document.add_page(PageInfo::new(page_no, self.page_size(page_id)));

            match self.extract_page_lines(page_no) {
                Ok(lines) => {
                    log::debug!("Page {}: {} lines", page_no, lines.len());
                    page_lines.push((page_no, lines));
                }
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping page {}: {}", page_no, e);
                    errors.push(PageError {
                        page_no,
                        message: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        let headers = if self.options.detect_furniture {
            let all: Vec<Vec<String>> = page_lines.iter().map(|(_, l)| l.clone()).collect();
            detect_running_headers(&all)
        } else {
            HashSet::new()
        };
        if !headers.is_empty() {
            log::debug!("Running headers: {:?}", headers);
        }

        let mut analyzer =
            LayoutAnalyzer::new(self.options.detect_furniture).with_running_headers(headers);
        for (page_no, lines) in &page_lines {
            for item in analyzer.analyze_page(*page_no, lines) {
                document.add_text(item);
            }
        }
        if let Some(item) = analyzer.finish() {
            document.add_text(item);
        }

        log::info!(
            "Parsed {} of {} pages into {} text items",
            document.parsed_page_count(),
            total,
            document.texts.len()
        );

        Ok(ParseReport { document, errors })
    }

    fn extract_page_lines(&self, page_no: u32) -> Result<Vec<String>> {
        let text = self
            .doc
            .extract_text(&[page_no])
            .map_err(|e| Error::TextExtract {
                page: page_no,
                reason: e.to_string(),
            })?;
        Ok(text.lines().map(str::to_string).collect())
    }

    /// Page size from the (possibly inherited) MediaBox, A4 when absent.
    fn page_size(&self, page_id: ObjectId) -> Size {
        let mut current = self.doc.get_dictionary(page_id).ok();

        for _ in 0..MAX_INHERITANCE_DEPTH {
            let Some(dict) = current else { break };

            if let Some(size) = dict
                .get(b"MediaBox")
                .ok()
                .and_then(|obj| self.resolve(obj))
                .and_then(media_box_size)
            {
                return size;
            }

            current = dict
                .get(b"Parent")
                .and_then(Object::as_reference)
                .and_then(|id| self.doc.get_dictionary(id))
                .ok();
        }

        Size::A4
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok(),
            other => Some(other),
        }
    }

    fn info_dictionary(&self) -> Option<&Dictionary> {
        match self.doc.trailer.get(b"Info").ok()? {
            Object::Reference(id) => self.doc.get_dictionary(*id).ok(),
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    fn extract_metadata(&self) -> Metadata {
        let mut metadata = Metadata {
            pdf_version: self.header.version.clone(),
            page_count: self.doc.get_pages().len() as u32,
            encrypted: self.doc.is_encrypted(),
            ..Default::default()
        };

        if let Some(info) = self.info_dictionary() {
            metadata.title = info_string(info, b"Title");
            metadata.author = info_string(info, b"Author");
            metadata.subject = info_string(info, b"Subject");
            metadata.creator = info_string(info, b"Creator");
            metadata.producer = info_string(info, b"Producer");
            metadata.created = info_string(info, b"CreationDate").and_then(|d| parse_pdf_date(&d));
            metadata.modified = info_string(info, b"ModDate").and_then(|d| parse_pdf_date(&d));
        }

        metadata
    }
}

fn check_selection(selection: &PageSelection, total: u32) -> Result<()> {
    let first_missing = match selection {
        PageSelection::All => None,
        PageSelection::Range(range) => {
            (*range.end() > total).then_some((*range.start()).max(total + 1))
        }
        PageSelection::Pages(pages) => pages.iter().copied().find(|&p| p > total),
    };

    match first_missing {
        Some(page) => Err(Error::PageOutOfRange(page, total)),
        None => Ok(()),
    }
}

fn media_box_size(obj: &Object) -> Option<Size> {
    let values: Vec<f32> = obj
        .as_array()
        .ok()?
        .iter()
        .filter_map(|v| v.as_float().ok())
        .collect();

    match values.as_slice() {
        [x0, y0, x1, y1] => Some(Size::new((x1 - x0).abs(), (y1 - y0).abs())),
        _ => None,
    }
}

fn info_string(dict: &Dictionary, key: &[u8]) -> Option<String> {
    let value = match dict.get(key).ok()? {
        Object::String(bytes, _) => decode_pdf_string(bytes),
        Object::Name(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        _ => return None,
    };
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// Decode a PDF text string: UTF-16BE with BOM, else UTF-8, else Latin-1.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Parse a PDF date string (`D:YYYYMMDDHHmmSS...`). Timezone offsets are ignored.
fn parse_pdf_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s);
    let field = |range: std::ops::Range<usize>, default: u32| -> Option<u32> {
        match s.get(range) {
            Some(v) => v.parse().ok(),
            None => Some(default),
        }
    };

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month = field(4..6, 1)?;
    let day = field(6..8, 1)?;
    let hour = field(8..10, 0)?;
    let minute = field(10..12, 0)?;
    let second = field(12..14, 0)?;

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| chrono::DateTime::from_naive_utc_and_offset(dt, chrono::Utc))
}

fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
