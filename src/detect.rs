//! PDF header sniffing.
//!
//! Readers tolerate junk before the `%PDF-` marker as long as it appears in
//! the first kilobyte, so the scan here does the same.

use crate::error::{Error, Result};

/// Header information found at the start of a PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// Version from the header (e.g. "1.7").
    pub version: String,
    /// Byte offset of the `%PDF-` marker.
    pub offset: usize,
    /// Whether an `%%EOF` marker was found near the end of the data.
    pub has_eof: bool,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const EOF_MARKER: &[u8] = b"%%EOF";
const HEADER_WINDOW: usize = 1024;
const TRAILER_WINDOW: usize = 2048;

/// Inspect the leading bytes of a file and return its PDF header.
pub fn sniff_pdf(data: &[u8]) -> Result<PdfHeader> {
    let window = &data[..data.len().min(HEADER_WINDOW)];
    let offset = find(window, PDF_MAGIC).ok_or(Error::UnknownFormat)?;

    let version_start = offset + PDF_MAGIC.len();
    let version = data
        .get(version_start..version_start + 3)
        .map(|v| String::from_utf8_lossy(v).into_owned())
        .ok_or(Error::UnknownFormat)?;

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    let tail = &data[data.len().saturating_sub(TRAILER_WINDOW)..];
    let has_eof = find(tail, EOF_MARKER).is_some();
    if !has_eof {
        log::warn!("PDF has no %%EOF marker; the file may be truncated");
    }

    Ok(PdfHeader {
        version,
        offset,
        has_eof,
    })
}

/// Check whether bytes look like a PDF.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    sniff_pdf(data).is_ok()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3
        && matches!(bytes[0], b'1' | b'2')
        && bytes[1] == b'.'
        && bytes[2].is_ascii_digit()
}
