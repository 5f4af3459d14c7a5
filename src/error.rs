//! Error types for the ipcdoc library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ipcdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting or exporting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the input or writing the output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input file does not exist.
    #[error("Input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The input is not recognized as a PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header names a version we do not understand.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing the PDF object structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The document is encrypted and cannot be decrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Text extraction failed on a page.
    #[error("Text extraction failed on page {page}: {reason}")]
    TextExtract { page: u32, reason: String },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Serializing an export failed.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::FileNotFound {
            path: PathBuf::from("ipc.pdf"),
        };
        assert_eq!(err.to_string(), "Input file not found: ipc.pdf");

        let err = Error::TextExtract {
            page: 3,
            reason: "bad stream".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Text extraction failed on page 3: bad stream"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
