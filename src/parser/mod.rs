//! PDF parsing module.

mod layout;
mod normalize;
mod options;
mod pdf_parser;

pub use layout::{detect_running_headers, LayoutAnalyzer};
pub use normalize::{is_uppercase_line, join_continuation, normalize_line};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::{PageError, ParseReport, PdfParser};
