//! Parsing options.

use crate::render::PageSelection;

/// Options for parsing PDF documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Which pages to parse
    pub pages: PageSelection,

    /// Password for encrypted documents
    pub password: Option<String>,

    /// Label running headers and page numbers as furniture
    pub detect_furniture: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Record page failures instead of aborting.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set password for encrypted documents.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Enable or disable furniture detection.
    pub fn with_furniture_detection(mut self, detect: bool) -> Self {
        self.detect_furniture = detect;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            pages: PageSelection::All,
            password: None,
            detect_furniture: true,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first page that cannot be read
    #[default]
    Strict,
    /// Record the failure and continue with the next page
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .lenient()
            .with_pages(PageSelection::Pages(vec![2]))
            .with_furniture_detection(false);

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(!options.pages.includes(1));
        assert!(!options.detect_furniture);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.pages, PageSelection::All);
        assert!(options.password.is_none());
        assert!(options.detect_furniture);
    }
}
