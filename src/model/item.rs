//! Labelled text items.

use serde::{Deserialize, Serialize};

/// Role of a text item in the document layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemLabel {
    /// Document title
    Title,
    /// `CHAPTER XVI`
    ChapterHeader,
    /// Uppercase heading such as a chapter title or a group of sections
    Heading,
    /// Numbered section heading, e.g. `302. Punishment for murder`
    SectionHeader,
    /// Running text
    Text,
    /// Enumerated clause such as `(a) ...`
    ListItem,
    /// Running header repeated on most pages
    PageHeader,
    /// Page number
    PageFooter,
}

impl ItemLabel {
    /// Page furniture is kept out of the document body.
    pub fn is_furniture(self) -> bool {
        matches!(self, ItemLabel::PageHeader | ItemLabel::PageFooter)
    }

    pub fn is_heading(self) -> bool {
        matches!(
            self,
            ItemLabel::Title | ItemLabel::ChapterHeader | ItemLabel::Heading | ItemLabel::SectionHeader
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemLabel::Title => "title",
            ItemLabel::ChapterHeader => "chapter_header",
            ItemLabel::Heading => "heading",
            ItemLabel::SectionHeader => "section_header",
            ItemLabel::Text => "text",
            ItemLabel::ListItem => "list_item",
            ItemLabel::PageHeader => "page_header",
            ItemLabel::PageFooter => "page_footer",
        }
    }
}

impl std::fmt::Display for ItemLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A block of text with its layout role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextItem {
    /// Pointer to this item, `#/texts/N`
    pub self_ref: String,

    pub label: ItemLabel,

    /// Page the item starts on (1-indexed)
    pub page_no: u32,

    /// Text as extracted, source lines joined by `\n`
    pub orig: String,

    /// Normalized text
    pub text: String,

    /// Heading depth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,

    /// List marker, e.g. `(a)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

impl TextItem {
    /// Create an item whose original and normalized text are the same.
    pub fn new(label: ItemLabel, page_no: u32, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            self_ref: String::new(),
            label,
            page_no,
            orig: text.clone(),
            text,
            level: None,
            marker: None,
        }
    }

    /// Set the original (pre-normalization) text.
    pub fn with_orig(mut self, orig: impl Into<String>) -> Self {
        self.orig = orig.into();
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
