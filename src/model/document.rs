//! Document-level types.

use super::{ItemLabel, PageInfo, TextItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema name written into every exported document.
pub const SCHEMA_NAME: &str = "IpcDocument";

/// Version of the exported document schema.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// The structured representation of a converted PDF.
///
/// Text items live in [`Document::texts`] in reading order. The `body` and
/// `furniture` groups reference them by JSON pointer so that an exported
/// mapping can be walked the same way regardless of which group an item
/// belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Schema identifier
    pub schema_name: String,

    /// Schema version
    pub version: String,

    /// Document name (input file stem)
    pub name: String,

    /// Where the document came from
    pub origin: Origin,

    /// PDF metadata
    pub metadata: Metadata,

    /// Content items in reading order
    pub body: NodeGroup,

    /// Running headers and page numbers
    pub furniture: NodeGroup,

    /// All text items
    pub texts: Vec<TextItem>,

    /// Parsed pages
    pub pages: Vec<PageInfo>,
}

impl Document {
    /// Create an empty document with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema_name: SCHEMA_NAME.to_string(),
            version: SCHEMA_VERSION.to_string(),
            name: name.into(),
            origin: Origin::default(),
            metadata: Metadata::default(),
            body: NodeGroup::new("#/body"),
            furniture: NodeGroup::new("#/furniture"),
            texts: Vec::new(),
            pages: Vec::new(),
        }
    }

    /// Register a parsed page.
    pub fn add_page(&mut self, page: PageInfo) {
        self.pages.push(page);
    }

    /// Append a text item, assigning its `self_ref` and linking it from the
    /// body or furniture group. Returns the item's index.
    pub fn add_text(&mut self, mut item: TextItem) -> usize {
        let index = self.texts.len();
        item.self_ref = format!("#/texts/{}", index);

        let node = NodeRef::new(item.self_ref.clone());
        if item.label.is_furniture() {
            self.furniture.children.push(node);
        } else {
            self.body.children.push(node);
        }

        if let Some(page) = self.pages.iter_mut().find(|p| p.page_no == item.page_no) {
            page.text_count += 1;
        }

        self.texts.push(item);
        index
    }

    /// Get a parsed page by number (1-indexed).
    pub fn page(&self, page_no: u32) -> Option<&PageInfo> {
        self.pages.iter().find(|p| p.page_no == page_no)
    }

    /// Number of pages that were parsed.
    pub fn parsed_page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check whether the document has no text items.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Resolve a node reference to its text item.
    pub fn resolve(&self, node: &NodeRef) -> Option<&TextItem> {
        node.index().and_then(|i| self.texts.get(i))
    }

    /// Iterate over body items in reading order.
    pub fn body_items(&self) -> impl Iterator<Item = &TextItem> + '_ {
        self.body.children.iter().filter_map(|n| self.resolve(n))
    }

    /// Iterate over furniture items in reading order.
    pub fn furniture_items(&self) -> impl Iterator<Item = &TextItem> + '_ {
        self.furniture.children.iter().filter_map(|n| self.resolve(n))
    }

    /// Count text items carrying the given label.
    pub fn count_label(&self, label: ItemLabel) -> usize {
        self.texts.iter().filter(|t| t.label == label).count()
    }
}

/// Provenance of the converted file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    /// MIME type of the source
    pub mimetype: String,

    /// SHA-256 of the source bytes, lowercase hex
    pub binary_hash: String,

    /// Source file name
    pub filename: String,
}

impl Origin {
    /// Origin for a PDF with the given name and hash.
    pub fn pdf(filename: impl Into<String>, binary_hash: impl Into<String>) -> Self {
        Self {
            mimetype: "application/pdf".to_string(),
            binary_hash: binary_hash.into(),
            filename: filename.into(),
        }
    }
}

/// Document metadata from the PDF info dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Total number of pages in the file, parsed or not
    pub page_count: u32,

    /// Whether the document is encrypted
    pub encrypted: bool,
}

/// A group of text items referenced by pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeGroup {
    pub self_ref: String,
    pub children: Vec<NodeRef>,
}

impl NodeGroup {
    /// Create an empty group.
    pub fn new(self_ref: impl Into<String>) -> Self {
        Self {
            self_ref: self_ref.into(),
            children: Vec::new(),
        }
    }
}

/// A JSON-pointer style reference to a text item, e.g. `{"$ref": "#/texts/4"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRef {
    #[serde(rename = "$ref")]
    pub cref: String,
}

impl NodeRef {
    pub fn new(cref: impl Into<String>) -> Self {
        Self { cref: cref.into() }
    }

    /// Index into `texts`, if this reference points there.
    pub fn index(&self) -> Option<usize> {
        self.cref.strip_prefix("#/texts/")?.parse().ok()
    }
}
