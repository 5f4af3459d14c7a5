//! Plain text rendering.

use crate::error::Result;
use crate::model::Document;

use super::markdown::select_items;
use super::RenderOptions;

/// Convert a document to plain text, one blank line between blocks.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let blocks: Vec<&str> = select_items(doc, options)
        .map(|item| item.text.trim())
        .collect();

    if blocks.is_empty() {
        return Ok(String::new());
    }

    let mut output = blocks.join("\n\n");
    output.push('\n');
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemLabel, PageInfo, Size, TextItem};

    #[test]
    fn test_to_text_skips_furniture() {
        let mut doc = Document::new("ipc");
        doc.add_page(PageInfo::new(1, Size::A4));
        doc.add_text(TextItem::new(ItemLabel::PageHeader, 1, "THE INDIAN PENAL CODE"));
        doc.add_text(TextItem::new(ItemLabel::SectionHeader, 1, "299. Culpable homicide"));
        doc.add_text(TextItem::new(ItemLabel::Text, 1, "Whoever causes death"));
        doc.add_text(TextItem::new(ItemLabel::PageFooter, 1, "88"));

        let text = to_text(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(text, "299. Culpable homicide\n\nWhoever causes death\n");
    }
}
