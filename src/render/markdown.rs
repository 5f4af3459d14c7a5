//! Markdown rendering.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::Result;
use crate::model::{Document, ItemLabel, TextItem};

use super::RenderOptions;

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    Ok(MarkdownRenderer::new(options.clone()).render(doc))
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document. Blocks are separated by one blank line and the
    /// output ends with a single newline.
    pub fn render(&self, doc: &Document) -> String {
        let blocks: Vec<String> = select_items(doc, &self.options)
            .map(render_item)
            .collect();

        let mut output = String::new();
        if self.options.include_frontmatter {
            output.push_str(&frontmatter(doc));
        }
        if !blocks.is_empty() {
            output.push_str(&blocks.join("\n\n"));
            output.push('\n');
        }
        output
    }
}

/// Items to render in reading order, honoring furniture and page selection.
pub(crate) fn select_items<'a>(
    doc: &'a Document,
    options: &'a RenderOptions,
) -> impl Iterator<Item = &'a TextItem> + 'a {
    doc.texts.iter().filter(move |item| {
        (options.include_furniture || !item.label.is_furniture())
            && options.page_selection.includes(item.page_no)
            && !item.is_empty()
    })
}

fn render_item(item: &TextItem) -> String {
    let text = item.text.trim();
    match item.label {
        ItemLabel::Title => format!("# {}", text),
        ItemLabel::ChapterHeader => format!("## {}", text),
        ItemLabel::Heading => format!("### {}", text),
        ItemLabel::SectionHeader => format!("#### {}", text),
        ItemLabel::ListItem => {
            let body = match item.marker.as_deref() {
                Some(m) if !m.starts_with('(') => text.strip_prefix(m).unwrap_or(text).trim_start(),
                _ => text,
            };
            format!("- {}", body)
        }
        ItemLabel::Text | ItemLabel::PageHeader | ItemLabel::PageFooter => {
            escape_block_start(text)
        }
    }
}

/// Keep plain paragraphs from being read as headings, quotes or lists.
fn escape_block_start(text: &str) -> String {
    static ORDERED: OnceLock<Regex> = OnceLock::new();
    let ordered = ORDERED.get_or_init(|| Regex::new(r"^(\d+)\.(\s)").expect("ordered list pattern"));

    if text.starts_with(['#', '>', '-', '+', '*']) {
        format!("\\{}", text)
    } else if ordered.is_match(text) {
        ordered.replace(text, "$1\\.$2").into_owned()
    } else {
        text.to_string()
    }
}

fn frontmatter(doc: &Document) -> String {
    let title = doc
        .metadata
        .title
        .clone()
        .or_else(|| {
            doc.texts
                .iter()
                .find(|t| t.label == ItemLabel::Title)
                .map(|t| t.text.clone())
        })
        .unwrap_or_else(|| doc.name.clone());

    let mut lines = vec!["---".to_string()];
    lines.push(format!("title: \"{}\"", escape_yaml(&title)));
    lines.push(format!("source: \"{}\"", escape_yaml(&doc.origin.filename)));
    lines.push(format!("pages: {}", doc.metadata.page_count));
    lines.push("---".to_string());
    lines.push(String::new());
    lines.push(String::new());
    lines.join("\n")
}

fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageInfo, Size};
    use crate::render::PageSelection;

    fn sample() -> Document {
        let mut doc = Document::new("ipc");
        doc.origin.filename = "ipc.pdf".to_string();
        doc.metadata.page_count = 2;
        doc.add_page(PageInfo::new(1, Size::A4));
        doc.add_page(PageInfo::new(2, Size::A4));
        doc.add_text(TextItem::new(ItemLabel::Title, 1, "THE INDIAN PENAL CODE"));
        doc.add_text(TextItem::new(ItemLabel::ChapterHeader, 1, "CHAPTER XVI").with_level(1));
        doc.add_text(TextItem::new(ItemLabel::Heading, 1, "OF OFFENCES AFFECTING THE HUMAN BODY"));
        doc.add_text(TextItem::new(ItemLabel::SectionHeader, 2, "302. Punishment for murder"));
        doc.add_text(TextItem::new(ItemLabel::Text, 2, "Whoever commits murder shall be punished."));
        doc.add_text(TextItem::new(ItemLabel::ListItem, 2, "(a) with death").with_marker("(a)"));
        doc.add_text(TextItem::new(ItemLabel::PageFooter, 2, "2"));
        doc
    }

    #[test]
    fn test_markdown_structure() {
        let md = to_markdown(&sample(), &RenderOptions::default()).unwrap();
        assert_eq!(
            md,
            "# THE INDIAN PENAL CODE\n\n\
             ## CHAPTER XVI\n\n\
             ### OF OFFENCES AFFECTING THE HUMAN BODY\n\n\
             #### 302. Punishment for murder\n\n\
             Whoever commits murder shall be punished.\n\n\
             - (a) with death\n"
        );
    }

    #[test]
    fn test_furniture_opt_in() {
        let options = RenderOptions::new().with_furniture(true);
        let md = to_markdown(&sample(), &options).unwrap();
        assert!(md.ends_with("- (a) with death\n\n2\n"));
    }

    #[test]
    fn test_page_selection_filters_items() {
        let options = RenderOptions::new().with_pages(PageSelection::Pages(vec![2]));
        let md = to_markdown(&sample(), &options).unwrap();
        assert!(md.starts_with("#### 302."));
        assert!(!md.contains("CHAPTER XVI"));
    }

    #[test]
    fn test_frontmatter() {
        let options = RenderOptions::new().with_frontmatter(true);
        let md = to_markdown(&sample(), &options).unwrap();
        assert!(md.starts_with(
            "---\ntitle: \"THE INDIAN PENAL CODE\"\nsource: \"ipc.pdf\"\npages: 2\n---\n\n# THE"
        ));
    }

    #[test]
    fn test_empty_document() {
        let md = to_markdown(&Document::new("empty"), &RenderOptions::default()).unwrap();
        assert!(md.is_empty());
    }

    #[test]
    fn test_bullet_marker_not_doubled() {
        let item = TextItem::new(ItemLabel::ListItem, 1, "• first").with_marker("•");
        assert_eq!(render_item(&item), "- first");
    }

    #[test]
    fn test_escape_block_start() {
        assert_eq!(escape_block_start("# not a heading"), "\\# not a heading");
        assert_eq!(escape_block_start("1. not a list"), "1\\. not a list");
        assert_eq!(escape_block_start("plain"), "plain");
    }
}
