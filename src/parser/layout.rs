//! Layout analysis over extracted text lines.
//!
//! lopdf gives us one line of text per text object. The analyzer labels
//! each normalized line (chapter header, section header, list item, ...)
//! and merges wrapped lines back into paragraphs.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use super::normalize::{is_uppercase_line, join_continuation, normalize_line};
use crate::ipc::chapter_number;
use crate::model::{ItemLabel, TextItem};

/// Longest line still considered a heading.
const MAX_HEADING_CHARS: usize = 120;
/// A running header must start at least this many pages.
const MIN_HEADER_PAGES: usize = 3;

struct Patterns {
    page_number: Regex,
    chapter: Regex,
    section: Regex,
    list_item: Regex,
    paragraph_start: Regex,
}

impl Patterns {
    fn new() -> Self {
        Self {
            page_number: Regex::new(r"^(?i:page\s+)?(?:-\s*)?\d{1,4}(?:\s*-)?$")
                .expect("page number pattern"),
            chapter: Regex::new(
                r"^(?:CHAPTER|Chapter)\s+([IVXLCDMivxlcdm]+[A-Za-z]?)\b\.?\s*(.*)$",
            )
            .expect("chapter pattern"),
            section: Regex::new(
                r"^(\d{1,3}[A-Z]{0,2})\.\s*(.+?)\s*(?:\.\s*)?(?:—|–|--|:-|\.-)\s*(.*)$",
            )
            .expect("section pattern"),
            list_item: Regex::new(r"^(\([a-z]{1,5}\)|\(\d{1,2}\)|[•●▪*]|-)\s+(.+)$")
                .expect("list item pattern"),
            paragraph_start: Regex::new(r"^(?:Explanations?|Illustrations?|Exception|Provided)\b")
                .expect("paragraph start pattern"),
        }
    }
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(Patterns::new)
}

/// `CHAPTER <numeral> [title]` split into the uppercase numeral and title.
///
/// The numeral must be a valid roman number and an inline title must not
/// start lowercase, so running text such as "chapter did not apply" or
/// "Chapter did not apply" stays text.
fn match_chapter(line: &str) -> Option<(String, &str)> {
    let caps = patterns().chapter.captures(line)?;
    let numeral = caps.get(1)?.as_str().to_uppercase();
    chapter_number(&numeral)?;

    let title = caps
        .get(2)?
        .as_str()
        .trim_start_matches(['—', '–', '-', '.', ' '])
        .trim();
    if title.chars().next().is_some_and(char::is_lowercase) {
        return None;
    }
    Some((numeral, title))
}

/// Lines that start at least three pages and at least half of all pages.
pub fn detect_running_headers(pages: &[Vec<String>]) -> HashSet<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for lines in pages {
        if let Some(first) = lines.iter().map(|l| normalize_line(l)).find(|l| !l.is_empty()) {
            if !patterns().page_number.is_match(&first) {
                *counts.entry(first).or_default() += 1;
            }
        }
    }

    counts
        .into_iter()
        .filter(|(_, n)| *n >= MIN_HEADER_PAGES && n * 2 >= pages.len())
        .map(|(line, _)| line)
        .collect()
}

/// A block being assembled from consecutive lines.
#[derive(Debug)]
struct OpenBlock {
    label: ItemLabel,
    page_no: u32,
    orig: Vec<String>,
    text: String,
    level: Option<u8>,
    marker: Option<String>,
}

impl OpenBlock {
    fn new(label: ItemLabel, page_no: u32, raw: &str, text: &str) -> Self {
        Self {
            label,
            page_no,
            orig: vec![raw.to_string()],
            text: text.to_string(),
            level: None,
            marker: None,
        }
    }

    fn level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    fn push(&mut self, raw: &str, text: &str) {
        self.orig.push(raw.to_string());
        join_continuation(&mut self.text, text);
    }

    fn is_body(&self) -> bool {
        matches!(self.label, ItemLabel::Text | ItemLabel::ListItem)
    }

    fn accepts_continuation(&self, line: &str) -> bool {
        if !self.is_body() {
            return false;
        }
        let p = patterns();
        if p.paragraph_start.is_match(line)
            || p.list_item.is_match(line)
            || p.section.is_match(line)
            || match_chapter(line).is_some()
            || is_uppercase_line(line, 3)
        {
            return false;
        }
        let terminated = self
            .text
            .trim_end_matches(['"', '\'', ')', ']', '”', '’'])
            .ends_with(['.', ':', ';', '?', '!']);
        let starts_lower = line.chars().next().is_some_and(char::is_lowercase);
        !terminated || starts_lower
    }

    fn into_item(self) -> TextItem {
        let mut item =
            TextItem::new(self.label, self.page_no, self.text).with_orig(self.orig.join("\n"));
        item.level = self.level;
        item.marker = self.marker;
        item
    }
}

/// Labels lines and groups them into text items.
///
/// The analyzer is stateful across pages: the document title is only
/// recognised before the first chapter, and a paragraph or list item left
/// open at the end of a page continues on the next one. Such an item keeps
/// the page it starts on and is returned once it closes, so it can follow
/// the furniture of the page it started on. Call [`finish`](Self::finish)
/// after the last page.
#[derive(Debug, Default)]
pub struct LayoutAnalyzer {
    detect_furniture: bool,
    running_headers: HashSet<String>,
    seen_title: bool,
    seen_structure: bool,
    open: Option<OpenBlock>,
}

impl LayoutAnalyzer {
    pub fn new(detect_furniture: bool) -> Self {
        Self {
            detect_furniture,
            ..Default::default()
        }
    }

    /// Use these lines as running headers when they open a page.
    pub fn with_running_headers(mut self, headers: HashSet<String>) -> Self {
        self.running_headers = headers;
        self
    }

    /// Turn the raw lines of one page into labelled text items.
    pub fn analyze_page(&mut self, page_no: u32, raw_lines: &[String]) -> Vec<TextItem> {
        let mut items = Vec::new();
        let mut first_line = true;

        // Only running text carries over a page break.
        if self.open.as_ref().is_some_and(|block| !block.is_body()) {
            self.flush(&mut items);
        }

        for raw in raw_lines {
            let line = normalize_line(raw);
            if line.is_empty() {
                self.flush(&mut items);
                continue;
            }
            let is_first = std::mem::replace(&mut first_line, false);

            if self.detect_furniture {
                if patterns().page_number.is_match(&line) {
                    items.push(
                        TextItem::new(ItemLabel::PageFooter, page_no, line).with_orig(raw.as_str()),
                    );
                    continue;
                }
                if is_first && self.running_headers.contains(&line) {
                    items.push(
                        TextItem::new(ItemLabel::PageHeader, page_no, line).with_orig(raw.as_str()),
                    );
                    continue;
                }
            }

            if let Some(block) = self.open.as_mut() {
                if block.accepts_continuation(&line) {
                    block.push(raw, &line);
                    continue;
                }
            }

            self.classify(raw, &line, &mut items, page_no);
        }

        items
    }

    /// Close the block still open after the last page.
    pub fn finish(&mut self) -> Option<TextItem> {
        self.open.take().map(OpenBlock::into_item)
    }

    fn flush(&mut self, items: &mut Vec<TextItem>) {
        if let Some(item) = self.finish() {
            items.push(item);
        }
    }

    fn classify(&mut self, raw: &str, line: &str, items: &mut Vec<TextItem>, page_no: u32) {
        let p = patterns();

        if let Some((numeral, title)) = match_chapter(line) {
            self.flush(items);
            self.seen_structure = true;
            items.push(
                TextItem::new(ItemLabel::ChapterHeader, page_no, format!("CHAPTER {}", numeral))
                    .with_orig(raw)
                    .with_level(1),
            );
            if !title.is_empty() {
                self.open = Some(OpenBlock::new(ItemLabel::Heading, page_no, raw, title).level(2));
            }
            return;
        }

        if !self.seen_title && !self.seen_structure && is_uppercase_line(line, 3) {
            self.flush(items);
            self.seen_title = true;
            self.open = Some(OpenBlock::new(ItemLabel::Title, page_no, raw, line));
            return;
        }

        if let Some(caps) = p.section.captures(line) {
            self.flush(items);
            self.seen_structure = true;
            let heading = format!("{}. {}", &caps[1], caps[2].trim_end_matches('.'));
            items.push(
                TextItem::new(ItemLabel::SectionHeader, page_no, heading)
                    .with_orig(raw)
                    .with_level(3),
            );
            let body = caps[3].trim();
            if !body.is_empty() {
                self.open = Some(OpenBlock::new(ItemLabel::Text, page_no, body, body));
            }
            return;
        }

        if is_uppercase_line(line, 3) && line.chars().count() <= MAX_HEADING_CHARS {
            // Wrapped headings continue on the next uppercase line.
            if let Some(block) = self.open.as_mut() {
                if block.label == ItemLabel::Heading {
                    block.push(raw, line);
                    return;
                }
            }
            self.flush(items);
            self.open = Some(OpenBlock::new(ItemLabel::Heading, page_no, raw, line).level(2));
            return;
        }

        self.flush(items);

        if let Some(caps) = p.list_item.captures(line) {
            let mut block = OpenBlock::new(ItemLabel::ListItem, page_no, raw, line);
            block.marker = Some(caps[1].to_string());
            self.open = Some(block);
            return;
        }

        self.open = Some(OpenBlock::new(ItemLabel::Text, page_no, raw, line));
    }
}
