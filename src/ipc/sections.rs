//! IPC section records.
//!
//! Flattens a converted document into one record per numbered section with
//! the chapter it belongs to. The key names match the `ipc.json` corpus
//! format, including the capitalised `Section` key.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Document, ItemLabel, TextItem};
use crate::render::{to_json, JsonFormat, DICT_INDENT};

/// One numbered section of the Code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpcSection {
    /// Chapter number in arabic numerals, e.g. `"16"` or `"9A"`
    pub chapter: Option<String>,

    pub chapter_title: Option<String>,

    /// Section number, e.g. `"302"` or `"120A"`
    #[serde(rename = "Section")]
    pub section: String,

    pub section_title: String,

    /// Section body; blocks separated by `\n`
    pub section_desc: String,
}

/// Collect section records from the document body in reading order.
pub fn extract_sections(doc: &Document) -> Vec<IpcSection> {
    let mut collector = SectionCollector::default();
    for item in doc.body_items() {
        collector.visit(item);
    }
    collector.finish()
}

/// Serialize section records as an indented JSON array.
pub fn sections_to_json(sections: &[IpcSection]) -> Result<String> {
    to_json(sections, JsonFormat::Indented(DICT_INDENT))
}

/// Look up a section by number, ignoring ASCII case.
pub fn find_section<'a>(sections: &'a [IpcSection], number: &str) -> Option<&'a IpcSection> {
    let number = number.trim();
    sections
        .iter()
        .find(|s| s.section.eq_ignore_ascii_case(number))
}

#[derive(Default)]
struct SectionCollector {
    chapter: Option<String>,
    chapter_title: Option<String>,
    awaiting_chapter_title: bool,
    current: Option<IpcSection>,
    sections: Vec<IpcSection>,
}

impl SectionCollector {
    fn visit(&mut self, item: &TextItem) {
        let text = item.text.trim();
        match item.label {
            ItemLabel::ChapterHeader => {
                self.close();
                let numeral = text
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or_default()
                    .to_string();
                self.chapter = chapter_number(&numeral).or(Some(numeral));
                self.chapter_title = None;
                self.awaiting_chapter_title = true;
            }
            ItemLabel::Heading if self.awaiting_chapter_title && self.current.is_none() => {
                self.chapter_title = Some(text.to_string());
                self.awaiting_chapter_title = false;
            }
            ItemLabel::Heading | ItemLabel::Title => {
                self.close();
                self.awaiting_chapter_title = false;
            }
            ItemLabel::SectionHeader => {
                self.close();
                self.awaiting_chapter_title = false;
                let (number, title) = text.split_once(". ").unwrap_or((text, ""));
                self.current = Some(IpcSection {
                    chapter: self.chapter.clone(),
                    chapter_title: self.chapter_title.clone(),
                    section: number.trim_end_matches('.').to_string(),
                    section_title: title.trim().to_string(),
                    section_desc: String::new(),
                });
            }
            ItemLabel::Text | ItemLabel::ListItem => {
                if let Some(current) = self.current.as_mut() {
                    if !current.section_desc.is_empty() {
                        current.section_desc.push('\n');
                    }
                    current.section_desc.push_str(text);
                }
            }
            ItemLabel::PageHeader | ItemLabel::PageFooter => {}
        }
    }

    fn close(&mut self) {
        if let Some(section) = self.current.take() {
            self.sections.push(section);
        }
    }

    fn finish(mut self) -> Vec<IpcSection> {
        self.close();
        self.sections
    }
}

/// Convert a chapter numeral to arabic, keeping a letter suffix:
/// `XVI` → `16`, `IXA` → `9A`.
pub fn chapter_number(numeral: &str) -> Option<String> {
    let numeral = numeral.trim().to_ascii_uppercase();
    if let Some(n) = roman_to_u32(&numeral) {
        return Some(n.to_string());
    }

    let (idx, last) = numeral.char_indices().last()?;
    if !last.is_ascii_uppercase() {
        return None;
    }
    let (stem, suffix) = numeral.split_at(idx);
    roman_to_u32(stem).map(|n| format!("{}{}", n, suffix))
}

/// Parse a canonical roman numeral (`IV`, not `IIII`).
pub fn roman_to_u32(numeral: &str) -> Option<u32> {
    if numeral.is_empty() {
        return None;
    }

    let mut total = 0u32;
    let mut prev = 0u32;
    for c in numeral.chars().rev() {
        let value = match c.to_ascii_uppercase() {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => return None,
        };
        if value < prev {
            total = total.checked_sub(value)?;
        } else {
            total += value;
            prev = value;
        }
    }

    (to_roman(total).eq_ignore_ascii_case(numeral)).then_some(total)
}

fn to_roman(mut n: u32) -> String {
    const TABLE: &[(u32, &str)] = &[
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    let mut out = String::new();
    for &(value, symbol) in TABLE {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    out
}
