//! Rendering options and page selection.

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Options for the Markdown and text exporters.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Emit running headers and page numbers too
    pub include_furniture: bool,

    /// Prepend YAML frontmatter (Markdown only)
    pub include_frontmatter: bool,

    /// Only render items from these pages
    pub page_selection: PageSelection,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable furniture output.
    pub fn with_furniture(mut self, include: bool) -> Self {
        self.include_furniture = include;
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_furniture: false,
            include_frontmatter: false,
            page_selection: PageSelection::All,
        }
    }
}

/// A set of 1-indexed pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    #[default]
    All,
    /// Inclusive range
    Range(RangeInclusive<u32>),
    /// Sorted, de-duplicated page list
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number is selected.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.binary_search(&page).is_ok(),
        }
    }

    /// Parse a selection such as `all`, `1-10` or `1,3,5-7`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                let range = parse_range(s, start, end)?;
                return Ok(PageSelection::Range(range));
            }
        }

        let mut pages = BTreeSet::new();
        for part in s.split(',').map(str::trim) {
            match part.split_once('-') {
                Some((start, end)) => pages.extend(parse_range(s, start, end)?),
                None => {
                    pages.insert(parse_page(s, part)?);
                }
            }
        }

        Ok(PageSelection::Pages(pages.into_iter().collect()))
    }
}

fn parse_page(input: &str, part: &str) -> Result<u32> {
    match part.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(input.to_string())),
        Ok(page) => Ok(page),
    }
}

fn parse_range(input: &str, start: &str, end: &str) -> Result<RangeInclusive<u32>> {
    let start = parse_page(input, start)?;
    let end = parse_page(input, end)?;
    if start > end {
        return Err(Error::InvalidPageRange(input.to_string()));
    }
    Ok(start..=end)
}
