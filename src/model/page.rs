//! Page-level types.

use serde::{Deserialize, Serialize};

/// Page dimensions in points (1 point = 1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// ISO A4, the usual size of Indian gazette prints.
    pub const A4: Size = Size {
        width: 595.0,
        height: 842.0,
    };

    /// US Letter.
    pub const LETTER: Size = Size {
        width: 612.0,
        height: 792.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A parsed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Page number (1-indexed)
    pub page_no: u32,

    pub size: Size,

    /// Number of text items that start on this page
    pub text_count: usize,
}

impl PageInfo {
    pub fn new(page_no: u32, size: Size) -> Self {
        Self {
            page_no,
            size,
            text_count: 0,
        }
    }
}
