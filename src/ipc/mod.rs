//! Indian Penal Code specific views of a converted document.

mod sections;

pub use sections::{
    chapter_number, extract_sections, find_section, roman_to_u32, sections_to_json, IpcSection,
};
