//! Document model types.
//!
//! The representation produced by conversion and consumed by the
//! exporters. Its shape is the contract of the JSON exports, so field
//! names here are part of the output format.

mod document;
mod item;
mod page;

pub use document::{Document, Metadata, NodeGroup, NodeRef, Origin, SCHEMA_NAME, SCHEMA_VERSION};
pub use item::{ItemLabel, TextItem};
pub use page::{PageInfo, Size};
