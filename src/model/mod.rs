//! Document model types for thesis content representation.
//!
//! This module defines the value types a thesis JSON file deserializes
//! into. Everything is immutable once loaded; loose input shapes (plain
//! strings vs. link records, numeric vs. string ids) are normalized here so
//! the renderer never has to branch on them.

mod config;
mod document;
mod meta;
mod scalar;
mod section;

pub use config::{Config, StyleRules, Theme};
pub use document::ThesisDocument;
pub use meta::{Credit, Meta};
pub use scalar::Scalar;
pub use section::{
    AbstractBlock, BibEntry, Bibliography, ContentItem, ContentSection, ImageItem, Section,
};
