//! Document-level types.

use super::{Config, ContentItem, ContentSection, Meta, StyleRules, Theme};
use serde::{Deserialize, Serialize};

/// A loaded thesis document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThesisDocument {
    /// Theme and global style rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Config>,

    /// Title block (title, authors, date, fields)
    pub meta: Meta,

    /// Content sections in document order
    pub content: Vec<ContentSection>,
}

impl ThesisDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section to the end of the document.
    pub fn add_section(&mut self, section: ContentSection) {
        self.content.push(section);
    }

    /// Theme values, if the document configures any.
    pub fn theme(&self) -> Option<&Theme> {
        self.config.as_ref().and_then(|c| c.theme.as_ref())
    }

    /// Global style rules, if the document configures any.
    pub fn global_styles(&self) -> Option<&StyleRules> {
        self.config.as_ref().and_then(|c| c.styles.as_ref())
    }

    /// Number of top-level sections, including ones with unknown tags.
    pub fn section_count(&self) -> usize {
        self.content.len()
    }

    /// Check if the document has any content sections.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of image items across all sections.
    pub fn image_count(&self) -> usize {
        self.items()
            .filter(|item| matches!(item, ContentItem::Image(_)))
            .count()
    }

    /// All content items of all `section` blocks, in document order.
    pub fn items(&self) -> impl Iterator<Item = &ContentItem> {
        self.content
            .iter()
            .filter_map(|section| match section {
                ContentSection::Section(s) => Some(&s.content),
                _ => None,
            })
            .flatten()
    }

    /// Bibliography ids in document order, as used in `ref-{id}` anchors.
    pub fn bibliography_ids(&self) -> Vec<String> {
        self.content
            .iter()
            .filter_map(|section| match section {
                ContentSection::Bibliography(b) => Some(b.entries.iter().map(|e| e.key())),
                _ => None,
            })
            .flatten()
            .collect()
    }
}
