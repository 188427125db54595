//! Citation audit.
//!
//! Rendering links every `[n]` marker whether or not a matching entry
//! exists. This module reports the mismatches so they can be fixed in the
//! source document.

use crate::model::{ContentItem, ContentSection, ThesisDocument};
use crate::render::citation_markers;
use serde::Serialize;

/// Mismatches between citation markers and bibliography entries.
///
/// Every list is in first-seen document order without repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CitationReport {
    /// Ids cited in text with no bibliography entry
    pub unresolved: Vec<String>,

    /// Bibliography ids never cited
    pub unused: Vec<String>,

    /// Bibliography ids that appear more than once
    pub duplicates: Vec<String>,

    /// Total markers found in linkable text
    pub marker_count: usize,
}

impl CitationReport {
    /// Check if every marker resolves and no id repeats.
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty() && self.duplicates.is_empty()
    }
}

fn push_unique(list: &mut Vec<String>, id: &str) {
    if !list.iter().any(|existing| existing == id) {
        list.push(id.to_string());
    }
}

/// Collect markers from the same fields the renderer links.
fn cited_texts(doc: &ThesisDocument) -> Vec<&str> {
    let mut texts: Vec<&str> = Vec::new();
    for section in &doc.content {
        match section {
            ContentSection::Abstract(block) => texts.push(block.body.as_str()),
            ContentSection::Section(s) => {
                for item in &s.content {
                    match item {
                        ContentItem::Paragraph { text } | ContentItem::Blockquote { text } => {
                            texts.push(text)
                        }
                        ContentItem::Definition { def, .. } => texts.push(def),
                        ContentItem::List { items } => texts.extend(items.iter().map(String::as_str)),
                        ContentItem::Subheader { .. }
                        | ContentItem::Image(_)
                        | ContentItem::Unknown { .. } => {}
                    }
                }
            }
            ContentSection::Bibliography(_) | ContentSection::Unknown { .. } => {}
        }
    }
    texts
}

/// Compare citation markers against bibliography ids.
pub fn audit_citations(doc: &ThesisDocument) -> CitationReport {
    let mut report = CitationReport::default();

    let mut known: Vec<String> = Vec::new();
    for id in doc.bibliography_ids() {
        if known.contains(&id) {
            push_unique(&mut report.duplicates, &id);
        } else {
            known.push(id);
        }
    }

    let mut cited: Vec<String> = Vec::new();
    for text in cited_texts(doc) {
        for id in citation_markers(text) {
            report.marker_count += 1;
            push_unique(&mut cited, id);
            if !known.iter().any(|k| k == id) {
                push_unique(&mut report.unresolved, id);
            }
        }
    }

    report.unused = known.into_iter().filter(|id| !cited.contains(id)).collect();
    report
}
