//! Rendering result with metadata and statistics.

use crate::error::Error;
use crate::model::Meta;
use serde::Serialize;

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize)]
pub struct RenderResult {
    /// The rendered HTML
    pub content: String,

    /// Title block of the source document
    pub meta: Meta,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, meta: Meta, stats: RenderStats) -> Self {
        Self {
            content,
            meta,
            stats,
        }
    }
}

/// Outcome of loading and rendering a document from a location.
///
/// Both arms carry a complete page: a failed load still produces output,
/// with the container holding only the load error panel.
#[derive(Debug)]
pub enum Rendered {
    /// The document loaded and rendered.
    Document(RenderResult),

    /// The document could not be loaded.
    Failed {
        /// Page whose container holds the error panel
        content: String,
        /// Why loading failed
        error: Error,
    },
}

impl Rendered {
    /// The page to write, whichever way the render went.
    pub fn content(&self) -> &str {
        match self {
            Rendered::Document(result) => &result.content,
            Rendered::Failed { content, .. } => content,
        }
    }

    /// Check whether the document rendered.
    pub fn is_ok(&self) -> bool {
        matches!(self, Rendered::Document(_))
    }

    /// The load error, if any.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Rendered::Document(_) => None,
            Rendered::Failed { error, .. } => Some(error),
        }
    }
}

/// Statistics collected during rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    /// Top-level sections rendered (abstract, section, bibliography)
    pub section_count: u32,

    /// Paragraphs and blockquotes
    pub paragraph_count: u32,

    /// Lists
    pub list_count: u32,

    /// Images rendered as figures
    pub image_count: u32,

    /// Images replaced by a missing-image notice
    pub missing_image_count: u32,

    /// Citation markers turned into links
    pub citation_count: u32,

    /// Bibliography entries
    pub bibliography_entry_count: u32,

    /// Rules in the injected style sheet
    pub style_rule_count: u32,

    /// Sections and items skipped for an unknown type tag
    pub skipped_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;

    #[test]
    fn test_rendered_failed_accessors() {
        let rendered = Rendered::Failed {
            content: "<div id=\"app\"></div>".to_string(),
            error: LoadError::Status {
                code: 404,
                location: "thesis.json".to_string(),
            }
            .into(),
        };
        assert!(!rendered.is_ok());
        assert!(rendered.error().is_some());
        assert!(rendered.content().contains("app"));
    }
}
