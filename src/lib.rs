//! # thesisdoc
//!
//! Render structured thesis documents described by JSON into styled HTML.
//!
//! A thesis file holds theme configuration, a title block and an ordered
//! list of content sections (abstract, body sections, bibliography). This
//! library loads it, normalizes its loose shapes and renders a page with
//! theme variables, injected style rules and citation links.
//!
//! ## Quick Start
//!
//! ```no_run
//! use thesisdoc::{load_file, render};
//!
//! fn main() -> thesisdoc::Result<()> {
//!     let doc = load_file("thesis.json")?;
//!
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&doc, &options)?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Citation links**: `[n]` markers in free text link to `#ref-n`
//! - **Theming**: theme fields become CSS custom properties
//! - **Style rules**: global and per-section selector rules in one sheet
//! - **Image policies**: sequential files, explicit files or placeholders
//! - **Remote sources**: HTTP(S) loading with the `http` feature

pub mod audit;
pub mod detect;
pub mod error;
pub mod load;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use audit::{audit_citations, CitationReport};
pub use detect::SourceKind;
pub use error::{Error, LoadError, Result};
pub use load::{Fetch, FetchResponse, FetcherRegistry, FileFetcher, Loader};
pub use model::{
    AbstractBlock, BibEntry, Bibliography, Config, ContentItem, ContentSection, Credit, ImageItem,
    Meta, Scalar, Section, StyleRules, Theme, ThesisDocument,
};
pub use render::{
    ImagePolicy, JsonFormat, RenderOptions, RenderResult, RenderStats, Rendered,
};

use std::path::Path;

/// Load a thesis document from a local file.
///
/// # Example
///
/// ```no_run
/// use thesisdoc::load_file;
///
/// let doc = load_file("thesis.json").unwrap();
/// println!("Sections: {}", doc.section_count());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<ThesisDocument> {
    let path = path.as_ref();
    Loader::with_defaults().load(&path.to_string_lossy())
}

/// Load a thesis document from any supported location (path or URL).
pub fn load(location: &str) -> Result<ThesisDocument> {
    Loader::with_defaults().load(location)
}

/// Render a thesis file to a complete HTML page with default options.
///
/// # Example
///
/// ```no_run
/// use thesisdoc::to_html;
///
/// let html = to_html("thesis.json").unwrap();
/// std::fs::write("index.html", html).unwrap();
/// ```
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = load_file(path)?;
    render::to_html(&doc, &RenderOptions::default())
}

/// Render a thesis file to HTML with custom options.
pub fn to_html_with_options<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = load_file(path)?;
    render::to_html(&doc, options)
}

/// Builder for loading and rendering thesis documents.
///
/// # Example
///
/// ```no_run
/// use thesisdoc::{ImagePolicy, Thesisdoc};
///
/// let html = Thesisdoc::new()
///     .with_image_policy(ImagePolicy::ExplicitFile)
///     .escape_text()
///     .load("thesis.json")?
///     .to_html()?;
/// # Ok::<(), thesisdoc::Error>(())
/// ```
pub struct Thesisdoc {
    loader: Loader,
    render_options: RenderOptions,
}

impl Thesisdoc {
    /// Create a new builder with the default loader.
    pub fn new() -> Self {
        Self {
            loader: Loader::with_defaults(),
            render_options: RenderOptions::default(),
        }
    }

    /// Use a custom loader (e.g. with extra fetchers registered).
    pub fn with_loader(mut self, loader: Loader) -> Self {
        self.loader = loader;
        self
    }

    /// Set the image resolution policy.
    pub fn with_image_policy(mut self, policy: ImagePolicy) -> Self {
        self.render_options = self.render_options.with_image_policy(policy);
        self
    }

    /// Escape document text instead of trusting it as markup.
    pub fn escape_text(mut self) -> Self {
        self.render_options = self.render_options.with_escape(true);
        self
    }

    /// Emit only the container element.
    pub fn fragment(mut self) -> Self {
        self.render_options = self.render_options.with_fragment(true);
        self
    }

    /// Set the external stylesheet href.
    pub fn with_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_stylesheet(href);
        self
    }

    /// Check local image files against a directory.
    pub fn with_asset_root(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.render_options = self.render_options.with_asset_root(dir);
        self
    }

    /// Load a document and return a result wrapper.
    pub fn load(self, location: &str) -> Result<ThesisdocResult> {
        let document = self.loader.load(location)?;
        Ok(ThesisdocResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Load and render, producing the error page if loading fails.
    ///
    /// Invalid render options are returned as `Err` without fetching.
    pub fn render(&self, location: &str) -> Result<Rendered> {
        render::render_location(&self.loader, location, &self.render_options)
    }
}

impl Default for Thesisdoc {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded document plus the options to render it with.
pub struct ThesisdocResult {
    /// The loaded document
    pub document: ThesisDocument,
    render_options: RenderOptions,
}

impl ThesisdocResult {
    /// Convert to HTML.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Convert to HTML with statistics.
    pub fn to_html_with_stats(&self) -> Result<RenderResult> {
        render::to_html_with_stats(&self.document, &self.render_options)
    }

    /// Convert to normalized JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Audit citation markers against the bibliography.
    pub fn audit(&self) -> CitationReport {
        audit_citations(&self.document)
    }

    /// Get the document.
    pub fn document(&self) -> &ThesisDocument {
        &self.document
    }
}
