//! Rendering options and configuration.

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Default host for query-based placeholder images.
pub const DEFAULT_PLACEHOLDER_HOST: &str = "placehold.co";

/// Reference used by [`ImagePolicy::ExplicitFile`] when an item names no file.
pub const MISSING_FILE_REF: &str = "missing-file-ref.png";

/// Default href of the external page stylesheet.
pub const DEFAULT_STYLESHEET: &str = "style.css";

/// Options for rendering a thesis document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// How image items resolve to a `src`
    pub image_policy: ImagePolicy,

    /// Escape interpolated text instead of trusting it as markup
    pub escape_text: bool,

    /// Emit only the container element instead of a full page
    pub fragment: bool,

    /// Href of the external stylesheet that consumes the theme variables
    pub stylesheet_href: Option<String>,

    /// Page `<title>` override (defaults to the document title)
    pub page_title: Option<String>,

    /// Directory that relative image references resolve against; when
    /// set, missing files are replaced by a notice at render time
    pub asset_root: Option<PathBuf>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image resolution policy.
    pub fn with_image_policy(mut self, policy: ImagePolicy) -> Self {
        self.image_policy = policy;
        self
    }

    /// Enable or disable escaping of document text.
    pub fn with_escape(mut self, escape: bool) -> Self {
        self.escape_text = escape;
        self
    }

    /// Enable or disable fragment output.
    pub fn with_fragment(mut self, fragment: bool) -> Self {
        self.fragment = fragment;
        self
    }

    /// Set the external stylesheet href.
    pub fn with_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheet_href = Some(href.into());
        self
    }

    /// Do not link any external stylesheet.
    pub fn without_stylesheet(mut self) -> Self {
        self.stylesheet_href = None;
        self
    }

    /// Override the page title.
    pub fn with_page_title(mut self, title: impl Into<String>) -> Self {
        self.page_title = Some(title.into());
        self
    }

    /// Set the asset root used to check local image files.
    pub fn with_asset_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_root = Some(dir.into());
        self
    }

    /// Check that the options are usable.
    pub fn validate(&self) -> Result<()> {
        if let ImagePolicy::Placeholder { host } = &self.image_policy {
            if host.trim().is_empty() || host.contains('/') {
                return Err(Error::InvalidOption(format!(
                    "placeholder host must be a bare host name, got {:?}",
                    host
                )));
            }
        }
        Ok(())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            image_policy: ImagePolicy::default(),
            escape_text: false,
            fragment: false,
            stylesheet_href: Some(DEFAULT_STYLESHEET.to_string()),
            page_title: None,
            asset_root: None,
        }
    }
}

/// How an image item turns into an image reference.
///
/// One policy applies to a whole render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImagePolicy {
    /// `https://{host}/600x300/EEE/31343C?text={query}` from the item's `query`
    Placeholder {
        /// Placeholder service host
        host: String,
    },
    /// The item's `file` field, or [`MISSING_FILE_REF`] when absent
    ExplicitFile,
    /// `1.jpg`, `2.jpg`, ... in the order images appear in the document
    #[default]
    Sequential,
}

impl ImagePolicy {
    /// Placeholder policy on the default host.
    pub fn placeholder() -> Self {
        ImagePolicy::Placeholder {
            host: DEFAULT_PLACEHOLDER_HOST.to_string(),
        }
    }
}
