//! Image reference resolution.

use crate::model::ImageItem;
use std::path::Path;

use super::options::{ImagePolicy, MISSING_FILE_REF};

/// Resolves image items to `src` values under one policy.
///
/// The sequential counter spans the whole render, so numbering continues
/// across sections.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    policy: ImagePolicy,
    counter: u32,
}

impl ImageResolver {
    /// Create a resolver with a fresh counter.
    pub fn new(policy: ImagePolicy) -> Self {
        Self { policy, counter: 0 }
    }

    /// Resolve the next image in document order.
    pub fn resolve(&mut self, item: &ImageItem) -> String {
        self.counter += 1;
        match &self.policy {
            ImagePolicy::Placeholder { host } => {
                let query = item.query.as_deref().unwrap_or_default();
                format!(
                    "https://{}/600x300/EEE/31343C?text={}",
                    host,
                    urlencoding::encode(query)
                )
            }
            ImagePolicy::ExplicitFile => item
                .file
                .as_deref()
                .filter(|f| !f.is_empty())
                .unwrap_or(MISSING_FILE_REF)
                .to_string(),
            ImagePolicy::Sequential => format!("{}.jpg", self.counter),
        }
    }

    /// Number of images resolved so far.
    pub fn resolved(&self) -> u32 {
        self.counter
    }
}

/// Whether `src` names a file relative to the page (and so can be checked
/// against an asset directory).
pub fn is_local_reference(src: &str) -> bool {
    !(src.contains("://") || src.starts_with("data:") || src.starts_with('/'))
}

/// Check a resolved reference against an asset directory.
///
/// Remote and absolute references are never reported missing.
pub fn is_missing(src: &str, asset_root: &Path) -> bool {
    if !is_local_reference(src) {
        return false;
    }
    let relative = src.split(['?', '#']).next().unwrap_or(src);
    !asset_root.join(relative).is_file()
}
