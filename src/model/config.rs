//! Theme and style configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered map of CSS selector to rule body.
///
/// Order matters: rules are emitted in the order the document lists them.
pub type StyleRules = IndexMap<String, String>;

/// Document-level presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Named theme values
    pub theme: Option<Theme>,

    /// Global selector rules, emitted before any section rules
    pub styles: Option<StyleRules>,
}

/// Named colors, fonts and layout values.
///
/// No defaults are applied: an absent field produces no declaration and
/// the surrounding stylesheet keeps whatever it already had.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub paper_width: Option<String>,
    pub font_heading: Option<String>,
    pub font_body: Option<String>,
}

impl Theme {
    /// Theme fields paired with the style variable each one sets.
    pub fn variables(&self) -> [(&'static str, Option<&str>); 8] {
        [
            ("--primary", self.primary_color.as_deref()),
            ("--secondary", self.secondary_color.as_deref()),
            ("--accent", self.accent_color.as_deref()),
            ("--background", self.background_color.as_deref()),
            ("--text", self.text_color.as_deref()),
            ("--paper-width", self.paper_width.as_deref()),
            ("--font-heading", self.font_heading.as_deref()),
            ("--font-body", self.font_body.as_deref()),
        ]
    }
}
