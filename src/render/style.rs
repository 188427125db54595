//! Page style sheet and theme variables.

use crate::model::{StyleRules, Theme};
use once_cell::sync::Lazy;
use regex::Regex;

use super::escape_attr;

/// Closing style tags in any letter case.
static STYLE_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</(style)").unwrap());

/// Accumulates selector rules for the single injected `<style>` element.
///
/// Global rules are pushed first, then each section's rules as that
/// section renders. The sheet is materialized once, after the content pass.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    css: String,
    rule_count: usize,
}

impl StyleSheet {
    /// Create an empty style sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one `selector { body }` rule.
    pub fn push_rule(&mut self, selector: &str, body: &str) {
        self.css.push_str(selector);
        self.css.push_str(" { ");
        self.css.push_str(body);
        self.css.push_str(" }\n");
        self.rule_count += 1;
    }

    /// Append every rule of a map, in map order.
    pub fn push_rules(&mut self, rules: &StyleRules) {
        for (selector, body) in rules {
            self.push_rule(selector, body);
        }
    }

    /// Number of rules pushed so far.
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// Check if no rules were pushed.
    pub fn is_empty(&self) -> bool {
        self.rule_count == 0
    }

    /// The accumulated CSS text.
    pub fn as_css(&self) -> &str {
        &self.css
    }

    /// The `<style>` element, or nothing for an empty sheet.
    pub fn to_style_element(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        // A stray closing tag inside a rule body would end the element early.
        let css = STYLE_CLOSE.replace_all(&self.css, "<\\/$1");
        format!("<style id=\"thesis-styles\">\n{}</style>\n", css)
    }
}

/// Inline custom property declarations for the theme's present fields.
///
/// Absent fields produce nothing, leaving whatever the page stylesheet
/// already defines for that variable.
pub fn theme_declarations(theme: &Theme) -> String {
    theme
        .variables()
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| format!("{}: {};", name, escape_attr(v))))
        .collect::<Vec<_>>()
        .join(" ")
}
