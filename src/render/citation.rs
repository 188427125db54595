//! Citation marker linking.
//!
//! Free text may reference bibliography entries with bracketed numeric
//! markers such as `[3]`. Each marker becomes a link to the entry's anchor
//! (`#ref-3`). Whether the entry exists is not checked here; see
//! [`crate::audit`] for that.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Either an already linked marker (kept as is) or a bare one.
static LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r##"<a href="#ref-\d+" class="citation-link">\[\d+\]</a>|\[(\d+)\]"##).unwrap()
});

static MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d+)\]").unwrap());

/// Replace every `[n]` marker with a link to `#ref-n`.
///
/// All other text is left byte for byte. Markers that are already linked
/// are not linked again, so applying this twice gives the same result as
/// applying it once.
///
/// # Example
/// ```
/// use thesisdoc::render::link_citations;
///
/// assert_eq!(
///     link_citations("See [1]."),
///     r##"See <a href="#ref-1" class="citation-link">[1]</a>."##
/// );
/// ```
pub fn link_citations(text: &str) -> String {
    link_citations_counted(text).0
}

/// Like [`link_citations`], also returning how many links were added.
pub fn link_citations_counted(text: &str) -> (String, usize) {
    if text.is_empty() {
        return (String::new(), 0);
    }
    let mut added = 0;
    let linked = LINK_PATTERN
        .replace_all(text, |caps: &Captures| match caps.get(1) {
            Some(id) => {
                added += 1;
                format!(
                    r##"<a href="#ref-{0}" class="citation-link">[{0}]</a>"##,
                    id.as_str()
                )
            }
            None => caps[0].to_string(),
        })
        .into_owned();
    (linked, added)
}

/// Ids of all citation markers in `text`, in order of appearance.
pub fn citation_markers(text: &str) -> Vec<&str> {
    MARKER_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
