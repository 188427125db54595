//! Source location and content detection.

use std::fmt;
use std::path::PathBuf;

/// Where a thesis document is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// Remote document over HTTP(S)
    Remote {
        /// `http` or `https`
        scheme: String,
        /// Full URL
        url: String,
    },
    /// Local file, given as a bare path or a `file://` URL
    Local(PathBuf),
}

impl SourceKind {
    /// Classify a location string.
    ///
    /// # Example
    /// ```
    /// use thesisdoc::detect::SourceKind;
    ///
    /// assert!(SourceKind::detect("https://example.org/thesis.json").is_remote());
    /// assert!(!SourceKind::detect("thesis.json").is_remote());
    /// ```
    pub fn detect(location: &str) -> Self {
        let trimmed = location.trim();
        if let Some((scheme, _)) = trimmed.split_once("://") {
            let scheme = scheme.to_ascii_lowercase();
            if scheme == "file" {
                let path = &trimmed["file://".len()..];
                return SourceKind::Local(PathBuf::from(path));
            }
            if is_scheme(&scheme) {
                return SourceKind::Remote {
                    scheme,
                    url: trimmed.to_string(),
                };
            }
        }
        SourceKind::Local(PathBuf::from(trimmed))
    }

    /// Scheme used to pick a fetcher (`file` for local paths).
    pub fn scheme(&self) -> &str {
        match self {
            SourceKind::Remote { scheme, .. } => scheme,
            SourceKind::Local(_) => "file",
        }
    }

    /// Check whether the document is fetched over the network.
    pub fn is_remote(&self) -> bool {
        matches!(self, SourceKind::Remote { .. })
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Remote { url, .. } => f.write_str(url),
            SourceKind::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// RFC 3986 scheme characters; rules out Windows drive letters like `C:`.
fn is_scheme(s: &str) -> bool {
    s.len() > 1
        && s.starts_with(|c: char| c.is_ascii_alphabetic())
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Quick check that a body could be a thesis document (a JSON object).
///
/// Skips a UTF-8 byte order mark and leading whitespace.
pub fn looks_like_json(data: &[u8]) -> bool {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    data.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'{')
}
