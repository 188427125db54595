//! Document loading with pluggable fetchers.
//!
//! A [`Loader`] performs exactly one read of a thesis document through a
//! [`Fetch`] implementation chosen by the location's scheme. Non-success
//! statuses, transport failures and malformed bodies all surface as a
//! [`LoadError`]; there is no retry.
//!
//! # Example
//!
//! ```no_run
//! use thesisdoc::load::Loader;
//!
//! fn main() -> thesisdoc::Result<()> {
//!     let loader = Loader::with_defaults();
//!     let doc = loader.load("thesis.json")?;
//!     println!("{}", doc.meta.title);
//!     Ok(())
//! }
//! ```

mod file;
#[cfg(feature = "http")]
mod http;

pub use file::FileFetcher;
#[cfg(feature = "http")]
pub use http::HttpFetcher;

use crate::detect::{looks_like_json, SourceKind};
use crate::error::{Error, LoadError, Result};
use crate::model::ThesisDocument;
use std::collections::HashMap;
use std::sync::Arc;

/// Raw answer from a fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP-style status code (200 for a readable local file)
    pub status: u16,
    /// Response body
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Create a successful response.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Create a response with the given status and no body.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for document fetchers.
///
/// Implement this trait to load documents from a new kind of source.
pub trait Fetch: Send + Sync {
    /// URL schemes served by this fetcher, lowercase (e.g. `["https"]`).
    fn schemes(&self) -> &[&str];

    /// Get the name of this fetcher.
    fn name(&self) -> &str;

    /// Read the document at `location` once.
    ///
    /// A source that answers with a failure status should return
    /// `Ok` with that status; `Err` is reserved for failures to get any
    /// answer at all.
    fn fetch(&self, location: &str) -> std::result::Result<FetchResponse, LoadError>;

    /// Check if this fetcher serves the given scheme.
    fn supports_scheme(&self, scheme: &str) -> bool {
        let scheme = scheme.to_lowercase();
        self.schemes().iter().any(|s| *s == scheme)
    }
}

/// Registry mapping URL schemes to fetchers.
pub struct FetcherRegistry {
    fetchers: HashMap<String, Arc<dyn Fetch>>,
}

impl FetcherRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            fetchers: HashMap::new(),
        }
    }

    /// Create a registry with default fetchers (local files, plus HTTP(S)
    /// when the `http` feature is enabled).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(FileFetcher::new()));
        #[cfg(feature = "http")]
        registry.register(Arc::new(HttpFetcher::new()));
        registry
    }

    /// Register a fetcher for all its schemes, replacing earlier ones.
    pub fn register(&mut self, fetcher: Arc<dyn Fetch>) {
        for scheme in fetcher.schemes() {
            self.fetchers.insert(scheme.to_lowercase(), fetcher.clone());
        }
    }

    /// Get the fetcher for a scheme.
    pub fn get(&self, scheme: &str) -> Option<Arc<dyn Fetch>> {
        self.fetchers.get(&scheme.to_lowercase()).cloned()
    }

    /// Check if a scheme is supported.
    pub fn supports(&self, scheme: &str) -> bool {
        self.fetchers.contains_key(&scheme.to_lowercase())
    }
}

impl Default for FetcherRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Loads thesis documents from locations.
pub struct Loader {
    registry: FetcherRegistry,
}

impl Loader {
    /// Create a loader over the given registry.
    pub fn new(registry: FetcherRegistry) -> Self {
        Self { registry }
    }

    /// Create a loader with the default fetchers.
    pub fn with_defaults() -> Self {
        Self::new(FetcherRegistry::with_defaults())
    }

    /// Create a loader with a single fetcher, registered for its own schemes.
    ///
    /// Locations whose scheme the fetcher does not declare still fail with
    /// [`LoadError::UnsupportedScheme`].
    pub fn with_fetcher(fetcher: Arc<dyn Fetch>) -> Self {
        let mut registry = FetcherRegistry::new();
        registry.register(fetcher);
        Self::new(registry)
    }

    /// Fetch and parse the document at `location`.
    pub fn load(&self, location: &str) -> Result<ThesisDocument> {
        self.try_load(location).map_err(|e| {
            log::warn!("Failed to load {}: {}", location, e);
            Error::Load(e)
        })
    }

    fn try_load(&self, location: &str) -> std::result::Result<ThesisDocument, LoadError> {
        let source = SourceKind::detect(location);
        let fetcher = self
            .registry
            .get(source.scheme())
            .ok_or_else(|| LoadError::UnsupportedScheme(source.scheme().to_string()))?;

        log::debug!("Fetching {} with {} fetcher", source, fetcher.name());
        let response = fetcher.fetch(location)?;

        if !response.is_success() {
            return Err(LoadError::Status {
                code: response.status,
                location: location.to_string(),
            });
        }

        if !looks_like_json(&response.body) {
            log::warn!("Body of {} does not start with a JSON object", location);
        }

        Ok(serde_json::from_slice(&response.body)?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Parse a thesis document from a JSON string.
pub fn parse_str(json: &str) -> Result<ThesisDocument> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a thesis document from JSON bytes.
pub fn parse_bytes(data: &[u8]) -> Result<ThesisDocument> {
    Ok(serde_json::from_slice(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubFetcher(FetchResponse);

    impl Fetch for StubFetcher {
        fn schemes(&self) -> &[&str] {
            &["file", "https"]
        }

        fn name(&self) -> &str {
            "stub"
        }

        fn fetch(&self, _location: &str) -> std::result::Result<FetchResponse, LoadError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = FetcherRegistry::with_defaults();
        assert!(registry.supports("file"));
        assert!(registry.supports("FILE"));
        assert!(!registry.supports("ftp"));
    }

    #[test]
    fn test_load_success() {
        let stub = StubFetcher(FetchResponse::ok(r#"{"meta": {"title": "T"}}"#));
        let loader = Loader::with_fetcher(Arc::new(stub));
        let doc = loader.load("thesis.json").unwrap();
        assert_eq!(doc.meta.title, "T");
    }

    #[test]
    fn test_load_bad_status() {
        let loader = Loader::with_fetcher(Arc::new(StubFetcher(FetchResponse::status(503))));
        let err = loader.load("https://example.org/thesis.json").unwrap_err();
        assert!(matches!(
            err,
            Error::Load(LoadError::Status { code: 503, .. })
        ));
    }

    #[test]
    fn test_load_unparseable_body() {
        let loader = Loader::with_fetcher(Arc::new(StubFetcher(FetchResponse::ok("<html>"))));
        let err = loader.load("thesis.json").unwrap_err();
        assert!(matches!(err, Error::Load(LoadError::Parse(_))));
    }

    #[test]
    fn test_load_unsupported_scheme() {
        let loader = Loader::with_fetcher(Arc::new(StubFetcher(FetchResponse::ok("{}"))));
        let err = loader.load("ftp://host/thesis.json").unwrap_err();
        assert!(matches!(
            err,
            Error::Load(LoadError::UnsupportedScheme(ref s)) if s == "ftp"
        ));
    }

    #[test]
    fn test_with_fetcher_only_serves_its_schemes() {
        let loader = Loader::with_fetcher(Arc::new(StubFetcher(FetchResponse::ok("{}"))));
        assert!(loader.load("https://example.org/thesis.json").is_ok());
        let err = loader.load("http://example.org/thesis.json").unwrap_err();
        assert!(matches!(
            err,
            Error::Load(LoadError::UnsupportedScheme(ref s)) if s == "http"
        ));
    }

    #[test]
    fn test_parse_str() {
        let doc = parse_str(r#"{"content": []}"#).unwrap();
        assert!(doc.is_empty());
        assert!(parse_bytes(b"not json").is_err());
    }
}
