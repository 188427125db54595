//! Local file fetcher.

use super::{Fetch, FetchResponse};
use crate::detect::SourceKind;
use crate::error::LoadError;
use std::fs;
use std::io::ErrorKind;

/// Reads documents from the local filesystem.
///
/// Missing and unreadable files are reported the way a static file server
/// would answer (404 and 403), so callers see one status path for both
/// local and remote sources.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    _private: (),
}

impl FileFetcher {
    /// Create a new file fetcher.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Fetch for FileFetcher {
    fn schemes(&self) -> &[&str] {
        &["file"]
    }

    fn name(&self) -> &str {
        "file"
    }

    fn fetch(&self, location: &str) -> Result<FetchResponse, LoadError> {
        let path = match SourceKind::detect(location) {
            SourceKind::Local(path) => path,
            SourceKind::Remote { scheme, .. } => return Err(LoadError::UnsupportedScheme(scheme)),
        };

        match fs::read(&path) {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FetchResponse::status(404)),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Ok(FetchResponse::status(403)),
            Err(e) => Err(LoadError::Io(e)),
        }
    }
}
