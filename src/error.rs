//! Error types for thesisdoc library.

use std::io;
use thiserror::Error;

/// Result type alias for thesisdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while fetching or decoding a thesis document.
///
/// Any of these is fatal to a render: the page container is replaced by
/// the load error panel and no section content is produced.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source answered with a non-success status.
    #[error("HTTP error {code} while loading {location}")]
    Status {
        /// Status code returned by the source
        code: u16,
        /// Location that was requested
        location: String,
    },

    /// I/O error when reading a local document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The network request itself failed.
    #[error("Fetch failed: {0}")]
    Transport(String),

    /// The body was not a valid thesis document.
    #[error("Invalid thesis document: {0}")]
    Parse(#[from] serde_json::Error),

    /// No fetcher is registered for the location's scheme.
    #[error("Unsupported source scheme: {0}")]
    UnsupportedScheme(String),
}

impl LoadError {
    /// Status code carried by the error, if the source answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            LoadError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Error types that can occur while loading or rendering a thesis.
#[derive(Error, Debug)]
pub enum Error {
    /// The document could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Error during rendering (HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// A render option was out of range or malformed.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

impl Error {
    /// Check whether this error happened before rendering started.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Error::Load(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Load(LoadError::Parse(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoadError::Status {
            code: 404,
            location: "thesis.json".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 404 while loading thesis.json");
        assert_eq!(err.status(), Some(404));

        let err: Error = err.into();
        assert_eq!(err.to_string(), "HTTP error 404 while loading thesis.json");
        assert!(err.is_load_error());
    }

    #[test]
    fn test_parse_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Load(LoadError::Parse(_))));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: LoadError = io_err.into();
        assert!(matches!(err, LoadError::Io(_)));
        assert_eq!(err.status(), None);
    }
}
