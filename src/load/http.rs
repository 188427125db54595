//! HTTP(S) fetcher.

use super::{Fetch, FetchResponse};
use crate::error::LoadError;

/// Fetches documents with a single blocking GET request.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a default client.
    pub fn new() -> Self {
        Self::with_client(reqwest::blocking::Client::new())
    }

    /// Create a fetcher around an existing client.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    fn schemes(&self) -> &[&str] {
        &["http", "https"]
    }

    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self, location: &str) -> Result<FetchResponse, LoadError> {
        let response = self
            .client
            .get(location)
            .send()
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        Ok(FetchResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_schemes() {
        let fetcher = HttpFetcher::new();
        assert!(fetcher.supports_scheme("http"));
        assert!(fetcher.supports_scheme("HTTPS"));
        assert!(!fetcher.supports_scheme("file"));
        assert_eq!(fetcher.name(), "http");
    }
}
