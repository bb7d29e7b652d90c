//! Client error types.

use thiserror::Error;

/// Result type for backend requests.
pub type Result<T> = std::result::Result<T, Error>;

/// Backend request errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure (unreachable host, timeout, broken body).
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body could not be parsed.
    #[error("invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn http(url: &str, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.to_string(),
            source,
        }
    }

    /// True when the backend could not be reached or did not answer with success.
    #[must_use]
    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Status { .. })
    }
}
