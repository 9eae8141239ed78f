//! Movie data sources.
//!
//! The carousel consumes exactly one fetch per run.  A source either returns
//! the ordered movie list or a [`FetchError`]; the caller logs the error and
//! carries on with an empty list.

pub mod file;
pub mod tmdb;

use async_trait::async_trait;

use crate::core::movie::MovieItem;

/// Why a movie fetch failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server answered {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("malformed movie payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no API key configured (pass --api-key or set TMDB_API_KEY)")]
    MissingApiKey,
}

impl FetchError {
    /// Wrap a transport error.  reqwest prints the full request URL, query
    /// string included, so it is stripped and `url` is reported instead.
    pub fn http(url: &str, source: reqwest::Error) -> Self {
        FetchError::Http {
            url: url.to_string(),
            source: source.without_url(),
        }
    }
}

/// Anything that can produce the carousel's movie list.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Short label for logs.
    fn describe(&self) -> String;

    async fn fetch_movies(&self) -> Result<Vec<MovieItem>, FetchError>;
}
