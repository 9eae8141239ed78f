//! Fixture-file source: reads a saved TMDB discover page from disk.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{tmdb, FetchError, MovieSource};
use crate::core::movie::MovieItem;

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MovieSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_movies(&self) -> Result<Vec<MovieItem>, FetchError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.describe(),
                source,
            })?;
        tmdb::parse_discover(&body)
    }
}
