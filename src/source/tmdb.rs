//! TMDB "discover" endpoint client and the wire format shared with
//! fixture files.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{FetchError, MovieSource};
use crate::core::movie::MovieItem;

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";

const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w440_and_h660_face";
const BACKDROP_BASE: &str = "https://image.tmdb.org/t/p/w370_and_h556_multi_faces";

/// TMDB movie genre ids.
const GENRES: &[(u32, &str)] = &[
    (12, "Adventure"),
    (14, "Fantasy"),
    (16, "Animation"),
    (18, "Drama"),
    (27, "Horror"),
    (28, "Action"),
    (35, "Comedy"),
    (36, "History"),
    (37, "Western"),
    (53, "Thriller"),
    (80, "Crime"),
    (99, "Documentary"),
    (878, "Science Fiction"),
    (9648, "Mystery"),
    (10402, "Music"),
    (10749, "Romance"),
    (10751, "Family"),
    (10752, "War"),
    (10770, "TV Movie"),
];

fn genre_name(id: u32) -> Option<&'static str> {
    GENRES.iter().find(|(g, _)| *g == id).map(|(_, name)| *name)
}

/// Top-level discover response.
#[derive(Debug, Deserialize)]
pub struct DiscoverPage {
    #[serde(default)]
    pub results: Vec<DiscoverMovie>,
}

#[derive(Debug, Deserialize)]
pub struct DiscoverMovie {
    pub id: u64,
    #[serde(default)]
    pub original_title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub overview: String,
    pub release_date: Option<String>,
}

impl DiscoverMovie {
    pub fn into_item(self) -> MovieItem {
        MovieItem {
            id: self.id.to_string(),
            title: self.original_title,
            poster: self.poster_path.map(|p| format!("{POSTER_BASE}{p}")),
            backdrop: self.backdrop_path.map(|p| format!("{BACKDROP_BASE}{p}")),
            rating: MovieItem::normalise_rating(self.vote_average),
            genres: self
                .genre_ids
                .iter()
                .filter_map(|&id| genre_name(id))
                .map(str::to_string)
                .collect(),
            description: self.overview,
            release_date: self.release_date.filter(|d| !d.is_empty()),
        }
    }
}

/// Decode a discover page into carousel items, keeping API order.
pub fn parse_discover(body: &str) -> Result<Vec<MovieItem>, FetchError> {
    let page: DiscoverPage = serde_json::from_str(body)?;
    Ok(page.results.into_iter().map(DiscoverMovie::into_item).collect())
}

/// Live TMDB source.
#[derive(Debug, Clone)]
pub struct TmdbSource {
    http: Client,
    api_base: String,
    api_key: Option<String>,
}

impl TmdbSource {
    pub fn new(api_base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    fn discover_url(&self) -> String {
        format!("{}/discover/movie", self.api_base)
    }
}

#[async_trait]
impl MovieSource for TmdbSource {
    fn describe(&self) -> String {
        self.discover_url()
    }

    async fn fetch_movies(&self) -> Result<Vec<MovieItem>, FetchError> {
        let key = self.api_key.as_deref().ok_or(FetchError::MissingApiKey)?;
        let url = self.discover_url();

        let started = std::time::Instant::now();
        let response = self
            .http
            .get(&url)
            .query(&[("api_key", key), ("sort_by", "popularity.desc")])
            .send()
            .await
            .map_err(|e| FetchError::http(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status, url });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::http(&url, e))?;
        let movies = parse_discover(&body)?;
        tracing::debug!(
            "discover: {} movies in {:.2?}",
            movies.len(),
            started.elapsed()
        );
        Ok(movies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "page": 1,
        "results": [
            {
                "id": 550,
                "original_title": "Fight Club",
                "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
                "backdrop_path": "/hZkgoQYus5vegHoetLkCJzb17zJ.jpg",
                "vote_average": 8.4,
                "genre_ids": [18, 53, 424242],
                "overview": "A ticking-time-bomb insomniac...",
                "release_date": "1999-10-15"
            },
            {
                "id": 13,
                "original_title": "Forrest Gump",
                "poster_path": null,
                "vote_average": 12.0,
                "release_date": ""
            }
        ]
    }"#;

    #[test]
    fn maps_discover_fields() {
        let movies = parse_discover(PAGE).unwrap();
        assert_eq!(movies.len(), 2);

        let fight_club = &movies[0];
        assert_eq!(fight_club.id, "550");
        assert_eq!(fight_club.title, "Fight Club");
        assert_eq!(
            fight_club.poster.as_deref(),
            Some("https://image.tmdb.org/t/p/w440_and_h660_face/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg")
        );
        assert!(fight_club
            .backdrop
            .as_deref()
            .is_some_and(|b| b.starts_with(BACKDROP_BASE)));
        assert_eq!(fight_club.genres, ["Drama", "Thriller"]);
        assert_eq!(fight_club.release_date.as_deref(), Some("1999-10-15"));

        let gump = &movies[1];
        assert_eq!(gump.poster, None);
        assert_eq!(gump.backdrop, None);
        assert_eq!(gump.rating, 10.0);
        assert!(gump.genres.is_empty());
        assert_eq!(gump.release_date, None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(parse_discover("<html>"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn missing_results_is_empty() {
        assert!(parse_discover("{}").unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let source = TmdbSource::new("http://127.0.0.1:9/", Some("  ".into()));
        assert_eq!(source.describe(), "http://127.0.0.1:9/discover/movie");
        assert!(matches!(
            source.fetch_movies().await,
            Err(FetchError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn transport_errors_do_not_expose_the_key() {
        // Nothing listens on the discard port.
        let source = TmdbSource::new("http://127.0.0.1:9", Some("SECRETKEY123".into()));
        let err = source.fetch_movies().await.unwrap_err();
        assert!(matches!(err, FetchError::Http { .. }));

        let shown = format!("Could not load movies: {err}");
        assert!(!shown.contains("SECRETKEY123"), "{shown}");
        assert!(shown.contains("http://127.0.0.1:9/discover/movie"), "{shown}");
    }
}
