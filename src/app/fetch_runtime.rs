//! Background jobs: the one-shot movie fetch and image downloads.
//!
//! Results come back over an mpsc channel and are applied on the event loop,
//! so state is only ever touched from one place.

use std::sync::Arc;

use reqwest::Client;
use tokio::sync::mpsc;

use crate::core::movie::MovieItem;
use crate::source::{FetchError, MovieSource};

pub enum FetchUpdate {
    /// The movie fetch finished (successfully or not).  Sent exactly once.
    Movies(Result<Vec<MovieItem>, FetchError>),
    /// An image finished downloading and decoding.
    Image {
        url: String,
        result: Result<Arc<image::RgbaImage>, String>,
    },
}

/// Run the movie fetch once in the background.
pub fn spawn_movie_fetch(tx: mpsc::UnboundedSender<FetchUpdate>, source: Arc<dyn MovieSource>) {
    tokio::spawn(async move {
        tracing::info!("fetching movies from {}", source.describe());
        let result = source.fetch_movies().await;
        let _ = tx.send(FetchUpdate::Movies(result));
    });
}

/// Longest edge kept after decoding; cards never need more.
const MAX_IMAGE_EDGE: u32 = 320;

/// Download and decode one image.
pub fn spawn_image_fetch(tx: mpsc::UnboundedSender<FetchUpdate>, http: Client, url: String) {
    tokio::spawn(async move {
        let result = download_image(&http, &url).await;
        let _ = tx.send(FetchUpdate::Image { url, result });
    });
}

async fn download_image(http: &Client, url: &str) -> Result<Arc<image::RgbaImage>, String> {
    let response = http
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?;
    let bytes = response.bytes().await.map_err(|e| e.to_string())?;

    // Decoding is CPU-bound; keep it off the event loop.
    tokio::task::spawn_blocking(move || decode_image(&bytes))
        .await
        .map_err(|e| e.to_string())?
}

/// Decode image bytes and shrink them to a card-sized RGBA buffer.
pub fn decode_image(bytes: &[u8]) -> Result<Arc<image::RgbaImage>, String> {
    let img = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let img = if img.width() > MAX_IMAGE_EDGE || img.height() > MAX_IMAGE_EDGE {
        img.thumbnail(MAX_IMAGE_EDGE, MAX_IMAGE_EDGE)
    } else {
        img
    };
    Ok(Arc::new(img.to_rgba8()))
}
