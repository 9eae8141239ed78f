//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{AppConfig, LayoutConstants};
use crate::core::{
    interpolate::InterpolatedStyle,
    movie::{movie_count, with_spacers, CarouselEntry, MovieItem},
    scroll::{ScrollModel, ScrollSubscription},
};
use crate::source::FetchError;
use crate::ui::smooth_scroll::SmoothScroll;

/// Entries rendered beyond each viewport edge.
const OVERSCAN: usize = 1;

/// Top-level application state.
pub struct AppState {
    pub config: AppConfig,
    /// List entries: spacers around the fetched movies.  Empty until loaded.
    pub entries: Vec<CarouselEntry>,
    /// Flips to `true` exactly once, when the fetch completes either way.
    pub loaded: bool,
    /// Layout for the current terminal size.
    pub layout: LayoutConstants,
    /// Sole writer of the scroll offset.
    pub scroll: ScrollModel,
    /// The renderer's view of the published offset.
    pub scroll_view: ScrollSubscription,
    /// Eases the offset toward the snapped rest position.
    pub animator: SmoothScroll,
    /// Per-entry transforms for the visible window at the published offset.
    pub styles: Vec<(usize, InterpolatedStyle)>,
    /// Decoded images keyed by URL.
    pub image_cache: HashMap<String, Arc<image::RgbaImage>>,
    /// URLs already requested (successful, failed, or in flight).
    pub image_requested: HashSet<String>,
    /// Last pointer column while the left button is held.
    pub drag_column: Option<u16>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Frame counter for the loading spinner.
    pub tick: u64,
}

impl AppState {
    pub fn new(config: AppConfig, width: u16, height: u16) -> Self {
        let scroll = ScrollModel::new(config.scroll_throttle);
        let scroll_view = scroll.subscribe();
        Self {
            layout: LayoutConstants::resolve(&config.layout, width, height),
            animator: SmoothScroll::new(config.deceleration),
            config,
            entries: Vec::new(),
            loaded: false,
            scroll,
            scroll_view,
            styles: Vec::new(),
            image_cache: HashMap::new(),
            image_requested: HashSet::new(),
            drag_column: None,
            should_quit: false,
            status_message: None,
            tick: 0,
        }
    }

    /// Apply the outcome of the one movie fetch.
    ///
    /// Spacers are wrapped after the attempt regardless of outcome, so a
    /// failure leaves the spacer pair on screen.  Later calls are ignored.
    pub fn apply_fetch(&mut self, result: Result<Vec<MovieItem>, FetchError>) {
        if self.loaded {
            tracing::warn!("ignoring duplicate fetch result");
            return;
        }
        let movies = match result {
            Ok(movies) => movies,
            Err(e) => {
                tracing::warn!("movie fetch failed: {e}");
                self.status_message = Some(format!("Could not load movies: {e}"));
                Vec::new()
            }
        };
        self.entries = with_spacers(movies);
        self.loaded = true;
        tracing::info!("loaded {} movies", movie_count(&self.entries));
        self.recompute_styles();
    }

    /// Terminal resized: rebuild layout and keep the same entry centred.
    pub fn resize(&mut self, width: u16, height: u16, now: Instant) {
        let geometry = self.layout.geometry();
        let centred = geometry.centred_index(self.animator.target(), self.entries.len());

        self.layout = LayoutConstants::resolve(&self.config.layout, width, height);
        let target = centred.map_or(0.0, |i| self.layout.geometry().offset_for_index(i));
        self.animator = SmoothScroll::new(self.config.deceleration);
        self.animator.jump_to(target);
        self.scroll.force_publish(target, now);
        self.recompute_styles();
    }

    /// Advance the snap animation one frame and push the position into the
    /// scroll model.  Returns `true` when subscribers saw a new offset.
    pub fn advance_scroll(&mut self, now: Instant) -> bool {
        if !self.is_scrolling() {
            return false;
        }
        let geometry = self.layout.geometry();
        if let Some(position) = self.animator.tick(now, &geometry, self.entries.len()) {
            self.scroll.set_offset(position, now);
        }
        self.scroll.flush(now);
        if self.scroll_view.take_change().is_some() {
            self.recompute_styles();
            true
        } else {
            false
        }
    }

    /// True while the offset is still moving or has an unpublished value.
    pub fn is_scrolling(&self) -> bool {
        self.animator.is_animating() || self.scroll.has_pending()
    }

    /// Entries intersecting the viewport at the published offset.
    pub fn visible_range(&self) -> Range<usize> {
        self.layout
            .geometry()
            .visible_range(self.scroll_view.current(), self.entries.len(), OVERSCAN)
    }

    /// Recompute transforms for every visible real entry.
    pub fn recompute_styles(&mut self) {
        let offset = self.scroll_view.current();
        let params = self.layout.interpolation();
        self.styles = self
            .visible_range()
            .filter(|&i| !self.entries[i].is_spacer())
            .map(|i| (i, InterpolatedStyle::compute(offset, i, &params)))
            .collect();
    }

    #[cfg(test)]
    pub fn style_for(&self, index: usize) -> InterpolatedStyle {
        self.styles
            .iter()
            .find(|(i, _)| *i == index)
            .map_or(InterpolatedStyle::NEUTRAL, |(_, s)| *s)
    }

    /// Image URLs needed for the visible window that haven't been requested.
    pub fn take_missing_images(&mut self) -> Vec<String> {
        let show_backdrop = self.config.variant.shows_backdrop();
        let mut wanted = Vec::new();
        for i in self.visible_range() {
            let Some(movie) = self.entries[i].movie() else {
                continue;
            };
            let backdrop = movie.backdrop.as_ref().filter(|_| show_backdrop);
            for url in movie.poster.iter().chain(backdrop) {
                if self.image_requested.insert(url.clone()) {
                    wanted.push(url.clone());
                }
            }
        }
        wanted
    }

    /// Movie currently at (or nearest) the centred position.
    pub fn centred_movie(&self) -> Option<&MovieItem> {
        self.layout
            .geometry()
            .centred_index(self.scroll_view.current(), self.entries.len())
            .and_then(|i| self.entries.get(i))
            .and_then(CarouselEntry::movie)
    }
}
