//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! Widgets here are built fresh each frame from immutable borrows of the
//! application state.  No network I/O happens here.

pub mod backdrop;
pub mod carousel;
pub mod halfblock;
pub mod layout;
pub mod poster;
pub mod smooth_scroll;
pub mod spinner;
pub mod theme;

use ratatui::{widgets::Paragraph, Frame};

use crate::app::state::AppState;

use self::{
    backdrop::BackdropView, carousel::Carousel, layout::AppLayout, spinner::LoadingIndicator,
    theme::Theme,
};

/// Draw one full frame.
pub fn draw(frame: &mut Frame, state: &AppState) {
    let variant = state.config.variant;
    let layout = AppLayout::from_area(frame.area(), variant, state.layout.backdrop_height);

    if variant.shows_backdrop() {
        frame.render_widget(
            BackdropView {
                entries: &state.entries,
                styles: &state.styles,
                images: &state.image_cache,
            },
            layout.backdrop_area,
        );
    }

    frame.render_widget(
        Carousel {
            entries: &state.entries,
            styles: &state.styles,
            geometry: state.layout.geometry(),
            offset: state.scroll_view.current(),
            headroom: state.layout.lift.abs().round() as u16,
            bounce: variant.bounces(),
            images: &state.image_cache,
        },
        layout.carousel_area,
    );

    frame.render_widget(
        LoadingIndicator {
            visible: !state.loaded,
            tick: state.tick,
        },
        layout.carousel_area,
    );

    let hint = state.config.status_bar_hint();
    let status_text = match (&state.status_message, state.centred_movie()) {
        (Some(msg), _) => msg.clone(),
        (None, Some(movie)) => format!(" {}  │  {hint}", movie.title),
        (None, None) => format!(" {hint}"),
    };
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        layout.status_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    use crate::config::{AppConfig, Variant};
    use crate::core::movie::sample_movie;
    use crate::source::FetchError;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn shows_spinner_until_loaded() {
        let state = AppState::new(AppConfig::default(), 60, 20);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| draw(f, &state)).unwrap();
        assert!(screen_text(&terminal).contains("loading movies"));
    }

    #[test]
    fn failed_fetch_renders_empty_carousel() {
        let mut state = AppState::new(AppConfig::default(), 60, 20);
        state.apply_fetch(Err(FetchError::MissingApiKey));
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| draw(f, &state)).unwrap();
        let text = screen_text(&terminal);
        assert!(!text.contains("loading movies"));
        assert!(text.contains("Could not load movies"));
        assert!(!text.contains('╭'));
    }

    #[test]
    fn every_variant_renders_movies() {
        for variant in [Variant::Plain, Variant::Parallax, Variant::Backdrop] {
            let config = AppConfig {
                variant,
                ..AppConfig::default()
            };
            let mut state = AppState::new(config, 60, 30);
            state.apply_fetch(Ok(vec![sample_movie("1"), sample_movie("2")]));
            let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
            terminal.draw(|f| draw(f, &state)).unwrap();
            let text = screen_text(&terminal);
            assert!(text.contains("Movie 1"), "{variant:?}");
            assert!(text.contains('╭'), "{variant:?}");
        }
    }
}
