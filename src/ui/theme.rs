//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── poster card ────────────────────────────────────────────
    pub fn card_style() -> Style {
        Style::default().bg(Color::White).fg(Color::Black)
    }

    pub fn card_border_style() -> Style {
        Style::default().fg(Color::Gray).bg(Color::White)
    }

    pub fn title_style() -> Style {
        Self::card_style().add_modifier(Modifier::BOLD)
    }

    pub fn star_style() -> Style {
        Self::card_style().fg(Color::Rgb(242, 169, 0))
    }

    pub fn rating_style() -> Style {
        Self::card_style().fg(Color::DarkGray)
    }

    pub fn genre_style() -> Style {
        Style::default().fg(Color::DarkGray).bg(Color::Rgb(230, 230, 230))
    }

    pub fn description_style() -> Style {
        Self::card_style()
    }

    pub fn placeholder_style() -> Style {
        Style::default().fg(Color::Gray).bg(Color::Rgb(235, 235, 235))
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn spinner_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}
