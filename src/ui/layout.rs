//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::config::Variant;

/// Screen layout: backdrop band at the top, poster band over it, status bar
/// at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// Where the backdrop image is drawn (empty unless the variant has one).
    pub backdrop_area: Rect,
    /// Where poster cards are drawn (including bounce headroom).
    pub carousel_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect, variant: Variant, backdrop_height: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // carousel (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);
        let main = chunks[0];

        let (backdrop_area, carousel_area) = if variant.shows_backdrop() {
            let backdrop = Rect {
                height: backdrop_height.min(main.height),
                ..main
            };
            // Posters start a third of the way down, overlapping the backdrop.
            let skip = main.height / 3;
            let carousel = Rect {
                y: main.y + skip,
                height: main.height - skip,
                ..main
            };
            (backdrop, carousel)
        } else {
            (Rect { height: 0, ..main }, main)
        };

        Self {
            backdrop_area,
            carousel_area,
            status_area: chunks[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backdrop_variant_overlaps_bands() {
        let l = AppLayout::from_area(Rect::new(0, 0, 100, 40), Variant::Backdrop, 26);
        assert_eq!(l.status_area, Rect::new(0, 39, 100, 1));
        assert_eq!(l.backdrop_area, Rect::new(0, 0, 100, 26));
        assert_eq!(l.carousel_area, Rect::new(0, 13, 100, 26));
    }

    #[test]
    fn plain_variant_has_no_backdrop() {
        let l = AppLayout::from_area(Rect::new(0, 0, 80, 24), Variant::Plain, 16);
        assert_eq!(l.backdrop_area.height, 0);
        assert_eq!(l.carousel_area, Rect::new(0, 0, 80, 23));
    }
}
