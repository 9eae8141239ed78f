//! The horizontal poster list.
//!
//! Only the visible window is drawn.  Each card is rendered into its own
//! scratch buffer and then copied onto the frame at its (possibly negative)
//! scrolled and lifted position, clipped to the carousel band.

use std::collections::HashMap;
use std::sync::Arc;

use ratatui::{
    buffer::{Buffer, Cell},
    layout::{Position, Rect},
    widgets::Widget,
};

use crate::core::{
    interpolate::InterpolatedStyle,
    movie::CarouselEntry,
    window::ListGeometry,
};

use super::poster::PosterCard;

/// Blank columns on each side of a card inside its slot.
const CARD_MARGIN: f64 = 1.0;

/// Copy every non-blank cell of `src` onto `dst`, shifted by `(dx, dy)`
/// relative to `clip`'s origin and clipped to `clip`.
pub fn blit(src: &Buffer, dst: &mut Buffer, dx: i32, dy: i32, clip: Rect) {
    let blank = Cell::default();
    let area = src.area;
    for sy in area.top()..area.bottom() {
        let y = i32::from(clip.y) + dy + i32::from(sy - area.y);
        if y < i32::from(clip.top()) || y >= i32::from(clip.bottom()) {
            continue;
        }
        for sx in area.left()..area.right() {
            let x = i32::from(clip.x) + dx + i32::from(sx - area.x);
            if x < i32::from(clip.left()) || x >= i32::from(clip.right()) {
                continue;
            }
            let Some(cell) = src.cell(Position::new(sx, sy)) else {
                continue;
            };
            if *cell == blank {
                continue;
            }
            if let Some(target) = dst.cell_mut(Position::new(x as u16, y as u16)) {
                *target = cell.clone();
            }
        }
    }
}

pub struct Carousel<'a> {
    pub entries: &'a [CarouselEntry],
    pub styles: &'a [(usize, InterpolatedStyle)],
    pub geometry: ListGeometry,
    /// Published scroll offset.
    pub offset: f64,
    /// Headroom reserved above each card for the lift (rows).
    pub headroom: u16,
    /// Apply the vertical bounce.
    pub bounce: bool,
    pub images: &'a HashMap<String, Arc<image::RgbaImage>>,
}

impl Carousel<'_> {
    /// Card rectangle for entry `index` relative to the band's origin, before
    /// clipping: `(x, y, width, height)`.
    pub fn card_frame(&self, index: usize, style: &InterpolatedStyle, band: Rect) -> (i32, i32, u16, u16) {
        let x = self.geometry.screen_x(index, self.offset) + CARD_MARGIN;
        let width = (self.geometry.item_width - 2.0 * CARD_MARGIN).max(0.0);
        let lift = if self.bounce {
            style.translate_y.round() as i32
        } else {
            0
        };
        let headroom = self.headroom.min(band.height);
        (
            x.round() as i32,
            i32::from(headroom) + lift,
            width.round() as u16,
            band.height - headroom,
        )
    }
}

impl Widget for Carousel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for &(index, style) in self.styles {
            // Spacers hold their slot but never draw.
            let Some(movie) = self.entries.get(index).and_then(CarouselEntry::movie) else {
                continue;
            };
            let (x, y, w, h) = self.card_frame(index, &style, area);
            if w == 0 || h == 0 {
                continue;
            }

            let card_area = Rect::new(0, 0, w, h);
            let mut card = Buffer::empty(card_area);
            PosterCard {
                movie,
                image: movie
                    .poster
                    .as_ref()
                    .and_then(|url| self.images.get(url))
                    .map(Arc::as_ref),
            }
            .render(card_area, &mut card);

            blit(&card, buf, x, y, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interpolate::InterpolationParams;
    use crate::core::movie::{sample_movie, with_spacers};
    use ratatui::style::Style;

    fn geometry() -> ListGeometry {
        ListGeometry {
            item_width: 20.0,
            spacer_width: 10.0,
            viewport_width: 40.0,
        }
    }

    fn styles_at(offset: f64, len: usize) -> Vec<(usize, InterpolatedStyle)> {
        let params = InterpolationParams {
            item_width: 20.0,
            viewport_width: 40.0,
            lift: -2.0,
        };
        (1..len - 1)
            .map(|i| (i, InterpolatedStyle::compute(offset, i, &params)))
            .collect()
    }

    #[test]
    fn blit_clips_negative_offsets() {
        let mut src = Buffer::empty(Rect::new(0, 0, 3, 1));
        src.set_string(0, 0, "abc", Style::default());
        let clip = Rect::new(2, 1, 4, 2);
        let mut dst = Buffer::empty(Rect::new(0, 0, 8, 4));

        blit(&src, &mut dst, -1, 0, clip);
        assert_eq!(dst[(2, 1)].symbol(), "b");
        assert_eq!(dst[(3, 1)].symbol(), "c");
        assert_eq!(dst[(1, 1)].symbol(), " ");

        blit(&src, &mut dst, 3, 5, clip);
        assert_eq!(dst[(5, 1)].symbol(), " ");
    }

    #[test]
    fn centred_card_is_lifted_and_neighbour_is_not() {
        let entries = with_spacers(vec![sample_movie("1"), sample_movie("2")]);
        let styles = styles_at(0.0, entries.len());
        let images = HashMap::new();
        let carousel = Carousel {
            entries: &entries,
            styles: &styles,
            geometry: geometry(),
            offset: 0.0,
            headroom: 2,
            bounce: true,
            images: &images,
        };
        let band = Rect::new(0, 0, 40, 20);
        assert_eq!(carousel.card_frame(1, &styles[0].1, band), (11, 0, 18, 18));
        assert_eq!(carousel.card_frame(2, &styles[1].1, band), (31, 2, 18, 18));

        let mut buf = Buffer::empty(band);
        carousel.render(band, &mut buf);
        // Rounded top-left corner of the lifted card.
        assert_eq!(buf[(11, 0)].symbol(), "╭");
        assert_eq!(buf[(31, 2)].symbol(), "╭");
        assert_eq!(buf[(31, 0)].symbol(), " ");
        // Spacer slot stays empty.
        assert_eq!(buf[(5, 10)].symbol(), " ");
    }

    #[test]
    fn plain_variant_keeps_cards_level() {
        let entries = with_spacers(vec![sample_movie("1")]);
        let styles = styles_at(0.0, entries.len());
        let images = HashMap::new();
        let carousel = Carousel {
            entries: &entries,
            styles: &styles,
            geometry: geometry(),
            offset: 0.0,
            headroom: 2,
            bounce: false,
            images: &images,
        };
        let band = Rect::new(0, 0, 40, 20);
        assert_eq!(carousel.card_frame(1, &styles[0].1, band).1, 2);
    }

    #[test]
    fn spacer_only_list_renders_nothing() {
        let entries = with_spacers(Vec::new());
        let images = HashMap::new();
        let band = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(band);
        Carousel {
            entries: &entries,
            styles: &[],
            geometry: geometry(),
            offset: 0.0,
            headroom: 2,
            bounce: true,
            images: &images,
        }
        .render(band, &mut buf);
        assert_eq!(buf, Buffer::empty(band));
    }
}
