//! Backdrop band — stacked movie backdrops that wipe away to the left as
//! the carousel advances, darkened toward the bottom so poster text stays
//! legible.

use std::collections::HashMap;
use std::sync::Arc;

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::core::{interpolate::InterpolatedStyle, movie::CarouselEntry};

use super::carousel::blit;
use super::halfblock::{self, ImageFit};

/// Fraction of the band (from the top) left at full brightness.
const GRADIENT_START: f64 = 0.45;

pub struct BackdropView<'a> {
    pub entries: &'a [CarouselEntry],
    /// Transforms for the visible entries.
    pub styles: &'a [(usize, InterpolatedStyle)],
    pub images: &'a HashMap<String, Arc<image::RgbaImage>>,
}

/// Brightness of pixel row `y` of `h`: flat, then a linear fall to black.
pub fn gradient(y: u32, h: u32) -> f64 {
    if h == 0 {
        return 1.0;
    }
    let t = f64::from(y) / f64::from(h);
    if t <= GRADIENT_START {
        1.0
    } else {
        (1.0 - (t - GRADIENT_START) / (1.0 - GRADIENT_START)).max(0.0)
    }
}

impl Widget for BackdropView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let local = Rect::new(0, 0, area.width, area.height);

        // Later entries sit underneath: draw them first.
        for &(index, style) in self.styles.iter().rev() {
            if style.backdrop_x >= f64::from(area.width) {
                continue; // slid completely off
            }
            let Some(movie) = self.entries.get(index).and_then(CarouselEntry::movie) else {
                continue;
            };
            let Some(img) = movie.backdrop.as_ref().and_then(|url| self.images.get(url)) else {
                continue;
            };

            let mut layer = Buffer::empty(local);
            let brightness = 1.0 - style.fade;
            halfblock::render_image_shaded(img, local, &mut layer, ImageFit::Cover, |y, h| {
                gradient(y, h) * brightness
            });
            let dx = -(style.backdrop_x.round() as i32);
            blit(&layer, buf, dx, 0, area);
        }
    }
}
