//! Image rendering with Unicode `▀` half-blocks (2 pixels per cell).
//!
//! Terminal cells are ~2× taller than wide, so each cell represents 1 pixel
//! wide × 2 pixels tall; fitting accounts for this.

use image::imageops::FilterType;
use ratatui::{buffer::Buffer, layout::Position, layout::Rect, style::Color};

/// How the image is scaled into its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFit {
    /// Whole image visible, centred, aspect preserved.
    Contain,
    /// Area completely filled, aspect preserved, overflow cropped.
    Cover,
}

/// Render `img` into `area`.
pub fn render_image(img: &image::RgbaImage, area: Rect, buf: &mut Buffer, fit: ImageFit) {
    render_image_shaded(img, area, buf, fit, |_, _| 1.0);
}

/// Render `img` into `area`, multiplying each pixel by `shade(y, height)`
/// (pixel row within the drawn image and its pixel height), which blends
/// toward black as the factor falls to zero.
pub fn render_image_shaded(
    img: &image::RgbaImage,
    area: Rect,
    buf: &mut Buffer,
    fit: ImageFit,
    shade: impl Fn(u32, u32) -> f64,
) {
    if area.width == 0 || area.height == 0 || img.width() == 0 || img.height() == 0 {
        return;
    }

    // Available pixel budget: each column = 1 px wide, each row = 2 px tall.
    let max_px_w = area.width as f64;
    let max_px_h = (area.height as f64) * 2.0;

    let src_w = img.width() as f64;
    let src_h = img.height() as f64;

    let scale = match fit {
        ImageFit::Contain => (max_px_w / src_w).min(max_px_h / src_h),
        ImageFit::Cover => (max_px_w / src_w).max(max_px_h / src_h),
    };
    let fit_w = (src_w * scale).round().max(1.0) as u32;
    let fit_h = (src_h * scale).round().max(1.0) as u32;

    let rgba = image::imageops::resize(img, fit_w, fit_h, FilterType::Triangle);
    let (iw, ih) = (rgba.width(), rgba.height());

    // Contain centres the picture; cover crops it around the centre.
    let (col_offset, src_x0) = if iw <= area.width as u32 {
        ((area.width - iw as u16) / 2, 0)
    } else {
        (0, (iw - area.width as u32) / 2)
    };
    let src_y0 = ih.saturating_sub(area.height as u32 * 2) / 2;
    let visible_h = ih - src_y0;

    let pixel = |x: u32, y: u32| -> Color {
        let p = rgba.get_pixel(x, y);
        let k = shade(y - src_y0, visible_h.min(area.height as u32 * 2)).clamp(0.0, 1.0);
        Color::Rgb(
            (p[0] as f64 * k).round() as u8,
            (p[1] as f64 * k).round() as u8,
            (p[2] as f64 * k).round() as u8,
        )
    };

    for row in 0..area.height {
        let yt = src_y0 + (row as u32) * 2;
        let yb = yt + 1;
        if yt >= ih {
            break;
        }
        let cols = iw.saturating_sub(src_x0).min(area.width as u32);
        for col in 0..cols {
            let x = src_x0 + col;
            let fg = pixel(x, yt);
            let bg = if yb < ih { pixel(x, yb) } else { Color::Reset };
            if let Some(cell) =
                buf.cell_mut(Position::new(area.x + col_offset + col as u16, area.y + row))
            {
                cell.set_char('▀').set_fg(fg).set_bg(bg);
            }
        }
    }
}
