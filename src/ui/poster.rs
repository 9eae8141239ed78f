//! Poster card — image, title, star rating, genre chips, and a clipped
//! description, stacked top to bottom on a white card.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::core::movie::MovieItem;

use super::halfblock::{self, ImageFit};
use super::theme::Theme;

/// Lines of description shown at most.
const DESCRIPTION_LINES: usize = 5;
/// Rows of genre chips shown at most.
const GENRE_LINES: usize = 2;
/// Smallest image slot worth drawing.
const MIN_IMAGE_ROWS: u16 = 3;

pub struct PosterCard<'a> {
    pub movie: &'a MovieItem,
    /// Decoded poster, if it has arrived.
    pub image: Option<&'a image::RgbaImage>,
}

impl Widget for PosterCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::card_border_style())
            .style(Theme::card_style());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let width = inner.width as usize;
        let genres = genre_lines(&self.movie.genres, width, GENRE_LINES);
        let description = wrap_words(&self.movie.description, width);

        let mut text: Vec<Line> = vec![
            Line::styled(truncate(&self.movie.title, width), Theme::title_style()),
            rating_line(self.movie.rating, self.movie.release_date.as_deref()),
        ];
        text.extend(genres);

        let fixed = text.len() as u16;
        let room = inner.height.saturating_sub(fixed) as usize;
        let desc_rows = description.len().min(DESCRIPTION_LINES).min(room);
        let image_rows = inner.height.saturating_sub(fixed + desc_rows as u16);

        text.extend(
            description
                .into_iter()
                .take(desc_rows)
                .map(|l| Line::styled(l, Theme::description_style())),
        );

        let mut y = inner.y;
        if image_rows >= MIN_IMAGE_ROWS {
            let image_area = Rect::new(inner.x, y, inner.width, image_rows);
            match self.image {
                Some(img) => halfblock::render_image(img, image_area, buf, ImageFit::Contain),
                None => render_placeholder(image_area, buf),
            }
            y += image_rows;
        }

        let text_area = Rect::new(inner.x, y, inner.width, inner.bottom().saturating_sub(y));
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .render(text_area, buf);
    }
}

fn render_placeholder(area: Rect, buf: &mut Buffer) {
    buf.set_style(area, Theme::placeholder_style());
    let label = "poster";
    let y = area.y + area.height / 2;
    Paragraph::new(Line::from(label))
        .alignment(Alignment::Center)
        .style(Theme::placeholder_style())
        .render(Rect::new(area.x, y, area.width, 1), buf);
}

/// `★★★★☆ 8.4` — five stars for the 0–10 scale, half rounded up.
pub fn rating_line(rating: f64, release_date: Option<&str>) -> Line<'static> {
    let filled = ((rating / 2.0).round() as usize).min(5);
    let mut spans = vec![
        Span::styled("★".repeat(filled), Theme::star_style()),
        Span::styled("☆".repeat(5 - filled), Theme::rating_style()),
        Span::styled(format!(" {rating:.1}"), Theme::rating_style()),
    ];
    if let Some(year) = release_date.and_then(|d| d.get(..4)) {
        spans.push(Span::styled(format!(" · {year}"), Theme::rating_style()));
    }
    Line::from(spans)
}

/// Lay genre chips out in centred rows no wider than `width`.
pub fn genre_lines(genres: &[String], width: usize, max_lines: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Vec<Span<'static>>> = Vec::new();
    let mut used = 0;
    for genre in genres {
        let chip = format!(" {} ", truncate(genre, width.saturating_sub(2)));
        let chip_w = chip.chars().count();
        let gap = usize::from(used > 0);
        if lines.is_empty() || used + gap + chip_w > width {
            if lines.len() == max_lines {
                break;
            }
            lines.push(Vec::new());
            used = 0;
        } else if gap == 1 {
            if let Some(line) = lines.last_mut() {
                line.push(Span::styled(" ", Theme::card_style()));
            }
            used += 1;
        }
        if let Some(line) = lines.last_mut() {
            line.push(Span::styled(chip, Theme::genre_style()));
        }
        used += chip_w;
    }
    lines.into_iter().map(Line::from).collect()
}

/// Greedy word wrap.  Words longer than `width` are hard-split.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_w = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_w > 0 {
                lines.push(std::mem::take(&mut current));
                current_w = 0;
            }
            lines.push(word.drain(..width).collect());
        }
        let word_w = word.len();
        if word_w == 0 {
            continue;
        }
        if current_w > 0 && current_w + 1 + word_w > width {
            lines.push(std::mem::take(&mut current));
            current_w = 0;
        }
        if current_w > 0 {
            current.push(' ');
            current_w += 1;
        }
        current.extend(word);
        current_w += word_w;
    }
    if current_w > 0 {
        lines.push(current);
    }
    lines
}

/// Cut `s` to `width` characters, ending in `…` when shortened.
pub fn truncate(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(width - 1).collect();
    out.push('…');
    out
}
