//! Loading indicator — a small spinner + label centred in a given area,
//! shown until the movie fetch completes.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Animation frames per spinner step.
const FRAMES_PER_STEP: u64 = 5;

pub struct LoadingIndicator {
    /// Whether to show the indicator at all.
    pub visible: bool,
    /// Monotonically increasing tick counter (drives the spinner frame).
    pub tick: u64,
}

impl Widget for LoadingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.width < 20 || area.height == 0 {
            return;
        }

        let step = (self.tick / FRAMES_PER_STEP) as usize;
        let frame = SPINNER_FRAMES[step % SPINNER_FRAMES.len()];
        let label = format!("{frame} loading movies");

        let label_width = label.chars().count() as u16;
        let x = area.x + (area.width - label_width) / 2;
        let y = area.y + area.height / 2;

        let line = Line::from(Span::styled(label, Theme::spinner_style()));
        buf.set_line(x, y, &line, label_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: &Buffer) -> String {
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn draws_only_while_visible() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        LoadingIndicator { visible: false, tick: 0 }.render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));

        LoadingIndicator { visible: true, tick: 0 }.render(area, &mut buf);
        assert!(text(&buf).contains("⠋ loading movies"));
    }

    #[test]
    fn spinner_advances_with_ticks() {
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        LoadingIndicator {
            visible: true,
            tick: FRAMES_PER_STEP,
        }
        .render(area, &mut buf);
        assert!(text(&buf).contains("⠙"));
    }
}
