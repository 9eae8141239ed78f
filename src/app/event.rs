//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background reader
//! that forwards them over a channel, interleaved with frame ticks that
//! drive the scroll animation.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// One animation frame has elapsed.
    Tick,
}

/// Tick period for a given scroll throttle.  Ticks run at twice the publish
/// rate so a tick delivered a little late still finds the window open on the
/// next one.
pub fn frame_interval(throttle: Duration) -> Duration {
    throttle / 2
}

/// Spawns a reader thread that polls the terminal and sends events through
/// the returned channel.  A `Tick` goes out every `frame` even while input
/// keeps arriving, so scrolling never starves the animation.
pub fn spawn_event_reader(frame: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    // crossterm's poll/read block, so this lives on its own thread.
    std::thread::spawn(move || {
        let mut next_tick = Instant::now() + frame;
        loop {
            let wait = next_tick.saturating_duration_since(Instant::now());
            if event::poll(wait).unwrap_or(false) {
                let app_event = match event::read() {
                    Ok(CtEvent::Key(k)) => Some(AppEvent::Key(k)),
                    Ok(CtEvent::Mouse(m)) => Some(AppEvent::Mouse(m)),
                    Ok(CtEvent::Resize(w, h)) => Some(AppEvent::Resize(w, h)),
                    Ok(_) => None,
                    Err(e) => {
                        tracing::warn!("terminal read failed: {e}");
                        None
                    }
                };
                if let Some(ev) = app_event {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped
                    }
                }
            }

            if Instant::now() >= next_tick {
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
                next_tick = Instant::now() + frame;
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scroll::{ScrollModel, DEFAULT_THROTTLE};

    #[test]
    fn late_ticks_still_publish_every_window() {
        let frame = frame_interval(DEFAULT_THROTTLE);
        assert!(frame < DEFAULT_THROTTLE);

        let t0 = Instant::now();
        let mut model = ScrollModel::new(DEFAULT_THROTTLE);
        let mut published = 0;
        let mut now = t0;
        for k in 0..20u32 {
            // Every other tick is handled 1 ms late.
            let jitter = Duration::from_millis(u64::from(k % 2));
            if model.set_offset(f64::from(k), now + jitter) {
                published += 1;
            }
            now += frame;
        }
        // 20 ticks span 160 ms: one publish per 16 ms window.
        assert!(published >= 10, "{published}");
    }
}
