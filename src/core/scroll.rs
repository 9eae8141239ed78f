//! The carousel's horizontal scroll offset and its throttled subscription
//! channel.
//!
//! `ScrollModel` is the only writer.  Renderers hold a [`ScrollSubscription`]
//! and see the offset as it was last *published*: publication happens at
//! most once per throttle interval, and a suppressed update stays pending
//! until [`ScrollModel::flush`] delivers it.

use std::time::{Duration, Instant};

use tokio::sync::watch;

/// Default minimum spacing between notifications (~60 Hz).
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(16);

#[derive(Debug)]
pub struct ScrollModel {
    /// Live value, updated on every scroll event.
    offset: f64,
    tx: watch::Sender<f64>,
    throttle: Duration,
    last_publish: Option<Instant>,
    pending: bool,
}

impl ScrollModel {
    /// New model at offset zero.
    pub fn new(throttle: Duration) -> Self {
        let (tx, _rx) = watch::channel(0.0);
        Self {
            offset: 0.0,
            tx,
            throttle,
            last_publish: None,
            pending: false,
        }
    }

    /// Current live offset (may be ahead of what subscribers have seen).
    #[cfg(test)]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn subscribe(&self) -> ScrollSubscription {
        ScrollSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Record a new offset from a scroll event.  Non-finite values are
    /// ignored.  Returns `true` when the offset was published within this
    /// call; subscribers are only woken if it differs from the last one.
    pub fn set_offset(&mut self, offset: f64, now: Instant) -> bool {
        if !offset.is_finite() {
            return false;
        }
        self.offset = offset;
        self.pending = true;
        self.flush(now)
    }

    /// Publish a pending offset if the throttle interval has elapsed.
    /// Returns `true` when it was published, with the same wake-up rule as
    /// [`ScrollModel::set_offset`].
    pub fn flush(&mut self, now: Instant) -> bool {
        if !self.pending {
            return false;
        }
        let due = self
            .last_publish
            .map_or(true, |last| now.saturating_duration_since(last) >= self.throttle);
        if !due {
            return false;
        }
        self.publish(now);
        true
    }

    /// Set and publish `offset` immediately, ignoring the throttle window.
    /// Used when the layout changes under the list.
    pub fn force_publish(&mut self, offset: f64, now: Instant) {
        if offset.is_finite() {
            self.offset = offset;
            self.publish(now);
        }
    }

    fn publish(&mut self, now: Instant) {
        let offset = self.offset;
        self.tx.send_if_modified(|current| {
            if *current == offset {
                false
            } else {
                *current = offset;
                true
            }
        });
        self.last_publish = Some(now);
        self.pending = false;
    }

    /// Whether an update is waiting for the throttle window.
    pub fn has_pending(&self) -> bool {
        self.pending
    }
}

/// Read-only handle on the published scroll offset.
#[derive(Debug, Clone)]
pub struct ScrollSubscription {
    rx: watch::Receiver<f64>,
}

impl ScrollSubscription {
    /// Last published offset.
    pub fn current(&self) -> f64 {
        *self.rx.borrow()
    }

    /// Returns the new offset if one was published since the last call.
    pub fn take_change(&mut self) -> Option<f64> {
        match self.rx.has_changed() {
            Ok(true) => Some(*self.rx.borrow_and_update()),
            _ => None,
        }
    }
}
