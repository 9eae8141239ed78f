//! Snap-to-item scroll animation with exponential ease-out.
//!
//! Input moves a *target* offset; each tick the visible position closes a
//! fixed fraction of the remaining distance.  Once input has been idle for
//! the settle delay the target is pulled onto the nearest snap interval, so
//! exactly one poster ends up centred at rest.

use std::time::{Duration, Instant};

use crate::core::window::ListGeometry;

/// How quickly the list comes to rest after input stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deceleration {
    Normal,
    /// Snap feels immediate.
    #[default]
    Fast,
}

impl Deceleration {
    /// Fraction of the remaining distance covered per tick.
    fn speed(self) -> f64 {
        match self {
            Deceleration::Normal => 0.25,
            Deceleration::Fast => 0.6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Deceleration::Normal => "normal",
            Deceleration::Fast => "fast",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Some(Deceleration::Normal),
            "fast" => Some(Deceleration::Fast),
            _ => None,
        }
    }
}

/// Idle time after the last free scroll before snapping.
const SETTLE_DELAY: Duration = Duration::from_millis(120);

/// Below this distance (cells) the animation lands on the target.
const LAND_EPSILON: f64 = 0.25;

/// Offset animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    position: f64,
    target: f64,
    speed: f64,
    last_input: Option<Instant>,
}

impl SmoothScroll {
    pub fn new(deceleration: Deceleration) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            speed: deceleration.speed(),
            last_input: None,
        }
    }

    /// Free scroll (mouse wheel / drag): nudges the target, snap comes later.
    pub fn scroll_by(&mut self, delta: f64, now: Instant) {
        if delta.is_finite() {
            self.target += delta;
            self.last_input = Some(now);
        }
    }

    /// Move straight to a rest offset (already snapped by the caller).
    pub fn scroll_to(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
            self.last_input = None;
        }
    }

    /// Place both position and target at `offset` with no animation.
    pub fn jump_to(&mut self, offset: f64) {
        if offset.is_finite() {
            self.position = offset;
            self.target = offset;
            self.last_input = None;
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Advance one frame.  Returns the new position when it moved.
    pub fn tick(&mut self, now: Instant, geometry: &ListGeometry, len: usize) -> Option<f64> {
        self.target = self.target.clamp(0.0, geometry.max_offset(len));

        let idle = self
            .last_input
            .map_or(true, |t| now.saturating_duration_since(t) >= SETTLE_DELAY);
        if idle {
            self.target = geometry.snap_target(self.target, len);
            self.last_input = None;
        }

        let remaining = self.target - self.position;
        if remaining == 0.0 {
            return None;
        }
        if remaining.abs() < LAND_EPSILON {
            self.position = self.target;
        } else {
            self.position += remaining * self.speed;
        }
        Some(self.position)
    }

    /// True while the position has not reached the target or a snap is
    /// still due.
    pub fn is_animating(&self) -> bool {
        self.position != self.target || self.last_input.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> ListGeometry {
        ListGeometry {
            item_width: 72.0,
            spacer_width: 14.0,
            viewport_width: 100.0,
        }
    }

    fn run_until_rest(s: &mut SmoothScroll, now: Instant, len: usize) -> (f64, usize) {
        let g = geometry();
        let mut frames = 0;
        let mut last = 0.0;
        while let Some(p) = s.tick(now, &g, len) {
            last = p;
            frames += 1;
            assert!(frames < 500, "animation never settled");
        }
        (last, frames)
    }

    #[test]
    fn free_scroll_settles_on_snap_interval() {
        let t0 = Instant::now();
        let mut s = SmoothScroll::new(Deceleration::Fast);
        s.scroll_by(100.0, t0);
        let later = t0 + SETTLE_DELAY;
        let (rest, _) = run_until_rest(&mut s, later, 6);
        assert_eq!(rest, 72.0);
        assert!(!s.is_animating());
    }

    #[test]
    fn fast_deceleration_settles_sooner() {
        let now = Instant::now();
        let mut fast = SmoothScroll::new(Deceleration::Fast);
        let mut normal = SmoothScroll::new(Deceleration::Normal);
        fast.scroll_to(144.0);
        normal.scroll_to(144.0);
        let (_, fast_frames) = run_until_rest(&mut fast, now, 6);
        let (_, normal_frames) = run_until_rest(&mut normal, now, 6);
        assert!(fast_frames < normal_frames);
    }

    #[test]
    fn target_is_clamped_to_content() {
        let now = Instant::now();
        let mut s = SmoothScroll::new(Deceleration::Fast);
        s.scroll_to(-300.0);
        assert_eq!(s.tick(now, &geometry(), 6), None);
        s.scroll_to(10_000.0);
        let (rest, _) = run_until_rest(&mut s, now, 6);
        assert_eq!(rest, 216.0);
    }

    #[test]
    fn spacer_only_list_never_moves() {
        let now = Instant::now();
        let mut s = SmoothScroll::new(Deceleration::Fast);
        s.scroll_by(50.0, now);
        assert_eq!(s.tick(now + SETTLE_DELAY, &geometry(), 2), None);
    }

    #[test]
    fn deceleration_parses() {
        assert_eq!(Deceleration::parse("FAST"), Some(Deceleration::Fast));
        assert_eq!(Deceleration::parse(" normal "), Some(Deceleration::Normal));
        assert_eq!(Deceleration::parse("slow"), None);
    }
}
