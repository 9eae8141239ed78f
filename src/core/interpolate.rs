//! Scroll-driven interpolation — maps a horizontal scroll offset to the
//! per-item transforms applied by the renderer.
//!
//! Every function here is total: any input (negative indices, zero widths,
//! NaN, infinities) produces a defined output.  Degenerate input yields the
//! neutral transform (no translation, no fade) rather than an error.

/// Piecewise-linear interpolation over ascending breakpoints.
///
/// `input` and `output` pair up index-by-index.  Between two breakpoints the
/// output is linear; outside the range it is held at the nearest endpoint.
/// Returns `None` when the ranges are unusable (length mismatch, empty,
/// non-finite values, or breakpoints out of order) so callers can fall back
/// to their neutral value.
pub fn interpolate(x: f64, input: &[f64], output: &[f64]) -> Option<f64> {
    if input.is_empty() || input.len() != output.len() || !x.is_finite() {
        return None;
    }
    if input.iter().chain(output).any(|v| !v.is_finite()) {
        return None;
    }
    if input.windows(2).any(|w| w[1] < w[0]) {
        return None;
    }

    let last = input.len() - 1;
    if x <= input[0] {
        return Some(output[0]);
    }
    if x >= input[last] {
        return Some(output[last]);
    }

    for seg in 0..last {
        let (x0, x1) = (input[seg], input[seg + 1]);
        if x > x1 {
            continue;
        }
        let span = x1 - x0;
        if span <= 0.0 {
            // Coincident breakpoints: step straight to the later value.
            return Some(output[seg + 1]);
        }
        let t = (x - x0) / span;
        return Some(output[seg] + (output[seg + 1] - output[seg]) * t);
    }

    Some(output[last])
}

/// Breakpoints for the poster bounce of the entry at `index`:
/// `(index-2)·w`, `(index-1)·w`, `index·w`.
pub fn bounce_breakpoints(index: usize, item_width: f64) -> [f64; 3] {
    let i = index as f64;
    [(i - 2.0) * item_width, (i - 1.0) * item_width, i * item_width]
}

/// Breakpoints for the backdrop slide of the entry at `index`:
/// `(index-1)·w`, `index·w`.
pub fn slide_breakpoints(index: usize, item_width: f64) -> [f64; 2] {
    let i = index as f64;
    [(i - 1.0) * item_width, i * item_width]
}

fn usable_width(w: f64) -> bool {
    w.is_finite() && w > 0.0
}

/// Vertical poster translation for the entry at `index`.
///
/// Zero at the outer breakpoints and `lift` at the middle one, which is the
/// offset where the entry sits at the centred snap position.  The poster
/// rises as it approaches the centre and settles as it leaves.
pub fn vertical_bounce(offset: f64, index: usize, item_width: f64, lift: f64) -> f64 {
    if !usable_width(item_width) {
        return 0.0;
    }
    interpolate(
        offset,
        &bounce_breakpoints(index, item_width),
        &[0.0, lift, 0.0],
    )
    .unwrap_or(0.0)
}

/// Horizontal backdrop translation for the entry at `index`.
///
/// Zero while the entry is centred, growing to the full `viewport_width` by
/// the time the following entry is centred: the backdrop slides completely
/// offscreen, uncovering the next one underneath.
pub fn backdrop_slide(offset: f64, index: usize, item_width: f64, viewport_width: f64) -> f64 {
    if !usable_width(item_width) || !usable_width(viewport_width) {
        return 0.0;
    }
    interpolate(
        offset,
        &slide_breakpoints(index, item_width),
        &[0.0, viewport_width],
    )
    .unwrap_or(0.0)
}

/// How far the backdrop of `index` has been wiped away, in `[0, 1]`.
pub fn crossfade_weight(offset: f64, index: usize, item_width: f64, viewport_width: f64) -> f64 {
    if !usable_width(viewport_width) {
        return 0.0;
    }
    (backdrop_slide(offset, index, item_width, viewport_width) / viewport_width).clamp(0.0, 1.0)
}

/// Fixed inputs shared by every entry during one interpolation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationParams {
    /// Snap interval (one entry's width).
    pub item_width: f64,
    /// Width the backdrop slides across.
    pub viewport_width: f64,
    /// Bounce height at the centred position (negative = up).
    pub lift: f64,
}

/// Visual transform for one entry at one scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InterpolatedStyle {
    pub translate_y: f64,
    pub backdrop_x: f64,
    /// Opacity lost by this entry's backdrop (`0` = fully shown).
    pub fade: f64,
}

impl InterpolatedStyle {
    pub const NEUTRAL: Self = Self {
        translate_y: 0.0,
        backdrop_x: 0.0,
        fade: 0.0,
    };

    /// Compute all three transforms for the entry at `index`.
    pub fn compute(offset: f64, index: usize, params: &InterpolationParams) -> Self {
        if !offset.is_finite() {
            return Self::NEUTRAL;
        }
        Self {
            translate_y: vertical_bounce(offset, index, params.item_width, params.lift),
            backdrop_x: backdrop_slide(offset, index, params.item_width, params.viewport_width),
            fade: crossfade_weight(offset, index, params.item_width, params.viewport_width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 300.0;
    const LIFT: f64 = -50.0;

    #[test]
    fn bounce_hits_exact_values_at_breakpoints() {
        assert_eq!(bounce_breakpoints(5, W), [900.0, 1200.0, 1500.0]);
        assert_eq!(vertical_bounce(900.0, 5, W, LIFT), 0.0);
        assert_eq!(vertical_bounce(1200.0, 5, W, LIFT), -50.0);
        assert_eq!(vertical_bounce(1500.0, 5, W, LIFT), 0.0);
    }

    #[test]
    fn bounce_is_linear_between_breakpoints() {
        assert_eq!(vertical_bounce(1050.0, 5, W, LIFT), -25.0);
        assert_eq!(vertical_bounce(1350.0, 5, W, LIFT), -25.0);
        assert_eq!(vertical_bounce(975.0, 5, W, LIFT), -12.5);
    }

    #[test]
    fn bounce_is_monotonic_on_each_side() {
        let mut prev = 0.0;
        for step in 0..=30 {
            let x = 900.0 + step as f64 * 10.0;
            let y = vertical_bounce(x, 5, W, LIFT);
            assert!(y <= prev, "rising side must descend at x={x}");
            assert!(y >= LIFT);
            prev = y;
        }
        for step in 0..=30 {
            let x = 1200.0 + step as f64 * 10.0;
            let y = vertical_bounce(x, 5, W, LIFT);
            assert!(y >= prev, "settling side must ascend at x={x}");
            assert!(y <= 0.0);
            prev = y;
        }
    }

    #[test]
    fn bounce_clamps_outside_range() {
        for x in [-1e9, -10.0, 0.0, 899.9, 1500.1, 2_000.0, 1e12] {
            assert_eq!(vertical_bounce(x, 5, W, LIFT), 0.0);
        }
        // Low indices have negative breakpoints; still clamped.
        assert_eq!(vertical_bounce(-600.0, 0, W, LIFT), 0.0);
        assert_eq!(vertical_bounce(-300.0, 0, W, LIFT), -50.0);
        assert_eq!(vertical_bounce(-150.0, 1, W, LIFT), -25.0);
    }

    #[test]
    fn slide_covers_exactly_one_interval() {
        let vw = 400.0;
        assert_eq!(backdrop_slide(1200.0, 5, W, vw), 0.0);
        assert_eq!(backdrop_slide(1350.0, 5, W, vw), 200.0);
        assert_eq!(backdrop_slide(1500.0, 5, W, vw), 400.0);
        assert_eq!(backdrop_slide(0.0, 5, W, vw), 0.0);
        assert_eq!(backdrop_slide(9_000.0, 5, W, vw), 400.0);
    }

    #[test]
    fn crossfade_tracks_slide_fraction() {
        let vw = 400.0;
        assert_eq!(crossfade_weight(1200.0, 5, W, vw), 0.0);
        assert_eq!(crossfade_weight(1275.0, 5, W, vw), 0.25);
        assert_eq!(crossfade_weight(1500.0, 5, W, vw), 1.0);
    }

    #[test]
    fn degenerate_inputs_are_neutral() {
        assert_eq!(vertical_bounce(f64::NAN, 5, W, LIFT), 0.0);
        assert_eq!(vertical_bounce(f64::INFINITY, 5, W, LIFT), 0.0);
        assert_eq!(vertical_bounce(1200.0, 5, 0.0, LIFT), 0.0);
        assert_eq!(vertical_bounce(1200.0, 5, -W, LIFT), 0.0);
        assert_eq!(vertical_bounce(1200.0, 5, W, f64::NAN), 0.0);
        assert_eq!(backdrop_slide(1300.0, 5, W, 0.0), 0.0);
        assert_eq!(backdrop_slide(f64::NEG_INFINITY, 5, W, 400.0), 0.0);
        assert_eq!(crossfade_weight(1300.0, 5, W, f64::NAN), 0.0);

        let params = InterpolationParams {
            item_width: W,
            viewport_width: 400.0,
            lift: LIFT,
        };
        assert_eq!(
            InterpolatedStyle::compute(f64::NAN, 3, &params),
            InterpolatedStyle::NEUTRAL
        );
    }

    #[test]
    fn interpolate_rejects_bad_ranges() {
        assert_eq!(interpolate(1.0, &[], &[]), None);
        assert_eq!(interpolate(1.0, &[0.0, 1.0], &[0.0]), None);
        assert_eq!(interpolate(1.0, &[2.0, 1.0], &[0.0, 1.0]), None);
        assert_eq!(interpolate(0.5, &[0.0, 1.0], &[0.0, f64::NAN]), None);
        assert_eq!(interpolate(5.0, &[3.0], &[7.0]), Some(7.0));
        assert_eq!(interpolate(1.0, &[1.0, 1.0, 2.0], &[0.0, 4.0, 8.0]), Some(0.0));
        assert_eq!(interpolate(1.5, &[1.0, 1.0, 2.0], &[0.0, 4.0, 8.0]), Some(6.0));
    }

    #[test]
    fn compute_combines_all_transforms() {
        let params = InterpolationParams {
            item_width: W,
            viewport_width: 600.0,
            lift: LIFT,
        };
        let s = InterpolatedStyle::compute(1350.0, 5, &params);
        assert_eq!(s.translate_y, -25.0);
        assert_eq!(s.backdrop_x, 300.0);
        assert_eq!(s.fade, 0.5);
    }
}
