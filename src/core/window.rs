//! Horizontal list geometry — where each entry sits, which entries are on
//! screen, and where the list may come to rest.
//!
//! Layout is `[spacer][item][item]…[item][spacer]`.  With
//! `spacer = (viewport - item) / 2`, the real entry at list index `i` is
//! centred exactly when the scroll offset equals `(i - 1) · item`.

use std::ops::Range;

/// Fixed horizontal dimensions of the list, in cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListGeometry {
    pub item_width: f64,
    pub spacer_width: f64,
    pub viewport_width: f64,
}

impl ListGeometry {
    /// Width of the entry at `index` in a list of `len` entries.
    pub fn entry_width(&self, index: usize, len: usize) -> f64 {
        if index == 0 || index + 1 == len {
            self.spacer_width
        } else {
            self.item_width
        }
    }

    /// Content-space x of the left edge of entry `index`.
    pub fn entry_start(&self, index: usize) -> f64 {
        if index == 0 {
            0.0
        } else {
            self.spacer_width + (index - 1) as f64 * self.item_width
        }
    }

    /// Total scrollable content width for `len` entries.
    pub fn content_width(&self, len: usize) -> f64 {
        match len {
            0 => 0.0,
            1 => self.spacer_width,
            n => 2.0 * self.spacer_width + (n - 2) as f64 * self.item_width,
        }
    }

    /// Largest valid scroll offset.
    pub fn max_offset(&self, len: usize) -> f64 {
        (self.content_width(len) - self.viewport_width).max(0.0)
    }

    /// Screen x of entry `index` at the given scroll offset.
    pub fn screen_x(&self, index: usize, offset: f64) -> f64 {
        self.entry_start(index) - offset
    }

    /// Indices of entries that intersect the viewport, plus `overscan`
    /// entries on either side.  Always within `0..len`.
    pub fn visible_range(&self, offset: f64, len: usize, overscan: usize) -> Range<usize> {
        if len == 0 || !offset.is_finite() || !(self.item_width > 0.0) {
            return 0..0;
        }
        let left = offset;
        let right = offset + self.viewport_width;

        let mut first = None;
        let mut last = 0;
        for index in 0..len {
            let start = self.entry_start(index);
            let end = start + self.entry_width(index, len);
            if end > left && start < right {
                first.get_or_insert(index);
                last = index;
            } else if start >= right {
                break;
            }
        }

        match first {
            Some(first) => {
                first.saturating_sub(overscan)..(last + 1 + overscan).min(len)
            }
            None => 0..0,
        }
    }

    /// Nearest rest position: a multiple of the item width, clamped to the
    /// scrollable range.
    pub fn snap_target(&self, offset: f64, len: usize) -> f64 {
        if !offset.is_finite() || !(self.item_width > 0.0) {
            return 0.0;
        }
        let snapped = (offset / self.item_width).round() * self.item_width;
        let max = (self.max_offset(len) / self.item_width).floor() * self.item_width;
        snapped.clamp(0.0, max.max(0.0))
    }

    /// List index of the entry centred at a rest offset (`None` when the
    /// list holds no real entries).
    pub fn centred_index(&self, offset: f64, len: usize) -> Option<usize> {
        if len <= 2 || !(self.item_width > 0.0) || !offset.is_finite() {
            return None;
        }
        let slot = (offset / self.item_width).round().max(0.0) as usize;
        Some((slot + 1).min(len - 2))
    }

    /// Rest offset that centres list index `index`.
    pub fn offset_for_index(&self, index: usize) -> f64 {
        index.saturating_sub(1) as f64 * self.item_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> ListGeometry {
        // viewport 100, item 72, spacer 14
        ListGeometry {
            item_width: 72.0,
            spacer_width: 14.0,
            viewport_width: 100.0,
        }
    }

    #[test]
    fn entry_centred_at_its_rest_offset() {
        let g = geometry();
        for index in 1..5 {
            let offset = g.offset_for_index(index);
            let x = g.screen_x(index, offset);
            let centre = x + g.item_width / 2.0;
            assert_eq!(centre, g.viewport_width / 2.0);
        }
    }

    #[test]
    fn content_extent_allows_last_item_to_centre() {
        let g = geometry();
        let len = 2 + 4;
        assert_eq!(g.content_width(len), 14.0 * 2.0 + 72.0 * 4.0);
        assert_eq!(g.max_offset(len), 3.0 * 72.0);
        assert_eq!(g.max_offset(2), 0.0);
        assert_eq!(g.max_offset(0), 0.0);
    }

    #[test]
    fn snap_rounds_and_clamps() {
        let g = geometry();
        let len = 6;
        assert_eq!(g.snap_target(0.0, len), 0.0);
        assert_eq!(g.snap_target(35.0, len), 0.0);
        assert_eq!(g.snap_target(37.0, len), 72.0);
        assert_eq!(g.snap_target(-500.0, len), 0.0);
        assert_eq!(g.snap_target(10_000.0, len), 216.0);
        assert_eq!(g.snap_target(f64::NAN, len), 0.0);
        assert_eq!(g.snap_target(40.0, 2), 0.0);
    }

    #[test]
    fn visible_range_stays_in_bounds() {
        let g = geometry();
        assert_eq!(g.visible_range(0.0, 0, 2), 0..0);
        assert_eq!(g.visible_range(0.0, 2, 0), 0..2);
        // At rest on the first item: left spacer, item 1 and a sliver of item 2.
        assert_eq!(g.visible_range(0.0, 6, 0), 0..3);
        assert_eq!(g.visible_range(0.0, 6, 1), 0..4);
        assert_eq!(g.visible_range(216.0, 6, 0), 3..6);
        assert_eq!(g.visible_range(216.0, 6, 5), 0..6);
        assert_eq!(g.visible_range(f64::NAN, 6, 0), 0..0);
    }

    #[test]
    fn centred_index_skips_spacers() {
        let g = geometry();
        assert_eq!(g.centred_index(0.0, 2), None);
        assert_eq!(g.centred_index(0.0, 6), Some(1));
        assert_eq!(g.centred_index(144.0, 6), Some(3));
        assert_eq!(g.centred_index(9_999.0, 6), Some(4));
    }
}
