//! Per-frame touch regions for the visible slots.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

use crate::config::MAX_SLOTS;

/// Slot rectangles recorded during the current frame.
///
/// Regions are rebuilt every frame: [`begin_frame`](Self::begin_frame)
/// drops everything from the previous frame, so a shrinking slot count can
/// never leave stale regions behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchRegionRegistry {
    regions: Vec<(usize, Rectangle), MAX_SLOTS>,
}

impl TouchRegionRegistry {
    pub const fn new() -> Self { Self { regions: Vec::new() } }

    pub fn begin_frame(&mut self) { self.regions.clear(); }

    /// Record `slot`'s rectangle, replacing an earlier one for the same slot.
    pub fn record(
        &mut self,
        slot: usize,
        rect: Rectangle,
    ) {
        if let Some(pos) = self.regions.iter().position(|(s, _)| *s == slot) {
            self.regions.remove(pos);
        }
        if self.regions.push((slot, rect)).is_err() {
            log::warn!("touch registry full, slot {} not recorded", slot);
        }
    }

    /// Slot under `point`; the most recently recorded region wins on overlap.
    pub fn hit_test(
        &self,
        point: Point,
    ) -> Option<usize> {
        let hit = self.regions.iter().rev().find(|(_, rect)| rect.contains(point)).map(|(slot, _)| *slot);
        log::trace!("hit test at ({}, {}) -> {:?}", point.x, point.y, hit);
        hit
    }

    pub fn len(&self) -> usize { self.regions.len() }

    pub fn is_empty(&self) -> bool { self.regions.is_empty() }

    /// Rectangle recorded for `slot` this frame.
    pub fn region(
        &self,
        slot: usize,
    ) -> Option<Rectangle> {
        self.regions.iter().find(|(s, _)| *s == slot).map(|(_, rect)| *rect)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Rectangle)> + '_ { self.regions.iter().copied() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(
        x: i32,
        y: i32,
    ) -> Rectangle {
        Rectangle::new(Point::new(x, y), Size::new(100, 50))
    }

    #[test]
    fn test_hit_and_miss() {
        let mut touch = TouchRegionRegistry::new();
        touch.record(0, rect(0, 0));
        touch.record(1, rect(0, 50));
        assert_eq!(touch.hit_test(Point::new(10, 10)), Some(0));
        assert_eq!(touch.hit_test(Point::new(10, 60)), Some(1));
        assert_eq!(touch.hit_test(Point::new(500, 500)), None);
    }

    #[test]
    fn test_last_write_wins_on_overlap() {
        let mut touch = TouchRegionRegistry::new();
        touch.record(0, rect(0, 0));
        touch.record(1, rect(50, 0));
        assert_eq!(touch.hit_test(Point::new(75, 25)), Some(1));
    }

    #[test]
    fn test_record_replaces_same_slot() {
        let mut touch = TouchRegionRegistry::new();
        touch.record(2, rect(0, 0));
        touch.record(2, rect(200, 0));
        assert_eq!(touch.len(), 1);
        assert_eq!(touch.region(2), Some(rect(200, 0)));
        assert_eq!(touch.hit_test(Point::new(10, 10)), None);
    }

    #[test]
    fn test_begin_frame_clears_stale_regions() {
        let mut touch = TouchRegionRegistry::new();
        for slot in 0..6 {
            touch.record(slot, rect(0, slot as i32 * 50));
        }
        touch.begin_frame();
        touch.record(0, rect(0, 0));
        touch.record(1, rect(0, 50));
        assert_eq!(touch.len(), 2);
        assert_eq!(touch.hit_test(Point::new(10, 260)), None);
    }

    #[test]
    fn test_full_registry_drops_extra_regions() {
        let mut touch = TouchRegionRegistry::new();
        for slot in 0..MAX_SLOTS + 3 {
            touch.record(slot, rect(0, 0));
        }
        assert_eq!(touch.len(), MAX_SLOTS);
    }
}
