//! Derives the panel rectangle from a screen anchor and its neighbors.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{NEIGHBOR_GAP, SLOT_HALF_WIDTH, SLOT_PADDING};
use crate::layout::{Grid, LayoutSpec};

/// Where the panel attaches on screen.
///
/// Neighbor widgets already placed to the left of `right_x` push the panel
/// further left; their widths are inputs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelAnchor {
    /// Right edge of the panel when no neighbors are present.
    pub right_x: i32,
    pub top_y: i32,
    pub bottom_y: i32,
    /// Half the column width at font scale 1, before padding.
    pub slot_half_width: u32,
}

impl PanelAnchor {
    pub const fn new(
        right_x: i32,
        top_y: i32,
        bottom_y: i32,
    ) -> Self {
        Self {
            right_x,
            top_y,
            bottom_y,
            slot_half_width: SLOT_HALF_WIDTH,
        }
    }

    /// Layout input for `slot_count` metrics next to `neighbor_widths`.
    pub fn layout_spec(
        &self,
        neighbor_widths: &[u32],
        slot_count: usize,
        max_rows: usize,
        max_columns: usize,
    ) -> LayoutSpec {
        LayoutSpec {
            panel: self.panel_rect(neighbor_widths, slot_count, max_rows, max_columns),
            slot_count,
            max_rows,
            max_columns,
        }
    }

    fn panel_rect(
        &self,
        neighbor_widths: &[u32],
        slot_count: usize,
        max_rows: usize,
        max_columns: usize,
    ) -> Rectangle {
        let height = self.bottom_y.saturating_sub(self.top_y);
        let Some(grid) = Grid::new(slot_count, max_rows, max_columns) else {
            return Rectangle::zero();
        };
        if height <= 0 {
            return Rectangle::zero();
        }

        let offset: i64 = neighbor_widths.iter().map(|w| i64::from(*w) + i64::from(NEIGHBOR_GAP)).sum();
        let right = (i64::from(self.right_x) - offset) as i32;

        // Single-column panels get extra side padding
        let padding = if grid.columns == 1 { 2 * SLOT_PADDING } else { SLOT_PADDING };
        let half_width = (self.slot_half_width as f32 * grid.font_scale(max_rows)) as u32 + padding;
        let width = 2 * half_width * grid.columns as u32;

        Rectangle::new(Point::new(right - width as i32, self.top_y), Size::new(width, height as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout;

    const ANCHOR: PanelAnchor = PanelAnchor::new(1800, 200, 700);

    #[test]
    fn test_single_column_width_and_position() {
        let spec = ANCHOR.layout_spec(&[], 5, 5, 2);
        // (96 + 12) × 2
        assert_eq!(spec.panel.size, Size::new(216, 500));
        assert_eq!(spec.panel.top_left, Point::new(1800 - 216, 200));
    }

    #[test]
    fn test_two_columns_double_the_width() {
        let spec = ANCHOR.layout_spec(&[], 8, 5, 2);
        // (96 + 6) × 4
        assert_eq!(spec.panel.size.width, 408);
        assert_eq!(spec.panel.top_left.x + 408, 1800);
    }

    #[test]
    fn test_fewer_rows_widen_the_column() {
        let wide = ANCHOR.layout_spec(&[], 2, 4, 2);
        // 96 × 2 + 12
        assert_eq!(wide.panel.size.width, 2 * (192 + 12));
        assert_eq!(wide.panel.top_left.x + wide.panel.size.width as i32, 1800);
    }

    #[test]
    fn test_neighbors_shift_the_panel_left() {
        let neighbors = [120, 80];
        let spec = ANCHOR.layout_spec(&neighbors, 3, 5, 2);
        let right = spec.panel.top_left.x + spec.panel.size.width as i32;
        assert_eq!(right, 1800 - (120 + 30) - (80 + 30));
        assert_eq!(neighbors, [120, 80]);
    }

    #[test]
    fn test_empty_config_yields_empty_layout() {
        let spec = ANCHOR.layout_spec(&[], 0, 5, 2);
        assert_eq!(spec.panel, Rectangle::zero());
        assert!(layout(&spec).is_empty());

        let inverted = PanelAnchor::new(1800, 700, 200);
        assert!(layout(&inverted.layout_spec(&[], 4, 5, 2)).is_empty());
    }

    #[test]
    fn test_same_inputs_same_spec() {
        let neighbors = [64, 200, 10];
        assert_eq!(ANCHOR.layout_spec(&neighbors, 7, 5, 2), ANCHOR.layout_spec(&neighbors, 7, 5, 2));
    }
}
