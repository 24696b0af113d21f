//! Slot layout: packs the configured metrics into a one- or two-column grid.
//!
//! # Grid
//!
//! ```text
//!   overflow column   anchor column
//!  +---------------+---------------+
//!  |   slot 5      |   slot 0      |
//!  |   slot 6      |   slot 1      |
//!  |   ...         |   ...         |
//!  +---------------+---------------+
//! ```
//!
//! The first `max_rows` slots fill the anchor column (right side, next to
//! the anchor the panel is placed against). Further slots fill the overflow
//! column to its left. At most two columns are used whatever `max_columns`
//! says, and never more than [`MAX_SLOTS`] slots.
//!
//! # Font Scale
//!
//! The reference slot height is the panel height divided by `max_rows`.
//! With fewer rows each slot is taller, and the font scale is the ratio of
//! the actual slot height to that reference.
//!
//! # Text Anchors
//!
//! Value and label are centered horizontally on a shared x, shifted away
//! from the unit by half the unit font size. The unit is drawn rotated
//! against the slot's outer edge: reading upward in the anchor column and
//! downward in the overflow column.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

use crate::config::{LABEL_BASELINE_GAP, MAX_COLUMNS, MAX_SLOTS, UNIT_EDGE_INSET, VALUE_BASELINE_GAP};
use crate::fonts::FontSizes;

// =============================================================================
// Inputs
// =============================================================================

/// Everything the layout depends on. Derived per frame, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSpec {
    /// Outer panel rectangle.
    pub panel: Rectangle,
    /// Number of configured metrics.
    pub slot_count: usize,
    pub max_rows: usize,
    pub max_columns: usize,
}

/// Grid dimensions shared by the layout and the placement math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Grid {
    pub visible: usize,
    pub rows: usize,
    pub columns: usize,
}

impl Grid {
    /// `None` when nothing can be shown.
    pub(crate) fn new(
        slot_count: usize,
        max_rows: usize,
        max_columns: usize,
    ) -> Option<Self> {
        let capacity = max_rows.saturating_mul(max_columns.min(MAX_COLUMNS));
        let visible = slot_count.min(capacity).min(MAX_SLOTS);
        if visible == 0 {
            return None;
        }
        let rows = visible.min(max_rows);
        let columns = if visible > max_rows { 2 } else { 1 };
        Some(Self { visible, rows, columns })
    }

    /// Actual slot height over the reference slot height.
    pub(crate) fn font_scale(
        &self,
        max_rows: usize,
    ) -> f32 {
        // (h / rows) / (h / max_rows)
        max_rows as f32 / self.rows as f32
    }
}

// =============================================================================
// Outputs
// =============================================================================

/// Rotation applied to the unit text around its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitRotation {
    /// Rotated -90°, reading bottom to top. Used in the anchor column.
    Ccw90,
    /// Rotated +90°, reading top to bottom. Used in the overflow column.
    Cw90,
}

/// Baseline anchors for one slot's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextAnchors {
    /// Horizontal center and baseline of the value.
    pub value: Point,
    /// Horizontal center and baseline of the label.
    pub label: Point,
    /// Rotation origin of the unit; the unit is centered on it.
    pub unit: Point,
    pub unit_rotation: UnitRotation,
}

/// Geometry of one visible slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGeometry {
    /// Index into the configured metric list.
    pub index: usize,
    pub column: usize,
    pub row: usize,
    pub rect: Rectangle,
}

impl SlotGeometry {
    /// Text anchors for this slot given the resolved font sizes.
    pub fn anchors(
        &self,
        fonts: &FontSizes,
        has_label: bool,
        has_unit: bool,
    ) -> TextAnchors {
        let half_width = (self.rect.size.width / 2) as i32;
        let left = self.rect.top_left.x;
        let center_x = left + half_width;
        let bottom = self.rect.top_left.y + self.rect.size.height as i32;
        let middle = self.rect.top_left.y + (self.rect.size.height / 2) as i32;
        let anchor_column = self.column == 0;

        let unit_shift = (fonts.unit / 2) as i32;
        let x = match (has_unit, anchor_column) {
            (false, _) => center_x,
            (true, true) => center_x - unit_shift,
            (true, false) => center_x + unit_shift,
        };

        let label_font = fonts.label as i32;
        let mut value_y = bottom - VALUE_BASELINE_GAP - label_font;
        if !has_label {
            value_y += label_font / 2;
        }

        let (unit, unit_rotation) = if anchor_column {
            (Point::new(left + 2 * half_width - UNIT_EDGE_INSET, middle), UnitRotation::Ccw90)
        } else {
            (Point::new(left + UNIT_EDGE_INSET, middle), UnitRotation::Cw90)
        };

        TextAnchors {
            value: Point::new(x, value_y),
            label: Point::new(x, bottom - LABEL_BASELINE_GAP),
            unit,
            unit_rotation,
        }
    }
}

/// Result of [`layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct SlotLayout {
    pub font_scale: f32,
    pub rows: usize,
    pub columns: usize,
    pub slots: Vec<SlotGeometry, MAX_SLOTS>,
}

impl SlotLayout {
    pub const fn empty() -> Self {
        Self {
            font_scale: 1.0,
            rows: 0,
            columns: 0,
            slots: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    pub fn len(&self) -> usize { self.slots.len() }
}

impl Default for SlotLayout {
    fn default() -> Self { Self::empty() }
}

// =============================================================================
// Layout
// =============================================================================

/// Compute slot rectangles and the shared font scale.
///
/// Pure: identical specs give identical layouts. Zero slots, zero rows,
/// zero columns or a panel too small to hold one pixel per slot give an
/// empty layout.
pub fn layout(spec: &LayoutSpec) -> SlotLayout {
    let Some(grid) = Grid::new(spec.slot_count, spec.max_rows, spec.max_columns) else {
        return SlotLayout::empty();
    };
    if grid.visible < spec.slot_count {
        log::debug!("layout shows {} of {} slots", grid.visible, spec.slot_count);
    }

    let panel = spec.panel;
    let slot_height = panel.size.height / grid.rows as u32;
    let column_width = panel.size.width / grid.columns as u32;
    if slot_height == 0 || column_width == 0 {
        return SlotLayout::empty();
    }

    let mut slots = Vec::new();
    for index in 0..grid.visible {
        let column = index / grid.rows;
        let row = index % grid.rows;
        // Column 0 hugs the right edge
        let x = panel.top_left.x + ((grid.columns - 1 - column) as u32 * column_width) as i32;
        let y = panel.top_left.y + (row as u32 * slot_height) as i32;
        let rect = Rectangle::new(Point::new(x, y), Size::new(column_width, slot_height));
        slots.push(SlotGeometry { index, column, row, rect }).ok();
    }

    SlotLayout {
        font_scale: grid.font_scale(spec.max_rows),
        rows: grid.rows,
        columns: grid.columns,
        slots,
    }
}

// =============================================================================
// Tests
// =============================================================================
