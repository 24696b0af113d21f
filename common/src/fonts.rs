//! Per-slot font sizes.
//!
//! Sizes start from the canonical value/label/unit sizes, scale with the
//! slot height, then take the metric's own adjustment and the length shrink
//! for long strings. A size never drops below one unit.

use crate::catalog::MetricDisplay;
use crate::config::{LABEL_FONT_RATIO, LABEL_FONT_SIZE, UNIT_FONT_SIZE, VALUE_FONT_SIZE};
use crate::format::{unit_shrink, value_shrink};

/// Font sizes for one slot, in font units (pixels at scale 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontSizes {
    pub value: u32,
    pub label: u32,
    pub unit: u32,
}

#[inline]
fn at_least_one(size: f32) -> u32 { if size < 1.0 { 1 } else { size as u32 } }

impl FontSizes {
    /// Sizes for `display` in a slot drawn at `font_scale`.
    pub fn for_display(
        display: &MetricDisplay,
        font_scale: f32,
    ) -> Self {
        let value = VALUE_FONT_SIZE * font_scale + (display.font_size_delta + value_shrink(&display.value)) as f32;
        let label = LABEL_FONT_SIZE * LABEL_FONT_RATIO * font_scale;
        let unit = UNIT_FONT_SIZE * font_scale + unit_shrink(&display.unit) as f32;
        Self {
            value: at_least_one(value),
            label: at_least_one(label),
            unit: at_least_one(unit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(
        value: &str,
        unit: &str,
    ) -> MetricDisplay {
        let mut d = MetricDisplay::new();
        d.set_value(value);
        d.set_unit(unit);
        d
    }

    #[test]
    fn test_canonical_sizes_at_full_scale() {
        let sizes = FontSizes::for_display(&display("42", "m"), 1.0);
        assert_eq!(sizes, FontSizes { value: 78, label: 28, unit: 38 });
    }

    #[test]
    fn test_long_strings_shrink() {
        let sizes = FontSizes::for_display(&display("1:02:05", "km/kWh"), 1.0);
        assert_eq!(sizes.value, 78 - 24);
        assert_eq!(sizes.unit, 38 - 5);
    }

    #[test]
    fn test_metric_delta_applies_to_value_only() {
        let mut d = display("3°:4°", "");
        d.font_size_delta = 12;
        let sizes = FontSizes::for_display(&d, 1.0);
        // Five characters: one over budget
        assert_eq!(sizes.value, 78 + 12 - 8);
        assert_eq!(sizes.unit, 38);
    }

    #[test]
    fn test_sizes_grow_with_scale() {
        let d = display("12.5", "kW");
        let mut last = FontSizes::for_display(&d, 0.5);
        for step in 1..=10 {
            let next = FontSizes::for_display(&d, 0.5 + step as f32 * 0.1);
            assert!(next.value >= last.value, "value size shrank at step {step}");
            assert!(next.label >= last.label, "label size shrank at step {step}");
            assert!(next.unit >= last.unit, "unit size shrank at step {step}");
            last = next;
        }
    }

    #[test]
    fn test_sizes_never_reach_zero() {
        let sizes = FontSizes::for_display(&display("123456789012", "abcdefghijk"), 0.01);
        assert!(sizes.value >= 1 && sizes.label >= 1 && sizes.unit >= 1);
    }
}
