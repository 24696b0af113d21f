//! Panel configuration: compile-time layout constants and the runtime
//! slot assignment.
//!
//! Constants are grouped by concern. Geometry values are expressed in the
//! panel's canonical pixel space (a 1080 px tall screen); hosts with other
//! resolutions scale the [`PanelAnchor`](crate::placement::PanelAnchor) they
//! hand in, not these constants.
//!
//! [`PanelConfig`] is the persisted, user-editable part: which metric sits in
//! which slot, the row/column policy and the unit system. The panel reads it
//! every frame and never mutates it.

use heapless::Vec;

use crate::catalog::MetricCode;

// =============================================================================
// Slot Capacity
// =============================================================================

/// Hard upper bound on the number of slots a panel can show.
pub const MAX_SLOTS: usize = 10;

/// Default number of rows per column.
pub const DEFAULT_MAX_ROWS: usize = 5;

/// The layout engine never produces more than two columns.
pub const MAX_COLUMNS: usize = 2;

const _: () = assert!(DEFAULT_MAX_ROWS * MAX_COLUMNS <= MAX_SLOTS);

// =============================================================================
// Fonts
// =============================================================================

/// Canonical value font size at font scale 1.0.
pub const VALUE_FONT_SIZE: f32 = 78.0;

/// Canonical label font size at font scale 1.0 (before [`LABEL_FONT_RATIO`]).
pub const LABEL_FONT_SIZE: f32 = 32.0;

/// Labels are drawn slightly smaller than their nominal size.
pub const LABEL_FONT_RATIO: f32 = 0.9;

/// Canonical unit font size at font scale 1.0.
pub const UNIT_FONT_SIZE: f32 = 38.0;

/// Values longer than this many characters start shrinking.
pub const VALUE_CHAR_BUDGET: usize = 4;

/// Font units removed per value character over budget.
pub const VALUE_SHRINK_PER_CHAR: i32 = 8;

/// Units longer than this many characters start shrinking.
pub const UNIT_CHAR_BUDGET: usize = 5;

/// Font units removed per unit character over budget.
pub const UNIT_SHRINK_PER_CHAR: i32 = 5;

// =============================================================================
// Slot Geometry
// =============================================================================

/// Half-width of a slot column at font scale 1.0, before padding.
pub const SLOT_HALF_WIDTH: u32 = 96;

/// Padding added to the slot half-width.
pub const SLOT_PADDING: u32 = 6;

/// Horizontal gap left after each neighbor widget.
pub const NEIGHBOR_GAP: u32 = 30;

/// Distance between the slot bottom and the value baseline, on top of the label.
pub const VALUE_BASELINE_GAP: i32 = 8;

/// Distance between the slot bottom and the label baseline.
pub const LABEL_BASELINE_GAP: i32 = 9;

/// Inset of the rotated unit text from the slot's outer edge.
pub const UNIT_EDGE_INSET: i32 = 13;

/// Border stroke width of the panel outline.
pub const BORDER_WIDTH: u32 = 6;

/// Corner radius of the panel outline.
pub const BORDER_RADIUS: u32 = 20;

// =============================================================================
// Touch
// =============================================================================

/// Seconds the panel border stays highlighted after a tap.
pub const TOUCH_HIGHLIGHT_S: f32 = 2.0;

// =============================================================================
// Grade Estimator
// =============================================================================

/// Number of samples in the GPS grade window.
pub const GRADE_SAMPLE_COUNT: usize = 12;

/// Distance travelled between consecutive grade samples.
pub const GRADE_STEP_M: f32 = 10.0;

/// Cumulative distance required before a GPS grade is reported.
pub const GRADE_MIN_DISTANCE_M: f32 = 150.0;

const _: () = assert!(GRADE_SAMPLE_COUNT >= 2);
const _: () = assert!(GRADE_STEP_M * (GRADE_SAMPLE_COUNT as f32) < GRADE_MIN_DISTANCE_M);

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Rejected panel configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("panel holds at most {max} slots, got {requested}")]
    TooManySlots { requested: usize, max: usize },

    #[error("row limit must be between 1 and {max}, got {requested}")]
    InvalidRowLimit { requested: usize, max: usize },

    #[error("column limit must be between 1 and {max}, got {requested}")]
    InvalidColumnLimit { requested: usize, max: usize },
}

/// Slot assignment and layout policy of one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    metrics: Vec<MetricCode, MAX_SLOTS>,
    max_rows: usize,
    max_columns: usize,
    is_metric: bool,
}

impl PanelConfig {
    /// Validate and build a configuration.
    ///
    /// Unknown metric codes are accepted; they render as the invalid sentinel.
    pub fn new(
        metrics: &[MetricCode],
        max_rows: usize,
        max_columns: usize,
        is_metric: bool,
    ) -> Result<Self, ConfigError> {
        if max_rows == 0 || max_rows > MAX_SLOTS {
            return Err(ConfigError::InvalidRowLimit { requested: max_rows, max: MAX_SLOTS });
        }
        if max_columns == 0 || max_columns > MAX_COLUMNS {
            return Err(ConfigError::InvalidColumnLimit {
                requested: max_columns,
                max: MAX_COLUMNS,
            });
        }
        let metrics = Vec::from_slice(metrics).map_err(|_| ConfigError::TooManySlots {
            requested: metrics.len(),
            max: MAX_SLOTS,
        })?;
        Ok(Self { metrics, max_rows, max_columns, is_metric })
    }

    /// Build from configuration keys such as `"GRADE_GPS"` or numeric codes.
    ///
    /// Stops parsing at the first key past [`MAX_SLOTS`].
    pub fn from_keys<'a>(
        keys: impl IntoIterator<Item = &'a str>,
        max_rows: usize,
        max_columns: usize,
        is_metric: bool,
    ) -> Result<Self, ConfigError> {
        let mut keys = keys.into_iter();
        let mut codes: Vec<MetricCode, MAX_SLOTS> = Vec::new();
        while let Some(key) = keys.next() {
            if codes.push(MetricCode::from_key(key)).is_err() {
                let requested = MAX_SLOTS + 1 + keys.count();
                return Err(ConfigError::TooManySlots { requested, max: MAX_SLOTS });
            }
        }
        Self::new(&codes, max_rows, max_columns, is_metric)
    }

    pub fn metrics(&self) -> &[MetricCode] { &self.metrics }

    pub fn max_rows(&self) -> usize { self.max_rows }

    pub fn max_columns(&self) -> usize { self.max_columns }

    pub fn is_metric(&self) -> bool { self.is_metric }

    /// Same layout policy and metrics with a different unit system.
    #[must_use]
    pub fn with_units(
        mut self,
        is_metric: bool,
    ) -> Self {
        self.is_metric = is_metric;
        self
    }

    /// Replace the metric in `slot` with the next one in catalog order.
    ///
    /// Out-of-range slots are ignored. Invalid codes restart at the first metric.
    pub fn advance_slot(
        &mut self,
        slot: usize,
    ) {
        if let Some(code) = self.metrics.get_mut(slot) {
            *code = code.next();
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            metrics: Vec::new(),
            max_rows: DEFAULT_MAX_ROWS,
            max_columns: MAX_COLUMNS,
            is_metric: true,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MetricId;

    #[test]
    fn test_from_keys_maps_names_and_unknowns() {
        let config = PanelConfig::from_keys(["grade_gps", "CPU_TEMP", "NOT_A_METRIC"], 5, 2, true)
            .expect("valid config");
        assert_eq!(config.metrics()[0].metric(), Some(MetricId::GradeGps));
        assert_eq!(config.metrics()[1].metric(), Some(MetricId::CpuTemp));
        assert_eq!(config.metrics()[2], MetricCode::INVALID);
    }

    #[test]
    fn test_too_many_slots_rejected() {
        let keys = ["CPU_TEMP"; MAX_SLOTS + 1];
        let err = PanelConfig::from_keys(keys, 5, 2, true).unwrap_err();
        assert_eq!(err, ConfigError::TooManySlots { requested: MAX_SLOTS + 1, max: MAX_SLOTS });

        // Surplus keys are counted but not parsed
        let mut keys = std::vec::Vec::from(["LEAD_TTC"; MAX_SLOTS]);
        keys.extend(["NOT_A_METRIC", "ALSO_BOGUS", "16", "CPU_TEMP"]);
        let err = PanelConfig::from_keys(keys, 5, 2, true).unwrap_err();
        assert_eq!(err, ConfigError::TooManySlots { requested: MAX_SLOTS + 4, max: MAX_SLOTS });

        let exact = PanelConfig::from_keys(["LEAD_TTC"; MAX_SLOTS], 5, 2, true).expect("exactly full");
        assert_eq!(exact.metrics().len(), MAX_SLOTS);
    }

    #[test]
    fn test_row_and_column_limits() {
        assert!(matches!(
            PanelConfig::new(&[], 0, 2, true),
            Err(ConfigError::InvalidRowLimit { .. })
        ));
        assert!(matches!(
            PanelConfig::new(&[], 5, 3, true),
            Err(ConfigError::InvalidColumnLimit { .. })
        ));
        assert!(PanelConfig::new(&[], 5, 1, false).is_ok());
    }

    #[test]
    fn test_advance_slot_cycles_metric() {
        let mut config = PanelConfig::new(&[MetricId::CpuTemp.code()], 5, 2, true).unwrap();
        config.advance_slot(0);
        assert_ne!(config.metrics()[0], MetricId::CpuTemp.code());
        // Out of range is a no-op
        config.advance_slot(7);
        assert_eq!(config.metrics().len(), 1);
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::InvalidRowLimit { requested: 0, max: MAX_SLOTS };
        assert_eq!(err.to_string(), "row limit must be between 1 and 10, got 0");
    }
}
