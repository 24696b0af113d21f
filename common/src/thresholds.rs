//! Centralized metric threshold configuration.
//!
//! All thresholds are compile-time constants with validation assertions, so
//! the color functions in the catalog and the tests agree on one set of
//! numbers.
//!
//! Two kinds of values live here:
//!
//! - **Step thresholds**: a metric switches to a fixed warning color once it
//!   crosses the value (coolant, GPS accuracy, timers).
//! - **Danger scales**: a metric is multiplied by the scale to obtain the
//!   ramp parameter fed to [`ColorRamp`](crate::colors::ColorRamp). A ramp
//!   parameter of 1.0 is full danger, so the reciprocal of the scale is the
//!   value at which the metric turns fully red (or fully white on a cooling
//!   ramp).
//!
//! # Compile-Time Validation
//!
//! Each threshold group includes `const` assertions that verify ordering at
//! compile time. Misordered thresholds fail the build.

// =============================================================================
// Coolant Temperature Thresholds
// =============================================================================

/// Below this the engine is considered cold and not running (°C).
pub const COOLANT_OFF_C: f32 = 55.0;

/// Below this coolant is drawn in the cold color (°C).
pub const COOLANT_COLD_C: f32 = 74.0;

/// Above this coolant is drawn in the hot color (°C).
pub const COOLANT_HOT_C: f32 = 99.0;

/// Above this coolant is drawn in the critical color (°C).
pub const COOLANT_CRITICAL_C: f32 = 115.0;

/// Fahrenheit counterpart of [`COOLANT_OFF_C`].
pub const COOLANT_OFF_F: f32 = 130.0;

/// Fahrenheit counterpart of [`COOLANT_COLD_C`].
pub const COOLANT_COLD_F: f32 = 165.0;

/// Fahrenheit counterpart of [`COOLANT_HOT_C`].
pub const COOLANT_HOT_F: f32 = 210.0;

/// Fahrenheit counterpart of [`COOLANT_CRITICAL_C`].
pub const COOLANT_CRITICAL_F: f32 = 240.0;

const _: () = assert!(COOLANT_OFF_C < COOLANT_COLD_C);
const _: () = assert!(COOLANT_COLD_C < COOLANT_HOT_C);
const _: () = assert!(COOLANT_HOT_C < COOLANT_CRITICAL_C);
const _: () = assert!(COOLANT_OFF_F < COOLANT_COLD_F);
const _: () = assert!(COOLANT_COLD_F < COOLANT_HOT_F);
const _: () = assert!(COOLANT_HOT_F < COOLANT_CRITICAL_F);

/// Coolant thresholds for one unit system, ascending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolantBands {
    pub off: f32,
    pub cold: f32,
    pub hot: f32,
    pub critical: f32,
}

/// Coolant thresholds in the unit selected by `is_metric`.
#[inline]
pub const fn coolant_bands(is_metric: bool) -> CoolantBands {
    if is_metric {
        CoolantBands {
            off: COOLANT_OFF_C,
            cold: COOLANT_COLD_C,
            hot: COOLANT_HOT_C,
            critical: COOLANT_CRITICAL_C,
        }
    } else {
        CoolantBands {
            off: COOLANT_OFF_F,
            cold: COOLANT_COLD_F,
            hot: COOLANT_HOT_F,
            critical: COOLANT_CRITICAL_F,
        }
    }
}

// =============================================================================
// GPS Accuracy Thresholds (meters)
// =============================================================================

/// Accuracy worse than this is drawn in the degraded color.
pub const GPS_ACCURACY_DEGRADED_M: f32 = 0.85;

/// Accuracy worse than this is drawn in red.
pub const GPS_ACCURACY_POOR_M: f32 = 1.3;

/// Accuracy worse than this is not shown as a number at all.
pub const GPS_ACCURACY_ABSURD_M: f32 = 99.0;

const _: () = assert!(GPS_ACCURACY_DEGRADED_M < GPS_ACCURACY_POOR_M);
const _: () = assert!(GPS_ACCURACY_POOR_M < GPS_ACCURACY_ABSURD_M);

/// Bearing accuracy reported when no heading is available (degrees).
pub const BEARING_ACCURACY_INVALID_DEG: f32 = 180.0;

// =============================================================================
// Timer Thresholds
// =============================================================================

/// Driver monitoring timers below this many seconds use the warning color.
pub const TIMER_WARNING_S: u32 = 5;

// =============================================================================
// Lead Vehicle Thresholds
// =============================================================================

/// Time-to-collision above this is shown as "99+".
pub const LEAD_TTC_CAP_S: f32 = 99.0;

/// Ego speed below which follow time is undefined (m/s).
pub const FOLLOW_TIME_MIN_SPEED_MPS: f32 = 0.5;

// =============================================================================
// HV Battery
// =============================================================================

/// Nominal pack voltage; danger grows with distance from it.
pub const HVB_NOMINAL_V: f32 = 360.0;

// =============================================================================
// Danger Scales (ramp parameter = value × scale)
// =============================================================================

/// Road grade in percent; full red at 8 %.
pub const GRADE_DANGER_SCALE: f32 = 0.125;

/// Memory usage in percent; full red at 85 %.
pub const MEMORY_DANGER_SCALE: f32 = 0.011_764_706;

/// Free storage in percent (cooling ramp); fully white at 20 %.
pub const FREE_SPACE_SCALE: f32 = 0.05;

/// HV battery voltage deviation from nominal; full red 60 V away.
pub const HVB_DEVIATION_SCALE: f32 = 0.016_666_67;

/// Time-to-collision in seconds (cooling ramp).
pub const LEAD_TTC_SCALE: f32 = 0.333;

/// Lead distance in meters (cooling ramp).
pub const LEAD_DISTANCE_SCALE_M: f32 = 0.0333;

/// Lead distance in feet (cooling ramp).
pub const LEAD_DISTANCE_SCALE_FT: f32 = 0.01;

/// Follow time in seconds (cooling ramp).
pub const FOLLOW_TIME_SCALE: f32 = 0.6667;

/// Relative lead speed in m/s; closing speed (negative) ramps to red.
pub const LEAD_CLOSING_SCALE: f32 = -0.2;

/// Steering angle magnitude in degrees.
pub const STEERING_ANGLE_SCALE: f32 = 0.0333;

/// Steering error magnitude in degrees.
pub const STEERING_ERROR_SCALE: f32 = 0.2;

// =============================================================================
// Tests
// =============================================================================
