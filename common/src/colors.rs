//! Color constants and ramps for the telemetry panel.
//!
//! The panel produces `Rgb888` colors; renderers convert to their native
//! format (the simulator draws into `Rgb565`, the same format the embedded
//! displays use).
//!
//! # Danger Ramps
//!
//! Most numeric metrics color their value by how close it is to a danger
//! level. A [`ColorRamp`] maps a parameter `p` to a color linearly per
//! channel and clamps each channel to `0..=255`:
//!
//! - [`ColorRamp::WARMING`]: white at `p = 0`, orange at `p = 1`, red from
//!   `p = 2` (grade, memory, steering angle, closing speed).
//! - [`ColorRamp::COOLING`]: orange at `p = 0`, white at `p = 1` (free
//!   space, time-to-collision, lead distance, follow time). Small values are
//!   the dangerous ones.
//!
//! Parameters outside `0..=1` are allowed; the clamp saturates them. A NaN
//! parameter yields the `p = 0` color.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use crate::snapshot::ThermalStatus;

// =============================================================================
// Standard Colors
// =============================================================================

/// Default value/label/unit text color.
pub const WHITE: Rgb888 = Rgb888::WHITE;

/// Panel background.
pub const BLACK: Rgb888 = Rgb888::BLACK;

/// Critical values (poor GPS, overheating coolant).
pub const RED: Rgb888 = Rgb888::RED;

// =============================================================================
// Custom Colors
// =============================================================================

/// Driver monitoring timer about to expire.
pub const TIMER_WARNING: Rgb888 = Rgb888::new(255, 125, 100);

/// GPS accuracy degraded but usable.
pub const GPS_DEGRADED: Rgb888 = Rgb888::new(255, 188, 3);

/// Coolant below operating temperature.
pub const COOLANT_COLD: Rgb888 = Rgb888::new(84, 207, 249);

/// Coolant above operating temperature.
pub const COOLANT_HOT: Rgb888 = Rgb888::new(255, 169, 63);

/// Panel border while idle.
pub const BORDER_IDLE: Rgb888 = Rgb888::WHITE;

/// Panel border shortly after a tap.
pub const BORDER_ACTIVE: Rgb888 = Rgb888::new(23, 134, 255);

/// Device thermal status: green.
pub const THERMAL_OK: Rgb888 = Rgb888::GREEN;

/// Device thermal status: yellow.
pub const THERMAL_WARM: Rgb888 = Rgb888::new(255, 128, 0);

/// Device thermal status: red and beyond.
pub const THERMAL_HOT: Rgb888 = Rgb888::RED;

/// Color for the device thermal status band.
#[inline]
pub const fn thermal_color(status: ThermalStatus) -> Rgb888 {
    match status {
        ThermalStatus::Green => THERMAL_OK,
        ThermalStatus::Yellow => THERMAL_WARM,
        ThermalStatus::Red | ThermalStatus::Danger => THERMAL_HOT,
    }
}

// =============================================================================
// Danger Ramps
// =============================================================================

/// Per-channel linear color ramp: `channel = origin + slope × p`, clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRamp {
    origin: [f32; 3],
    slope: [f32; 3],
}

impl ColorRamp {
    /// White at 0, orange at 1, red from 2.
    pub const WARMING: Self = Self { origin: [255.0, 255.0, 255.0], slope: [0.0, -127.5, -255.0] };

    /// Orange at 0, white at 1.
    pub const COOLING: Self = Self { origin: [255.0, 127.5, 0.0], slope: [0.0, 255.0, 255.0] };

    /// Evaluate the ramp at `p`.
    pub fn at(
        &self,
        p: f32,
    ) -> Rgb888 {
        let p = if p.is_nan() { 0.0 } else { p };
        let channel = |i: usize| -> u8 {
            let v = self.origin[i] + self.slope[i] * p;
            v.clamp(0.0, 255.0) as u8
        };
        Rgb888::new(channel(0), channel(1), channel(2))
    }
}

// =============================================================================
// Tests
// =============================================================================
