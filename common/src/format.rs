//! Number-to-text rules shared by every metric.
//!
//! All writers append to a fixed-capacity `heapless::String`; text that does
//! not fit is truncated by the failed write, never panics.
//!
//! # Precision Rules
//!
//! | Writer        | ≥ 100 | ≥ 10 | otherwise |
//! |---------------|-------|------|-----------|
//! | [`adaptive`]  | 0     | 1    | 2         |
//! | [`coarse`]    | 0     | 0    | 1         |
//!
//! Thresholds compare the magnitude, so negative values get the same number
//! of decimals as their positive counterparts.

use core::fmt::Write;

use heapless::String;
use micromath::F32;

use crate::config::{UNIT_CHAR_BUDGET, UNIT_SHRINK_PER_CHAR, VALUE_CHAR_BUDGET, VALUE_SHRINK_PER_CHAR};

/// Placeholder for telemetry that is missing (no lead, no fix).
pub const MISSING: &str = "-";

/// Placeholder for ratios that are undefined (division by zero).
pub const UNDEFINED: &str = "--";

#[inline]
fn magnitude(v: f32) -> f32 { F32(v).abs().0 }

/// Three-tier precision: 0, 1 or 2 decimals.
pub fn adaptive<const N: usize>(
    out: &mut String<N>,
    v: f32,
) {
    let m = magnitude(v);
    if m >= 100.0 {
        write!(out, "{v:.0}").ok();
    } else if m >= 10.0 {
        write!(out, "{v:.1}").ok();
    } else {
        write!(out, "{v:.2}").ok();
    }
}

/// Two-tier precision: 0 decimals from 10 up, 1 decimal below.
pub fn coarse<const N: usize>(
    out: &mut String<N>,
    v: f32,
) {
    if magnitude(v) >= 10.0 {
        write!(out, "{v:.0}").ok();
    } else {
        write!(out, "{v:.1}").ok();
    }
}

/// Large magnitudes get a `k` or `M` suffix, then [`coarse`] precision.
pub fn si_scaled<const N: usize>(
    out: &mut String<N>,
    v: f32,
) {
    let m = magnitude(v);
    let (scaled, suffix) = if m >= 9e5 {
        (v / 1e6, Some('M'))
    } else if m >= 9e2 {
        (v / 1e3, Some('k'))
    } else {
        (v, None)
    };
    coarse(out, scaled);
    if let Some(suffix) = suffix {
        out.push(suffix).ok();
    }
}

/// Value clamped to `±max`, shown as `"<max>+"` or `"<max>-"` once reached.
pub fn clamped<const N: usize>(
    out: &mut String<N>,
    v: f32,
    max: f32,
) {
    if max > 0.0 && magnitude(v) >= max {
        let sign = if v > 0.0 { '+' } else { '-' };
        write!(out, "{max:.0}{sign}").ok();
    } else {
        adaptive(out, v);
    }
}

/// Elapsed time as `m:ss`, or `h:mm:ss` from one hour up.
pub fn clock<const N: usize>(
    out: &mut String<N>,
    seconds: u32,
) {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        write!(out, "{hours}:{minutes:02}:{secs:02}").ok();
    } else {
        write!(out, "{minutes}:{secs:02}").ok();
    }
}

/// Eight-point compass name for a bearing in degrees.
pub fn compass_point(bearing_deg: f32) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let mut normalized = bearing_deg % 360.0;
    if normalized < 0.0 {
        normalized += 360.0;
    }
    // Sectors are 45° wide and centered on each point
    let sector = ((normalized + 22.5) / 45.0) as usize % POINTS.len();
    POINTS[sector]
}

/// Font units to remove so that `text` fits `budget` characters.
#[inline]
pub fn length_shrink(
    text: &str,
    budget: usize,
    per_char: i32,
) -> i32 {
    let len = text.chars().count();
    if len > budget { -((len - budget) as i32) * per_char } else { 0 }
}

/// Shrink applied to a value string.
#[inline]
pub fn value_shrink(text: &str) -> i32 { length_shrink(text, VALUE_CHAR_BUDGET, VALUE_SHRINK_PER_CHAR) }

/// Shrink applied to a unit string.
#[inline]
pub fn unit_shrink(text: &str) -> i32 { length_shrink(text, UNIT_CHAR_BUDGET, UNIT_SHRINK_PER_CHAR) }

// =============================================================================
// Tests
// =============================================================================
