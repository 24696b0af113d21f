//! GPS, elevation, bearing, road grade and roll.

use core::fmt::Write;

use micromath::F32;

use super::{GradeEstimator, MetricDisplay, MetricInput};
use crate::colors::{ColorRamp, GPS_DEGRADED, RED};
use crate::format;
use crate::thresholds::{
    GPS_ACCURACY_ABSURD_M, GPS_ACCURACY_DEGRADED_M, GPS_ACCURACY_POOR_M, GRADE_DANGER_SCALE,
};
use crate::units;

/// Elevations at or above this many display units use a smaller font.
const LONG_ALTITUDE: f32 = 10_000.0;

pub(super) fn gps_accuracy(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let gps = &input.state.gps;
    out.set_label("GPS PREC");
    if !gps.has_fix() {
        out.set_value(format::MISSING);
        return;
    }

    let accuracy = gps.accuracy_m;
    if accuracy > GPS_ACCURACY_POOR_M {
        out.value_color = RED;
    } else if accuracy > GPS_ACCURACY_DEGRADED_M {
        out.value_color = GPS_DEGRADED;
    }
    // Accuracy is always reported in meters
    if accuracy > GPS_ACCURACY_ABSURD_M {
        out.set_value("None");
    } else if accuracy > 9.99 {
        write!(out.value, "{accuracy:.1}").ok();
    } else {
        write!(out.value, "{accuracy:.2}").ok();
    }
    write!(out.unit, "{}", gps.satellite_count).ok();
}

pub(super) fn altitude(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let gps = &input.state.gps;
    out.set_label("ELEVATION");
    out.set_unit(units::length_unit(input.is_metric));
    if !gps.has_fix() {
        out.set_value(format::MISSING);
        return;
    }
    let alt = units::altitude(gps.altitude_m, input.is_metric);
    write!(out.value, "{alt:.0}").ok();
    if alt >= LONG_ALTITUDE {
        out.font_size_delta -= 10;
    }
}

pub(super) fn bearing(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let gps = &input.state.gps;
    out.set_label("BEARING");
    if gps.has_bearing() {
        out.set_value(format::compass_point(gps.bearing_deg));
        write!(out.unit, "{}°", gps.bearing_deg as i32).ok();
    } else {
        out.set_value("OFF");
        out.set_unit(format::MISSING);
    }
}

fn grade_value(
    out: &mut MetricDisplay,
    grade: f32,
) {
    out.ramp_value(ColorRamp::WARMING, GRADE_DANGER_SCALE * F32(grade).abs().0);
    write!(out.value, "{grade:.1}%").ok();
}

/// Feeds the estimator with this frame's odometry, then reports its mean.
pub(super) fn grade_gps(
    input: &MetricInput<'_>,
    estimator: &mut GradeEstimator,
    out: &mut MetricDisplay,
) {
    let state = input.state;
    estimator.observe(state.car.v_ego_mps, state.timestamp_s, state.gps.altitude_m);

    out.set_label("GRADE (GPS)");
    match estimator.mean_grade(state.gps.accuracy_m) {
        Some(grade) => grade_value(out, grade),
        None => out.set_value(format::MISSING),
    }
}

pub(super) fn grade_device(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let grade = libm::tanf(input.state.car.pitch_rad) * 100.0;
    out.set_label("GRADE");
    grade_value(out, grade);
}

pub(super) fn device_roll(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    write!(out.value, "{:.1}°", input.state.car.device_roll_rad.to_degrees()).ok();
    out.set_label("DEVICE ROLL");
}

pub(super) fn road_roll(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    write!(out.value, "{:.1}°", input.state.car.road_roll_rad.to_degrees()).ok();
    out.set_label("ROAD ROLL");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::WHITE;
    use crate::grade::GradePhase;
    use crate::snapshot::StateSnapshot;

    fn run(
        f: fn(&MetricInput<'_>, &mut MetricDisplay),
        state: &StateSnapshot,
        is_metric: bool,
    ) -> MetricDisplay {
        let mut out = MetricDisplay::new();
        f(&MetricInput { state, is_metric }, &mut out);
        out
    }

    #[test]
    fn test_gps_accuracy_colors_and_precision() {
        let mut state = StateSnapshot::default();
        assert_eq!(run(gps_accuracy, &state, true).value.as_str(), "-");

        state.gps.accuracy_m = 0.5;
        state.gps.satellite_count = 11;
        let good = run(gps_accuracy, &state, true);
        assert_eq!(good.value.as_str(), "0.50");
        assert_eq!(good.unit.as_str(), "11");
        assert_eq!(good.value_color, WHITE);

        state.gps.accuracy_m = 1.0;
        assert_eq!(run(gps_accuracy, &state, true).value_color, GPS_DEGRADED);

        state.gps.accuracy_m = 12.5;
        let poor = run(gps_accuracy, &state, true);
        assert_eq!(poor.value.as_str(), "12.5");
        assert_eq!(poor.value_color, RED);

        state.gps.accuracy_m = 150.0;
        assert_eq!(run(gps_accuracy, &state, true).value.as_str(), "None");
    }

    #[test]
    fn test_altitude_units_and_long_values_shrink() {
        let mut state = StateSnapshot::default();
        state.gps.accuracy_m = 1.0;
        state.gps.altitude_m = 3200.0;

        let metric = run(altitude, &state, true);
        assert_eq!(metric.value.as_str(), "3200");
        assert_eq!(metric.unit.as_str(), "m");
        assert_eq!(metric.font_size_delta, 0);

        let imperial = run(altitude, &state, false);
        assert_eq!(imperial.value.as_str(), "10499");
        assert_eq!(imperial.unit.as_str(), "ft");
        assert_eq!(imperial.font_size_delta, -10);
    }

    #[test]
    fn test_bearing_off_without_heading() {
        let mut state = StateSnapshot::default();
        let off = run(bearing, &state, true);
        assert_eq!(off.value.as_str(), "OFF");
        assert_eq!(off.unit.as_str(), "-");

        state.gps.bearing_accuracy_deg = 5.0;
        state.gps.bearing_deg = 93.7;
        let east = run(bearing, &state, true);
        assert_eq!(east.value.as_str(), "E");
        assert_eq!(east.unit.as_str(), "93°");
    }

    #[test]
    fn test_device_grade_from_pitch() {
        let mut state = StateSnapshot::default();
        state.car.pitch_rad = 0.05;
        let out = run(grade_device, &state, true);
        assert_eq!(out.value.as_str(), "5.0%");
        assert_eq!(out.label.as_str(), "GRADE");

        for (pitch, shown) in [(0.1, "10.0%"), (0.15, "15.1%"), (-0.1, "-10.0%")] {
            state.car.pitch_rad = pitch;
            assert_eq!(run(grade_device, &state, true).value.as_str(), shown, "pitch {pitch}");
        }
    }

    #[test]
    fn test_gps_grade_drives_estimator_until_steady() {
        let mut state = StateSnapshot::default();
        state.gps.accuracy_m = 0.8;
        state.car.v_ego_mps = 20.0;
        let mut estimator = GradeEstimator::new();

        // Climb 1 m every second at 20 m/s: a 5 % grade
        let mut last = None;
        for frame in 0..40 {
            state.timestamp_s = frame as f32;
            state.gps.altitude_m = 100.0 + frame as f32;
            let mut out = MetricDisplay::new();
            grade_gps(&MetricInput { state: &state, is_metric: true }, &mut estimator, &mut out);
            last = Some(out);
        }
        let last = last.expect("frames rendered");
        assert_eq!(estimator.phase(), GradePhase::Steady);
        assert_eq!(last.label.as_str(), "GRADE (GPS)");
        assert_ne!(last.value.as_str(), "-");
        assert_ne!(last.value_color, WHITE);
    }

    #[test]
    fn test_gps_grade_missing_without_fix() {
        let state = StateSnapshot::default();
        let mut estimator = GradeEstimator::new();
        let mut out = MetricDisplay::new();
        grade_gps(&MetricInput { state: &state, is_metric: true }, &mut estimator, &mut out);
        assert_eq!(out.value.as_str(), "-");
    }
}
