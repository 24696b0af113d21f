//! Steering, engine, coolant and the follow distance setting.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb888;
use micromath::F32;

use super::{MetricDisplay, MetricInput};
use crate::colors::{COOLANT_COLD, COOLANT_HOT, ColorRamp, RED};
use crate::format;
use crate::thresholds::{STEERING_ANGLE_SCALE, STEERING_ERROR_SCALE, coolant_bands};
use crate::units;

/// Value font boost for the compact steering pairs.
const STEERING_FONT_BOOST: i32 = 12;

/// Angles below this magnitude keep one decimal.
const FINE_ANGLE_DEG: f32 = 10.0;

fn write_angle<const N: usize>(
    out: &mut heapless::String<N>,
    deg: f32,
) {
    if F32(deg).abs().0 < FINE_ANGLE_DEG {
        write!(out, "{deg:.1}°").ok();
    } else {
        write!(out, "{deg:.0}°").ok();
    }
}

fn steering_ramp(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let angle = F32(input.state.car.steering_angle_deg).abs().0;
    out.ramp_value(ColorRamp::WARMING, STEERING_ANGLE_SCALE * angle);
}

pub(super) fn steering_angle(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    steering_ramp(input, out);
    write_angle(&mut out.value, input.state.car.steering_angle_deg);
    out.set_label("REAL STEER");
}

/// Actual and desired angle while engaged; the actual angle alone otherwise.
pub(super) fn desired_steering_angle(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let actual = input.state.car.steering_angle_deg;
    steering_ramp(input, out);
    out.set_label("REL:DES STR.");
    write_angle(&mut out.value, actual);
    if input.state.controls.enabled {
        out.value.push(':').ok();
        write_angle(&mut out.value, input.state.controls.desired_steering_angle_deg);
        out.font_size_delta += STEERING_FONT_BOOST;
    }
}

pub(super) fn steering_error(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let controls = &input.state.controls;
    out.set_label("STR. ERR.");
    if !controls.enabled {
        out.set_value(format::MISSING);
        return;
    }
    let err = controls.steering_error_deg;
    out.ramp_value(ColorRamp::WARMING, STEERING_ERROR_SCALE * F32(err).abs().0);
    write_angle(&mut out.value, err);
    out.font_size_delta += STEERING_FONT_BOOST;
}

pub(super) fn engine_rpm(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let rpm = input.state.car.engine_rpm;
    if rpm == 0 {
        out.set_value("OFF");
    } else {
        write!(out.value, "{rpm}").ok();
    }
    out.set_label("ENG RPM");
}

/// Coolant color once the engine is warm enough to matter.
fn coolant_color(
    temp: f32,
    is_metric: bool,
) -> Option<Rgb888> {
    let bands = coolant_bands(is_metric);
    if temp < bands.cold {
        Some(COOLANT_COLD)
    } else if temp > bands.critical {
        Some(RED)
    } else if temp > bands.hot {
        Some(COOLANT_HOT)
    } else {
        None
    }
}

fn engine_is_cold_and_off(
    input: &MetricInput<'_>,
    temp: f32,
) -> bool {
    input.state.car.engine_rpm == 0 && temp < coolant_bands(input.is_metric).off
}

/// RPM as the value, coolant temperature as the unit.
pub(super) fn engine_rpm_temp(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let temp = units::temperature(input.state.car.coolant_temp_c, input.is_metric);
    write!(out.unit, "{temp:.0}{}", units::temperature_unit(input.is_metric)).ok();
    out.set_label("ENGINE");
    if engine_is_cold_and_off(input, temp) {
        out.set_value("OFF");
        return;
    }
    write!(out.value, "{}", input.state.car.engine_rpm).ok();
    if let Some(color) = coolant_color(temp, input.is_metric) {
        out.unit_color = color;
    }
}

pub(super) fn coolant_temp(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let temp = units::temperature(input.state.car.coolant_temp_c, input.is_metric);
    write!(out.value, "{temp:.0}").ok();
    out.set_unit(units::temperature_unit(input.is_metric));
    out.set_label("COOLANT");
    if engine_is_cold_and_off(input, temp) {
        return;
    }
    if let Some(color) = coolant_color(temp, input.is_metric) {
        out.value_color = color;
    }
}

pub(super) fn follow_level(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let follow = &input.state.follow;
    out.set_label("GAP");
    if follow.dynamic_active {
        write!(out.value, "{:.1}", follow.dynamic_level).ok();
        return;
    }
    out.set_value(match input.state.car.distance_lines {
        1 => "I",
        2 => "I I",
        3 => "I I I",
        _ => "",
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::WHITE;
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
    fn test_steering_angle_precision_and_ramp() {
        let mut state = StateSnapshot::default();
        state.car.steering_angle_deg = 4.2;
        let small = run(steering_angle, &state, true);
        assert_eq!(small.value.as_str(), "4.2°");

        state.car.steering_angle_deg = -70.0;
        let large = run(steering_angle, &state, true);
        assert_eq!(large.value.as_str(), "-70°");
        // Past 60° the ramp saturates at red
        assert_eq!(large.value_color, RED);
    }

    #[test]
    fn test_desired_angle_pair_only_when_engaged() {
        let mut state = StateSnapshot::default();
        state.car.steering_angle_deg = 3.0;
        state.controls.desired_steering_angle_deg = 3.5;

        let idle = run(desired_steering_angle, &state, true);
        assert_eq!(idle.value.as_str(), "3.0°");
        assert_eq!(idle.font_size_delta, 0);

        state.controls.enabled = true;
        let engaged = run(desired_steering_angle, &state, true);
        assert_eq!(engaged.value.as_str(), "3.0°:3.5°");
        assert_eq!(engaged.font_size_delta, STEERING_FONT_BOOST);
    }

    #[test]
    fn test_steering_error_missing_when_disengaged() {
        let mut state = StateSnapshot::default();
        state.controls.steering_error_deg = 2.0;
        assert_eq!(run(steering_error, &state, true).value.as_str(), "-");

        state.controls.enabled = true;
        let out = run(steering_error, &state, true);
        assert_eq!(out.value.as_str(), "2.0°");
        assert_ne!(out.value_color, WHITE);
    }

    #[test]
    fn test_engine_off_when_cold_and_stopped() {
        let mut state = StateSnapshot::default();
        state.car.coolant_temp_c = 20.0;
        let off = run(engine_rpm_temp, &state, true);
        assert_eq!(off.value.as_str(), "OFF");
        assert_eq!(off.unit.as_str(), "20°C");
        assert_eq!(off.unit_color, WHITE);
        assert_eq!(run(engine_rpm, &state, true).value.as_str(), "OFF");
    }

    #[test]
    fn test_engine_unit_colored_by_coolant_band() {
        let mut state = StateSnapshot::default();
        state.car.engine_rpm = 1800;

        state.car.coolant_temp_c = 60.0;
        let cold = run(engine_rpm_temp, &state, true);
        assert_eq!(cold.value.as_str(), "1800");
        assert_eq!(cold.unit_color, COOLANT_COLD);

        state.car.coolant_temp_c = 90.0;
        assert_eq!(run(engine_rpm_temp, &state, true).unit_color, WHITE);

        state.car.coolant_temp_c = 105.0;
        assert_eq!(run(engine_rpm_temp, &state, true).unit_color, COOLANT_HOT);

        state.car.coolant_temp_c = 120.0;
        let hot = run(engine_rpm_temp, &state, false);
        assert_eq!(hot.unit.as_str(), "248°F");
        assert_eq!(hot.unit_color, RED);
    }

    #[test]
    fn test_coolant_colors_skip_cold_parked_engine() {
        let mut state = StateSnapshot::default();
        state.car.coolant_temp_c = 40.0;
        let parked = run(coolant_temp, &state, true);
        assert_eq!(parked.value.as_str(), "40");
        assert_eq!(parked.value_color, WHITE);

        state.car.engine_rpm = 900;
        assert_eq!(run(coolant_temp, &state, true).value_color, COOLANT_COLD);
    }

    #[test]
    fn test_follow_level_bars_and_dynamic() {
        let mut state = StateSnapshot::default();
        state.car.distance_lines = 2;
        assert_eq!(run(follow_level, &state, true).value.as_str(), "I I");

        state.follow.dynamic_active = true;
        state.follow.dynamic_level = 1.76;
        assert_eq!(run(follow_level, &state, true).value.as_str(), "1.8");
    }
}
