//! Compute platform health and driver monitoring timers.

use core::fmt::Write;

use super::{MetricDisplay, MetricInput};
use crate::colors::{ColorRamp, TIMER_WARNING, thermal_color};
use crate::format;
use crate::thresholds::{FREE_SPACE_SCALE, MEMORY_DANGER_SCALE, TIMER_WARNING_S};
use crate::units;

fn temperature(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
    label: &str,
    celsius: f32,
) {
    let t = units::temperature(celsius, input.is_metric);
    write!(out.value, "{t:.0}").ok();
    out.set_unit(units::temperature_unit(input.is_metric));
    out.set_label(label);
    out.value_color = thermal_color(input.state.device.thermal_status);
}

pub(super) fn cpu_temp_and_percent(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let device = &input.state.device;
    let t = units::temperature(device.cpu_temp_c, input.is_metric);
    write!(out.value, "{t:.0}{}", units::temperature_unit(input.is_metric)).ok();
    write!(out.unit, "{}%", device.cpu_usage_mean()).ok();
    out.set_label("CPU");
    out.value_color = thermal_color(device.thermal_status);
}

pub(super) fn cpu_temp(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    temperature(input, out, "CPU TEMP", input.state.device.cpu_temp_c);
}

pub(super) fn memory_temp(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    temperature(input, out, "MEM TEMP", input.state.device.memory_temp_c);
}

pub(super) fn ambient_temp(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    temperature(input, out, "AMB TEMP", input.state.device.ambient_temp_c);
}

pub(super) fn cpu_percent(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let device = &input.state.device;
    write!(out.value, "{}%", device.cpu_usage_mean()).ok();
    out.set_label("CPU PERC");
    out.value_color = thermal_color(device.thermal_status);
}

pub(super) fn fan_speed_percent(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let device = &input.state.device;
    // Commands above 100 are RPM targets, not duty cycles
    if device.fan_speed_desired > 100 {
        write!(out.value, "{}", device.fan_speed_rpm).ok();
        out.set_unit("RPM");
    } else {
        write!(out.value, "{}%", device.fan_speed_desired).ok();
    }
    out.set_label("FAN");
    out.value_color = thermal_color(device.thermal_status);
}

pub(super) fn fan_speed_rpm(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let device = &input.state.device;
    write!(out.value, "{}", device.fan_speed_rpm).ok();
    out.set_unit("RPM");
    out.set_label("FAN");
    out.value_color = thermal_color(device.thermal_status);
}

pub(super) fn memory_usage(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let used = input.state.device.memory_usage_percent;
    write!(out.value, "{used:.0}%").ok();
    out.set_label("MEM USED");
    out.ramp_value(ColorRamp::WARMING, MEMORY_DANGER_SCALE * used);
}

pub(super) fn free_space(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let free = input.state.device.free_space_percent;
    write!(out.value, "{free:.0}%").ok();
    out.set_label("SSD FREE");
    out.ramp_value(ColorRamp::COOLING, FREE_SPACE_SCALE * free);
}

pub(super) fn battery(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let device = &input.state.device;
    write!(out.value, "{}", device.battery_percent).ok();
    let amps = device.battery_current_ua as f32 * 1e-6;
    write!(out.unit, "{amps:.1} A").ok();
    out.set_label("DEVICE BATT.");
}

fn timer(
    out: &mut MetricDisplay,
    label: &str,
    seconds: u32,
) {
    format::clock(&mut out.value, seconds);
    if seconds < TIMER_WARNING_S {
        out.value_color = TIMER_WARNING;
    }
    out.set_label(label);
}

pub(super) fn interaction_timer(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    timer(out, "INTERACT", input.state.controls.interaction_timer_s);
}

pub(super) fn intervention_timer(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    timer(out, "INTERVENE", input.state.controls.intervention_timer_s);
}

pub(super) fn distraction_timer(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    timer(out, "DISTRACT", input.state.controls.distraction_timer_s);
}

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::RgbColor;

    use super::*;
    use crate::colors::{THERMAL_WARM, WHITE};
    use crate::snapshot::{StateSnapshot, ThermalStatus};

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
    fn test_cpu_temp_follows_unit_system_and_thermal_band() {
        let mut state = StateSnapshot::default();
        state.device.cpu_temp_c = 50.0;
        state.device.thermal_status = ThermalStatus::Yellow;

        let c = run(cpu_temp, &state, true);
        assert_eq!(c.value.as_str(), "50");
        assert_eq!(c.unit.as_str(), "°C");
        assert_eq!(c.value_color, THERMAL_WARM);

        let f = run(cpu_temp, &state, false);
        assert_eq!(f.value.as_str(), "122");
        assert_eq!(f.unit.as_str(), "°F");
    }

    #[test]
    fn test_fan_switches_to_rpm_above_100() {
        let mut state = StateSnapshot::default();
        state.device.fan_speed_desired = 45;
        assert_eq!(run(fan_speed_percent, &state, true).value.as_str(), "45%");

        state.device.fan_speed_desired = 2400;
        state.device.fan_speed_rpm = 2380;
        let out = run(fan_speed_percent, &state, true);
        assert_eq!(out.value.as_str(), "2380");
        assert_eq!(out.unit.as_str(), "RPM");
    }

    #[test]
    fn test_timer_warning_color_below_five_seconds() {
        let mut state = StateSnapshot::default();
        state.controls.interaction_timer_s = 4;
        let out = run(interaction_timer, &state, true);
        assert_eq!(out.value.as_str(), "0:04");
        assert_eq!(out.value_color, TIMER_WARNING);

        state.controls.interaction_timer_s = 3725;
        let out = run(interaction_timer, &state, true);
        assert_eq!(out.value.as_str(), "1:02:05");
        assert_eq!(out.value_color, WHITE);
    }

    #[test]
    fn test_free_space_cools_to_white() {
        let mut state = StateSnapshot::default();
        state.device.free_space_percent = 40.0;
        assert_eq!(run(free_space, &state, true).value_color, WHITE);

        state.device.free_space_percent = 0.0;
        let low = run(free_space, &state, true);
        assert_eq!(low.value.as_str(), "0%");
        assert_eq!(low.value_color.b(), 0);
    }

    #[test]
    fn test_battery_current_in_amps() {
        let mut state = StateSnapshot::default();
        state.device.battery_percent = 87;
        state.device.battery_current_ua = -1_340_000;
        let out = run(battery, &state, true);
        assert_eq!(out.value.as_str(), "87");
        assert_eq!(out.unit.as_str(), "-1.3 A");
    }
}
