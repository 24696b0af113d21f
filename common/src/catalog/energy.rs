//! High-voltage battery, EV efficiency and consumption, trip distance.
//!
//! Consumption arrives as Wh/km and efficiency as km/kWh; both convert to
//! the per-mile forms when imperial units are selected. Pack current and
//! power are negated so that discharge reads positive.

use core::fmt::Write;

use micromath::F32;

use super::{MetricDisplay, MetricInput};
use crate::colors::ColorRamp;
use crate::format;
use crate::thresholds::{HVB_DEVIATION_SCALE, HVB_NOMINAL_V};
use crate::units;

/// Below this speed instantaneous consumption is meaningless.
const CONSUMPTION_MIN_SPEED_MPS: f32 = 0.1;

fn hvb_ramp(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let deviation = F32(input.state.ev.hvb_voltage_v - HVB_NOMINAL_V).abs().0;
    out.ramp_value(ColorRamp::WARMING, HVB_DEVIATION_SCALE * deviation);
}

/// Pack power in kW, positive while discharging.
fn discharge_kw(input: &MetricInput<'_>) -> f32 { -input.state.ev.hvb_power_w() * 0.001 }

pub(super) fn hvb_voltage(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    write!(out.value, "{:.0}", input.state.ev.hvb_voltage_v).ok();
    out.set_unit("V");
    out.set_label("HVB VOLT");
    hvb_ramp(input, out);
}

pub(super) fn hvb_current(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let amps = -input.state.ev.hvb_current_a;
    if F32(amps).abs().0 >= 100.0 {
        write!(out.value, "{amps:.0}").ok();
    } else {
        write!(out.value, "{amps:.1}").ok();
    }
    out.set_unit("A");
    out.set_label("HVB CUR");
    hvb_ramp(input, out);
}

pub(super) fn hvb_power(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    format::adaptive(&mut out.value, discharge_kw(input));
    out.set_unit("kW");
    out.set_label("HVB POW");
}

/// Pack power as the value, pack voltage as the unit.
pub(super) fn hvb_power_voltage(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    format::coarse(&mut out.value, discharge_kw(input));
    write!(out.unit, "{:.0}V", input.state.ev.hvb_voltage_v).ok();
    out.set_label("HVB kW");
    hvb_ramp(input, out);
}

// =============================================================================
// Efficiency and Consumption
// =============================================================================

/// Efficiency in display units from a Wh/km consumption, `None` when zero.
fn efficiency_from(
    wh_per_km: f32,
    is_metric: bool,
) -> Option<f32> {
    (wh_per_km != 0.0).then(|| units::efficiency(1000.0 / wh_per_km, is_metric))
}

fn efficiency_ceiling(input: &MetricInput<'_>) -> f32 {
    units::efficiency(input.state.ev.efficiency_max_km_kwh, input.is_metric)
}

fn write_efficiency(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
    wh_per_km: f32,
) {
    match efficiency_from(wh_per_km, input.is_metric) {
        Some(eff) => format::clamped(&mut out.value, eff, efficiency_ceiling(input)),
        None => out.set_value(format::UNDEFINED),
    }
    out.set_unit(units::efficiency_unit(input.is_metric));
}

fn moving(input: &MetricInput<'_>) -> bool { input.state.car.v_ego_mps > CONSUMPTION_MIN_SPEED_MPS }

fn write_consumption_now(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    if moving(input) {
        let wh = units::consumption(input.state.ev.consumption_now_wh_km, input.is_metric);
        format::si_scaled(&mut out.value, wh);
    } else {
        out.set_value(format::UNDEFINED);
    }
    out.set_unit(units::consumption_unit(input.is_metric));
}

/// Trip distance as a unit string: `"12.3km"`, `"140mi"`.
fn write_trip_distance_unit(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let dist = units::distance(input.state.ev.trip_distance_m, input.is_metric);
    let unit = units::distance_unit(input.is_metric);
    if dist >= 100.0 {
        write!(out.unit, "{dist:.0}{unit}").ok();
    } else {
        write!(out.unit, "{dist:.1}{unit}").ok();
    }
}

/// Efficiency while drawing power, consumption while regenerating or idle.
pub(super) fn ev_both_now(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    out.set_label("EV NOW");
    if input.state.ev.consumption_now_wh_km <= 0.0 {
        write_consumption_now(input, out);
    } else {
        write_efficiency(input, out, input.state.ev.consumption_now_wh_km);
    }
}

pub(super) fn ev_efficiency_now(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    out.set_label("EV EFF NOW");
    write_efficiency(input, out, input.state.ev.consumption_now_wh_km);
}

pub(super) fn ev_efficiency_recent(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    out.set_label(if input.is_metric { "EV EFF 8km" } else { "EV EFF 5mi" });
    write_efficiency(input, out, input.state.ev.consumption_recent_wh_km);
}

pub(super) fn ev_efficiency_trip(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    out.set_label(if input.is_metric { "EV EFF km/kWh" } else { "EV EFF mi/kWh" });
    let eff = units::efficiency(input.state.ev.trip_efficiency_km_kwh, input.is_metric);
    format::clamped(&mut out.value, eff, efficiency_ceiling(input));
    write_trip_distance_unit(input, out);
}

pub(super) fn ev_consumption_now(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    out.set_label("EV CON NOW");
    write_consumption_now(input, out);
}

pub(super) fn ev_consumption_recent(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    out.set_label(if input.is_metric { "EV CON 8km" } else { "EV CON 5mi" });
    let wh = units::consumption(input.state.ev.consumption_recent_wh_km, input.is_metric);
    format::si_scaled(&mut out.value, wh);
    out.set_unit(units::consumption_unit(input.is_metric));
}

pub(super) fn ev_consumption_trip(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    out.set_label(if input.is_metric { "EV CON Wh/km" } else { "EV CON Wh/mi" });
    write_trip_distance_unit(input, out);
    let eff = input.state.ev.trip_efficiency_km_kwh;
    if eff == 0.0 {
        out.set_value(format::UNDEFINED);
        return;
    }
    let wh = units::consumption(1000.0 / eff, input.is_metric);
    if F32(wh).abs().0 >= 900.0 {
        format::adaptive(&mut out.value, wh * 0.001);
        out.value.push('k').ok();
    } else {
        format::adaptive(&mut out.value, wh);
    }
}

pub(super) fn ev_drivetrain_efficiency(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    write!(out.value, "{:.2}", input.state.ev.drivetrain_efficiency).ok();
    out.set_label("EV DRV EFF");
}

pub(super) fn trip_distance(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let dist = units::distance(input.state.ev.trip_distance_m, input.is_metric);
    format::adaptive(&mut out.value, dist);
    out.set_unit(units::distance_unit(input.is_metric));
    out.set_label("TRIP DIST.");
}

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::RgbColor;

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

    fn ev_state() -> StateSnapshot {
        let mut state = StateSnapshot::default();
        state.car.v_ego_mps = 20.0;
        state.ev.efficiency_max_km_kwh = 99.0;
        state
    }

    #[test]
    fn test_hvb_voltage_ramp_from_nominal() {
        let mut state = ev_state();
        state.ev.hvb_voltage_v = 360.0;
        let nominal = run(hvb_voltage, &state, true);
        assert_eq!(nominal.value.as_str(), "360");
        assert_eq!(nominal.value_color, WHITE);

        state.ev.hvb_voltage_v = 300.0;
        let sagging = run(hvb_voltage, &state, true);
        assert_eq!(sagging.value_color.b(), 0);
    }

    #[test]
    fn test_hvb_discharge_reads_positive() {
        let mut state = ev_state();
        state.ev.hvb_voltage_v = 350.0;
        state.ev.hvb_current_a = -120.0;

        assert_eq!(run(hvb_current, &state, true).value.as_str(), "120");
        // 350 V × 120 A = 42 kW
        assert_eq!(run(hvb_power, &state, true).value.as_str(), "42.0");

        let combined = run(hvb_power_voltage, &state, true);
        assert_eq!(combined.value.as_str(), "42");
        assert_eq!(combined.unit.as_str(), "350V");
    }

    #[test]
    fn test_efficiency_now_undefined_at_zero_consumption() {
        let state = ev_state();
        let out = run(ev_efficiency_now, &state, true);
        assert_eq!(out.value.as_str(), "--");
        assert_eq!(out.unit.as_str(), "km/kWh");
    }

    #[test]
    fn test_efficiency_now_inverts_consumption() {
        let mut state = ev_state();
        state.ev.consumption_now_wh_km = 160.0;
        // 1000 / 160 = 6.25 km/kWh
        assert_eq!(run(ev_efficiency_now, &state, true).value.as_str(), "6.25");
    }

    #[test]
    fn test_efficiency_clamps_at_ceiling() {
        let mut state = ev_state();
        state.ev.consumption_now_wh_km = 5.0;
        assert_eq!(run(ev_efficiency_now, &state, true).value.as_str(), "99+");
        state.ev.consumption_now_wh_km = -5.0;
        assert_eq!(run(ev_efficiency_now, &state, true).value.as_str(), "99-");
    }

    #[test]
    fn test_both_now_switches_on_regen() {
        let mut state = ev_state();
        state.ev.consumption_now_wh_km = 200.0;
        let drawing = run(ev_both_now, &state, true);
        assert_eq!(drawing.value.as_str(), "5.00");
        assert_eq!(drawing.unit.as_str(), "km/kWh");

        state.ev.consumption_now_wh_km = -1500.0;
        let regen = run(ev_both_now, &state, true);
        assert_eq!(regen.value.as_str(), "-1.5k");
        assert_eq!(regen.unit.as_str(), "Wh/km");

        state.car.v_ego_mps = 0.0;
        assert_eq!(run(ev_both_now, &state, true).value.as_str(), "--");
    }

    #[test]
    fn test_trip_consumption_and_distance_unit() {
        let mut state = ev_state();
        state.ev.trip_efficiency_km_kwh = 8.0;
        state.ev.trip_distance_m = 42_300.0;

        let out = run(ev_consumption_trip, &state, true);
        assert_eq!(out.value.as_str(), "125");
        assert_eq!(out.unit.as_str(), "42.3km");

        state.ev.trip_efficiency_km_kwh = 0.0;
        assert_eq!(run(ev_consumption_trip, &state, true).value.as_str(), "--");
    }

    #[test]
    fn test_trip_distance_units() {
        let mut state = ev_state();
        state.ev.trip_distance_m = 160_900.0;
        let mi = run(trip_distance, &state, false);
        assert_eq!(mi.value.as_str(), "100");
        assert_eq!(mi.unit.as_str(), "mi");

        let km = run(trip_distance, &state, true);
        assert_eq!(km.value.as_str(), "161");
        assert_eq!(km.unit.as_str(), "km");
    }
}
