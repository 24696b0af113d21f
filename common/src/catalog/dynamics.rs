//! Acceleration, longitudinal forces and powers.
//!
//! Forces are shown in kN. Powers follow the unit system (kW or hp). Drag
//! figures use the three-tier precision rule; the remaining forces and
//! powers use the coarser two-tier rule.

use core::fmt::Write;

use super::{MetricDisplay, MetricInput};
use crate::format;
use crate::units;

fn force(
    out: &mut MetricDisplay,
    label: &str,
    newtons: f32,
) {
    format::coarse(&mut out.value, newtons * 0.001);
    out.set_unit("kN");
    out.set_label(label);
}

fn power(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
    label: &str,
    watts: f32,
) {
    format::coarse(&mut out.value, units::power(watts, input.is_metric));
    out.set_unit(units::power_unit(input.is_metric));
    out.set_label(label);
}

pub(super) fn steering_torque(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    write!(out.value, "{:.1}", input.state.car.steering_torque_eps_nm).ok();
    out.set_unit("Nm");
    out.set_label("EPS TRQ");
}

pub(super) fn acceleration(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    write!(out.value, "{:.1}", input.state.car.a_ego_mps2).ok();
    out.set_unit("m/s²");
    out.set_label("ACCEL");
}

pub(super) fn lateral_acceleration(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    write!(out.value, "{:.1}", input.state.car.lateral_accel_mps2).ok();
    out.set_unit("m/s²");
    out.set_label("LAT ACC");
}

pub(super) fn drag_force(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    format::adaptive(&mut out.value, input.state.powertrain.drag_force_n * 0.001);
    out.set_unit("kN");
    out.set_label("DRAG FRC");
}

pub(super) fn drag_power(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    format::adaptive(&mut out.value, units::power(input.state.powertrain.drag_power_w, input.is_metric));
    out.set_unit(units::power_unit(input.is_metric));
    out.set_label("DRAG POW");
}

/// Share of drive power lost to drag, or the raw drag power when the
/// share is outside 0..=100 %.
pub(super) fn drag_losses(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let pt = &input.state.powertrain;
    out.set_label("DRAG LOSS");
    if pt.drive_power_w == 0.0 {
        out.set_value(format::UNDEFINED);
        return;
    }
    let share = pt.drag_power_w / pt.drive_power_w * 100.0;
    if (0.0..=100.0).contains(&share) {
        write!(out.value, "{share:.0}%").ok();
    } else {
        format::adaptive(&mut out.value, units::power(pt.drag_power_w, input.is_metric));
        out.set_unit(units::power_unit(input.is_metric));
    }
}

pub(super) fn accel_force(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    force(out, "ACCEL FRC", input.state.powertrain.accel_force_n);
}

pub(super) fn ev_force(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    force(out, "EV FRC", input.state.powertrain.ev_force_n);
}

pub(super) fn regen_force(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    force(out, "REGEN FRC", input.state.powertrain.regen_force_n);
}

pub(super) fn brake_force(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    force(out, "BRAKE FRC", input.state.powertrain.brake_force_n);
}

pub(super) fn accel_power(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    power(input, out, "ACCEL POW", input.state.powertrain.accel_power_w);
}

pub(super) fn ev_power(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    power(input, out, "EV POW", input.state.powertrain.ev_power_w);
}

pub(super) fn regen_power(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    power(input, out, "REGEN POW", input.state.powertrain.regen_power_w);
}

pub(super) fn brake_power(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    power(input, out, "BRAKE POW", input.state.powertrain.brake_power_w);
}

pub(super) fn drive_power(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    power(input, out, "DRIVE POW", input.state.powertrain.drive_power_w);
}

pub(super) fn ice_power(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    power(input, out, "ICE POW", input.state.powertrain.ice_power_w);
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_drag_losses_share_and_fallback() {
        let mut state = StateSnapshot::default();
        assert_eq!(run(drag_losses, &state, true).value.as_str(), "--");

        state.powertrain.drive_power_w = 40_000.0;
        state.powertrain.drag_power_w = 10_000.0;
        let share = run(drag_losses, &state, true);
        assert_eq!(share.value.as_str(), "25%");
        assert_eq!(share.unit.as_str(), "");

        // Coasting: drive power negative, share meaningless
        state.powertrain.drive_power_w = -5_000.0;
        let raw = run(drag_losses, &state, true);
        assert_eq!(raw.value.as_str(), "10.0");
        assert_eq!(raw.unit.as_str(), "kW");
    }

    #[test]
    fn test_power_units_follow_unit_system() {
        let mut state = StateSnapshot::default();
        state.powertrain.ice_power_w = 50_000.0;
        let kw = run(ice_power, &state, true);
        assert_eq!(kw.value.as_str(), "50");
        assert_eq!(kw.unit.as_str(), "kW");

        let hp = run(ice_power, &state, false);
        assert_eq!(hp.value.as_str(), "67");
        assert_eq!(hp.unit.as_str(), "hp");
    }

    #[test]
    fn test_forces_in_kilonewtons() {
        let mut state = StateSnapshot::default();
        state.powertrain.brake_force_n = -3_210.0;
        let out = run(brake_force, &state, true);
        assert_eq!(out.value.as_str(), "-3.2");
        assert_eq!(out.unit.as_str(), "kN");
    }
}
