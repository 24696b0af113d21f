//! Vision curvature limits, lane geometry, traffic counts and the lead vehicle.

use core::fmt::Write;

use super::{MetricDisplay, MetricInput};
use crate::colors::ColorRamp;
use crate::format;
use crate::snapshot::LanePosition;
use crate::thresholds::{
    FOLLOW_TIME_MIN_SPEED_MPS, FOLLOW_TIME_SCALE, LEAD_CLOSING_SCALE, LEAD_DISTANCE_SCALE_FT,
    LEAD_DISTANCE_SCALE_M, LEAD_TTC_CAP_S, LEAD_TTC_SCALE,
};
use crate::units;

// =============================================================================
// Vision
// =============================================================================

pub(super) fn vision_lat_accel(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    write!(out.value, "{:.1}", input.state.vision.current_lat_accel_mps2).ok();
    out.set_unit("m/s²");
    out.set_label("V:LAT ACC");
}

pub(super) fn vision_max_curve_speed(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let v = units::speed(input.state.vision.max_speed_for_curvature_mps, input.is_metric);
    write!(out.value, "{v:.1}").ok();
    out.set_unit(units::speed_unit(input.is_metric));
    out.set_label("V:MX CUR V");
}

pub(super) fn vision_max_pred_lat_accel(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    write!(out.value, "{:.1}", input.state.vision.max_predicted_lat_accel_mps2).ok();
    out.set_unit("m/s²");
    out.set_label("V:MX PLA");
}

pub(super) fn vision_final_speed(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    write!(out.value, "{:.2}", input.state.vision.final_speed_mps).ok();
    out.set_label("V: VF");
}

// =============================================================================
// Lanes
// =============================================================================

pub(super) fn lane_position(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    out.set_value(match input.state.lane.position {
        LanePosition::Left => "left",
        LanePosition::Center => "center",
        LanePosition::Right => "right",
    });
    out.set_label("LANE POS");
}

fn lane_length(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
    label: &str,
    meters: f32,
) {
    write!(out.value, "{:.1}", units::length(meters, input.is_metric)).ok();
    out.set_unit(units::length_unit(input.is_metric));
    out.set_label(label);
}

pub(super) fn lane_offset(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    lane_length(input, out, "LN OFFSET", input.state.lane.offset_m);
}

pub(super) fn lane_width(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    lane_length(input, out, "LANE W", input.state.lane.width_m);
}

pub(super) fn lane_center(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    lane_length(input, out, "LANE CENTER", input.state.lane.center_m);
}

// =============================================================================
// Traffic
// =============================================================================

fn car_count(
    out: &mut MetricDisplay,
    label: &str,
    count: u32,
) {
    write!(out.value, "{count}").ok();
    out.set_unit("cars");
    out.set_label(label);
}

pub(super) fn traffic_total(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    car_count(out, "TOTAL", input.state.traffic.total());
}

pub(super) fn traffic_oncoming(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    car_count(out, "ONCOMING", u32::from(input.state.traffic.oncoming));
}

pub(super) fn traffic_ongoing(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    car_count(out, "ONGOING", u32::from(input.state.traffic.ongoing));
}

pub(super) fn traffic_stopped(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    car_count(out, "STOPPED", u32::from(input.state.traffic.stopped));
}

pub(super) fn traffic_adjacent(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let traffic = &input.state.traffic;
    write!(out.value, "{}:{}", traffic.adjacent_left, traffic.adjacent_right).ok();
    out.set_unit("cars");
    out.set_label("ADJ ONGOING");
}

pub(super) fn adjacent_min_separation(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let traffic = &input.state.traffic;
    write!(out.value, "{:.1}:{:.1}", traffic.min_separation_left_s, traffic.min_separation_right_s).ok();
    out.set_unit("s");
    out.set_label("MIN ADJ SEP");
}

// =============================================================================
// Lead Vehicle
// =============================================================================

/// Time to collision; only defined while closing on a lead.
pub(super) fn lead_ttc(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let lead = &input.state.lead;
    out.set_unit("s");
    out.set_label("TTC");
    if !lead.present || lead.relative_speed_mps >= 0.0 {
        out.set_value(format::MISSING);
        return;
    }
    let ttc = -lead.distance_m / lead.relative_speed_mps;
    out.ramp_value(ColorRamp::COOLING, LEAD_TTC_SCALE * ttc);
    if ttc > LEAD_TTC_CAP_S {
        out.set_value("99+");
    } else {
        format::coarse(&mut out.value, ttc);
    }
}

/// Cooling ramp on the lead distance, in the display unit's own scale.
fn lead_distance_color(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let d = input.state.lead.distance_m;
    let p = if input.is_metric {
        LEAD_DISTANCE_SCALE_M * d
    } else {
        LEAD_DISTANCE_SCALE_FT * units::length(d, false)
    };
    out.ramp_value(ColorRamp::COOLING, p);
}

pub(super) fn lead_distance(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let lead = &input.state.lead;
    out.set_unit(units::length_unit(input.is_metric));
    out.set_label("REL DIST");
    if !lead.present {
        out.set_value(format::MISSING);
        return;
    }
    lead_distance_color(input, out);
    write!(out.value, "{:.0}", units::length(lead.distance_m, input.is_metric)).ok();
}

pub(super) fn lead_desired_distance(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let state = input.state;
    out.set_unit(units::length_unit(input.is_metric));
    out.set_label("REL:DES DIST");
    if !state.lead.present {
        out.set_value(format::MISSING);
        return;
    }
    let desired = state.follow.desired_time_s * state.car.v_ego_mps + state.follow.stopping_distance_m;
    lead_distance_color(input, out);
    let actual = units::length(state.lead.distance_m, input.is_metric) as i32;
    let desired = units::length(desired, input.is_metric) as i32;
    write!(out.value, "{actual}:{desired}").ok();
}

/// Time gap to the lead, undefined when nearly stopped.
fn follow_time(input: &MetricInput<'_>) -> Option<f32> {
    let state = input.state;
    (state.lead.present && state.car.v_ego_mps > FOLLOW_TIME_MIN_SPEED_MPS)
        .then(|| state.lead.distance_m / state.car.v_ego_mps)
}

pub(super) fn lead_follow_time(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    out.set_unit("s");
    out.set_label("REL DIST");
    match follow_time(input) {
        Some(t) => {
            out.ramp_value(ColorRamp::COOLING, FOLLOW_TIME_SCALE * t);
            write!(out.value, "{t:.1}").ok();
        }
        None => out.set_value(format::MISSING),
    }
}

pub(super) fn lead_desired_follow_time(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let state = input.state;
    out.set_unit("s");
    out.set_label("REL:DES DIST");
    match follow_time(input) {
        Some(t) => {
            let desired = state.follow.desired_time_s + state.follow.stopping_distance_m / state.car.v_ego_mps;
            out.ramp_value(ColorRamp::COOLING, FOLLOW_TIME_SCALE * t);
            write!(out.value, "{t:.1}:{desired:.1}").ok();
        }
        None => out.set_value(format::MISSING),
    }
}

pub(super) fn lead_costs(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let follow = &input.state.follow;
    out.set_label("D:A COST");
    if follow_time(input).is_some() {
        write!(out.value, "{:.1}:{:.1}", follow.distance_cost, follow.accel_cost).ok();
    } else {
        out.set_value(format::MISSING);
    }
}

pub(super) fn lead_relative_speed(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let lead = &input.state.lead;
    out.set_unit(units::speed_unit(input.is_metric));
    out.set_label("REL SPEED");
    if !lead.present {
        out.set_value(format::MISSING);
        return;
    }
    // Closing (negative) speeds warm toward red
    out.ramp_value(ColorRamp::WARMING, LEAD_CLOSING_SCALE * lead.relative_speed_mps);
    write!(out.value, "{:.1}", units::speed(lead.relative_speed_mps, input.is_metric)).ok();
}

pub(super) fn lead_speed(
    input: &MetricInput<'_>,
    out: &mut MetricDisplay,
) {
    let lead = &input.state.lead;
    out.set_unit(units::speed_unit(input.is_metric));
    out.set_label("LEAD SPD");
    if !lead.present {
        out.set_value(format::MISSING);
        return;
    }
    let v = units::speed(lead.speed_mps, input.is_metric);
    if v < 100.0 {
        write!(out.value, "{v:.1}").ok();
    } else {
        write!(out.value, "{v:.0}").ok();
    }
}
