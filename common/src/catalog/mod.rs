//! Metric catalog: maps a metric id to its value, unit, label and colors.
//!
//! Every metric is one [`MetricEntry`] in [`REGISTRY`]: an id, the key used
//! in configuration files and a compute function. Adding a metric means
//! adding a variant to [`MetricId`], a compute function in one of the
//! submodules and one registry line.
//!
//! # Purity
//!
//! Compute functions are tagged by what they may touch:
//!
//! - [`Compute::Pure`] reads the snapshot and writes the display. Nothing else.
//! - [`Compute::Estimator`] additionally updates the rolling grade estimator.
//!   Only the GPS grade metric is registered this way.
//!
//! # Persisted Codes
//!
//! Slot assignments are stored as [`MetricCode`] values, the `u16`
//! discriminant of [`MetricId`]. Codes that do not name a metric resolve to
//! the invalid sentinel (value `"42"`, label `"INVALID"`) instead of failing.
//!
//! # Submodules
//!
//! - [`device`]: compute platform health and driver monitoring timers
//! - [`position`]: GPS, elevation, bearing, grade and roll
//! - [`dynamics`]: acceleration, forces and powers
//! - [`surroundings`]: vision limits, lanes, traffic and the lead vehicle
//! - [`vehicle`]: steering, engine and follow distance setting
//! - [`energy`]: HV battery, EV efficiency and trip distance

mod device;
mod dynamics;
mod energy;
mod position;
mod surroundings;
mod vehicle;

use embedded_graphics::pixelcolor::Rgb888;
use heapless::String;

use crate::colors::{ColorRamp, WHITE};
use crate::config::GRADE_SAMPLE_COUNT;
use crate::grade::RollingGradeEstimator;
use crate::snapshot::StateSnapshot;

/// Capacity of a rendered value.
pub const VALUE_LEN: usize = 24;

/// Capacity of a rendered unit.
pub const UNIT_LEN: usize = 16;

/// Capacity of a rendered label.
pub const LABEL_LEN: usize = 16;

/// The estimator type owned by a panel.
pub type GradeEstimator = RollingGradeEstimator<GRADE_SAMPLE_COUNT>;

// =============================================================================
// Display Output
// =============================================================================

/// Everything needed to draw one slot's text.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDisplay {
    pub value: String<VALUE_LEN>,
    pub unit: String<UNIT_LEN>,
    pub label: String<LABEL_LEN>,
    pub value_color: Rgb888,
    pub unit_color: Rgb888,
    pub label_color: Rgb888,
    /// Adjustment to the value font size requested by the metric itself.
    pub font_size_delta: i32,
}

impl MetricDisplay {
    /// Blank display in the default text color.
    pub const fn new() -> Self {
        Self {
            value: String::new(),
            unit: String::new(),
            label: String::new(),
            value_color: WHITE,
            unit_color: WHITE,
            label_color: WHITE,
            font_size_delta: 0,
        }
    }

    /// Sentinel shown for codes that do not name a metric.
    pub fn invalid() -> Self {
        let mut display = Self::new();
        display.set_value("42");
        display.set_label("INVALID");
        display
    }

    pub fn set_value(
        &mut self,
        text: &str,
    ) {
        self.value.clear();
        self.value.push_str(text).ok();
    }

    pub fn set_unit(
        &mut self,
        text: &str,
    ) {
        self.unit.clear();
        self.unit.push_str(text).ok();
    }

    pub fn set_label(
        &mut self,
        text: &str,
    ) {
        self.label.clear();
        self.label.push_str(text).ok();
    }

    /// Color the value from a danger ramp.
    pub fn ramp_value(
        &mut self,
        ramp: ColorRamp,
        p: f32,
    ) {
        self.value_color = ramp.at(p);
    }
}

impl Default for MetricDisplay {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Registry Types
// =============================================================================

/// Inputs shared by every compute function.
#[derive(Debug, Clone, Copy)]
pub struct MetricInput<'a> {
    pub state: &'a StateSnapshot,
    pub is_metric: bool,
}

pub type PureFn = fn(&MetricInput<'_>, &mut MetricDisplay);
pub type EstimatorFn = fn(&MetricInput<'_>, &mut GradeEstimator, &mut MetricDisplay);

/// How a metric is computed.
#[derive(Clone, Copy)]
pub enum Compute {
    Pure(PureFn),
    Estimator(EstimatorFn),
}

/// One catalog row.
#[derive(Clone, Copy)]
pub struct MetricEntry {
    pub id: MetricId,
    /// Stable configuration key.
    pub key: &'static str,
    pub compute: Compute,
}

impl MetricEntry {
    const fn pure(
        id: MetricId,
        key: &'static str,
        f: PureFn,
    ) -> Self {
        Self { id, key, compute: Compute::Pure(f) }
    }

    const fn estimator(
        id: MetricId,
        key: &'static str,
        f: EstimatorFn,
    ) -> Self {
        Self { id, key, compute: Compute::Estimator(f) }
    }

    /// Whether evaluating this metric mutates the grade estimator.
    pub const fn uses_estimator(&self) -> bool { matches!(self.compute, Compute::Estimator(_)) }
}

impl core::fmt::Debug for MetricEntry {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("MetricEntry")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("uses_estimator", &self.uses_estimator())
            .finish()
    }
}

// =============================================================================
// Metric Ids
// =============================================================================

/// Every metric the panel can show. The discriminant is the persisted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum MetricId {
    CpuTempAndPercent = 0,
    CpuTemp,
    MemoryTemp,
    AmbientTemp,
    CpuPercent,
    FanSpeedPercent,
    FanSpeedRpm,
    MemoryUsage,
    FreeSpace,
    DeviceBattery,
    InteractionTimer,
    InterventionTimer,
    DistractionTimer,
    GpsAccuracy,
    Altitude,
    Bearing,
    GradeGps,
    GradeDevice,
    DeviceRoll,
    RoadRoll,
    SteeringTorqueEps,
    Acceleration,
    LateralAcceleration,
    DragForce,
    DragPower,
    DragLosses,
    AccelForce,
    EvForce,
    RegenForce,
    BrakeForce,
    AccelPower,
    EvPower,
    RegenPower,
    BrakePower,
    DrivePower,
    IcePower,
    VisionLatAccel,
    VisionMaxCurveSpeed,
    VisionMaxPredLatAccel,
    VisionFinalSpeed,
    LanePosition,
    LaneOffset,
    LaneWidth,
    LaneCenter,
    TrafficTotal,
    TrafficOncoming,
    TrafficOngoing,
    TrafficStopped,
    TrafficAdjacent,
    AdjacentMinSeparation,
    LeadTtc,
    LeadDistance,
    LeadDesiredDistance,
    LeadFollowTime,
    LeadDesiredFollowTime,
    LeadCosts,
    LeadRelativeSpeed,
    LeadSpeed,
    SteeringAngle,
    DesiredSteeringAngle,
    SteeringError,
    EngineRpm,
    EngineRpmTemp,
    CoolantTemp,
    FollowLevel,
    HvbVoltage,
    HvbCurrent,
    HvbPower,
    HvbPowerVoltage,
    EvBothNow,
    EvEfficiencyNow,
    EvEfficiencyRecent,
    EvEfficiencyTrip,
    EvConsumptionNow,
    EvConsumptionRecent,
    EvConsumptionTrip,
    EvDrivetrainEfficiency,
    TripDistance,
}

impl MetricId {
    /// Number of metrics in the catalog.
    pub const COUNT: usize = MetricId::TripDistance as usize + 1;

    pub const fn code(self) -> MetricCode { MetricCode(self as u16) }

    pub fn entry(self) -> &'static MetricEntry { &REGISTRY[self as usize] }

    pub fn key(self) -> &'static str { self.entry().key }

    /// Case-insensitive lookup by configuration key.
    pub fn from_key(key: &str) -> Option<Self> {
        REGISTRY.iter().find(|e| e.key.eq_ignore_ascii_case(key)).map(|e| e.id)
    }

    /// All metrics in code order.
    pub fn all() -> impl Iterator<Item = MetricId> { REGISTRY.iter().map(|e| e.id) }
}

/// Persisted slot assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetricCode(pub u16);

impl MetricCode {
    /// A code no metric will ever use.
    pub const INVALID: Self = Self(u16::MAX);

    pub fn metric(self) -> Option<MetricId> { REGISTRY.get(usize::from(self.0)).map(|e| e.id) }

    /// Parse a configuration token: a metric key or a numeric code.
    ///
    /// Unknown keys become [`MetricCode::INVALID`]; numeric codes are kept
    /// as-is even when they do not name a metric.
    pub fn from_key(token: &str) -> Self {
        let token = token.trim();
        if let Some(id) = MetricId::from_key(token) {
            return id.code();
        }
        if let Ok(code) = token.parse::<u16>() {
            return Self(code);
        }
        log::warn!("unknown metric key `{}`, slot will show the invalid sentinel", token);
        Self::INVALID
    }

    /// The next metric in catalog order, wrapping around.
    pub fn next(self) -> Self {
        match self.metric() {
            Some(id) => Self(((id as usize + 1) % MetricId::COUNT) as u16),
            None => Self(0),
        }
    }
}

impl From<MetricId> for MetricCode {
    fn from(id: MetricId) -> Self { id.code() }
}

// =============================================================================
// Registry
// =============================================================================

/// The catalog, indexed by metric code.
pub static REGISTRY: [MetricEntry; MetricId::COUNT] = [
    MetricEntry::pure(MetricId::CpuTempAndPercent, "CPU_TEMP_AND_PERCENT", device::cpu_temp_and_percent),
    MetricEntry::pure(MetricId::CpuTemp, "CPU_TEMP", device::cpu_temp),
    MetricEntry::pure(MetricId::MemoryTemp, "MEMORY_TEMP", device::memory_temp),
    MetricEntry::pure(MetricId::AmbientTemp, "AMBIENT_TEMP", device::ambient_temp),
    MetricEntry::pure(MetricId::CpuPercent, "CPU_PERCENT", device::cpu_percent),
    MetricEntry::pure(MetricId::FanSpeedPercent, "FANSPEED_PERCENT", device::fan_speed_percent),
    MetricEntry::pure(MetricId::FanSpeedRpm, "FANSPEED_RPM", device::fan_speed_rpm),
    MetricEntry::pure(MetricId::MemoryUsage, "MEMORY_USAGE_PERCENT", device::memory_usage),
    MetricEntry::pure(MetricId::FreeSpace, "FREESPACE_STORAGE", device::free_space),
    MetricEntry::pure(MetricId::DeviceBattery, "DEVICE_BATTERY", device::battery),
    MetricEntry::pure(MetricId::InteractionTimer, "INTERACTION_TIMER", device::interaction_timer),
    MetricEntry::pure(MetricId::InterventionTimer, "INTERVENTION_TIMER", device::intervention_timer),
    MetricEntry::pure(MetricId::DistractionTimer, "DISTRACTION_TIMER", device::distraction_timer),
    MetricEntry::pure(MetricId::GpsAccuracy, "GPS_ACCURACY", position::gps_accuracy),
    MetricEntry::pure(MetricId::Altitude, "ALTITUDE", position::altitude),
    MetricEntry::pure(MetricId::Bearing, "BEARING", position::bearing),
    MetricEntry::estimator(MetricId::GradeGps, "GRADE_GPS", position::grade_gps),
    MetricEntry::pure(MetricId::GradeDevice, "GRADE_DEVICE", position::grade_device),
    MetricEntry::pure(MetricId::DeviceRoll, "ROLL_DEVICE", position::device_roll),
    MetricEntry::pure(MetricId::RoadRoll, "ROLL_ROAD", position::road_roll),
    MetricEntry::pure(MetricId::SteeringTorqueEps, "STEERING_TORQUE_EPS", dynamics::steering_torque),
    MetricEntry::pure(MetricId::Acceleration, "ACCELERATION", dynamics::acceleration),
    MetricEntry::pure(MetricId::LateralAcceleration, "LAT_ACCEL", dynamics::lateral_acceleration),
    MetricEntry::pure(MetricId::DragForce, "DRAG_FORCE", dynamics::drag_force),
    MetricEntry::pure(MetricId::DragPower, "DRAG_POWER", dynamics::drag_power),
    MetricEntry::pure(MetricId::DragLosses, "DRAG_LOSSES", dynamics::drag_losses),
    MetricEntry::pure(MetricId::AccelForce, "ACCEL_FORCE", dynamics::accel_force),
    MetricEntry::pure(MetricId::EvForce, "EV_FORCE", dynamics::ev_force),
    MetricEntry::pure(MetricId::RegenForce, "REGEN_FORCE", dynamics::regen_force),
    MetricEntry::pure(MetricId::BrakeForce, "BRAKE_FORCE", dynamics::brake_force),
    MetricEntry::pure(MetricId::AccelPower, "ACCEL_POWER", dynamics::accel_power),
    MetricEntry::pure(MetricId::EvPower, "EV_POWER", dynamics::ev_power),
    MetricEntry::pure(MetricId::RegenPower, "REGEN_POWER", dynamics::regen_power),
    MetricEntry::pure(MetricId::BrakePower, "BRAKE_POWER", dynamics::brake_power),
    MetricEntry::pure(MetricId::DrivePower, "DRIVE_POWER", dynamics::drive_power),
    MetricEntry::pure(MetricId::IcePower, "ICE_POWER", dynamics::ice_power),
    MetricEntry::pure(MetricId::VisionLatAccel, "VISION_CURLATACCEL", surroundings::vision_lat_accel),
    MetricEntry::pure(MetricId::VisionMaxCurveSpeed, "VISION_MAXVFORCURCURV", surroundings::vision_max_curve_speed),
    MetricEntry::pure(MetricId::VisionMaxPredLatAccel, "VISION_MAXPREDLATACCEL", surroundings::vision_max_pred_lat_accel),
    MetricEntry::pure(MetricId::VisionFinalSpeed, "VISION_VF", surroundings::vision_final_speed),
    MetricEntry::pure(MetricId::LanePosition, "LANE_POSITION", surroundings::lane_position),
    MetricEntry::pure(MetricId::LaneOffset, "LANE_OFFSET", surroundings::lane_offset),
    MetricEntry::pure(MetricId::LaneWidth, "LANE_WIDTH", surroundings::lane_width),
    MetricEntry::pure(MetricId::LaneCenter, "LANE_DIST_FROM_CENTER", surroundings::lane_center),
    MetricEntry::pure(MetricId::TrafficTotal, "TRAFFIC_COUNT_TOTAL", surroundings::traffic_total),
    MetricEntry::pure(MetricId::TrafficOncoming, "TRAFFIC_COUNT_ONCOMING", surroundings::traffic_oncoming),
    MetricEntry::pure(MetricId::TrafficOngoing, "TRAFFIC_COUNT_ONGOING", surroundings::traffic_ongoing),
    MetricEntry::pure(MetricId::TrafficStopped, "TRAFFIC_COUNT_STOPPED", surroundings::traffic_stopped),
    MetricEntry::pure(MetricId::TrafficAdjacent, "TRAFFIC_COUNT_ADJACENT", surroundings::traffic_adjacent),
    MetricEntry::pure(MetricId::AdjacentMinSeparation, "TRAFFIC_ADJ_MIN_SEPARATION", surroundings::adjacent_min_separation),
    MetricEntry::pure(MetricId::LeadTtc, "LEAD_TTC", surroundings::lead_ttc),
    MetricEntry::pure(MetricId::LeadDistance, "LEAD_DISTANCE_LENGTH", surroundings::lead_distance),
    MetricEntry::pure(MetricId::LeadDesiredDistance, "LEAD_DESIRED_DISTANCE_LENGTH", surroundings::lead_desired_distance),
    MetricEntry::pure(MetricId::LeadFollowTime, "LEAD_DISTANCE_TIME", surroundings::lead_follow_time),
    MetricEntry::pure(MetricId::LeadDesiredFollowTime, "LEAD_DESIRED_DISTANCE_TIME", surroundings::lead_desired_follow_time),
    MetricEntry::pure(MetricId::LeadCosts, "LEAD_COSTS", surroundings::lead_costs),
    MetricEntry::pure(MetricId::LeadRelativeSpeed, "LEAD_VELOCITY_RELATIVE", surroundings::lead_relative_speed),
    MetricEntry::pure(MetricId::LeadSpeed, "LEAD_VELOCITY_ABS", surroundings::lead_speed),
    MetricEntry::pure(MetricId::SteeringAngle, "STEERING_ANGLE", vehicle::steering_angle),
    MetricEntry::pure(MetricId::DesiredSteeringAngle, "DESIRED_STEERING_ANGLE", vehicle::desired_steering_angle),
    MetricEntry::pure(MetricId::SteeringError, "STEERING_ANGLE_ERROR", vehicle::steering_error),
    MetricEntry::pure(MetricId::EngineRpm, "ENGINE_RPM", vehicle::engine_rpm),
    MetricEntry::pure(MetricId::EngineRpmTemp, "ENGINE_RPM_TEMP", vehicle::engine_rpm_temp),
    MetricEntry::pure(MetricId::CoolantTemp, "COOLANT_TEMP", vehicle::coolant_temp),
    MetricEntry::pure(MetricId::FollowLevel, "FOLLOW_LEVEL", vehicle::follow_level),
    MetricEntry::pure(MetricId::HvbVoltage, "HVB_VOLTAGE", energy::hvb_voltage),
    MetricEntry::pure(MetricId::HvbCurrent, "HVB_CURRENT", energy::hvb_current),
    MetricEntry::pure(MetricId::HvbPower, "HVB_WATTAGE", energy::hvb_power),
    MetricEntry::pure(MetricId::HvbPowerVoltage, "HVB_WATTVOLT", energy::hvb_power_voltage),
    MetricEntry::pure(MetricId::EvBothNow, "EV_BOTH_NOW", energy::ev_both_now),
    MetricEntry::pure(MetricId::EvEfficiencyNow, "EV_EFF_NOW", energy::ev_efficiency_now),
    MetricEntry::pure(MetricId::EvEfficiencyRecent, "EV_EFF_RECENT", energy::ev_efficiency_recent),
    MetricEntry::pure(MetricId::EvEfficiencyTrip, "EV_EFF_TRIP", energy::ev_efficiency_trip),
    MetricEntry::pure(MetricId::EvConsumptionNow, "EV_CONSUM_NOW", energy::ev_consumption_now),
    MetricEntry::pure(MetricId::EvConsumptionRecent, "EV_CONSUM_RECENT", energy::ev_consumption_recent),
    MetricEntry::pure(MetricId::EvConsumptionTrip, "EV_CONSUM_TRIP", energy::ev_consumption_trip),
    MetricEntry::pure(MetricId::EvDrivetrainEfficiency, "EV_OBSERVED_DRIVETRAIN_EFF", energy::ev_drivetrain_efficiency),
    MetricEntry::pure(MetricId::TripDistance, "DISTANCE_TRAVELLED", energy::trip_distance),
];

// =============================================================================
// Resolution
// =============================================================================

/// Resolve a slot's metric code into display text and colors.
///
/// Unknown codes yield [`MetricDisplay::invalid`]. Only estimator-backed
/// metrics touch `grade`.
pub fn resolve(
    code: MetricCode,
    input: &MetricInput<'_>,
    grade: &mut GradeEstimator,
) -> MetricDisplay {
    let Some(id) = code.metric() else {
        log::debug!("metric code {} not in catalog", code.0);
        return MetricDisplay::invalid();
    };

    let mut display = MetricDisplay::new();
    match id.entry().compute {
        Compute::Pure(f) => f(input, &mut display),
        Compute::Estimator(f) => f(input, grade, &mut display),
    }
    display
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_with(
        id: MetricId,
        state: &StateSnapshot,
        is_metric: bool,
    ) -> MetricDisplay {
        let mut grade = GradeEstimator::new();
        resolve(id.code(), &MetricInput { state, is_metric }, &mut grade)
    }

    #[test]
    fn test_registry_is_indexed_by_code() {
        for (i, entry) in REGISTRY.iter().enumerate() {
            assert_eq!(entry.id as usize, i, "registry row {i} holds {:?}", entry.id);
        }
        assert_eq!(REGISTRY.len(), MetricId::COUNT);
    }

    #[test]
    fn test_keys_are_unique() {
        for (i, a) in REGISTRY.iter().enumerate() {
            for b in &REGISTRY[i + 1..] {
                assert_ne!(a.key, b.key, "duplicate key");
            }
        }
    }

    #[test]
    fn test_only_gps_grade_uses_estimator() {
        let users: std::vec::Vec<_> = REGISTRY.iter().filter(|e| e.uses_estimator()).map(|e| e.id).collect();
        assert_eq!(users, [MetricId::GradeGps]);
    }

    #[test]
    fn test_unknown_code_resolves_to_sentinel() {
        let state = StateSnapshot::default();
        let mut grade = GradeEstimator::new();
        let input = MetricInput { state: &state, is_metric: true };

        for code in [MetricCode::INVALID, MetricCode(MetricId::COUNT as u16), MetricCode(999)] {
            let display = resolve(code, &input, &mut grade);
            assert_eq!(display.value.as_str(), "42");
            assert_eq!(display.label.as_str(), "INVALID");
            assert_eq!(display.unit.as_str(), "");
        }
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!(MetricCode::from_key("lead_ttc").metric(), Some(MetricId::LeadTtc));
        assert_eq!(MetricCode::from_key(" 16 ").metric(), Some(MetricId::GradeGps));
        assert_eq!(MetricCode::from_key("500"), MetricCode(500));
        assert_eq!(MetricCode::from_key("WARP_DRIVE"), MetricCode::INVALID);
    }

    #[test]
    fn test_next_wraps_and_recovers_from_invalid() {
        assert_eq!(MetricId::CpuTemp.code().next(), MetricId::MemoryTemp.code());
        assert_eq!(MetricId::TripDistance.code().next(), MetricId::CpuTempAndPercent.code());
        assert_eq!(MetricCode::INVALID.next(), MetricCode(0));
    }

    #[test]
    fn test_every_metric_renders_with_default_state() {
        let state = StateSnapshot::default();
        for id in MetricId::all() {
            for is_metric in [true, false] {
                let display = resolve_with(id, &state, is_metric);
                assert!(!display.label.is_empty(), "{id:?} has no label");
                assert_ne!(display.label.as_str(), "INVALID", "{id:?} resolved as invalid");
            }
        }
    }

    #[test]
    fn test_pure_metrics_do_not_touch_estimator() {
        let mut state = StateSnapshot::default();
        state.car.v_ego_mps = 30.0;
        state.gps.accuracy_m = 0.5;
        let mut grade = GradeEstimator::new();
        for id in MetricId::all().filter(|id| *id != MetricId::GradeGps) {
            state.timestamp_s += 1.0;
            resolve(id.code(), &MetricInput { state: &state, is_metric: true }, &mut grade);
        }
        assert!(grade.is_empty());
        assert_eq!(grade.pending_distance(), 0.0);
    }
}
