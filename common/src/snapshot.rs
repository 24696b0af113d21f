//! Read-only telemetry snapshot consumed by the panel once per frame.
//!
//! The snapshot is plain data in SI units. Producers (vehicle bus decoders,
//! the GPS receiver, the planners) fill it in; the panel only reads it.
//! Every record is `Copy`, so handing a snapshot across a thread or task
//! boundary is a single value copy.
//!
//! Fields that a producer cannot fill keep their `Default` value. Metrics
//! treat the documented "no data" encodings (accuracy 0, lead status false,
//! bearing accuracy 180°) as missing telemetry and render a placeholder.

/// Maximum number of CPU cores reported.
pub const MAX_CPU_CORES: usize = 8;

/// Device thermal band as reported by the thermal manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThermalStatus {
    #[default]
    Green,
    Yellow,
    Red,
    Danger,
}

/// Lane the vehicle is (or is about to be) positioned in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LanePosition {
    Left,
    #[default]
    Center,
    Right,
}

/// Compute platform health.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeviceState {
    pub cpu_temp_c: f32,
    pub memory_temp_c: f32,
    pub ambient_temp_c: f32,
    pub cpu_usage_percent: [u8; MAX_CPU_CORES],
    pub cpu_core_count: usize,
    pub thermal_status: ThermalStatus,
    /// Fan command; values above 100 are absolute RPM targets.
    pub fan_speed_desired: u16,
    pub fan_speed_rpm: u32,
    pub memory_usage_percent: f32,
    pub free_space_percent: f32,
    pub battery_percent: u8,
    pub battery_current_ua: i32,
}

impl DeviceState {
    /// Mean CPU usage across reported cores, 0 when none are reported.
    pub fn cpu_usage_mean(&self) -> u8 {
        let count = self.cpu_core_count.min(MAX_CPU_CORES);
        if count == 0 {
            return 0;
        }
        let sum: u32 = self.cpu_usage_percent[..count].iter().map(|&u| u32::from(u)).sum();
        (sum / count as u32) as u8
    }
}

/// Vehicle state from the car interface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CarState {
    pub v_ego_mps: f32,
    pub a_ego_mps2: f32,
    pub lateral_accel_mps2: f32,
    pub steering_angle_deg: f32,
    pub steering_torque_eps_nm: f32,
    pub engine_rpm: u32,
    pub coolant_temp_c: f32,
    /// Device pitch; positive is nose up.
    pub pitch_rad: f32,
    pub device_roll_rad: f32,
    pub road_roll_rad: f32,
    pub trip_distance_m: f32,
    /// Selected follow distance setting, 1..=3 bars.
    pub distance_lines: u8,
}

/// Longitudinal force and power estimates (N and W).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PowertrainState {
    pub drag_force_n: f32,
    pub drag_power_w: f32,
    pub drive_power_w: f32,
    pub accel_force_n: f32,
    pub ev_force_n: f32,
    pub regen_force_n: f32,
    pub brake_force_n: f32,
    pub accel_power_w: f32,
    pub ev_power_w: f32,
    pub regen_power_w: f32,
    pub brake_power_w: f32,
    pub ice_power_w: f32,
}

/// High-voltage battery and EV efficiency figures.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvState {
    pub hvb_voltage_v: f32,
    pub hvb_current_a: f32,
    /// Instantaneous consumption, Wh/km. Negative while regenerating.
    pub consumption_now_wh_km: f32,
    /// Consumption over the recent window (8 km), Wh/km.
    pub consumption_recent_wh_km: f32,
    /// Whole-trip efficiency, km/kWh.
    pub trip_efficiency_km_kwh: f32,
    /// Distance driven electrically this trip, meters.
    pub trip_distance_m: f32,
    /// Efficiency display ceiling, km/kWh.
    pub efficiency_max_km_kwh: f32,
    /// Observed drivetrain efficiency, 0..=1.
    pub drivetrain_efficiency: f32,
}

impl EvState {
    /// Current pack power in watts.
    pub fn hvb_power_w(&self) -> f32 { self.hvb_voltage_v * self.hvb_current_a }
}

/// GPS fix. `accuracy_m == 0` means no fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsFix {
    pub altitude_m: f32,
    pub accuracy_m: f32,
    pub satellite_count: u16,
    pub bearing_deg: f32,
    pub bearing_accuracy_deg: f32,
}

impl Default for GpsFix {
    fn default() -> Self {
        Self {
            altitude_m: 0.0,
            accuracy_m: 0.0,
            satellite_count: 0,
            bearing_deg: 0.0,
            bearing_accuracy_deg: crate::thresholds::BEARING_ACCURACY_INVALID_DEG,
        }
    }
}

impl GpsFix {
    pub fn has_fix(&self) -> bool { self.accuracy_m != 0.0 }

    pub fn has_bearing(&self) -> bool {
        self.bearing_accuracy_deg != crate::thresholds::BEARING_ACCURACY_INVALID_DEG
    }
}

/// Radar/vision lead vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LeadState {
    pub present: bool,
    pub distance_m: f32,
    /// Lead speed minus ego speed; negative while closing.
    pub relative_speed_mps: f32,
    pub speed_mps: f32,
}

/// Follow controller state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FollowState {
    /// Desired time gap to the lead, seconds.
    pub desired_time_s: f32,
    /// Standstill gap added to the time-based follow distance, meters.
    pub stopping_distance_m: f32,
    pub distance_cost: f32,
    pub accel_cost: f32,
    pub dynamic_active: bool,
    pub dynamic_level: f32,
}

/// Controls and driver monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlsState {
    pub enabled: bool,
    pub desired_steering_angle_deg: f32,
    pub steering_error_deg: f32,
    pub interaction_timer_s: u32,
    pub intervention_timer_s: u32,
    pub distraction_timer_s: u32,
}

/// Lateral planner lane estimates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LaneState {
    pub position: LanePosition,
    pub offset_m: f32,
    pub width_m: f32,
    /// Distance of the lane center from the vehicle, meters.
    pub center_m: f32,
}

/// Vision-based curvature limits from the longitudinal planner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VisionState {
    pub current_lat_accel_mps2: f32,
    pub max_speed_for_curvature_mps: f32,
    pub max_predicted_lat_accel_mps2: f32,
    pub final_speed_mps: f32,
}

/// Surrounding traffic counts from radar tracks.
///
/// `ongoing` and `stopped` already include the lead and other center-lane
/// tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrafficState {
    pub oncoming: u16,
    pub ongoing: u16,
    pub stopped: u16,
    pub adjacent_left: u16,
    pub adjacent_right: u16,
    /// Smallest time gap to a vehicle in the left lane, seconds.
    pub min_separation_left_s: f32,
    /// Smallest time gap to a vehicle in the right lane, seconds.
    pub min_separation_right_s: f32,
}

impl TrafficState {
    pub fn total(&self) -> u32 { u32::from(self.oncoming) + u32::from(self.ongoing) + u32::from(self.stopped) }
}

/// Everything the panel may read during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StateSnapshot {
    /// Monotonic seconds since start, used for odometry and touch timeouts.
    pub timestamp_s: f32,
    pub device: DeviceState,
    pub car: CarState,
    pub powertrain: PowertrainState,
    pub ev: EvState,
    pub gps: GpsFix,
    pub lead: LeadState,
    pub follow: FollowState,
    pub controls: ControlsState,
    pub lane: LaneState,
    pub vision: VisionState,
    pub traffic: TrafficState,
}
