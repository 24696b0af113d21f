//! Synthetic telemetry so every metric has something to show.
//!
//! Each field follows a slow sine between plausible bounds, at its own
//! frequency so the values drift independently. The car climbs and
//! descends a rolling hill, so the GPS grade estimator sees real grade.

use panel_common::snapshot::{LanePosition, StateSnapshot, ThermalStatus};

fn fake_signal(
    t: f32,
    min: f32,
    max: f32,
    freq: f32,
) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}

/// Integrates the fake drive so position and altitude stay consistent.
#[derive(Debug, Default)]
pub struct TelemetryFeed {
    last_t: Option<f32>,
    odometer_m: f32,
}

impl TelemetryFeed {
    pub fn new() -> Self { Self::default() }

    /// Snapshot at simulated time `t` seconds.
    pub fn sample(
        &mut self,
        t: f32,
    ) -> StateSnapshot {
        let v_ego = fake_signal(t, 8.0, 30.0, 0.05);
        let dt = self.last_t.map_or(0.0, |last| t - last);
        self.last_t = Some(t);
        self.odometer_m += v_ego * dt;

        let mut s = StateSnapshot::default();
        s.timestamp_s = t;

        let cpu_temp = fake_signal(t, 45.0, 85.0, 0.07);
        s.device.cpu_temp_c = cpu_temp;
        s.device.memory_temp_c = cpu_temp - 6.0;
        s.device.ambient_temp_c = fake_signal(t, 28.0, 40.0, 0.03);
        s.device.cpu_core_count = 4;
        for (i, usage) in s.device.cpu_usage_percent.iter_mut().take(4).enumerate() {
            *usage = fake_signal(t + i as f32, 10.0, 90.0, 0.2) as u8;
        }
        s.device.thermal_status = match cpu_temp {
            c if c > 80.0 => ThermalStatus::Red,
            c if c > 70.0 => ThermalStatus::Yellow,
            _ => ThermalStatus::Green,
        };
        s.device.fan_speed_desired = fake_signal(t, 20.0, 100.0, 0.07) as u16;
        s.device.fan_speed_rpm = fake_signal(t, 1200.0, 5200.0, 0.07) as u32;
        s.device.memory_usage_percent = fake_signal(t, 30.0, 85.0, 0.02);
        s.device.free_space_percent = fake_signal(t, 5.0, 60.0, 0.01);
        s.device.battery_percent = 100;
        s.device.battery_current_ua = fake_signal(t, -1_500_000.0, 500_000.0, 0.04) as i32;

        // Rolling hill: altitude is a sine of the distance travelled
        let hill = (self.odometer_m / 400.0).sin();
        s.car.v_ego_mps = v_ego;
        s.car.a_ego_mps2 = fake_signal(t, -2.0, 2.0, 0.3);
        s.car.lateral_accel_mps2 = fake_signal(t, -1.5, 1.5, 0.15);
        s.car.steering_angle_deg = fake_signal(t, -40.0, 40.0, 0.1);
        s.car.steering_torque_eps_nm = fake_signal(t, -2.5, 2.5, 0.25);
        s.car.engine_rpm = if fake_signal(t, 0.0, 1.0, 0.02) > 0.3 { fake_signal(t, 800.0, 4500.0, 0.2) as u32 } else { 0 };
        s.car.coolant_temp_c = fake_signal(t, 40.0, 120.0, 0.015);
        s.car.pitch_rad = hill * 0.05;
        s.car.device_roll_rad = fake_signal(t, -0.03, 0.03, 0.2);
        s.car.road_roll_rad = fake_signal(t, -0.02, 0.02, 0.1);
        s.car.trip_distance_m = self.odometer_m;
        s.car.distance_lines = 1 + (t / 20.0) as u8 % 3;

        let drag_w = 0.5 * 1.2 * 0.3 * 2.3 * v_ego * v_ego * v_ego;
        let drive_w = fake_signal(t, -20_000.0, 60_000.0, 0.12);
        s.powertrain.drag_force_n = drag_w / v_ego;
        s.powertrain.drag_power_w = drag_w;
        s.powertrain.drive_power_w = drive_w;
        s.powertrain.accel_force_n = drive_w.max(0.0) / v_ego;
        s.powertrain.ev_force_n = s.powertrain.accel_force_n * 0.6;
        s.powertrain.regen_force_n = drive_w.min(0.0) / v_ego;
        s.powertrain.brake_force_n = fake_signal(t, -3000.0, 0.0, 0.2);
        s.powertrain.accel_power_w = drive_w.max(0.0);
        s.powertrain.ev_power_w = drive_w.max(0.0) * 0.6;
        s.powertrain.regen_power_w = drive_w.min(0.0);
        s.powertrain.brake_power_w = s.powertrain.brake_force_n * v_ego;
        s.powertrain.ice_power_w = drive_w.max(0.0) * 0.4;

        s.ev.hvb_voltage_v = fake_signal(t, 320.0, 390.0, 0.05);
        s.ev.hvb_current_a = -drive_w * 0.6 / s.ev.hvb_voltage_v;
        s.ev.consumption_now_wh_km = fake_signal(t, -150.0, 400.0, 0.12);
        s.ev.consumption_recent_wh_km = fake_signal(t, 120.0, 220.0, 0.01);
        s.ev.trip_efficiency_km_kwh = fake_signal(t, 5.0, 8.0, 0.005);
        s.ev.trip_distance_m = self.odometer_m;
        s.ev.efficiency_max_km_kwh = 99.0;
        s.ev.drivetrain_efficiency = fake_signal(t, 0.82, 0.93, 0.02);

        s.gps.altitude_m = 120.0 + 20.0 * hill;
        s.gps.accuracy_m = fake_signal(t, 0.4, 1.6, 0.04);
        s.gps.satellite_count = fake_signal(t, 6.0, 14.0, 0.03) as u16;
        s.gps.bearing_deg = (t * 3.0) % 360.0;
        s.gps.bearing_accuracy_deg = fake_signal(t, 1.0, 20.0, 0.05);

        s.lead.present = fake_signal(t, 0.0, 1.0, 0.04) > 0.25;
        s.lead.distance_m = fake_signal(t, 8.0, 80.0, 0.08);
        s.lead.relative_speed_mps = fake_signal(t, -6.0, 4.0, 0.11);
        s.lead.speed_mps = v_ego + s.lead.relative_speed_mps;

        s.follow.desired_time_s = 1.45;
        s.follow.stopping_distance_m = 6.0;
        s.follow.distance_cost = fake_signal(t, 0.5, 3.0, 0.07);
        s.follow.accel_cost = fake_signal(t, 0.5, 3.0, 0.09);
        s.follow.dynamic_active = (t / 30.0) as u32 % 2 == 1;
        s.follow.dynamic_level = fake_signal(t, 0.0, 2.0, 0.05);

        s.controls.enabled = fake_signal(t, 0.0, 1.0, 0.03) > 0.2;
        s.controls.desired_steering_angle_deg = s.car.steering_angle_deg + fake_signal(t, -2.0, 2.0, 0.4);
        s.controls.steering_error_deg = s.controls.desired_steering_angle_deg - s.car.steering_angle_deg;
        s.controls.interaction_timer_s = 600 - (t as u32 % 600);
        s.controls.intervention_timer_s = 30 - (t as u32 % 30);
        s.controls.distraction_timer_s = 8 - (t as u32 % 8);

        s.lane.position = match (t / 15.0) as u32 % 3 {
            0 => LanePosition::Left,
            1 => LanePosition::Center,
            _ => LanePosition::Right,
        };
        s.lane.offset_m = fake_signal(t, -0.4, 0.4, 0.2);
        s.lane.width_m = fake_signal(t, 3.0, 3.8, 0.02);
        s.lane.center_m = fake_signal(t, -0.5, 0.5, 0.1);

        s.vision.current_lat_accel_mps2 = s.car.lateral_accel_mps2;
        s.vision.max_speed_for_curvature_mps = fake_signal(t, 15.0, 40.0, 0.06);
        s.vision.max_predicted_lat_accel_mps2 = fake_signal(t, 0.5, 2.5, 0.06);
        s.vision.final_speed_mps = fake_signal(t, 10.0, 35.0, 0.06);

        s.traffic.oncoming = fake_signal(t, 0.0, 6.0, 0.1) as u16;
        s.traffic.ongoing = fake_signal(t, 0.0, 8.0, 0.08) as u16;
        s.traffic.stopped = fake_signal(t, 0.0, 3.0, 0.05) as u16;
        s.traffic.adjacent_left = fake_signal(t, 0.0, 3.0, 0.13) as u16;
        s.traffic.adjacent_right = fake_signal(t, 0.0, 3.0, 0.17) as u16;
        s.traffic.min_separation_left_s = fake_signal(t, 0.5, 4.0, 0.1);
        s.traffic.min_separation_right_s = fake_signal(t, 0.5, 4.0, 0.12);

        s
    }
}
