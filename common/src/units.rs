//! Unit conversions driven by the single `is_metric` flag.
//!
//! Telemetry arrives in SI units (m/s, m, °C, W, N). Every metric converts
//! through these helpers so the unit label and the number can never
//! disagree.

/// m/s to km/h.
pub const MPS_TO_KPH: f32 = 3.6;

/// m/s to mph.
pub const MPS_TO_MPH: f32 = 2.237_414_4;

/// Meters to feet, for short distances (lead, lane).
pub const M_TO_FT: f32 = 3.281;

/// Meters to feet, for elevation.
pub const M_TO_FT_ALTITUDE: f32 = 3.280_839_9;

/// Meters per mile as used for trip distance and efficiency.
pub const M_PER_MILE: f32 = 1609.0;

/// Kilowatts to horsepower.
pub const KW_TO_HP: f32 = 1.34;

/// Speed in the selected unit.
#[inline]
pub fn speed(
    mps: f32,
    is_metric: bool,
) -> f32 {
    if is_metric { mps * MPS_TO_KPH } else { mps * MPS_TO_MPH }
}

#[inline]
pub const fn speed_unit(is_metric: bool) -> &'static str {
    if is_metric { "km/h" } else { "mph" }
}

/// Short distance (meters or feet).
#[inline]
pub fn length(
    m: f32,
    is_metric: bool,
) -> f32 {
    if is_metric { m } else { m * M_TO_FT }
}

#[inline]
pub const fn length_unit(is_metric: bool) -> &'static str {
    if is_metric { "m" } else { "ft" }
}

/// Elevation (meters or feet).
#[inline]
pub fn altitude(
    m: f32,
    is_metric: bool,
) -> f32 {
    if is_metric { m } else { m * M_TO_FT_ALTITUDE }
}

/// Long distance (kilometers or miles).
#[inline]
pub fn distance(
    m: f32,
    is_metric: bool,
) -> f32 {
    if is_metric { m / 1000.0 } else { m / M_PER_MILE }
}

#[inline]
pub const fn distance_unit(is_metric: bool) -> &'static str {
    if is_metric { "km" } else { "mi" }
}

/// Temperature (°C or °F).
#[inline]
pub fn temperature(
    c: f32,
    is_metric: bool,
) -> f32 {
    if is_metric { c } else { c * 1.8 + 32.0 }
}

#[inline]
pub const fn temperature_unit(is_metric: bool) -> &'static str {
    if is_metric { "°C" } else { "°F" }
}

/// Power from watts (kilowatts or horsepower).
#[inline]
pub fn power(
    w: f32,
    is_metric: bool,
) -> f32 {
    let kw = w * 0.001;
    if is_metric { kw } else { kw * KW_TO_HP }
}

#[inline]
pub const fn power_unit(is_metric: bool) -> &'static str {
    if is_metric { "kW" } else { "hp" }
}

/// Energy per distance from Wh/km (Wh/km or Wh/mi).
#[inline]
pub fn consumption(
    wh_per_km: f32,
    is_metric: bool,
) -> f32 {
    if is_metric { wh_per_km } else { wh_per_km * M_PER_MILE / 1000.0 }
}

#[inline]
pub const fn consumption_unit(is_metric: bool) -> &'static str {
    if is_metric { "Wh/km" } else { "Wh/mi" }
}

/// Distance per energy from km/kWh (km/kWh or mi/kWh).
#[inline]
pub fn efficiency(
    km_per_kwh: f32,
    is_metric: bool,
) -> f32 {
    if is_metric { km_per_kwh } else { km_per_kwh * 1000.0 / M_PER_MILE }
}

#[inline]
pub const fn efficiency_unit(is_metric: bool) -> &'static str {
    if is_metric { "km/kWh" } else { "mi/kWh" }
}
