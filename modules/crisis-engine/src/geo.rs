use std::f64::consts::PI;

use crisis_common::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Floor applied to every computed response time, in minutes.
pub const MIN_RESPONSE_MIN: u32 = 5;

/// Great-circle (haversine) distance in kilometers.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let to_rad = |deg: f64| deg * PI / 180.0;

    let dlat = to_rad(b.lat - a.lat);
    let dlng = to_rad(b.lng - a.lng);

    let h = (dlat / 2.0).sin().powi(2)
        + to_rad(a.lat).cos() * to_rad(b.lat).cos() * (dlng / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Travel time in whole minutes at `base_speed_kmh` scaled by `traffic_multiplier`,
/// never below [`MIN_RESPONSE_MIN`].
pub fn response_time_min(distance_km: f64, base_speed_kmh: f64, traffic_multiplier: f64) -> u32 {
    let hours = distance_km / (base_speed_kmh * traffic_multiplier);
    let minutes = (hours * 60.0).round();
    if minutes.is_finite() && minutes > MIN_RESPONSE_MIN as f64 {
        minutes as u32
    } else {
        MIN_RESPONSE_MIN
    }
}

/// Round to one decimal place.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
