// src/geofence.rs
//! Great-circle distance and circular geofence containment

use crate::position::Position;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Result of a geofence containment test. `Unknown` means no position has
/// been recorded yet and is distinct from `Outside`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeofenceStatus {
    Inside,
    Outside,
    Unknown,
}

/// Haversine distance in meters between two decimal-degree points.
///
/// Spherical approximation with a fixed Earth radius; no ellipsoidal
/// correction.
pub fn haversine_distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Test whether `position` lies within `radius_m` meters of the circle
/// center. `None` input yields `Unknown`.
pub fn circle_contains(
    position: Option<&Position>,
    center_lat: f64,
    center_lon: f64,
    radius_m: f64,
) -> GeofenceStatus {
    let Some(pos) = position else {
        return GeofenceStatus::Unknown;
    };
    let distance = haversine_distance_m(pos.latitude, pos.longitude, center_lat, center_lon);
    if distance <= radius_m {
        GeofenceStatus::Inside
    } else {
        GeofenceStatus::Outside
    }
}
