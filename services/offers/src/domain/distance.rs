use geo::{GeodesicDistance, Point};

use crate::domain::types::Coordinates;

/// Slack for floating-point noise, so a radius of 0 still matches the query
/// point itself.
const TOLERANCE_KM: f64 = 1e-9;

/// Geodesic distance on the WGS84 ellipsoid, in kilometers.
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let from = Point::new(a.longitude, a.latitude);
    let to = Point::new(b.longitude, b.latitude);
    from.geodesic_distance(&to) / 1000.0
}

/// Whether `candidate` lies within `radius_km` of `center`. A missing
/// coordinate never matches.
pub fn within_radius(center: Coordinates, candidate: Option<Coordinates>, radius_km: f64) -> bool {
    candidate.is_some_and(|c| distance_km(center, c) <= radius_km + TOLERANCE_KM)
}
