//! Geographic coordinates and distance math.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers (IUGG).
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A latitude/longitude pair in decimal degrees.
///
/// Stored latitude-first. Note that some geocoding providers return
/// coordinates longitude-first; callers are responsible for swapping before
/// constructing a `Coordinates`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees, positive north.
    pub latitude: f64,
    /// Longitude in decimal degrees, positive east.
    pub longitude: f64,
}

impl Coordinates {
    /// Create coordinates from a latitude/longitude pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in kilometers (haversine formula).
    ///
    /// Accurate to within ~0.5% of the ellipsoidal geodesic, which is more
    /// than enough for ranking delivery restaurants.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOSCOW: Coordinates = Coordinates::new(55.7558, 37.6173);
    const SAINT_PETERSBURG: Coordinates = Coordinates::new(59.9311, 30.3609);

    #[test]
    fn test_distance_zero_for_same_point() {
        assert!(MOSCOW.distance_km(&MOSCOW).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distance_known_city_pair() {
        // Moscow - Saint Petersburg is ~634 km great-circle
        let d = MOSCOW.distance_km(&SAINT_PETERSBURG);
        assert!((d - 634.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn test_distance_symmetric() {
        let there = MOSCOW.distance_km(&SAINT_PETERSBURG);
        let back = SAINT_PETERSBURG.distance_km(&MOSCOW);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_distance_short_range() {
        // Two points ~1.11 km apart along a meridian (0.01 degrees latitude)
        let a = Coordinates::new(55.75, 37.62);
        let b = Coordinates::new(55.76, 37.62);
        let d = a.distance_km(&b);
        assert!((d - 1.112).abs() < 0.01, "got {d}");
    }
}
