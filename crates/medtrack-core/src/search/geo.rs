//! Great-circle distance via the Haversine formula.

use crate::models::Coordinate;

/// Mean Earth radius in km.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in km.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = (to.latitude() - from.latitude()).to_radians();
    let d_lon = (to.longitude() - from.longitude()).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude().to_radians().cos()
            * to.latitude().to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round a distance to 2 decimal places for reporting.
pub fn round_km(distance: f64) -> f64 {
    (distance * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_zero_self_distance() {
        let a = coord(40.7128, -74.0060);
        assert!(haversine_km(a, a).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric() {
        let a = coord(40.7128, -74.0060);
        let b = coord(34.0522, -118.2437);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_longitude_at_equator() {
        // One degree of longitude at the equator is about 111.19 km
        let d = haversine_km(coord(0.0, 0.0), coord(0.0, 1.0));
        assert!((d - 111.19).abs() < 0.5, "got {}", d);
    }

    #[test]
    fn test_new_york_to_los_angeles() {
        let d = haversine_km(coord(40.7128, -74.0060), coord(34.0522, -118.2437));
        assert!((3935.0..=3945.0).contains(&d), "got {}", d);
    }

    #[test]
    fn test_round_km() {
        assert_eq!(round_km(111.194926), 111.19);
        assert_eq!(round_km(9.996), 10.0);
        assert_eq!(round_km(0.0), 0.0);
    }
}
