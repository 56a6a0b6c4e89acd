//! Great-circle distance on a spherical Earth.

use crate::constants::{EARTH_RADIUS_KM, KM_TO_MILES};

use super::types::Coordinate;

/// Haversine distance between two coordinates in kilometers.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Sum of segment distances along `path`.
pub fn path_length_km(path: &[Coordinate]) -> f64 {
    path.windows(2).map(|w| haversine_km(w[0], w[1])).sum()
}

pub fn km_to_miles(km: f64) -> f64 {
    km * KM_TO_MILES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_degree_latitude() {
        let d = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((d - 111.19).abs() < 0.01, "got {}", d);
    }

    #[test]
    fn test_zero_distance() {
        let p = Coordinate::new(12.5, -33.0);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = Coordinate::new(-0.1278, 51.5074);
        let b = Coordinate::new(2.3522, 48.8566);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
        // London to Paris is roughly 344 km
        assert!((haversine_km(a, b) - 343.5).abs() < 2.0);
    }

    #[test]
    fn test_path_length_sums_segments() {
        let path = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 2.0),
        ];
        let total = path_length_km(&path);
        assert!((total - 2.0 * 111.195).abs() < 0.01);
        assert_eq!(path_length_km(&path[..1]), 0.0);
    }

    #[test]
    fn test_km_to_miles() {
        assert!((km_to_miles(100.0) - 62.1371).abs() < 1e-9);
    }
}
