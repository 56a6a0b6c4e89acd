//! Web Mercator conversion between geographic coordinates and world space.
//!
//! World space is Bevy's 2D space: x grows east, y grows north, and one degree
//! of longitude spans [`PIXELS_PER_DEGREE`] units at zoom scale 1.0.

use bevy::prelude::*;
use std::f64::consts::PI;

use crate::constants::{MAX_MERCATOR_LATITUDE, PIXELS_PER_DEGREE};
use crate::measure::Coordinate;

/// World units per radian of Mercator y
const UNITS_PER_RADIAN: f64 = PIXELS_PER_DEGREE * 180.0 / PI;

pub fn to_world(coordinate: Coordinate) -> Vec2 {
    let lat = coordinate
        .lat
        .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
        .to_radians();
    let x = coordinate.lng * PIXELS_PER_DEGREE;
    let y = (PI / 4.0 + lat / 2.0).tan().ln() * UNITS_PER_RADIAN;
    Vec2::new(x as f32, y as f32)
}

pub fn to_coordinate(world: Vec2) -> Coordinate {
    let lng = world.x as f64 / PIXELS_PER_DEGREE;
    let y = world.y as f64 / UNITS_PER_RADIAN;
    let lat = (2.0 * y.exp().atan() - PI / 2.0).to_degrees();
    Coordinate::new(lng, lat.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_origin() {
        assert_eq!(to_world(Coordinate::new(0.0, 0.0)), Vec2::ZERO);
    }

    #[test]
    fn test_longitude_is_linear() {
        let w = to_world(Coordinate::new(10.0, 0.0));
        assert!((w.x - 80.0).abs() < 1e-4);
        assert!(w.y.abs() < 1e-4);
    }

    #[test]
    fn test_round_trip() {
        let c = Coordinate::new(-73.9857, 40.7484);
        let back = to_coordinate(to_world(c));
        assert!((back.lng - c.lng).abs() < 1e-4);
        assert!((back.lat - c.lat).abs() < 1e-4);
    }

    #[test]
    fn test_latitude_clamped_at_poles() {
        let w = to_world(Coordinate::new(0.0, 90.0));
        assert!(w.y.is_finite());
        let back = to_coordinate(w);
        assert!((back.lat - MAX_MERCATOR_LATITUDE).abs() < 1e-3);
    }

    #[test]
    fn test_north_is_up() {
        assert!(to_world(Coordinate::new(0.0, 45.0)).y > 0.0);
        assert!(to_world(Coordinate::new(0.0, -45.0)).y < 0.0);
    }
}
