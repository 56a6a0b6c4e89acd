//! Hit testing of rendered measurement features in world space.

use bevy::prelude::*;

use crate::measure::{Feature, Geometry};

use super::projection::to_world;

/// Check if a point is within a given distance of a line segment
fn point_near_segment(point: Vec2, seg_start: Vec2, seg_end: Vec2, threshold: f32) -> bool {
    let line_vec = seg_end - seg_start;
    let line_len_sq = line_vec.length_squared();

    if line_len_sq < 0.0001 {
        // Segment is essentially a point
        return point.distance(seg_start) <= threshold;
    }

    // Project point onto line, clamped to segment
    let t = ((point - seg_start).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    let projection = seg_start + line_vec * t;

    point.distance(projection) <= threshold
}

/// Check if a world position is within `threshold` of a feature's geometry
pub fn point_near_feature(point: Vec2, feature: &Feature, threshold: f32) -> bool {
    match &feature.geometry {
        Geometry::Point { coordinates } => point.distance(to_world(*coordinates)) <= threshold,
        Geometry::LineString { coordinates } => coordinates.windows(2).any(|w| {
            point_near_segment(point, to_world(w[0]), to_world(w[1]), threshold)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{Coordinate, FeatureProperties, GroupId};

    fn feature(geometry: Geometry) -> Feature {
        Feature {
            geometry,
            properties: FeatureProperties {
                id: None,
                measurement_group: GroupId(1),
            },
        }
    }

    #[test]
    fn test_point_hit() {
        let f = feature(Geometry::Point {
            coordinates: Coordinate::new(0.0, 0.0),
        });
        assert!(point_near_feature(Vec2::new(3.0, 4.0), &f, 5.0));
        assert!(!point_near_feature(Vec2::new(3.0, 4.1), &f, 5.0));
    }

    #[test]
    fn test_line_hit_between_vertices() {
        let f = feature(Geometry::LineString {
            coordinates: vec![Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 0.0)],
        });
        // Midway along the segment, 2 units off
        assert!(point_near_feature(Vec2::new(40.0, 2.0), &f, 3.0));
        assert!(!point_near_feature(Vec2::new(40.0, 5.0), &f, 3.0));
        // Past the end
        assert!(!point_near_feature(Vec2::new(90.0, 0.0), &f, 3.0));
    }

    #[test]
    fn test_degenerate_segment() {
        assert!(point_near_segment(Vec2::ZERO, Vec2::ONE, Vec2::ONE, 2.0));
        assert!(!point_near_segment(Vec2::ZERO, Vec2::ONE, Vec2::ONE, 1.0));
    }
}
