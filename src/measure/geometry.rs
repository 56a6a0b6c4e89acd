//! Builders for point/line features and the push of the collection to the map.

use super::error::{MeasureError, MeasureResult};
use super::ids::IdSource;
use super::styles::MEASUREMENT_SOURCE;
use super::surface::{RenderSurface, SourceData};
use super::types::{Coordinate, Feature, FeatureProperties, Geometry, GroupId, MeasurementCollection};

/// Build a point feature. A fresh group id is minted when `group` is `None`.
pub fn create_point(
    coordinate: Coordinate,
    group: Option<GroupId>,
    ids: &mut dyn IdSource,
) -> Feature {
    let id = ids.next_id();
    let group = group.unwrap_or_else(|| GroupId(ids.next_id()));
    Feature {
        geometry: Geometry::Point {
            coordinates: coordinate,
        },
        properties: FeatureProperties {
            id: Some(id.to_string()),
            measurement_group: group,
        },
    }
}

/// Build the line through `points` in the order given.
pub fn create_line(points: &[&Feature], group: GroupId) -> MeasureResult<Feature> {
    if points.len() < 2 {
        return Err(MeasureError::InvariantViolation(format!(
            "line for group {} needs at least 2 points, got {}",
            group,
            points.len()
        )));
    }

    let coordinates = points
        .iter()
        .map(|p| {
            p.point_coordinate().ok_or_else(|| {
                MeasureError::InvariantViolation(format!(
                    "line for group {} built from a non-point feature",
                    group
                ))
            })
        })
        .collect::<MeasureResult<Vec<_>>>()?;

    Ok(Feature {
        geometry: Geometry::LineString { coordinates },
        properties: FeatureProperties {
            id: None,
            measurement_group: group,
        },
    })
}

/// Replace the data bound to the measurement source.
pub fn push_to_surface(
    surface: &mut impl RenderSurface,
    collection: &MeasurementCollection,
) -> MeasureResult<()> {
    if !surface.has_source(MEASUREMENT_SOURCE) {
        return Err(MeasureError::SurfaceNotReady(format!(
            "source '{}' is not registered",
            MEASUREMENT_SOURCE
        )));
    }
    surface.set_source_data(MEASUREMENT_SOURCE, SourceData::Collection(collection.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapSurface;
    use crate::measure::ids::MonotonicIds;

    #[test]
    fn test_create_point_mints_group() {
        let mut ids = MonotonicIds::starting_at(100);
        let point = create_point(Coordinate::new(1.0, 2.0), None, &mut ids);
        assert_eq!(point.properties.id.as_deref(), Some("100"));
        assert_eq!(point.group(), GroupId(101));
        assert_eq!(point.point_coordinate(), Some(Coordinate::new(1.0, 2.0)));
    }

    #[test]
    fn test_create_point_reuses_group() {
        let mut ids = MonotonicIds::default();
        let point = create_point(Coordinate::new(0.0, 0.0), Some(GroupId(9)), &mut ids);
        assert_eq!(point.group(), GroupId(9));
    }

    #[test]
    fn test_create_line_keeps_order() {
        let mut ids = MonotonicIds::default();
        let a = create_point(Coordinate::new(3.0, 0.0), Some(GroupId(1)), &mut ids);
        let b = create_point(Coordinate::new(1.0, 0.0), Some(GroupId(1)), &mut ids);
        let c = create_point(Coordinate::new(2.0, 0.0), Some(GroupId(1)), &mut ids);

        let line = create_line(&[&a, &b, &c], GroupId(1)).unwrap();
        assert_eq!(
            line.line_coordinates().unwrap(),
            &[
                Coordinate::new(3.0, 0.0),
                Coordinate::new(1.0, 0.0),
                Coordinate::new(2.0, 0.0)
            ]
        );
        assert!(line.properties.id.is_none());
    }

    #[test]
    fn test_create_line_rejects_single_point() {
        let mut ids = MonotonicIds::default();
        let a = create_point(Coordinate::new(0.0, 0.0), None, &mut ids);
        let result = create_line(&[&a], a.group());
        assert!(matches!(result, Err(MeasureError::InvariantViolation(_))));
    }

    #[test]
    fn test_push_without_source_is_not_ready() {
        let mut surface = MapSurface::ready();
        let result = push_to_surface(&mut surface, &MeasurementCollection::new());
        assert!(matches!(result, Err(MeasureError::SurfaceNotReady(_))));
    }
}
