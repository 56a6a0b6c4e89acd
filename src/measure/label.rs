//! Distance labels placed on measurement lines.
//!
//! The label sits on the vertex at index `n / 2` of the line rather than at the
//! arc-length midpoint. For two-point lines that is the end point.

use super::error::{MeasureError, MeasureResult};
use super::geodesy::{km_to_miles, path_length_km};
use super::styles::{label_id, label_layer};
use super::surface::{RenderSurface, SourceData};
use super::types::{Coordinate, Feature, FeatureProperties, Geometry, GroupId};

/// Computed length of a line and where its label went.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMeasurement {
    pub kilometers: f64,
    pub miles: f64,
    pub anchor: Coordinate,
}

pub fn format_distance(kilometers: f64) -> String {
    format!("{:.2} km\n({:.2} mi)", kilometers, km_to_miles(kilometers))
}

pub fn label_anchor(coordinates: &[Coordinate]) -> Option<Coordinate> {
    coordinates.get(coordinates.len() / 2).copied()
}

/// Remove the label for `group` if present.
pub fn remove_label(surface: &mut impl RenderSurface, group: GroupId) -> MeasureResult<()> {
    let id = label_id(group);
    if surface.has_layer(&id) {
        surface.remove_layer(&id)?;
    }
    if surface.has_source(&id) {
        surface.remove_source(&id)?;
    }
    Ok(())
}

/// Replace the label for `group` with one showing the current length of `line`.
pub fn refresh_label(
    surface: &mut impl RenderSurface,
    line: &Feature,
    group: GroupId,
) -> MeasureResult<LineMeasurement> {
    if !surface.is_style_loaded() {
        return Err(MeasureError::SurfaceNotReady(
            "style not loaded; cannot place distance label".to_string(),
        ));
    }

    let coordinates = line.line_coordinates().ok_or_else(|| {
        MeasureError::InvariantViolation(format!("label for group {} needs a line", group))
    })?;
    let anchor = label_anchor(coordinates).ok_or_else(|| {
        MeasureError::InvariantViolation(format!("line for group {} has no vertices", group))
    })?;

    remove_label(surface, group)?;

    let kilometers = path_length_km(coordinates);
    let id = label_id(group);
    let label_feature = Feature {
        geometry: Geometry::Point {
            coordinates: anchor,
        },
        properties: FeatureProperties {
            id: None,
            measurement_group: group,
        },
    };

    surface.add_source(&id, SourceData::Feature(label_feature))?;
    surface.add_layer(label_layer(group, format_distance(kilometers)))?;

    Ok(LineMeasurement {
        kilometers,
        miles: km_to_miles(kilometers),
        anchor,
    })
}
