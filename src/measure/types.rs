//! GeoJSON-shaped data model for measurement geometry.
//!
//! The collection serializes as a GeoJSON `FeatureCollection`, which is the wire
//! format handed to the render surface.

use serde::{Deserialize, Serialize};

/// Geographic position in degrees, serialized as `[lng, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lng, c.lat]
    }
}

/// Identifies one measurement chain (its points and derived line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub u64);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Coordinate },
    LineString { coordinates: Vec<Coordinate> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "measurementGroup")]
    pub measurement_group: GroupId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: FeatureProperties,
}

impl Feature {
    pub fn group(&self) -> GroupId {
        self.properties.measurement_group
    }

    pub fn is_point(&self) -> bool {
        matches!(self.geometry, Geometry::Point { .. })
    }

    pub fn is_line(&self) -> bool {
        matches!(self.geometry, Geometry::LineString { .. })
    }

    /// Coordinate of a point feature, `None` for lines.
    pub fn point_coordinate(&self) -> Option<Coordinate> {
        match self.geometry {
            Geometry::Point { coordinates } => Some(coordinates),
            Geometry::LineString { .. } => None,
        }
    }

    /// Vertices of a line feature, `None` for points.
    pub fn line_coordinates(&self) -> Option<&[Coordinate]> {
        match &self.geometry {
            Geometry::LineString { coordinates } => Some(coordinates),
            Geometry::Point { .. } => None,
        }
    }
}

/// Ordered set of point and line features making up the live measurement state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct MeasurementCollection {
    pub features: Vec<Feature>,
}

impl MeasurementCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn clear(&mut self) {
        self.features.clear();
    }

    pub fn last_group(&self) -> Option<GroupId> {
        self.features.last().map(Feature::group)
    }

    /// Points of `group` in click order.
    pub fn points_in_group(&self, group: GroupId) -> Vec<&Feature> {
        self.features
            .iter()
            .filter(|f| f.is_point() && f.group() == group)
            .collect()
    }

    pub fn line_for_group(&self, group: GroupId) -> Option<&Feature> {
        self.features
            .iter()
            .find(|f| f.is_line() && f.group() == group)
    }

    pub fn remove_line_for_group(&mut self, group: GroupId) {
        self.features
            .retain(|f| !(f.is_line() && f.group() == group));
    }

    pub fn lines(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(|f| f.is_line())
    }

    /// Distinct groups in order of first appearance.
    pub fn groups(&self) -> Vec<GroupId> {
        let mut groups = Vec::new();
        for feature in &self.features {
            if !groups.contains(&feature.group()) {
                groups.push(feature.group());
            }
        }
        groups
    }
}

/// Tool state owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub is_measuring: bool,
    pub start_new_measurement: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            is_measuring: false,
            start_new_measurement: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lng: f64, lat: f64, group: u64) -> Feature {
        Feature {
            geometry: Geometry::Point {
                coordinates: Coordinate::new(lng, lat),
            },
            properties: FeatureProperties {
                id: Some(format!("p{}", group)),
                measurement_group: GroupId(group),
            },
        }
    }

    #[test]
    fn test_session_state_default() {
        let state = SessionState::default();
        assert!(!state.is_measuring);
        assert!(state.start_new_measurement);
    }

    #[test]
    fn test_collection_serializes_as_geojson() {
        let mut collection = MeasurementCollection::new();
        collection.push(point(1.5, 2.5, 7));

        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["type"], "Feature");
        assert_eq!(json["features"][0]["geometry"]["type"], "Point");
        assert_eq!(
            json["features"][0]["geometry"]["coordinates"],
            serde_json::json!([1.5, 2.5])
        );
        assert_eq!(json["features"][0]["properties"]["measurementGroup"], 7);
    }

    #[test]
    fn test_line_omits_id_property() {
        let line = Feature {
            geometry: Geometry::LineString {
                coordinates: vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)],
            },
            properties: FeatureProperties {
                id: None,
                measurement_group: GroupId(3),
            },
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["geometry"]["type"], "LineString");
        assert!(json["properties"].get("id").is_none());
    }

    #[test]
    fn test_parse_feature_collection() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [10.0, 20.0] },
                "properties": { "id": "1", "measurementGroup": 42 }
            }]
        }"#;
        let parsed: MeasurementCollection = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.features[0].group(), GroupId(42));
        assert_eq!(
            parsed.features[0].point_coordinate(),
            Some(Coordinate::new(10.0, 20.0))
        );
    }

    #[test]
    fn test_groups_in_first_appearance_order() {
        let mut collection = MeasurementCollection::new();
        collection.push(point(0.0, 0.0, 5));
        collection.push(point(0.0, 0.0, 2));
        collection.push(point(0.0, 0.0, 5));
        assert_eq!(collection.groups(), vec![GroupId(5), GroupId(2)]);
        assert_eq!(collection.last_group(), Some(GroupId(5)));
        assert_eq!(collection.points_in_group(GroupId(5)).len(), 2);
    }
}
