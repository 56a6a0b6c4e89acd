//! Capability contract for the map render surface.
//!
//! The measurement core only talks to the map through [`RenderSurface`]. The
//! surface owns drawing, panning and hit-testing; the core owns the data.

use bevy::prelude::Color;

use super::error::MeasureResult;
use super::types::{Coordinate, Feature, MeasurementCollection};

/// Data bound to a named source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceData {
    Collection(MeasurementCollection),
    Feature(Feature),
}

impl SourceData {
    pub fn features(&self) -> &[Feature] {
        match self {
            SourceData::Collection(collection) => &collection.features,
            SourceData::Feature(feature) => std::slice::from_ref(feature),
        }
    }
}

/// Which geometry kind a layer draws from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFilter {
    Point,
    LineString,
}

impl GeometryFilter {
    pub fn matches(&self, feature: &Feature) -> bool {
        match self {
            GeometryFilter::Point => feature.is_point(),
            GeometryFilter::LineString => feature.is_line(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleStyle {
    pub radius: f32,
    pub color: Color,
    pub stroke_color: Color,
    pub stroke_width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f32,
    /// Dash and gap lengths, in multiples of `width`.
    pub dash: Option<[f32; 2]>,
    pub round_caps: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolStyle {
    pub text: String,
    pub font_size: f32,
    pub color: Color,
    pub halo_color: Color,
    pub halo_width: f32,
    /// Offset from the anchor in ems.
    pub offset: [f32; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerPaint {
    Circle(CircleStyle),
    Line(LineStyle),
    Symbol(SymbolStyle),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerDescriptor {
    pub id: String,
    pub source: String,
    pub paint: LayerPaint,
    pub filter: Option<GeometryFilter>,
}

impl LayerDescriptor {
    /// Features of `data` this layer draws.
    pub fn visible_features<'a>(&self, data: &'a SourceData) -> impl Iterator<Item = &'a Feature> {
        let filter = self.filter;
        data.features()
            .iter()
            .filter(move |f| filter.is_none_or(|kind| kind.matches(f)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Crosshair,
    Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceEvent {
    Click,
    PointerMove,
}

/// Operations the measurement core needs from a map.
pub trait RenderSurface {
    fn add_source(&mut self, name: &str, data: SourceData) -> MeasureResult<()>;
    fn remove_source(&mut self, name: &str) -> MeasureResult<()>;
    fn has_source(&self, name: &str) -> bool;

    fn add_layer(&mut self, layer: LayerDescriptor) -> MeasureResult<()>;
    fn remove_layer(&mut self, name: &str) -> MeasureResult<()>;
    fn has_layer(&self, name: &str) -> bool;

    fn set_source_data(&mut self, name: &str, data: SourceData) -> MeasureResult<()>;

    /// Ask the host to route events of this kind to the controller.
    fn subscribe(&mut self, event: SurfaceEvent);

    fn query_features_at_point(&self, point: Coordinate, layers: &[&str]) -> Vec<Feature>;

    fn set_cursor_style(&mut self, style: CursorStyle);

    /// False until the surface has finished loading its style.
    fn is_style_loaded(&self) -> bool;
}
