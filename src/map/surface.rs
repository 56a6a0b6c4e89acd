//! In-memory render surface backing the map view.
//!
//! Holds named sources and an ordered layer stack. The rendering systems read
//! it every frame; only the measurement controller writes to it.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::measure::{
    Coordinate, CursorStyle, Feature, LayerDescriptor, LayerPaint, MeasureError, MeasureResult,
    RenderSurface, SourceData, SurfaceEvent,
};

use super::hit_testing::point_near_feature;
use super::projection::to_world;

/// Default hit radius around rendered features, in screen pixels
const DEFAULT_HIT_TOLERANCE_PX: f32 = 8.0;

#[derive(Resource, Debug)]
pub struct MapSurface {
    sources: HashMap<String, SourceData>,
    layers: Vec<LayerDescriptor>,
    subscriptions: HashSet<SurfaceEvent>,
    cursor: CursorStyle,
    style_loaded: bool,
    /// Hit radius in screen pixels
    pub hit_tolerance_px: f32,
    /// World units per screen pixel (camera orthographic scale)
    pub view_scale: f32,
}

impl Default for MapSurface {
    fn default() -> Self {
        Self {
            sources: HashMap::new(),
            layers: Vec::new(),
            subscriptions: HashSet::new(),
            cursor: CursorStyle::Default,
            style_loaded: false,
            hit_tolerance_px: DEFAULT_HIT_TOLERANCE_PX,
            view_scale: 1.0,
        }
    }
}

impl MapSurface {
    /// A surface whose style has already loaded.
    pub fn ready() -> Self {
        Self {
            style_loaded: true,
            ..default()
        }
    }

    pub fn mark_style_loaded(&mut self) {
        self.style_loaded = true;
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn is_subscribed(&self, event: SurfaceEvent) -> bool {
        self.subscriptions.contains(&event)
    }

    pub fn source(&self, name: &str) -> Option<&SourceData> {
        self.sources.get(name)
    }

    /// Layers in draw order (first is drawn first).
    pub fn layers(&self) -> &[LayerDescriptor] {
        &self.layers
    }

    /// Hit radius for a layer in world units, including its drawn size.
    fn hit_radius(&self, layer: &LayerDescriptor) -> f32 {
        let drawn = match &layer.paint {
            LayerPaint::Circle(style) => style.radius + style.stroke_width,
            LayerPaint::Line(style) => style.width / 2.0,
            LayerPaint::Symbol(_) => 0.0,
        };
        (self.hit_tolerance_px + drawn) * self.view_scale
    }
}

#[cfg(test)]
impl MapSurface {
    pub fn layer(&self, id: &str) -> Option<&LayerDescriptor> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layer_ids(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|l| l.id.as_str())
    }
}

impl RenderSurface for MapSurface {
    fn add_source(&mut self, name: &str, data: SourceData) -> MeasureResult<()> {
        if self.sources.contains_key(name) {
            return Err(MeasureError::DuplicateSource(name.to_string()));
        }
        self.sources.insert(name.to_string(), data);
        Ok(())
    }

    fn remove_source(&mut self, name: &str) -> MeasureResult<()> {
        if let Some(layer) = self.layers.iter().find(|l| l.source == name) {
            return Err(MeasureError::InvariantViolation(format!(
                "source '{}' is still used by layer '{}'",
                name, layer.id
            )));
        }
        self.sources
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| MeasureError::MissingSource(name.to_string()))
    }

    fn has_source(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    fn add_layer(&mut self, layer: LayerDescriptor) -> MeasureResult<()> {
        if self.has_layer(&layer.id) {
            return Err(MeasureError::DuplicateLayer(layer.id));
        }
        if !self.has_source(&layer.source) {
            return Err(MeasureError::MissingSource(layer.source));
        }
        self.layers.push(layer);
        Ok(())
    }

    fn remove_layer(&mut self, name: &str) -> MeasureResult<()> {
        let Some(index) = self.layers.iter().position(|l| l.id == name) else {
            return Err(MeasureError::MissingLayer(name.to_string()));
        };
        self.layers.remove(index);
        Ok(())
    }

    fn has_layer(&self, name: &str) -> bool {
        self.layers.iter().any(|l| l.id == name)
    }

    fn set_source_data(&mut self, name: &str, data: SourceData) -> MeasureResult<()> {
        let Some(slot) = self.sources.get_mut(name) else {
            return Err(MeasureError::MissingSource(name.to_string()));
        };
        *slot = data;
        Ok(())
    }

    fn subscribe(&mut self, event: SurfaceEvent) {
        self.subscriptions.insert(event);
    }

    fn query_features_at_point(&self, point: Coordinate, layers: &[&str]) -> Vec<Feature> {
        let world = to_world(point);
        self.layers
            .iter()
            .filter(|layer| layers.contains(&layer.id.as_str()))
            .filter_map(|layer| {
                self.sources
                    .get(&layer.source)
                    .map(|data| (layer, data, self.hit_radius(layer)))
            })
            .flat_map(|(layer, data, radius)| {
                layer
                    .visible_features(data)
                    .filter(move |f| point_near_feature(world, f, radius))
                    .cloned()
            })
            .collect()
    }

    fn set_cursor_style(&mut self, style: CursorStyle) {
        self.cursor = style;
    }

    fn is_style_loaded(&self) -> bool {
        self.style_loaded
    }
}
