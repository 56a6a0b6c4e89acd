//! Interactive distance measurement on the map.
//!
//! Clicks while the tool is armed build groups of points. Every group with two
//! or more points gets a line through them and a distance label.
//!
//! ## Module Structure
//!
//! - [`types`] - GeoJSON data model (Coordinate, Feature, MeasurementCollection)
//! - [`ids`] - Id generators for points and groups
//! - [`surface`] - Render surface capability trait and layer descriptors
//! - [`styles`] - Source/layer names and paint rules
//! - [`geometry`] - Point/line builders and pushing data to the surface
//! - [`layers`] - Registration and teardown of the measurement layers
//! - [`geodesy`] - Great-circle distances
//! - [`label`] - Distance labels
//! - [`controller`] - Session state machine
//! - [`systems`] - Bevy input systems feeding the controller

mod controller;
mod error;
mod geodesy;
mod geometry;
mod ids;
mod label;
mod layers;
pub mod styles;
mod surface;
mod systems;
mod types;


pub use controller::MeasurementController;
pub use error::{MeasureError, MeasureResult};
pub use geodesy::km_to_miles;
pub use surface::{
    CircleStyle, CursorStyle, LayerDescriptor, LayerPaint, LineStyle, RenderSurface, SourceData,
    SurfaceEvent, SymbolStyle,
};
pub use systems::{MeasureStatus, ToggleMeasurementRequest};
pub use types::{Coordinate, Feature, FeatureProperties, Geometry, GroupId, MeasurementCollection};

use bevy::prelude::*;

use crate::map::SurfaceReady;

pub struct MeasurementPlugin;

impl Plugin for MeasurementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MeasurementController>()
            .init_resource::<MeasureStatus>()
            .add_message::<ToggleMeasurementRequest>()
            .add_systems(
                Startup,
                systems::initialize_measurement.after(SurfaceReady),
            )
            .add_systems(
                Update,
                (
                    systems::handle_measure_shortcut,
                    systems::toggle_measurement_system
                        .run_if(on_message::<ToggleMeasurementRequest>),
                    systems::handle_measure_click,
                    systems::handle_measure_escape,
                    systems::handle_measure_hover,
                )
                    .chain(),
            );
    }
}
