//! Map view: camera, projection and the render surface measurements draw on.

mod camera;
mod hit_testing;
mod projection;
mod rendering;
mod surface;

pub use camera::{is_cursor_over_ui, CameraParams, CameraZoom, MapCamera};
pub use projection::{to_coordinate, to_world};
pub use surface::MapSurface;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::{AppConfig, ConfigLoaded};
use crate::theme;

/// System set marking the surface as ready for layer registration
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceReady;

/// Startup system applying config and flagging the surface style as loaded
fn prepare_surface(config: Res<AppConfig>, mut surface: ResMut<MapSurface>) {
    surface.hit_tolerance_px = config.data.hit_tolerance_px;
    surface.mark_style_loaded();
    info!("Map surface ready");
}

pub struct MapPlugin;

impl Plugin for MapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapSurface>()
            .insert_resource(ClearColor(theme::MAP_BACKGROUND))
            .add_systems(
                Startup,
                (camera::spawn_camera, prepare_surface)
                    .chain()
                    .after(ConfigLoaded)
                    .in_set(SurfaceReady),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan,
                    camera::camera_zoom,
                    camera::apply_camera_zoom,
                    rendering::draw_graticule,
                    rendering::render_surface_layers,
                    rendering::sync_cursor_icon,
                ),
            )
            .add_systems(EguiPrimaryContextPass, rendering::render_surface_labels);
    }
}
