use bevy::ecs::system::SystemParam;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::config::AppConfig;
use crate::constants::{MAX_ZOOM_SCALE, MIN_ZOOM_SCALE};
use crate::measure::Coordinate;

use super::projection::to_world;
use super::surface::MapSurface;

#[derive(Component)]
pub struct MapCamera;

#[derive(Component)]
pub struct CameraZoom {
    pub scale: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Bundled camera and window queries for cursor-to-world calculations
#[derive(SystemParam)]
pub struct CameraParams<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub camera: Query<'w, 's, (&'static Camera, &'static GlobalTransform), With<MapCamera>>,
}

impl CameraParams<'_, '_> {
    /// Get the world position of the cursor, if available
    pub fn cursor_world_pos(&self) -> Option<Vec2> {
        let window = self.window.single().ok()?;
        let (camera, transform) = self.camera.single().ok()?;
        let cursor_pos = window.cursor_position()?;
        camera.viewport_to_world_2d(transform, cursor_pos).ok()
    }
}

/// Check if the cursor is over egui UI
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}

pub fn spawn_camera(mut commands: Commands, config: Res<AppConfig>) {
    let [lng, lat] = config.data.start_center;
    let center = to_world(Coordinate::new(lng, lat));
    let scale = config.data.start_zoom.clamp(MIN_ZOOM_SCALE, MAX_ZOOM_SCALE);

    commands.spawn((
        Camera2d,
        MapCamera,
        CameraZoom { scale },
        Transform::from_translation(center.extend(1000.0)),
    ));
}

/// Pan with the middle or right mouse button
pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<bevy::input::mouse::MouseMotion>,
    mut camera_query: Query<(&mut Transform, &CameraZoom), With<MapCamera>>,
) {
    if !mouse_button.pressed(MouseButton::Middle) && !mouse_button.pressed(MouseButton::Right) {
        mouse_motion.clear();
        return;
    }

    let Ok((mut transform, zoom)) = camera_query.single_mut() else {
        return;
    };

    for event in mouse_motion.read() {
        let delta = event.delta * zoom.scale;
        transform.translation.x -= delta.x;
        transform.translation.y += delta.y;
    }
}

pub fn camera_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<&mut CameraZoom, With<MapCamera>>,
) {
    let Ok(mut zoom) = camera_query.single_mut() else {
        return;
    };

    for event in scroll_events.read() {
        let scroll_amount = match event.unit {
            MouseScrollUnit::Line => event.y * 0.1,
            MouseScrollUnit::Pixel => event.y * 0.001,
        };

        // Multiplicative so zooming feels the same at every scale
        zoom.scale = (zoom.scale * (1.0 - scroll_amount)).clamp(MIN_ZOOM_SCALE, MAX_ZOOM_SCALE);
    }
}

pub fn apply_camera_zoom(
    mut camera_query: Query<(&CameraZoom, &mut Projection), (With<MapCamera>, Changed<CameraZoom>)>,
    mut surface: ResMut<MapSurface>,
) {
    for (zoom, mut projection) in camera_query.iter_mut() {
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = zoom.scale;
        }
        // Hit-testing tolerances are in screen pixels
        surface.view_scale = zoom.scale;
    }
}
