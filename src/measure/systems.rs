//! Bevy systems that route input into the measurement controller.

use bevy::prelude::*;
use bevy::window::CursorMoved;
use bevy_egui::EguiContexts;

use crate::map::{is_cursor_over_ui, to_coordinate, CameraParams, MapSurface};

use super::controller::MeasurementController;
use super::error::MeasureResult;
use super::surface::SurfaceEvent;

/// Message to arm or disarm the measure tool
#[derive(Message)]
pub struct ToggleMeasurementRequest;

/// Last measurement error, shown in the toolbar
#[derive(Resource, Default)]
pub struct MeasureStatus {
    pub last_error: Option<String>,
}

impl MeasureStatus {
    fn record(&mut self, action: &str, result: MeasureResult<()>) {
        match result {
            Ok(()) => self.last_error = None,
            Err(e) => {
                error!("Measurement {} failed: {}", action, e);
                self.last_error = Some(e.to_string());
            }
        }
    }
}

/// Startup system registering the measurement layers once the surface is ready
pub fn initialize_measurement(
    mut controller: ResMut<MeasurementController>,
    mut surface: ResMut<MapSurface>,
    mut status: ResMut<MeasureStatus>,
) {
    controller.observe(|state| {
        debug!(
            "Measurement state: measuring={} start_new={}",
            state.is_measuring, state.start_new_measurement
        );
    });
    let result = controller.initialize(&mut *surface);
    status.record("initialize", result);
}

/// M toggles the tool unless a text field has focus
pub fn handle_measure_shortcut(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut toggle_events: MessageWriter<ToggleMeasurementRequest>,
) {
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyM) {
        toggle_events.write(ToggleMeasurementRequest);
    }
}

pub fn toggle_measurement_system(
    mut events: MessageReader<ToggleMeasurementRequest>,
    mut controller: ResMut<MeasurementController>,
    mut surface: ResMut<MapSurface>,
    mut status: ResMut<MeasureStatus>,
) {
    for _ in events.read() {
        // Toggle-off tears the layers down, so re-register before arming again
        if !controller.is_measuring()
            && let Err(e) = controller.ensure_initialized(&mut *surface)
        {
            status.record("re-initialize", Err(e));
            continue;
        }
        let result = controller.toggle(&mut *surface);
        status.record("toggle", result);
    }
}

pub fn handle_measure_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut controller: ResMut<MeasurementController>,
    mut surface: ResMut<MapSurface>,
    mut status: ResMut<MeasureStatus>,
    camera: CameraParams,
    mut contexts: EguiContexts,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    if !controller.is_measuring() || !surface.is_subscribed(SurfaceEvent::Click) {
        return;
    }

    if is_cursor_over_ui(&mut contexts) {
        return;
    }

    let Some(world_pos) = camera.cursor_world_pos() else {
        return;
    };

    let result = controller.handle_click(&mut *surface, to_coordinate(world_pos));
    status.record("click", result);
}

pub fn handle_measure_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut controller: ResMut<MeasurementController>,
    mut surface: ResMut<MapSurface>,
    mut status: ResMut<MeasureStatus>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) || !controller.is_measuring() {
        return;
    }
    let result = controller.handle_escape(&mut *surface);
    status.record("escape", result);
}

pub fn handle_measure_hover(
    mut cursor_moved: MessageReader<CursorMoved>,
    mut controller: ResMut<MeasurementController>,
    mut surface: ResMut<MapSurface>,
    camera: CameraParams,
) {
    // Only the latest position matters
    if cursor_moved.read().last().is_none() {
        return;
    }

    if !controller.is_measuring() || !surface.is_subscribed(SurfaceEvent::PointerMove) {
        return;
    }

    let Some(world_pos) = camera.cursor_world_pos() else {
        return;
    };

    controller.handle_pointer_move(&mut *surface, to_coordinate(world_pos));
}
