//! Rendering systems for the map surface (gizmos for geometry, egui for labels).

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::{egui, EguiContexts};

use crate::config::AppConfig;
use crate::constants::GRATICULE_STEP_DEGREES;
use crate::measure::{
    CircleStyle, Coordinate, CursorStyle, LayerDescriptor, LayerPaint, LineStyle, SourceData,
    SymbolStyle,
};
use crate::theme;

use super::camera::{CameraZoom, MapCamera};
use super::projection::to_world;
use super::surface::MapSurface;

/// Dashes past this count are drawn as a solid line instead
const MAX_DASHES_PER_SEGMENT: usize = 10_000;

/// Graticule latitude extent (Mercator blows up near the poles)
const GRATICULE_MAX_LAT: f64 = 80.0;

/// Split a segment into dashes of `dash` length separated by `gap`.
pub fn dash_segments(start: Vec2, end: Vec2, dash: f32, gap: f32) -> Vec<(Vec2, Vec2)> {
    let length = start.distance(end);
    if dash <= 0.0 || length <= dash {
        return vec![(start, end)];
    }
    if (length / (dash + gap.max(0.0))) as usize > MAX_DASHES_PER_SEGMENT {
        return vec![(start, end)];
    }

    let dir = (end - start) / length;
    let mut segments = Vec::new();
    let mut t = 0.0;
    while t < length {
        let stop = (t + dash).min(length);
        segments.push((start + dir * t, start + dir * stop));
        t = stop + gap;
    }
    segments
}

pub fn draw_graticule(mut gizmos: Gizmos, config: Res<AppConfig>) {
    if !config.data.show_graticule {
        return;
    }

    let steps = (360.0 / GRATICULE_STEP_DEGREES) as i32;
    for i in 0..=steps {
        let lng = -180.0 + i as f64 * GRATICULE_STEP_DEGREES;
        let color = if lng == 0.0 {
            theme::GRATICULE_MAJOR_COLOR
        } else {
            theme::GRATICULE_COLOR
        };
        gizmos.line_2d(
            to_world(Coordinate::new(lng, -GRATICULE_MAX_LAT)),
            to_world(Coordinate::new(lng, GRATICULE_MAX_LAT)),
            color,
        );
    }

    let steps = (2.0 * GRATICULE_MAX_LAT / GRATICULE_STEP_DEGREES) as i32;
    for i in 0..=steps {
        let lat = -GRATICULE_MAX_LAT + i as f64 * GRATICULE_STEP_DEGREES;
        let color = if lat == 0.0 {
            theme::GRATICULE_MAJOR_COLOR
        } else {
            theme::GRATICULE_COLOR
        };
        gizmos.line_2d(
            to_world(Coordinate::new(-180.0, lat)),
            to_world(Coordinate::new(180.0, lat)),
            color,
        );
    }
}

fn draw_circles(
    gizmos: &mut Gizmos,
    layer: &LayerDescriptor,
    data: &SourceData,
    style: &CircleStyle,
    scale: f32,
) {
    let radius = style.radius * scale;
    for feature in layer.visible_features(data) {
        let Some(coordinate) = feature.point_coordinate() else {
            continue;
        };
        let center = to_world(coordinate);
        // Gizmo circles are outlines; concentric rings approximate a fill
        for ring in 1..=3 {
            gizmos.circle_2d(center, radius * ring as f32 / 3.0, style.color);
        }
        gizmos.circle_2d(center, radius + style.stroke_width * scale, style.stroke_color);
    }
}

fn draw_lines(
    gizmos: &mut Gizmos,
    layer: &LayerDescriptor,
    data: &SourceData,
    style: &LineStyle,
    scale: f32,
) {
    for feature in layer.visible_features(data) {
        let Some(coordinates) = feature.line_coordinates() else {
            continue;
        };
        let points: Vec<Vec2> = coordinates.iter().map(|c| to_world(*c)).collect();

        for window in points.windows(2) {
            match style.dash {
                Some([dash, gap]) => {
                    let unit = style.width * scale;
                    for (a, b) in dash_segments(window[0], window[1], dash * unit, gap * unit) {
                        gizmos.line_2d(a, b, style.color);
                    }
                }
                None => gizmos.line_2d(window[0], window[1], style.color),
            }
        }

        if style.round_caps {
            for point in &points {
                gizmos.circle_2d(*point, style.width * scale / 2.0, style.color);
            }
        }
    }
}

/// Draw circle and line layers in stack order
pub fn render_surface_layers(
    mut gizmos: Gizmos,
    surface: Res<MapSurface>,
    camera_query: Query<&CameraZoom, With<MapCamera>>,
) {
    let scale = camera_query.single().map(|z| z.scale).unwrap_or(1.0);

    for layer in surface.layers() {
        let Some(data) = surface.source(&layer.source) else {
            continue;
        };
        match &layer.paint {
            LayerPaint::Circle(style) => draw_circles(&mut gizmos, layer, data, style, scale),
            LayerPaint::Line(style) => draw_lines(&mut gizmos, layer, data, style, scale),
            // Text goes through egui
            LayerPaint::Symbol(_) => {}
        }
    }
}

fn label_text(style: &SymbolStyle) -> egui::RichText {
    egui::RichText::new(&style.text)
        .color(theme::bevy_to_egui(style.color))
        .size(style.font_size)
        .strong()
}

/// Render symbol layers as screen-space egui labels
pub fn render_surface_labels(
    mut contexts: EguiContexts,
    camera_query: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
    surface: Res<MapSurface>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return Ok(());
    };

    for layer in surface.layers() {
        let LayerPaint::Symbol(style) = &layer.paint else {
            continue;
        };
        let Some(data) = surface.source(&layer.source) else {
            continue;
        };

        for (index, feature) in layer.visible_features(data).enumerate() {
            let Some(coordinate) = feature.point_coordinate() else {
                continue;
            };
            let world_pos = to_world(coordinate);
            let Ok(screen_pos) = camera.world_to_viewport(camera_transform, world_pos.extend(0.0))
            else {
                continue;
            };

            let offset = egui::vec2(
                style.offset[0] * style.font_size,
                style.offset[1] * style.font_size,
            );

            egui::Area::new(egui::Id::new((layer.id.as_str(), index)))
                .fixed_pos(egui::pos2(screen_pos.x, screen_pos.y) + offset)
                .pivot(egui::Align2::CENTER_CENTER)
                .interactable(false)
                .show(ctx, |ui| {
                    egui::Frame::NONE
                        .inner_margin(egui::Margin::same(style.halo_width as i8))
                        .fill(theme::bevy_to_egui(style.halo_color))
                        .corner_radius(3.0)
                        .show(ui, |ui| {
                            ui.label(label_text(style));
                        });
                });
        }
    }
    Ok(())
}

/// Mirror the surface's cursor hint onto the window
pub fn sync_cursor_icon(
    surface: Res<MapSurface>,
    window_query: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok(entity) = window_query.single() else {
        return;
    };

    // Use default cursor over UI
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        commands
            .entity(entity)
            .insert(CursorIcon::System(SystemCursorIcon::Default));
        return;
    }

    let icon = match surface.cursor() {
        CursorStyle::Default => SystemCursorIcon::Default,
        CursorStyle::Crosshair => SystemCursorIcon::Crosshair,
        CursorStyle::Pointer => SystemCursorIcon::Pointer,
    };
    commands.entity(entity).insert(CursorIcon::System(icon));
}
