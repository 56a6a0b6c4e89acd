//! Centralized color theme for the application.
//!
//! This module provides all colors used for map rendering and the toolbar.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

// ============================================================================
// Map Background
// ============================================================================

/// Clear color behind the graticule
pub const MAP_BACKGROUND: Color = Color::srgb(0.12, 0.14, 0.17);

/// Semi-transparent grey graticule lines
pub const GRATICULE_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 0.3);

/// Slightly brighter equator and prime meridian
pub const GRATICULE_MAJOR_COLOR: Color = Color::srgba(0.7, 0.7, 0.7, 0.5);

// ============================================================================
// Measurement Colors
// ============================================================================

/// Measurement accent (#FF4444) for points, lines and label text
pub const MEASURE_ACCENT: Color = Color::srgb(1.0, 0.267, 0.267);

/// Point outline and label halo
pub const MEASURE_OUTLINE: Color = Color::WHITE;

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Green indicator while the measure tool is armed
    pub const MEASURING_ACTIVE: egui::Color32 = egui::Color32::from_rgb(100, 200, 100);

    /// Light grey for label text
    pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;
}

// ============================================================================
// Color Conversion Utilities
// ============================================================================

/// Convert a Bevy Color to egui Color32 (preserving alpha)
pub fn bevy_to_egui(color: Color) -> egui::Color32 {
    let srgba = color.to_srgba();
    egui::Color32::from_rgba_unmultiplied(
        (srgba.red * 255.0) as u8,
        (srgba.green * 255.0) as u8,
        (srgba.blue * 255.0) as u8,
        (srgba.alpha * 255.0) as u8,
    )
}
