//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// World units per degree of longitude at zoom scale 1.0
pub const PIXELS_PER_DEGREE: f64 = 8.0;

/// Web Mercator latitude limit in degrees
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

/// Mean Earth radius in kilometers (IUGG), the radius turf-style length uses
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Kilometers to statute miles
pub const KM_TO_MILES: f64 = 0.621371;

/// Graticule spacing in degrees
pub const GRATICULE_STEP_DEGREES: f64 = 10.0;

/// Camera zoom bounds (orthographic scale)
pub const MIN_ZOOM_SCALE: f32 = 0.01;
pub const MAX_ZOOM_SCALE: f32 = 10.0;
