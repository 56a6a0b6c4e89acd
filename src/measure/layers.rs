//! Registration and teardown of the measurement source and its two layers.

use super::error::MeasureResult;
use super::styles::{self, LINES_LAYER, MEASUREMENT_SOURCE, POINTS_LAYER};
use super::surface::{RenderSurface, SourceData};
use super::types::MeasurementCollection;

pub fn register_layers(
    surface: &mut impl RenderSurface,
    initial: &MeasurementCollection,
) -> MeasureResult<()> {
    surface.add_source(MEASUREMENT_SOURCE, SourceData::Collection(initial.clone()))?;
    surface.add_layer(styles::points_layer())?;
    surface.add_layer(styles::lines_layer())?;
    Ok(())
}

/// Remove both layers, then the source. Missing targets are skipped.
pub fn unregister_layers(surface: &mut impl RenderSurface) -> MeasureResult<()> {
    if surface.has_layer(POINTS_LAYER) {
        surface.remove_layer(POINTS_LAYER)?;
    }
    if surface.has_layer(LINES_LAYER) {
        surface.remove_layer(LINES_LAYER)?;
    }
    if surface.has_source(MEASUREMENT_SOURCE) {
        surface.remove_source(MEASUREMENT_SOURCE)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapSurface;
    use crate::measure::error::MeasureError;

    #[test]
    fn test_register_adds_source_and_layers() {
        let mut surface = MapSurface::ready();
        register_layers(&mut surface, &MeasurementCollection::new()).unwrap();

        assert!(surface.has_source(MEASUREMENT_SOURCE));
        assert!(surface.has_layer(POINTS_LAYER));
        assert!(surface.has_layer(LINES_LAYER));
    }

    #[test]
    fn test_register_twice_fails() {
        let mut surface = MapSurface::ready();
        register_layers(&mut surface, &MeasurementCollection::new()).unwrap();
        let result = register_layers(&mut surface, &MeasurementCollection::new());
        assert_eq!(
            result,
            Err(MeasureError::DuplicateSource(MEASUREMENT_SOURCE.to_string()))
        );
    }

    #[test]
    fn test_unregister_is_idempotent() {
        let mut surface = MapSurface::ready();
        register_layers(&mut surface, &MeasurementCollection::new()).unwrap();

        unregister_layers(&mut surface).unwrap();
        unregister_layers(&mut surface).unwrap();

        assert!(!surface.has_source(MEASUREMENT_SOURCE));
        assert!(!surface.has_layer(POINTS_LAYER));
        assert!(!surface.has_layer(LINES_LAYER));
    }

    #[test]
    fn test_unregister_tolerates_partial_teardown() {
        let mut surface = MapSurface::ready();
        register_layers(&mut surface, &MeasurementCollection::new()).unwrap();
        surface.remove_layer(LINES_LAYER).unwrap();

        assert!(unregister_layers(&mut surface).is_ok());
        assert!(!surface.has_source(MEASUREMENT_SOURCE));
    }
}
