//! Style registry: source/layer names and the paint rules for each layer.

use crate::theme;

use super::surface::{
    CircleStyle, GeometryFilter, LayerDescriptor, LayerPaint, LineStyle, SymbolStyle,
};
use super::types::GroupId;

/// Source holding the measurement collection
pub const MEASUREMENT_SOURCE: &str = "measurements";

pub const POINTS_LAYER: &str = "measure-points";

pub const LINES_LAYER: &str = "measure-lines";

/// Prefix for per-group label sources and layers
pub const LABEL_PREFIX: &str = "measure-label-";

pub fn points_layer() -> LayerDescriptor {
    LayerDescriptor {
        id: POINTS_LAYER.to_string(),
        source: MEASUREMENT_SOURCE.to_string(),
        paint: LayerPaint::Circle(CircleStyle {
            radius: 5.0,
            color: theme::MEASURE_ACCENT,
            stroke_color: theme::MEASURE_OUTLINE,
            stroke_width: 2.0,
        }),
        filter: Some(GeometryFilter::Point),
    }
}

pub fn lines_layer() -> LayerDescriptor {
    LayerDescriptor {
        id: LINES_LAYER.to_string(),
        source: MEASUREMENT_SOURCE.to_string(),
        paint: LayerPaint::Line(LineStyle {
            color: theme::MEASURE_ACCENT,
            width: 2.5,
            dash: Some([2.0, 2.0]),
            round_caps: true,
        }),
        filter: Some(GeometryFilter::LineString),
    }
}

/// Source and layer share this id.
pub fn label_id(group: GroupId) -> String {
    format!("{}{}", LABEL_PREFIX, group)
}

pub fn label_layer(group: GroupId, text: String) -> LayerDescriptor {
    let id = label_id(group);
    LayerDescriptor {
        id: id.clone(),
        source: id,
        paint: LayerPaint::Symbol(SymbolStyle {
            text,
            font_size: 14.0,
            color: theme::MEASURE_ACCENT,
            halo_color: theme::MEASURE_OUTLINE,
            halo_width: 2.0,
            offset: [0.0, -1.0],
        }),
        filter: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_layers_read_measurement_source() {
        assert_eq!(points_layer().source, MEASUREMENT_SOURCE);
        assert_eq!(lines_layer().source, MEASUREMENT_SOURCE);
        assert_ne!(points_layer().id, lines_layer().id);
    }

    #[test]
    fn test_label_id_format() {
        assert_eq!(label_id(GroupId(17)), "measure-label-17");
        let layer = label_layer(GroupId(17), "1.00 km".into());
        assert_eq!(layer.id, layer.source);
    }
}
