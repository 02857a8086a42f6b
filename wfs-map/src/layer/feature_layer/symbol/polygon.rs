use crate::layer::feature_layer::symbol::VisualStyle;
use crate::Color;

/// Renders a polygon geometry as a translucent filled polygon with an outline of the same color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplePolygonSymbol {
    /// Color of the inner area of the polygon.
    pub fill_color: Color,
    /// Color of the outline.
    pub stroke_color: Color,
    /// Width of the outline in pixels.
    pub stroke_width: f64,
    /// Opacity of the inner area.
    pub fill_opacity: f64,
}

impl SimplePolygonSymbol {
    /// Creates a new instance with the same fill and stroke color.
    pub fn new(color: Color) -> Self {
        Self {
            fill_color: color,
            stroke_color: color,
            stroke_width: 2.0,
            fill_opacity: 0.2,
        }
    }

    /// Creates a new instance from a copy of the current, but with the given stroke color.
    pub fn with_stroke_color(&self, stroke_color: Color) -> Self {
        Self {
            stroke_color,
            ..*self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given stroke width.
    pub fn with_stroke_width(&self, stroke_width: f64) -> Self {
        Self {
            stroke_width,
            ..*self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given fill opacity.
    pub fn with_fill_opacity(&self, fill_opacity: f64) -> Self {
        Self {
            fill_opacity,
            ..*self
        }
    }

    /// Style of a polygon feature.
    pub fn style(&self) -> VisualStyle {
        VisualStyle {
            stroke_color: self.stroke_color,
            stroke_width: self.stroke_width,
            stroke_opacity: 1.0,
            fill_color: self.fill_color,
            fill_opacity: self.fill_opacity,
        }
    }
}
