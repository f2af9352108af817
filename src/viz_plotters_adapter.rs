//! Adapter helpers to use `DatasetStyle` with the plotters crate.
//!
//! Usage example (inside a plotting function):
//! ```ignore
//!     let stroke = line_style(&dataset.style);
//!     chart.draw_series(LineSeries::new(points.clone(), stroke))?;
//!     chart.draw_series(points.iter().map(|p| Circle::new(*p, 3, marker_style(&dataset.style))))?;
//! ```

use plotters::prelude::*;

use crate::viz_style::{DatasetStyle, Rgb8};

pub fn rgb_color(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Stroke style for lines and bar borders.
pub fn line_style(style: &DatasetStyle) -> ShapeStyle {
    rgb_color(style.color).stroke_width(style.line_width)
}

/// Solid fill for bars and point markers.
pub fn marker_style(style: &DatasetStyle) -> ShapeStyle {
    rgb_color(style.color).filled()
}

/// Translucent fill for areas under a line.
pub fn area_style(style: &DatasetStyle) -> ShapeStyle {
    rgb_color(style.color).mix(0.20).filled()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_carry_colour_and_width() {
        let style = DatasetStyle::new(Rgb8::new(1, 2, 3)).with_line_width(4);
        let s = line_style(&style);
        assert_eq!(s.stroke_width, 4);
        assert!(!s.filled);
        assert_eq!(s.color, RGBColor(1, 2, 3).to_rgba());
        assert!(marker_style(&style).filled);
        assert!((area_style(&style).color.3 - 0.20).abs() < 1e-9);
    }
}
