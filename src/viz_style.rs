//! Per-dataset visual encoding: colour, fill, point markers, stroke width.
//!
//! Styles are plain immutable values chosen once when a chart spec is built.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Area fill under a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Fill {
    /// Stroke only (transparent background).
    #[default]
    None,
    /// Translucent area from the value axis origin up to the curve.
    Origin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatasetStyle {
    pub color: Rgb8,
    pub fill: Fill,
    /// Draw a marker at every data point.
    pub show_points: bool,
    pub line_width: u32,
}

impl DatasetStyle {
    pub const fn new(color: Rgb8) -> Self {
        Self {
            color,
            fill: Fill::None,
            show_points: true,
            line_width: 2,
        }
    }

    pub const fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub const fn with_points(mut self, show_points: bool) -> Self {
        self.show_points = show_points;
        self
    }

    pub const fn with_line_width(mut self, line_width: u32) -> Self {
        self.line_width = line_width;
        self
    }

    /// Palette style for the `idx`-th dataset of a chart.
    pub fn palette(idx: usize) -> Self {
        Self::new(palette_color(idx))
    }
}

/// Dashboard palette (Bootstrap-like: blue, green, red, orange, purple, teal, gray, yellow).
pub const PALETTE: [Rgb8; 8] = [
    Rgb8::new(0x00, 0x7B, 0xFF), // blue   (#007BFF)
    Rgb8::new(0x28, 0xA7, 0x45), // green  (#28A745)
    Rgb8::new(0xDC, 0x35, 0x45), // red    (#DC3545)
    Rgb8::new(0xFD, 0x7E, 0x14), // orange (#FD7E14)
    Rgb8::new(0x6F, 0x42, 0xC1), // purple (#6F42C1)
    Rgb8::new(0x20, 0xC9, 0x97), // teal   (#20C997)
    Rgb8::new(0x6C, 0x75, 0x7D), // gray   (#6C757D)
    Rgb8::new(0xFF, 0xC1, 0x07), // yellow (#FFC107)
];

#[inline]
pub fn palette_color(idx: usize) -> Rgb8 {
    PALETTE[idx % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps() {
        assert_eq!(palette_color(0), palette_color(PALETTE.len()));
        assert_eq!(DatasetStyle::palette(2).color, PALETTE[2]);
    }
}
