//! Legend band below the plot for multi-dataset charts.

use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::{estimate_text_width_px, truncate_to_width};

// Layout constants shared by the estimator and the drawer.
const FONT_PX: u32 = 14;
const LINE_H: i32 = FONT_PX as i32 + 4;
const ROW_GAP: i32 = 4;
const PAD_BAND: i32 = 8;
const SWATCH_W: i32 = 24;
const SWATCH_TO_TEXT: i32 = 8;
const TRAILING_GAP: i32 = 20;

/// Greedy row packing: returns rows of (label index, block width).
fn pack_rows(labels: &[String], start_x: i32, total_w: i32) -> Vec<Vec<(usize, i32)>> {
    let usable = (total_w - start_x - PAD_BAND).max(80);
    let text_cap = (usable - SWATCH_W - SWATCH_TO_TEXT - TRAILING_GAP).max(40) as u32;

    let mut rows: Vec<Vec<(usize, i32)>> = Vec::new();
    let mut cur: Vec<(usize, i32)> = Vec::new();
    let mut x = 0;
    for (i, label) in labels.iter().enumerate() {
        let text_w = estimate_text_width_px(label, FONT_PX).min(text_cap) as i32;
        let block_w = SWATCH_W + SWATCH_TO_TEXT + text_w + TRAILING_GAP;
        if x + block_w > usable && !cur.is_empty() {
            rows.push(std::mem::take(&mut cur));
            x = 0;
        }
        cur.push((i, block_w));
        x += block_w;
    }
    if !cur.is_empty() {
        rows.push(cur);
    }
    rows
}

/// Height in pixels the legend band needs for `labels`.
pub fn legend_band_height_px(labels: &[String], start_x: i32, total_w: i32) -> i32 {
    let rows = pack_rows(labels, start_x, total_w).len().max(1) as i32;
    PAD_BAND * 2 + rows * LINE_H + (rows - 1) * ROW_GAP
}

/// Draw legend entries (colour swatch + label) flowing left to right, starting at
/// `start_x` so the first entry lines up with the plot's y axis.
pub fn draw_legend_band<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    items: &[(String, RGBColor)],
    start_x: i32,
) -> Result<()> {
    let (w, _) = area.dim_in_pixel();
    let labels: Vec<String> = items.iter().map(|(l, _)| l.clone()).collect();
    let rows = pack_rows(&labels, start_x, w as i32);
    let text_cap = (w as i32 - start_x - PAD_BAND - SWATCH_W - SWATCH_TO_TEXT - TRAILING_GAP)
        .max(40) as u32;
    let font: TextStyle =
        TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));

    let mut y = PAD_BAND + LINE_H / 2;
    for row in rows {
        let mut x = start_x;
        for (idx, block_w) in row {
            let (label, color) = &items[idx];
            area.draw(&PathElement::new(
                vec![(x, y), (x + SWATCH_W, y)],
                color.stroke_width(3),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
            area.draw(&Text::new(
                truncate_to_width(label, FONT_PX, text_cap),
                (x + SWATCH_W + SWATCH_TO_TEXT, y),
                font.clone(),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
            x += block_w;
        }
        y += LINE_H + ROW_GAP;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("pull requests series {i}")).collect()
    }

    #[test]
    fn one_row_for_few_items() {
        let h1 = legend_band_height_px(&labels(2), 60, 1000);
        assert_eq!(h1, PAD_BAND * 2 + LINE_H);
    }

    #[test]
    fn narrow_canvas_wraps_into_more_rows() {
        let wide = legend_band_height_px(&labels(6), 60, 2000);
        let narrow = legend_band_height_px(&labels(6), 60, 400);
        assert!(narrow > wide);
    }
}
