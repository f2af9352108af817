//! Visualization: draw a [`RenderedChart`] with **plotters** to SVG.
//!
//! - `Line` charts: one curve per dataset, optional point markers and area fill
//! - `Bar` charts: grouped bars per label, one slot per dataset
//! - Legend band below the plot only for multi-dataset charts
//! - Locale-aware count ticks (`30,000` vs `30.000`); x ticks show the series labels
//! - Any visible window (pan/zoom) is drawn, not only the full extent

pub mod legend;
pub mod text;
pub mod types;
pub mod util;

// Re-export types for public API
pub use types::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MetricKind, RenderKind};

use crate::chart::{RenderedChart, ViewWindow};
use crate::viz_plotters_adapter::{area_style, line_style, marker_style, rgb_color};
use crate::viz_style::Fill;
use anyhow::{Result, anyhow};
use num_format::Locale;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::{AreaSeries, LineSeries};
use plotters::style::FontFamily;

use plotters_svg::SVGBackend;

use std::path::Path;

use legend::{draw_legend_band, legend_band_height_px};
use types::BAR_GROUP_WIDTH;
use util::{clip_polyline, compute_left_label_area_px, format_count, label_at, map_locale, x_label_count};

const MARGIN: i32 = 16;
const TICK_FONT_PX: u32 = 12;
const Y_TICKS: usize = 8;

/// Render `frame` through `window` into an SVG document held in `out`.
pub fn render_svg_string(
    frame: &RenderedChart,
    window: ViewWindow,
    out: &mut String,
    width: u32,
    height: u32,
    locale_tag: &str,
) -> Result<()> {
    {
        let root = SVGBackend::with_string(out, (width, height)).into_drawing_area();
        draw_chart(root, frame, window, map_locale(locale_tag))?;
    }
    Ok(())
}

/// Render `frame` at its default (fully zoomed-out) extent to an `.svg` file.
pub fn render_svg_file<P: AsRef<Path>>(
    frame: &RenderedChart,
    out_path: P,
    width: u32,
    height: u32,
    locale_tag: &str,
) -> Result<()> {
    let out_path = out_path.as_ref();
    if out_path.extension().and_then(|s| s.to_str()) != Some("svg") {
        return Err(anyhow!(
            "unsupported output {}, only .svg is produced",
            out_path.display()
        ));
    }
    let mut svg = String::new();
    render_svg_string(frame, frame.window, &mut svg, width, height, locale_tag)?;
    std::fs::write(out_path, svg)?;
    Ok(())
}

/// Helper that draws to any Plotters backend.
fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    frame: &RenderedChart,
    window: ViewWindow,
    locale: &Locale,
) -> Result<()>
where
    DB: DrawingBackend,
{
    // An empty label axis still gets its frame and mesh; the series loops draw nothing.
    if frame.labels.is_empty() {
        log::debug!("{}: empty series, drawing axes only", frame.surface_id);
    }

    // ----------------------------
    // 1) Gutters and legend band
    // ----------------------------
    let left_label_px =
        compute_left_label_area_px(window.y_min, window.y_max, Y_TICKS, TICK_FONT_PX, locale);
    let axis_x_start_px = MARGIN + left_label_px as i32;
    let (root_w, root_h) = root.dim_in_pixel();

    let legend_items: Vec<(String, RGBColor)> = frame
        .datasets
        .iter()
        .map(|d| (d.label.clone(), rgb_color(d.style.color)))
        .collect();

    let (plot_area, legend_area) = if frame.legend_visible {
        let labels: Vec<String> = legend_items.iter().map(|(l, _)| l.clone()).collect();
        let h = legend_band_height_px(&labels, axis_x_start_px, root_w as i32);
        let (plot, legend) = root.split_vertically((root_h as i32 - h).max(40));
        (plot, Some(legend))
    } else {
        (root, None)
    };

    plot_area.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    if let Some(ref area) = legend_area {
        area.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    }

    // ----------------------------
    // 2) Chart and mesh
    // ----------------------------
    let mut builder = ChartBuilder::on(&plot_area);
    builder
        .margin(MARGIN as u32)
        .set_label_area_size(LabelAreaPosition::Left, left_label_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 40);
    if !frame.title.trim().is_empty() {
        builder.caption(frame.title.trim(), (FontFamily::SansSerif, 20));
    }
    let mut chart = builder
        .build_cartesian_2d(window.x_min..window.x_max, window.y_min..window.y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    let visible = window.visible_indices(frame.labels.len());
    let visible_count = visible.map_or(0, |(lo, hi)| hi - lo + 1);
    let plot_w = (root_w as i32 - axis_x_start_px - MARGIN).max(1) as u32;
    let x_ticks = x_label_count(&frame.labels, visible_count, plot_w, TICK_FONT_PX);

    let x_label_fmt = |x: &f64| label_at(&frame.labels, *x).to_string();
    let y_label_fmt = |v: &f64| format_count(*v, locale);

    chart
        .configure_mesh()
        .x_labels(x_ticks)
        .y_labels(Y_TICKS)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .disable_x_mesh()
        .label_style((FontFamily::SansSerif, TICK_FONT_PX))
        .axis_desc_style((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    // ----------------------------
    // 3) Datasets
    // ----------------------------
    match frame.kind {
        RenderKind::Line => {
            for d in &frame.datasets {
                let points: Vec<(f64, f64)> = d
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i as f64, *v))
                    .collect();
                let clipped = clip_polyline(&points, window.x_min, window.x_max);
                if clipped.is_empty() {
                    continue;
                }
                if d.style.fill == Fill::Origin {
                    chart
                        .draw_series(
                            AreaSeries::new(clipped.clone(), window.y_min, area_style(&d.style))
                                .border_style(line_style(&d.style)),
                        )
                        .map_err(|e| anyhow!("{:?}", e))?;
                } else {
                    chart
                        .draw_series(LineSeries::new(clipped.clone(), line_style(&d.style)))
                        .map_err(|e| anyhow!("{:?}", e))?;
                }
                if d.style.show_points
                    && let Some((lo, hi)) = visible
                {
                    let marker = marker_style(&d.style);
                    chart
                        .draw_series(
                            points[lo..=hi]
                                .iter()
                                .map(|p| Circle::new(*p, 3, marker)),
                        )
                        .map_err(|e| anyhow!("{:?}", e))?;
                }
            }
        }
        RenderKind::Bar => {
            let n_series = frame.datasets.len().max(1);
            let bar_w = BAR_GROUP_WIDTH / n_series as f64;
            for (idx, d) in frame.datasets.iter().enumerate() {
                let fill = marker_style(&d.style);
                let rects: Vec<Rectangle<(f64, f64)>> = d
                    .values
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| {
                        let x0 = i as f64 - BAR_GROUP_WIDTH / 2.0 + idx as f64 * bar_w;
                        let (x0, x1) = (x0.max(window.x_min), (x0 + bar_w).min(window.x_max));
                        (x1 > x0).then(|| Rectangle::new([(x0, 0.0), (x1, *v)], fill))
                    })
                    .collect();
                chart
                    .draw_series(rects)
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
        }
    }

    // ----------------------------
    // 4) Legend and present
    // ----------------------------
    if let Some(ref area) = legend_area {
        draw_legend_band(area, &legend_items, axis_x_start_px)?;
        area.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    plot_area.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartSpec, Dataset, InteractionProfile};
    use crate::models::TimeSeries;
    use crate::viz_style::DatasetStyle;

    fn frame(kind: RenderKind, n_sets: usize) -> RenderedChart {
        let labels: Vec<String> = (1..=5).map(|d| format!("2024-02-0{d}")).collect();
        let datasets = (0..n_sets)
            .map(|k| {
                let values = (0..5).map(|i| (i * (k + 1)) as f64).collect();
                Dataset::new(
                    format!("series {k}"),
                    TimeSeries::new(labels.clone(), values).unwrap(),
                    DatasetStyle::palette(k).with_fill(Fill::Origin),
                )
            })
            .collect();
        let spec = ChartSpec::new("s", kind, "Title", datasets, InteractionProfile::None).unwrap();
        RenderedChart::from_spec(&spec)
    }

    #[test]
    fn line_svg_contains_labels() {
        let f = frame(RenderKind::Line, 2);
        let mut out = String::new();
        render_svg_string(&f, f.window, &mut out, 800, 400, "en").unwrap();
        assert!(out.starts_with("<svg"));
        assert!(out.contains("2024-02-01"));
        assert!(out.contains("series 1"));
    }

    #[test]
    fn zoomed_bar_svg_renders() {
        let f = frame(RenderKind::Bar, 3);
        let window = ViewWindow {
            x_min: 1.2,
            x_max: 2.8,
            ..f.window
        };
        let mut out = String::new();
        render_svg_string(&f, window, &mut out, 640, 360, "de").unwrap();
        assert!(out.contains("<rect"));
    }

    #[test]
    fn empty_axis_draws_frame_only() {
        let spec = ChartSpec::new(
            "empty",
            RenderKind::Line,
            "Nothing yet",
            vec![Dataset::new(
                "only",
                TimeSeries::new(Vec::new(), Vec::new()).unwrap(),
                DatasetStyle::palette(0),
            )],
            InteractionProfile::None,
        )
        .unwrap();
        let f = RenderedChart::from_spec(&spec);
        let mut out = String::new();
        render_svg_string(&f, f.window, &mut out, 400, 300, "en").unwrap();
        assert!(out.starts_with("<svg"));
        assert!(out.contains("Nothing yet"));
    }

    #[test]
    fn non_svg_path_is_rejected() {
        let f = frame(RenderKind::Line, 1);
        let dir = tempfile::tempdir().unwrap();
        assert!(render_svg_file(&f, dir.path().join("x.png"), 300, 200, "en").is_err());
        let ok = dir.path().join("x.svg");
        render_svg_file(&f, &ok, 300, 200, "en").unwrap();
        assert!(std::fs::metadata(ok).unwrap().len() > 0);
    }
}
