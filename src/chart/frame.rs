//! Renderer-independent description of what a chart shows.

use super::interaction::ViewWindow;
use super::spec::ChartSpec;
use crate::viz::types::RenderKind;
use crate::viz_style::DatasetStyle;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDataset {
    pub label: String,
    pub values: Vec<f64>,
    pub style: DatasetStyle,
}

/// Everything a backend needs to draw one chart: shared labels, index-aligned
/// datasets, legend policy and the default (fully zoomed-out) window.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub surface_id: String,
    pub kind: RenderKind,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<RenderedDataset>,
    pub legend_visible: bool,
    pub window: ViewWindow,
}

impl RenderedChart {
    pub fn from_spec(spec: &ChartSpec) -> Self {
        let labels = spec.labels().to_vec();
        let datasets: Vec<RenderedDataset> = spec
            .datasets()
            .iter()
            .map(|d| RenderedDataset {
                label: d.legend_label.clone(),
                values: d.series.values().to_vec(),
                style: d.style,
            })
            .collect();
        let max_value = spec
            .datasets()
            .iter()
            .filter_map(|d| d.series.max_value())
            .fold(0.0, f64::max);
        Self {
            surface_id: spec.surface_id().to_string(),
            kind: spec.kind(),
            title: spec.title().to_string(),
            window: ViewWindow::full_extent(spec.kind(), labels.len(), max_value),
            labels,
            datasets,
            legend_visible: spec.legend_visible(),
        }
    }
}
