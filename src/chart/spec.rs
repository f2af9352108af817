//! Immutable chart configuration: which surface, which datasets, how they look,
//! and whether the chart can be panned and zoomed.

use crate::error::ChartError;
use crate::models::TimeSeries;
use crate::viz::types::{MetricKind, RenderKind};
use crate::viz_style::DatasetStyle;

/// One named series plus its visual encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub legend_label: String,
    pub series: TimeSeries,
    pub style: DatasetStyle,
}

impl Dataset {
    pub fn new(legend_label: impl Into<String>, series: TimeSeries, style: DatasetStyle) -> Self {
        Self {
            legend_label: legend_label.into(),
            series,
            style,
        }
    }
}

/// Keyboard modifier that must be held for a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Ctrl,
    Shift,
    Alt,
    Meta,
}

/// Modifier keys held during a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
        meta: false,
    };

    pub fn holds(&self, m: Modifier) -> bool {
        match m {
            Modifier::Ctrl => self.ctrl,
            Modifier::Shift => self.shift,
            Modifier::Alt => self.alt,
            Modifier::Meta => self.meta,
        }
    }
}

/// Which pan/zoom inputs a chart accepts. Wheel zoom is not listed here: it is a
/// live toggle, always off at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanZoomOptions {
    /// Modifier required to pan by dragging; `None` pans on a plain drag.
    pub pan_modifier: Option<Modifier>,
    pub pinch: bool,
    pub drag_select: bool,
}

impl PanZoomOptions {
    /// Detailed daily charts: Ctrl+drag pans, plain drag draws a zoom box, pinch zooms.
    pub const fn detailed_daily() -> Self {
        Self {
            pan_modifier: Some(Modifier::Ctrl),
            pinch: true,
            drag_select: true,
        }
    }

    /// Weekly bucket charts: plain drag pans, drag-select zoom box, no pinch.
    pub const fn weekly_bucket() -> Self {
        Self {
            pan_modifier: None,
            pinch: false,
            drag_select: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionProfile {
    #[default]
    None,
    PanZoom(PanZoomOptions),
}

impl InteractionProfile {
    pub fn pan_zoom(&self) -> Option<&PanZoomOptions> {
        match self {
            InteractionProfile::None => None,
            InteractionProfile::PanZoom(o) => Some(o),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.pan_zoom().is_some()
    }
}

/// Binding of one rendering surface to its datasets and interaction profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    surface_id: String,
    kind: RenderKind,
    title: String,
    datasets: Vec<Dataset>,
    profile: InteractionProfile,
}

impl ChartSpec {
    /// Validate and build a spec.
    ///
    /// ### Errors
    /// - `NoDatasets` when `datasets` is empty
    /// - `MisalignedSeries` when a dataset's labels differ from the first dataset's
    pub fn new(
        surface_id: impl Into<String>,
        kind: RenderKind,
        title: impl Into<String>,
        datasets: Vec<Dataset>,
        profile: InteractionProfile,
    ) -> Result<Self, ChartError> {
        let surface_id = surface_id.into();
        let first = datasets
            .first()
            .ok_or_else(|| ChartError::NoDatasets(surface_id.clone()))?;
        if let Some(bad) = datasets
            .iter()
            .skip(1)
            .find(|d| d.series.labels() != first.series.labels())
        {
            return Err(ChartError::MisalignedSeries {
                surface: surface_id,
                dataset: bad.legend_label.clone(),
            });
        }
        Ok(Self {
            surface_id,
            kind,
            title: title.into(),
            datasets,
            profile,
        })
    }

    /// Spec whose render kind follows the metric policy (cumulative → line, periodic → bar).
    pub fn for_metric(
        surface_id: impl Into<String>,
        metric: MetricKind,
        title: impl Into<String>,
        datasets: Vec<Dataset>,
        profile: InteractionProfile,
    ) -> Result<Self, ChartError> {
        Self::new(
            surface_id,
            RenderKind::for_metric(metric),
            title,
            datasets,
            profile,
        )
    }

    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    pub fn kind(&self) -> RenderKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn profile(&self) -> InteractionProfile {
        self.profile
    }

    /// Shared label axis (labels of the first dataset; all datasets are equal).
    pub fn labels(&self) -> &[String] {
        self.datasets[0].series.labels()
    }

    /// Single-dataset charts hide the legend; multi-dataset charts show it.
    pub fn legend_visible(&self) -> bool {
        self.datasets.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(labels: &[&str], values: &[f64]) -> TimeSeries {
        TimeSeries::new(
            labels.iter().map(|s| s.to_string()).collect(),
            values.to_vec(),
        )
        .unwrap()
    }

    #[test]
    fn empty_spec_is_rejected() {
        let err = ChartSpec::new("c", RenderKind::Line, "", vec![], InteractionProfile::None);
        assert!(matches!(err, Err(ChartError::NoDatasets(_))));
    }

    #[test]
    fn misaligned_datasets_are_rejected() {
        let a = Dataset::new("a", series(&["d1", "d2"], &[1.0, 2.0]), DatasetStyle::palette(0));
        let b = Dataset::new("b", series(&["d1", "d3"], &[1.0, 2.0]), DatasetStyle::palette(1));
        let err = ChartSpec::new("c", RenderKind::Line, "", vec![a, b], InteractionProfile::None);
        match err {
            Err(ChartError::MisalignedSeries { surface, dataset }) => {
                assert_eq!(surface, "c");
                assert_eq!(dataset, "b");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn metric_policy_picks_kind() {
        let a = Dataset::new("a", series(&["w1"], &[1.0]), DatasetStyle::palette(0));
        let spec = ChartSpec::for_metric(
            "c",
            MetricKind::Periodic,
            "",
            vec![a],
            InteractionProfile::PanZoom(PanZoomOptions::weekly_bucket()),
        )
        .unwrap();
        assert_eq!(spec.kind(), RenderKind::Bar);
        assert!(!spec.legend_visible());
        assert!(spec.profile().is_interactive());
    }

    #[test]
    fn modifiers_hold() {
        assert!(Modifiers::CTRL.holds(Modifier::Ctrl));
        assert!(!Modifiers::NONE.holds(Modifier::Ctrl));
    }
}
