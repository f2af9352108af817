//! The project-health dashboard: which charts exist, where their data comes from,
//! and the page-level wiring that keeps every chart independent.
//!
//! Embedded data is a JSON document laid out the way the stats collector writes it:
//!
//! ```json
//! {
//!   "stars": [{"day": "2024-01-01", "stars": 10}, ...],
//!   "pr_issue_time_stats": {
//!     "days": ["2024-01-01", ...], "issues_open_cumulative": [...], ...,
//!     "weeks": ["2024-01-01", ...], "issues_open_weekly": [...], ...
//!   },
//!   "downloads_per_day": {"dates": [...], "values": [...]}
//! }
//! ```

use crate::chart::{
    ChartContext, ChartSpec, ChartView, Dataset, InteractionProfile, PanZoomOptions, SvgSurface,
    reset_control_id, toggle_control_id,
};
use crate::error::{ChartError, LoadError};
use crate::loader::{
    DownloadSource, PendingDownloads, apply_download_result, project_records,
    spawn_download_fetch, validate_day_labels,
};
use crate::models::{DownloadTable, RecentDownloads, TimeSeries};
use crate::page::{Diagnostics, Page};
use crate::viz::types::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MetricKind};
use crate::viz_style::{DatasetStyle, Fill, Rgb8};
use anyhow::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Element id of the recent-downloads table.
pub const DOWNLOAD_TABLE_ID: &str = "download_table";

/// Where a dataset's series lives in the embedded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesSource {
    /// Array of records under `key`, projected on `label_field` / `value_field`.
    Records {
        key: &'static str,
        label_field: &'static str,
        value_field: &'static str,
    },
    /// Parallel arrays `labels` / `values` inside the object under `group`.
    Parallel {
        group: &'static str,
        labels: &'static str,
        values: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetDef {
    pub legend: &'static str,
    pub source: SeriesSource,
    pub style: DatasetStyle,
}

/// Static description of one dashboard chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDef {
    pub surface_id: &'static str,
    pub title: &'static str,
    pub metric: MetricKind,
    pub datasets: &'static [DatasetDef],
    pub profile: InteractionProfile,
}

const BLUE: Rgb8 = Rgb8::new(0x00, 0x7B, 0xFF);
const GREEN: Rgb8 = Rgb8::new(0x28, 0xA7, 0x45);
const RED: Rgb8 = Rgb8::new(0xDC, 0x35, 0x45);
const PURPLE: Rgb8 = Rgb8::new(0x6F, 0x42, 0xC1);
const ORANGE: Rgb8 = Rgb8::new(0xFD, 0x7E, 0x14);
const TEAL: Rgb8 = Rgb8::new(0x20, 0xC9, 0x97);
const GRAY: Rgb8 = Rgb8::new(0x6C, 0x75, 0x7D);

const DAILY: InteractionProfile = InteractionProfile::PanZoom(PanZoomOptions::detailed_daily());
const WEEKLY: InteractionProfile = InteractionProfile::PanZoom(PanZoomOptions::weekly_bucket());

const fn stats(labels: &'static str, values: &'static str) -> SeriesSource {
    SeriesSource::Parallel {
        group: "pr_issue_time_stats",
        labels,
        values,
    }
}

// daily curves are long, markers would only add noise
const fn daily_line(color: Rgb8) -> DatasetStyle {
    DatasetStyle::new(color).with_points(false)
}

/// Charts of the project-health dashboard.
pub const CATALOG: &[ChartDef] = &[
    ChartDef {
        surface_id: "stars_chart",
        title: "GitHub stars",
        metric: MetricKind::Cumulative,
        datasets: &[DatasetDef {
            legend: "Stars",
            source: SeriesSource::Records {
                key: "stars",
                label_field: "day",
                value_field: "stars",
            },
            style: DatasetStyle::new(BLUE).with_line_width(4),
        }],
        profile: InteractionProfile::None,
    },
    ChartDef {
        surface_id: "issues_cumulative_chart",
        title: "Issues (cumulative)",
        metric: MetricKind::Cumulative,
        datasets: &[
            DatasetDef {
                legend: "Issues open",
                source: stats("days", "issues_open_cumulative"),
                style: daily_line(RED),
            },
            DatasetDef {
                legend: "Issues closed",
                source: stats("days", "issues_closed_cumulative"),
                style: daily_line(GREEN),
            },
        ],
        profile: DAILY,
    },
    ChartDef {
        surface_id: "pr_cumulative_chart",
        title: "Pull requests (cumulative)",
        metric: MetricKind::Cumulative,
        datasets: &[
            DatasetDef {
                legend: "PR open",
                source: stats("days", "pr_open_cumulative"),
                style: daily_line(BLUE),
            },
            DatasetDef {
                legend: "PR closed",
                source: stats("days", "pr_closed_cumulative"),
                style: daily_line(RED),
            },
            DatasetDef {
                legend: "PR merged",
                source: stats("days", "pr_merged_cumulative"),
                style: daily_line(PURPLE),
            },
        ],
        profile: DAILY,
    },
    ChartDef {
        surface_id: "issues_weekly_chart",
        title: "Issues per week",
        metric: MetricKind::Periodic,
        datasets: &[
            DatasetDef {
                legend: "Issues open",
                source: stats("weeks", "issues_open_weekly"),
                style: DatasetStyle::new(RED),
            },
            DatasetDef {
                legend: "Issues closed",
                source: stats("weeks", "issues_closed_weekly"),
                style: DatasetStyle::new(GREEN),
            },
        ],
        profile: WEEKLY,
    },
    ChartDef {
        surface_id: "pr_weekly_chart",
        title: "Pull requests per week",
        metric: MetricKind::Periodic,
        datasets: &[
            DatasetDef {
                legend: "PR open",
                source: stats("weeks", "pr_open_weekly"),
                style: DatasetStyle::new(BLUE),
            },
            DatasetDef {
                legend: "PR closed",
                source: stats("weeks", "pr_closed_weekly"),
                style: DatasetStyle::new(RED),
            },
            DatasetDef {
                legend: "PR merged",
                source: stats("weeks", "pr_merged_weekly"),
                style: DatasetStyle::new(PURPLE),
            },
        ],
        profile: WEEKLY,
    },
    ChartDef {
        surface_id: "pr_merged_labels_weekly_chart",
        title: "Merged pull requests per week by label",
        metric: MetricKind::Periodic,
        datasets: &[
            DatasetDef {
                legend: "feature",
                source: stats("weeks", "pr_merged_feature_weekly"),
                style: DatasetStyle::new(TEAL),
            },
            DatasetDef {
                legend: "bugfix",
                source: stats("weeks", "pr_merged_bugfix_weekly"),
                style: DatasetStyle::new(RED),
            },
            DatasetDef {
                legend: "maintenance",
                source: stats("weeks", "pr_merged_maintenance_weekly"),
                style: DatasetStyle::new(GRAY),
            },
            DatasetDef {
                legend: "enhancement",
                source: stats("weeks", "pr_merged_enhancement_weekly"),
                style: DatasetStyle::new(ORANGE),
            },
        ],
        profile: WEEKLY,
    },
    ChartDef {
        surface_id: "downloads_per_day_chart",
        title: "Downloads per day",
        metric: MetricKind::Daily,
        datasets: &[DatasetDef {
            legend: "Downloads",
            source: SeriesSource::Parallel {
                group: "downloads_per_day",
                labels: "dates",
                values: "values",
            },
            style: daily_line(BLUE).with_fill(Fill::Origin),
        }],
        profile: DAILY,
    },
];

/// Page holding every element the catalog (and the download table) binds to.
///
/// ### Errors
/// `DuplicateElement` when two catalog entries share a surface id.
pub fn catalog_page(catalog: &[ChartDef]) -> Result<Page, ChartError> {
    let mut ids = Vec::with_capacity(catalog.len() * 3 + 1);
    for def in catalog {
        ids.push(def.surface_id.to_string());
        if def.profile.is_interactive() {
            ids.push(reset_control_id(def.surface_id));
            ids.push(toggle_control_id(def.surface_id));
        }
    }
    ids.push(DOWNLOAD_TABLE_ID.to_string());
    Page::from_ids(ids)
}

/// Resolve one dataset's series from the embedded data.
pub fn resolve_series(data: &Value, source: &SeriesSource) -> Result<TimeSeries, LoadError> {
    match *source {
        SeriesSource::Records {
            key,
            label_field,
            value_field,
        } => {
            let records = data
                .get(key)
                .and_then(Value::as_array)
                .ok_or_else(|| LoadError::MissingSeries(key.to_string()))?;
            project_records(records, label_field, value_field)
        }
        SeriesSource::Parallel {
            group,
            labels,
            values,
        } => {
            let obj = data
                .get(group)
                .ok_or_else(|| LoadError::MissingSeries(group.to_string()))?;
            let missing = |k: &str| LoadError::MissingSeries(format!("{group}.{k}"));
            let label_vals = obj
                .get(labels)
                .and_then(Value::as_array)
                .ok_or_else(|| missing(labels))?
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<String>>>()
                .ok_or_else(|| missing(labels))?;
            let value_vals = obj
                .get(values)
                .and_then(Value::as_array)
                .ok_or_else(|| missing(values))?
                .iter()
                .map(Value::as_f64)
                .collect::<Option<Vec<f64>>>()
                .ok_or_else(|| missing(values))?;
            TimeSeries::new(label_vals, value_vals)
        }
    }
}

/// Rendering options shared by every chart surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOptions {
    pub width: u32,
    pub height: u32,
    pub locale: String,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            locale: "en".into(),
        }
    }
}

/// Build one chart from its definition. Any failure aborts this chart only.
pub fn build_chart(
    def: &ChartDef,
    data: &Value,
    page: &Page,
    options: &DashboardOptions,
) -> Result<ChartView<SvgSurface>, ChartError> {
    let ctx = ChartContext::bind(page, def.surface_id, def.profile.is_interactive(), |id| {
        SvgSurface::new(id, options.width, options.height).with_locale(options.locale.clone())
    })?;
    let mut datasets = Vec::with_capacity(def.datasets.len());
    for d in def.datasets {
        let series = resolve_series(data, &d.source)?;
        validate_day_labels(&series)?;
        datasets.push(Dataset::new(d.legend, series, d.style));
    }
    let spec = ChartSpec::for_metric(def.surface_id, def.metric, def.title, datasets, def.profile)?;
    ChartView::new(spec, ctx)
}

/// All charts of one page plus the remote download table.
#[derive(Debug)]
pub struct Dashboard {
    charts: Vec<ChartView<SvgSurface>>,
    diagnostics: Diagnostics,
    table: Option<DownloadTable>,
    pending: Option<PendingDownloads>,
}

impl Dashboard {
    /// Build every chart of [`CATALOG`].
    pub fn build(data: &Value, page: &Page, options: &DashboardOptions) -> Self {
        Self::build_with(CATALOG, data, page, options)
    }

    /// Build every chart of `catalog`; failing charts are reported and skipped.
    pub fn build_with(
        catalog: &[ChartDef],
        data: &Value,
        page: &Page,
        options: &DashboardOptions,
    ) -> Self {
        let mut diagnostics = Diagnostics::new();
        let mut charts = Vec::with_capacity(catalog.len());
        for def in catalog {
            match build_chart(def, data, page, options) {
                Ok(view) => charts.push(view),
                Err(e) => diagnostics.report(def.surface_id, &e),
            }
        }
        log::info!(
            "dashboard: {} of {} charts rendered",
            charts.len(),
            catalog.len()
        );
        let table = page
            .contains(DOWNLOAD_TABLE_ID)
            .then(|| DownloadTable::new(DOWNLOAD_TABLE_ID));
        Self {
            charts,
            diagnostics,
            table,
            pending: None,
        }
    }

    pub fn charts(&self) -> &[ChartView<SvgSurface>] {
        &self.charts
    }

    pub fn chart(&self, surface_id: &str) -> Option<&ChartView<SvgSurface>> {
        self.charts.iter().find(|c| c.id() == surface_id)
    }

    pub fn chart_mut(&mut self, surface_id: &str) -> Option<&mut ChartView<SvgSurface>> {
        self.charts.iter_mut().find(|c| c.id() == surface_id)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn download_table(&self) -> Option<&DownloadTable> {
        self.table.as_ref()
    }

    /// Dispatch a click on a reset/toggle control anywhere on the page.
    pub fn activate(&mut self, control_id: &str) -> Result<(), ChartError> {
        for suffix in ["_reset", "_toggle_zoom"] {
            if let Some(surface) = control_id.strip_suffix(suffix)
                && let Some(chart) = self.chart_mut(surface)
            {
                return chart.activate(control_id);
            }
        }
        Err(ChartError::MissingElement(control_id.to_string()))
    }

    /// Kick off the recent-downloads fetch without waiting for it.
    ///
    /// Only one fetch per page: later calls are ignored. Without a table element the
    /// fetch is not started and a diagnostic is emitted.
    pub fn start_download_fetch<S>(&mut self, source: S, package: &str)
    where
        S: DownloadSource + Send + 'static,
    {
        if self.table.is_none() {
            self.diagnostics.report(
                DOWNLOAD_TABLE_ID,
                &ChartError::MissingElement(DOWNLOAD_TABLE_ID.into()),
            );
            return;
        }
        if self.pending.is_some() {
            log::debug!("download fetch already started");
            return;
        }
        self.pending = Some(spawn_download_fetch(source, package));
    }

    /// Apply the fetch result if it has arrived. Returns `true` once it was applied.
    pub fn poll_downloads(&mut self) -> bool {
        let Some(result) = self.pending.as_mut().and_then(PendingDownloads::try_take) else {
            return false;
        };
        self.apply_downloads(result);
        true
    }

    /// Block until the fetch finishes and apply it (CLI use).
    pub fn wait_downloads(&mut self) -> bool {
        let Some(result) = self.pending.as_mut().and_then(PendingDownloads::wait) else {
            return false;
        };
        self.apply_downloads(result);
        true
    }

    fn apply_downloads(&mut self, result: Result<RecentDownloads, LoadError>) {
        if let Some(table) = self.table.as_mut() {
            apply_download_result(result, table, &mut self.diagnostics);
        }
    }

    /// Write each rendered chart as `<surface_id>.svg` into `dir`.
    pub fn save_svgs<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.charts.len());
        for chart in &self.charts {
            let path = dir.join(format!("{}.svg", chart.id()));
            chart.surface().save(&path)?;
            written.push(path);
        }
        Ok(written)
    }
}
