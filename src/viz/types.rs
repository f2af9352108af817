//! Public types and constants for the visualization module.

/// Chart kinds supported by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    /// One continuous curve per dataset over the shared label axis.
    Line,
    /// Grouped bars per label, one bar per dataset.
    Bar,
}

/// How a metric is aggregated by the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Running total (stars so far, issues opened so far, ...).
    Cumulative,
    /// Count per calendar day (downloads on that day).
    Daily,
    /// Per-period bucket count (issues opened during one week, ...).
    Periodic,
}

impl RenderKind {
    /// Fixed presentation policy: running totals and daily counts are lines,
    /// bucketed metrics are bars.
    pub fn for_metric(metric: MetricKind) -> Self {
        match metric {
            MetricKind::Cumulative | MetricKind::Daily => RenderKind::Line,
            MetricKind::Periodic => RenderKind::Bar,
        }
    }
}

/// Default SVG canvas size.
pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 500;

/// Group width of a bar cluster in label-index units.
pub const BAR_GROUP_WIDTH: f64 = 0.8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_bucketed_metrics_are_bars() {
        assert_eq!(RenderKind::for_metric(MetricKind::Cumulative), RenderKind::Line);
        assert_eq!(RenderKind::for_metric(MetricKind::Daily), RenderKind::Line);
        assert_eq!(RenderKind::for_metric(MetricKind::Periodic), RenderKind::Bar);
    }
}
