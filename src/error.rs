//! Failure taxonomy of the chart layer.
//!
//! Every variant is scoped to a single chart or table: nothing here is fatal to the
//! page as a whole. The dashboard turns these into diagnostics and moves on.

use thiserror::Error;

/// Errors produced while obtaining series data (embedded projection or remote fetch).
#[derive(Debug, Error)]
pub enum LoadError {
    /// An embedded record lacks the expected field, or it has the wrong type.
    #[error("record {index}: missing or invalid field `{field}`")]
    MissingField { index: usize, field: String },

    /// A named series (array) is absent from the embedded data or has the wrong type.
    #[error("missing or invalid series `{0}`")]
    MissingSeries(String),

    /// Parallel label/value arrays of different lengths.
    #[error("labels and values differ in length ({labels} vs {values})")]
    LengthMismatch { labels: usize, values: usize },

    /// A count that is negative, NaN or infinite.
    #[error("value at index {index} is not a non-negative count: {value}")]
    InvalidValue { index: usize, value: f64 },

    /// The same label appears twice within one series.
    #[error("duplicate label `{label}` at index {index}")]
    DuplicateLabel { index: usize, label: String },

    /// A day label that is not an ISO calendar date.
    #[error("label `{label}` is not an ISO date (YYYY-MM-DD)")]
    InvalidDay { label: String },

    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The remote service answered with a non-2xx status.
    #[error("request failed with HTTP {status}")]
    Status { status: u16 },

    /// The response body was not the expected JSON shape.
    #[error("decode json: {0}")]
    Decode(String),
}

/// Errors produced while constructing or driving a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A required page element (surface or control) is absent.
    #[error("page element `{0}` not found")]
    MissingElement(String),

    /// Two elements registered under the same id.
    #[error("page element `{0}` registered twice")]
    DuplicateElement(String),

    /// A chart spec without datasets.
    #[error("chart `{0}` has no datasets")]
    NoDatasets(String),

    /// Datasets on one surface that do not share the label axis.
    #[error("chart `{surface}`: dataset `{dataset}` is not aligned with the shared label axis")]
    MisalignedSeries { surface: String, dataset: String },

    /// An interaction control was used on a chart without the pan-zoom profile.
    #[error("chart `{0}` has no pan/zoom interaction")]
    NotInteractive(String),

    /// A click was dispatched to a control id that is not bound to this chart.
    #[error("control `{control}` is not bound to chart `{surface}`")]
    UnknownControl { surface: String, control: String },

    /// Input data for the chart could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The renderer failed to draw a frame.
    #[error("render failed: {0}")]
    Render(#[from] anyhow::Error),
}
