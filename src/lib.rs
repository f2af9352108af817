//! dash_charts
//!
//! Interactive chart layer of a project-health dashboard: GitHub stars, issue and
//! pull-request activity, and package downloads. Pairs with the `dash-charts` CLI.
//!
//! ### Features
//! - Project embedded stats records into label/value series
//! - Line charts for cumulative metrics, grouped bars for weekly buckets
//! - Legend only when a chart shows more than one dataset
//! - Pan/zoom state per chart with a wheel-zoom toggle and a reset control
//! - Background fetch of recent downloads into a table, with CSV/JSON export
//!
//! ### Example
//! ```no_run
//! use dash_charts::{Client, Dashboard, DashboardOptions, catalog_page, CATALOG};
//!
//! let data: serde_json::Value = serde_json::from_str(&std::fs::read_to_string("stats.json")?)?;
//! let page = catalog_page(CATALOG)?;
//! let mut dash = Dashboard::build(&data, &page, &DashboardOptions::default());
//! dash.start_download_fetch(Client::default(), "napari");
//! dash.save_svgs("charts")?;
//! dash.wait_downloads();
//! for d in dash.diagnostics().entries() {
//!     eprintln!("{}: {}", d.source, d.message);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod loader;
pub mod models;
pub mod page;
pub mod storage;
pub mod viz;
pub mod viz_plotters_adapter;
pub mod viz_style;

pub use api::Client;
pub use dashboard::{CATALOG, Dashboard, DashboardOptions, catalog_page};
pub use error::{ChartError, LoadError};
pub use models::{DownloadRow, DownloadTable, TimeSeries};
pub use page::{Diagnostics, Page};
