//! Series Loader: turns embedded records or the remote download endpoint into
//! render-ready data.
//!
//! - Embedded data is a pure projection into parallel label/value arrays, input order kept.
//! - The remote case is one fire-and-forget GET whose result is applied to a
//!   [`DownloadTable`] as a whole batch, or not at all.

use crate::api::Client;
use crate::error::LoadError;
use crate::models::{DownloadRow, DownloadTable, RecentDownloads, TimeSeries};
use crate::page::Diagnostics;
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Project embedded `{label_field, value_field}` records into a [`TimeSeries`].
///
/// ### Example
/// ```
/// # use dash_charts::loader::project_records;
/// let records = serde_json::json!([
///     {"day": "2024-01-01", "stars": 10},
///     {"day": "2024-01-02", "stars": 12}
/// ]);
/// let s = project_records(records.as_array().unwrap(), "day", "stars")?;
/// assert_eq!(s.labels(), ["2024-01-01", "2024-01-02"]);
/// assert_eq!(s.values(), [10.0, 12.0]);
/// # Ok::<(), dash_charts::error::LoadError>(())
/// ```
///
/// ### Errors
/// `MissingField` when a record lacks either field (or it has the wrong JSON type),
/// plus any series invariant violation.
pub fn project_records(
    records: &[Value],
    label_field: &str,
    value_field: &str,
) -> Result<TimeSeries, LoadError> {
    let mut labels = Vec::with_capacity(records.len());
    let mut values = Vec::with_capacity(records.len());
    for (index, rec) in records.iter().enumerate() {
        let label = rec
            .get(label_field)
            .and_then(Value::as_str)
            .ok_or_else(|| LoadError::MissingField {
                index,
                field: label_field.to_string(),
            })?;
        let value = rec
            .get(value_field)
            .and_then(Value::as_f64)
            .ok_or_else(|| LoadError::MissingField {
                index,
                field: value_field.to_string(),
            })?;
        labels.push(label.to_string());
        values.push(value);
    }
    TimeSeries::new(labels, values)
}

/// Wrap collector-computed parallel arrays (e.g. `days` + `issues_open_cumulative`).
///
/// No re-bucketing or accumulation happens here.
pub fn series_from_parallel(labels: &[String], values: &[f64]) -> Result<TimeSeries, LoadError> {
    TimeSeries::new(labels.to_vec(), values.to_vec())
}

/// Check that every label of a daily/weekly series is an ISO calendar date.
pub fn validate_day_labels(series: &TimeSeries) -> Result<(), LoadError> {
    for label in series.labels() {
        NaiveDate::parse_from_str(label, "%Y-%m-%d").map_err(|_| LoadError::InvalidDay {
            label: label.clone(),
        })?;
    }
    Ok(())
}

/// Anything that can answer the recent-downloads query.
pub trait DownloadSource {
    fn recent(&self, package: &str) -> Result<RecentDownloads, LoadError>;
}

impl DownloadSource for Client {
    fn recent(&self, package: &str) -> Result<RecentDownloads, LoadError> {
        self.recent_downloads(package)
    }
}

/// One table row per record, in response order.
pub fn rows_from_response(resp: RecentDownloads) -> Vec<DownloadRow> {
    resp.data.into_iter().map(DownloadRow::from).collect()
}

/// Apply a finished fetch to the table.
///
/// Success appends every row; failure appends nothing and emits exactly one diagnostic.
/// Returns the number of rows appended.
pub fn apply_download_result(
    result: Result<RecentDownloads, LoadError>,
    table: &mut DownloadTable,
    diagnostics: &mut Diagnostics,
) -> usize {
    match result {
        Ok(resp) => {
            let rows = rows_from_response(resp);
            let n = rows.len();
            table.append(rows);
            log::debug!("{}: appended {} rows", table.element_id(), n);
            n
        }
        Err(e) => {
            diagnostics.report(table.element_id(), &e);
            0
        }
    }
}

/// Fetch synchronously and apply the result (used by the CLI and tests).
pub fn load_download_table<S: DownloadSource + ?Sized>(
    source: &S,
    package: &str,
    table: &mut DownloadTable,
    diagnostics: &mut Diagnostics,
) -> usize {
    apply_download_result(source.recent(package), table, diagnostics)
}

/// Handle to an in-flight background fetch.
#[derive(Debug)]
pub struct PendingDownloads {
    package: String,
    receiver: Option<Receiver<Result<RecentDownloads, LoadError>>>,
}

impl PendingDownloads {
    pub fn package(&self) -> &str {
        &self.package
    }

    /// `true` once the result has been taken.
    pub fn is_done(&self) -> bool {
        self.receiver.is_none()
    }

    /// Non-blocking poll. Yields the result once; afterwards always `None`.
    pub fn try_take(&mut self) -> Option<Result<RecentDownloads, LoadError>> {
        let rx = self.receiver.as_ref()?;
        let out = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(LoadError::Network(
                "download fetch worker exited without a result".into(),
            )),
        };
        self.receiver = None;
        Some(out)
    }

    /// Block until the result arrives. Yields `None` if it was already taken.
    pub fn wait(&mut self) -> Option<Result<RecentDownloads, LoadError>> {
        let rx = self.receiver.take()?;
        Some(rx.recv().unwrap_or_else(|_| {
            Err(LoadError::Network(
                "download fetch worker exited without a result".into(),
            ))
        }))
    }
}

/// Start the recent-downloads fetch off the rendering path.
///
/// The caller keeps rendering other charts and polls the returned handle.
pub fn spawn_download_fetch<S>(source: S, package: impl Into<String>) -> PendingDownloads
where
    S: DownloadSource + Send + 'static,
{
    let package = package.into();
    let (sender, receiver) = mpsc::channel();
    let pkg = package.clone();
    thread::spawn(move || {
        let result = source.recent(&pkg);
        // Receiver dropped means the page went away; nothing left to update.
        let _ = sender.send(result);
    });
    PendingDownloads {
        package,
        receiver: Some(receiver),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DownloadRecord;
    use serde_json::json;

    struct Fixed(Result<RecentDownloads, u16>);

    impl DownloadSource for Fixed {
        fn recent(&self, _package: &str) -> Result<RecentDownloads, LoadError> {
            match &self.0 {
                Ok(r) => Ok(r.clone()),
                Err(status) => Err(LoadError::Status { status: *status }),
            }
        }
    }

    #[test]
    fn missing_value_field_names_record() {
        let recs = json!([{"day": "2024-01-01", "stars": 1}, {"day": "2024-01-02"}]);
        let err = project_records(recs.as_array().unwrap(), "day", "stars").unwrap_err();
        match err {
            LoadError::MissingField { index, field } => {
                assert_eq!(index, 1);
                assert_eq!(field, "stars");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn non_string_label_is_missing_field() {
        let recs = json!([{"day": 20240101, "stars": 1}]);
        assert!(project_records(recs.as_array().unwrap(), "day", "stars").is_err());
    }

    #[test]
    fn day_labels_must_be_dates() {
        let ok = series_from_parallel(&["2024-01-01".into()], &[1.0]).unwrap();
        assert!(validate_day_labels(&ok).is_ok());
        let bad = series_from_parallel(&["yesterday".into()], &[1.0]).unwrap();
        assert!(matches!(
            validate_day_labels(&bad),
            Err(LoadError::InvalidDay { .. })
        ));
    }

    #[test]
    fn spawned_fetch_delivers_once() {
        let src = Fixed(Ok(RecentDownloads {
            data: vec![DownloadRecord {
                date: "2024-01-01".into(),
                downloads: 5,
            }],
        }));
        let mut pending = spawn_download_fetch(src, "napari");
        assert_eq!(pending.package(), "napari");
        let result = pending.wait().expect("first result");
        assert_eq!(result.unwrap().data.len(), 1);
        assert!(pending.is_done());
        assert!(pending.try_take().is_none());
    }

    #[test]
    fn failed_fetch_reports_once() {
        let mut table = DownloadTable::new("download_table");
        let mut diags = Diagnostics::new();
        let n = load_download_table(&Fixed(Err(503)), "napari", &mut table, &mut diags);
        assert_eq!(n, 0);
        assert!(table.rows().is_empty());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.entries()[0].source, "download_table");
    }
}
