use dash_charts::api::decode_recent;
use dash_charts::error::LoadError;
use dash_charts::loader::{DownloadSource, load_download_table};
use dash_charts::models::{DownloadRow, DownloadTable, RecentDownloads};
use dash_charts::page::Diagnostics;

/// Answers every query with a fixed HTTP status and body.
struct Canned {
    status: u16,
    body: &'static str,
}

impl DownloadSource for Canned {
    fn recent(&self, _package: &str) -> Result<RecentDownloads, LoadError> {
        decode_recent(self.status, self.body)
    }
}

#[test]
fn one_row_response_appends_one_row() {
    let source = Canned {
        status: 200,
        body: r#"{"data":[{"date":"2024-01-01","downloads":100}]}"#,
    };
    let mut table = DownloadTable::new("download_table");
    let mut diags = Diagnostics::new();
    let n = load_download_table(&source, "napari", &mut table, &mut diags);
    assert_eq!(n, 1);
    assert_eq!(table.rows().len(), 1);
    assert_eq!(table.rows()[0].date, "2024-01-01");
    assert_eq!(table.rows()[0].downloads, 100);
    assert!(diags.is_empty());
}

#[test]
fn server_error_leaves_table_and_reports_once() {
    let source = Canned {
        status: 500,
        body: "Internal Server Error",
    };
    let mut table = DownloadTable::new("download_table");
    let mut diags = Diagnostics::new();
    let n = load_download_table(&source, "napari", &mut table, &mut diags);
    assert_eq!(n, 0);
    assert!(table.rows().is_empty());
    assert_eq!(diags.len(), 1);
    assert_eq!(diags.entries()[0].source, "download_table");
    assert!(diags.entries()[0].message.contains("500"));
}

#[test]
fn failures_keep_previous_rows() {
    let mut table = DownloadTable::new("download_table");
    table.append(vec![DownloadRow {
        date: "2024-04-30".into(),
        downloads: 42,
    }]);
    let before = table.rows().to_vec();

    for source in [
        Canned {
            status: 500,
            body: "",
        },
        Canned {
            status: 200,
            body: r#"{"data":[{"date":"2024-05-01"}]}"#,
        },
    ] {
        let mut diags = Diagnostics::new();
        let n = load_download_table(&source, "napari", &mut table, &mut diags);
        assert_eq!(n, 0);
        assert_eq!(table.rows(), before.as_slice());
        assert_eq!(diags.len(), 1);
    }
}

#[test]
fn rows_keep_response_order() {
    let body = r#"{"data":[
        {"date":"2024-05-03","downloads":3},
        {"date":"2024-05-01","downloads":1},
        {"date":"2024-05-02","downloads":2}
    ]}"#;
    let resp = decode_recent(200, body).unwrap();
    let dates: Vec<_> = resp.data.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, ["2024-05-03", "2024-05-01", "2024-05-02"]);
}

#[test]
fn wrong_shape_is_decode_error() {
    let err = decode_recent(200, r#"{"data":{"last_day":5}}"#).unwrap_err();
    assert!(matches!(err, LoadError::Decode(_)));
}
