use dash_charts::models::DownloadRow;
use dash_charts::storage;
use std::fs;

fn sample(n: usize) -> Vec<DownloadRow> {
    (0..n)
        .map(|i| DownloadRow {
            date: format!("2024-05-0{}", i + 1),
            downloads: 1000 + i as u64,
        })
        .collect()
}

#[test]
fn save_csv_and_json() {
    let rows = sample(3);
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("downloads.csv");
    storage::save_csv(&rows, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("date,downloads"));
    assert_eq!(csv_txt.lines().count(), 1 + rows.len());

    let json_path = dir.path().join("downloads.json");
    storage::save_json(&rows, &json_path).unwrap();
    let json_txt = fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json_txt).unwrap();
    assert_eq!(v.as_array().unwrap().len(), rows.len());
    assert_eq!(v[0]["downloads"], 1000);
}

// Cells starting with a formula trigger are written with a leading quote.
#[test]
fn csv_cells_are_prefixed_to_avoid_formulas() {
    let rows = vec![DownloadRow {
        date: "=HYPERLINK(\"http://evil\")".into(),
        downloads: 1,
    }];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("injection.csv");
    storage::save_csv(&rows, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let row = rdr.records().next().expect("one data row expected").unwrap();
    assert!(row.get(0).unwrap().starts_with("'="));
    assert_eq!(row.get(1).unwrap(), "1");
}
