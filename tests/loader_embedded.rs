use dash_charts::error::LoadError;
use dash_charts::loader::{project_records, series_from_parallel, validate_day_labels};
use serde_json::json;

#[test]
fn projection_preserves_order_and_alignment() {
    let records = json!([
        {"day": "2024-01-03", "stars": 7},
        {"day": "2024-01-01", "stars": 3},
        {"day": "2024-01-02", "stars": 5.0}
    ]);
    let s = project_records(records.as_array().unwrap(), "day", "stars").unwrap();
    let pairs: Vec<(&str, f64)> = s.iter().collect();
    assert_eq!(
        pairs,
        [("2024-01-03", 7.0), ("2024-01-01", 3.0), ("2024-01-02", 5.0)]
    );
}

#[test]
fn missing_field_names_record_and_field() {
    let records = json!([{"day": "2024-01-01", "stars": 1}, {"day": "2024-01-02"}]);
    let err = project_records(records.as_array().unwrap(), "day", "stars").unwrap_err();
    match err {
        LoadError::MissingField { index, field } => {
            assert_eq!(index, 1);
            assert_eq!(field, "stars");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_records_give_empty_series() {
    let s = project_records(&[], "day", "stars").unwrap();
    assert!(s.is_empty());
}

#[test]
fn parallel_arrays_must_match() {
    let labels = vec!["2024-01-01".to_string(), "2024-01-08".to_string()];
    assert!(matches!(
        series_from_parallel(&labels, &[1.0]),
        Err(LoadError::LengthMismatch {
            labels: 2,
            values: 1
        })
    ));
    let s = series_from_parallel(&labels, &[1.0, 2.0]).unwrap();
    validate_day_labels(&s).unwrap();
}

#[test]
fn negative_count_is_rejected() {
    let labels = vec!["2024-01-01".to_string()];
    assert!(matches!(
        series_from_parallel(&labels, &[-1.0]),
        Err(LoadError::InvalidValue { index: 0, .. })
    ));
}
