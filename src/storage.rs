use crate::models::DownloadRow;
use anyhow::Result;
use csv::WriterBuilder;
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix cells that a spreadsheet would evaluate as a formula with `'`.
pub fn sanitize_cell(s: &str) -> Cow<'_, str> {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => Cow::Owned(format!("'{s}")),
        _ => Cow::Borrowed(s),
    }
}

/// Save download rows as CSV with header.
pub fn save_csv<P: AsRef<Path>>(rows: &[DownloadRow], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("date", "downloads"))?;
    for r in rows {
        wtr.serialize((sanitize_cell(&r.date), r.downloads))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save download rows as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(rows: &[DownloadRow], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
