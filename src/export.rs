//! CSV export of cleaned series.
//!
//! The core hands back an in-memory table; serialization is this collaborator
//! layer's job. One file per series: `Date` first, one column per category,
//! empty cells for missing values.

use anyhow::{Context, Result};
use csv::Writer;
use std::path::Path;

use crate::clean::series::TimeSeries;

pub fn write_csv(series: &TimeSeries, path: &Path) -> Result<()> {
    let mut writer =
        Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;

    let mut header = Vec::with_capacity(series.columns.len() + 1);
    header.push("Date".to_string());
    header.extend(series.columns.iter().cloned());
    writer.write_record(&header)?;

    for row in &series.rows {
        let mut record = Vec::with_capacity(header.len());
        record.push(row.date.format("%Y-%m-%d").to_string());
        for value in &row.values {
            record.push(value.map(|v| v.to_string()).unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    writer.flush().with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::series::SeriesRow;
    use chrono::NaiveDate;
    use std::fs;

    #[test]
    fn writes_dates_values_and_blank_missing_cells() {
        let series = TimeSeries {
            columns: vec!["Gas".into(), "Transport".into()],
            rows: vec![
                SeriesRow {
                    date: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
                    values: vec![Some(104.5), None],
                },
                SeriesRow {
                    date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
                    values: vec![Some(105.0), Some(98.0)],
                },
            ],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        write_csv(&series, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "Date,Gas,Transport\n2023-04-01,104.5,\n2023-05-01,105,98\n"
        );
    }
}
