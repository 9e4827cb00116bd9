//! Assembly of the cleaned, date-keyed output table.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{CleanError, Result};

/// The cleaned time series: one row per calendar period, one column per
/// reconciled category, values numeric or explicitly missing. The sole
/// durable output of a pipeline run; owned by the caller once returned.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub columns: Vec<String>,
    pub rows: Vec<SeriesRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRow {
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

impl TimeSeries {
    /// Values of one column, in row order. Test and inspection helper.
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row.values[idx]).collect())
    }
}

/// A parsed but unordered row, still carrying its source label so that a
/// collision can be reported in the source's own terms.
#[derive(Debug)]
pub struct KeyedRow {
    pub label: String,
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

/// Key rows by date, sort ascending, reject duplicates, and truncate to
/// periods on or after `start`.
///
/// A duplicate date means two source labels collapsed to one period. That is
/// surfaced as an error, never merged: alias summation has already happened
/// upstream, so a collision here is a labeling fault in the source.
pub fn assemble(
    columns: Vec<String>,
    mut keyed: Vec<KeyedRow>,
    start: NaiveDate,
) -> Result<TimeSeries> {
    keyed.sort_by_key(|row| row.date);
    for pair in keyed.windows(2) {
        if pair[0].date == pair[1].date {
            return Err(CleanError::DuplicateDate {
                date: pair[0].date,
                first: pair[0].label.clone(),
                second: pair[1].label.clone(),
            });
        }
    }

    let total = keyed.len();
    let rows: Vec<SeriesRow> = keyed
        .into_iter()
        .filter(|row| row.date >= start)
        .map(|row| SeriesRow {
            date: row.date,
            values: row.values,
        })
        .collect();
    debug!(kept = rows.len(), total, %start, "assembled series");

    Ok(TimeSeries { columns, rows })
}
