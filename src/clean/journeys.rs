//! Cleaning pipeline for the passenger journeys by ticket type workbook.
//!
//! The sheet holds several tables; the quarterly one of interest is embedded
//! part-way down and has to be located by its marker row. Its layout is a
//! fixed 9-column schema and some figures are suppressed with sentinel
//! tokens, so rows are only kept when fully numeric.

use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::periods::parse_range_label;
use super::series::{assemble, KeyedRow, TimeSeries};
use crate::config::Config;
use crate::error::Result;
use crate::load::{find_marker_row, load_sheet, Cell, RawTable, DATA_ROW_OFFSET};

/// Sheet holding the ticket-type tables.
const SHEET_INDEX: usize = 2;

/// Marker that heads the quarterly sub-table.
pub const TABLE_MARKER: &str = "Table 1222b";

/// Fixed column layout of the sub-table. `Date` keys the series; the rest
/// become its columns.
pub static COLUMNS: &[&str] = &[
    "Date",
    "Ordinary Advance",
    "Ordinary Anytime or Peak",
    "Ordinary Off Peak",
    "Ordinary Other",
    "Ordinary Total",
    "Season",
    "Open access",
    "Total",
];

/// Source tokens meaning disclosure-controlled and not-applicable. Distinct
/// from a true numeric zero.
static SENTINELS: &[&str] = &["[x]", "[z]"];

/// Clean the ticketing workbook at `path` into a quarterly series.
pub fn clean(path: &Path, config: &Config) -> Result<TimeSeries> {
    let table = load_sheet(path, SHEET_INDEX, 0, false)?;
    clean_table(&table, config.series_start)
}

pub fn clean_table(table: &RawTable, start: NaiveDate) -> Result<TimeSeries> {
    let marker_row = find_marker_row(&table.rows, TABLE_MARKER)?;
    let data_start = marker_row + DATA_ROW_OFFSET;
    debug!(marker_row, data_start, "reading quarterly sub-table");

    let mut keyed = Vec::new();
    for row in table.rows.iter().skip(data_start) {
        // The first row without a period label ends the sub-table; anything
        // below it (blank separators, footnotes) is outside the data region.
        let label = match row.get(0).and_then(Cell::as_text) {
            Some(l) => l.to_string(),
            None => break,
        };
        let date = parse_range_label(&label)?;
        let values: Vec<Option<f64>> = (1..COLUMNS.len())
            .map(|col| row.get(col).and_then(figure))
            .collect();
        if values.iter().any(Option::is_none) {
            debug!(period = %label, "dropped row with suppressed or missing figures");
            continue;
        }
        keyed.push(KeyedRow { label, date, values });
    }

    let columns = COLUMNS[1..].iter().map(|c| c.to_string()).collect();
    let series = assemble(columns, keyed, start)?;
    info!(rows = series.rows.len(), "cleaned passenger journeys series");
    Ok(series)
}

/// Numeric value of a figure cell; sentinel tokens count as missing.
fn figure(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Text(t) if SENTINELS.contains(&t.as_str()) => None,
        _ => cell.as_number(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CleanError;

    fn t(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn day(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn data_row(label: &str, base: f64) -> Vec<Cell> {
        let mut row = vec![t(label)];
        row.extend((0..8).map(|i| Cell::Number(base + i as f64)));
        row
    }

    /// The sub-table sits below an unrelated table, as in the real sheet.
    fn fixture() -> RawTable {
        let mut rows = vec![
            vec![t("Table 1222a: Passenger journeys by operator")],
            vec![t("Operator"), t("Journeys")],
            vec![t("Example Rail"), Cell::Number(12.0)],
            vec![Cell::Empty],
        ];
        rows.push(vec![t("Table 1222b: Passenger journeys by ticket type")]);
        rows.push(COLUMNS.iter().map(|&c| t(c)).collect());
        rows.push(data_row("Oct to Dec 2009", 10.0));
        rows.push(data_row("Jan to Mar 2010", 20.0));
        let mut suppressed = data_row("Apr to Jun 2010", 30.0);
        suppressed[4] = t("[x]");
        rows.push(suppressed);
        rows.push(data_row("Apr to Jun 2023", 40.0));
        // Footnotes below the data region.
        rows.push(vec![Cell::Empty]);
        rows.push(vec![t("[x] figure suppressed for disclosure control")]);
        RawTable {
            headers: Vec::new(),
            rows,
        }
    }

    #[test]
    fn locates_the_sub_table_and_keys_by_quarter_start() {
        let series = clean_table(&fixture(), day(2010, 1)).unwrap();
        let dates: Vec<NaiveDate> = series.rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(2010, 1), day(2023, 4)]);
        assert_eq!(series.columns.len(), 8);
        assert_eq!(series.columns[0], "Ordinary Advance");
    }

    #[test]
    fn sentinel_rows_are_absent_from_the_output() {
        let series = clean_table(&fixture(), day(2010, 1)).unwrap();
        assert!(series.rows.iter().all(|r| r.date != day(2010, 4)));
    }

    #[test]
    fn output_rows_are_fully_numeric() {
        let series = clean_table(&fixture(), day(2010, 1)).unwrap();
        assert!(series
            .rows
            .iter()
            .all(|r| r.values.iter().all(Option::is_some)));
    }

    #[test]
    fn quarters_before_the_cutoff_are_dropped() {
        let series = clean_table(&fixture(), day(2010, 1)).unwrap();
        assert!(series.rows.iter().all(|r| r.date >= day(2010, 1)));
    }

    #[test]
    fn missing_marker_is_fatal_not_an_empty_table() {
        let table = RawTable {
            headers: Vec::new(),
            rows: vec![vec![t("Table 1222a only")], data_row("Apr to Jun 2023", 1.0)],
        };
        let err = clean_table(&table, day(2010, 1)).unwrap_err();
        assert!(matches!(err, CleanError::MarkerNotFound { .. }));
    }

    #[test]
    fn footnotes_below_the_region_are_not_parsed() {
        // The fixture's footnote row would fail date parsing if it were read.
        assert!(clean_table(&fixture(), day(2010, 1)).is_ok());
    }

    #[test]
    fn malformed_label_inside_the_region_is_fatal() {
        let mut table = fixture();
        // Replace a data row's label, keeping the row inside the region.
        table.rows[7][0] = t("Quarter one 2010");
        let err = clean_table(&table, day(2010, 1)).unwrap_err();
        match err {
            CleanError::DateParse { label } => assert_eq!(label, "Quarter one 2010"),
            other => panic!("expected DateParse, got {other:?}"),
        }
    }

    #[test]
    fn text_figures_with_comma_grouping_parse() {
        let mut table = fixture();
        table.rows[7][1] = t("1,234");
        let series = clean_table(&table, day(2010, 1)).unwrap();
        let row = series.rows.iter().find(|r| r.date == day(2010, 1)).unwrap();
        assert_eq!(row.values[0], Some(1234.0));
    }
}
