//! Cleaning pipeline for the cost-of-living (CPIH) workbook.
//!
//! The sheet is wide-by-period: one row per expenditure aggregate, one
//! column per month. Cleaning selects the aggregates of interest, reshapes
//! to one row per month, reconciles category labels that drifted across
//! survey revisions, and keys the result by calendar date.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::periods::parse_month_label;
use super::series::{assemble, KeyedRow, TimeSeries};
use crate::config::{CategoryFilter, Config};
use crate::error::Result;
use crate::load::{load_sheet, Cell, RawTable};

const SHEET_INDEX: usize = 0;
/// The sheet opens with two title rows above the header.
const SKIP_ROWS: usize = 2;
/// Category labels live in the first column.
const CATEGORY_COL: usize = 0;
/// Period columns start here; the columns in between carry survey metadata.
const FIRST_PERIOD_COL: usize = 3;

/// Columns that represent one logical category under different historical
/// labels. Summing the aliases row-wise reconstructs a continuous series
/// under the canonical name; an absent period contributes zero for that
/// alias. Runs before date parsing so alias labels never reach the final
/// schema.
pub struct AliasRule {
    pub aliases: &'static [&'static str],
    pub canonical: &'static str,
}

pub static ALIAS_RULES: &[AliasRule] = &[
    AliasRule {
        aliases: &["07.1.1 New Cars", "07.1.1.1 New motor cars"],
        canonical: "07.1.1 New motor cars",
    },
    AliasRule {
        aliases: &["07.1.1.2 Second-hand motor cars", "07.1.1b Second Hand Cars"],
        canonical: "07.1.2 Second-hand motor cars",
    },
    AliasRule {
        aliases: &[
            "07.1.2/3 Motocycles and bicycles",
            "07.1.2/3 Motorcycles and bicycles",
        ],
        canonical: "07.1.3 Motorcycles and bicycles",
    },
];

/// Clean the cost-of-living workbook at `path` into a monthly series.
pub fn clean(path: &Path, config: &Config) -> Result<TimeSeries> {
    let table = load_sheet(path, SHEET_INDEX, SKIP_ROWS, true)?;
    clean_table(
        &table,
        &config.category_filter,
        ALIAS_RULES,
        config.series_start,
    )
}

pub fn clean_table(
    table: &RawTable,
    filter: &CategoryFilter,
    rules: &[AliasRule],
    start: NaiveDate,
) -> Result<TimeSeries> {
    // 1) period columns from the header row; empty header cells are ragged
    //    sheet width, not period labels
    let period_cols: Vec<(usize, &str)> = table
        .headers
        .iter()
        .enumerate()
        .skip(FIRST_PERIOD_COL)
        .filter(|(_, h)| !h.is_empty())
        .map(|(i, h)| (i, h.as_str()))
        .collect();

    // 2) select rows by category label, pivoting straight to period-major form
    let mut categories: BTreeSet<String> = BTreeSet::new();
    let mut pivot: Vec<HashMap<String, f64>> = vec![HashMap::new(); period_cols.len()];
    for row in &table.rows {
        let label = match row.get(CATEGORY_COL).and_then(Cell::as_text) {
            Some(l) => l,
            None => continue,
        };
        if !filter.matches(label) {
            continue;
        }
        if !categories.insert(label.to_string()) {
            warn!(category = label, "category label appears twice; keeping the first row");
            continue;
        }
        debug!(category = label, "retained category row");
        for (pi, (col, _)) in period_cols.iter().enumerate() {
            if let Some(value) = row.get(*col).and_then(Cell::as_number) {
                pivot[pi].insert(label.to_string(), value);
            }
        }
    }

    // 3) reconcile alias columns under their canonical names
    let mut columns: Vec<String> = categories.iter().cloned().collect();
    for rule in rules {
        let present: Vec<&str> = rule
            .aliases
            .iter()
            .copied()
            .filter(|a| categories.contains(*a))
            .collect();
        if present.is_empty() {
            warn!(canonical = rule.canonical, "no alias columns present; rule skipped");
            continue;
        }
        for period in pivot.iter_mut() {
            let sum: f64 = present.iter().filter_map(|a| period.remove(*a)).sum();
            period.insert(rule.canonical.to_string(), sum);
        }
        columns.retain(|c| !present.contains(&c.as_str()));
        if !columns.iter().any(|c| c == rule.canonical) {
            columns.push(rule.canonical.to_string());
        }
        debug!(aliases = ?present, canonical = rule.canonical, "merged alias columns");
    }

    // 4) parse the period labels and assemble the dated series
    let mut keyed = Vec::with_capacity(period_cols.len());
    for (pi, (_, label)) in period_cols.iter().enumerate() {
        let date = parse_month_label(label)?;
        let values = columns.iter().map(|c| pivot[pi].get(c).copied()).collect();
        keyed.push(KeyedRow {
            label: label.to_string(),
            date,
            values,
        });
    }
    let series = assemble(columns, keyed, start)?;
    info!(
        rows = series.rows.len(),
        columns = series.columns.len(),
        "cleaned cost-of-living series"
    );
    Ok(series)
}
