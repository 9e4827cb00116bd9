//! Period label parsing.
//!
//! The two sources label reporting periods differently: the cost-of-living
//! sheet heads its columns `"{Mon}-{YY}"`, the ticketing table labels each
//! row with a quarter, `"{Mon} to {Mon} {YYYY}"`. Both map one-to-one onto
//! the first day of a canonical month. The mapping is total over well-formed
//! labels; anything else is a fatal input error, never silently dropped.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CleanError, Result};

/// Two-digit years in the sources are always 21st-century. Revisit if the
/// cost-of-living sheet ever reaches back past 2000.
pub const CENTURY_BASE: i32 = 2000;

static MONTH_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]{3})-(\d{2})$").unwrap());

// Deliberately unanchored: the source appends revision markers to some
// labels and those must still parse.
static RANGE_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z]{3}) to ([A-Za-z]{3}) (\d{4})").unwrap());

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    MONTHS.iter().position(|m| *m == lower).map(|i| i as u32 + 1)
}

/// `"Jan-24"` → 2024-01-01.
pub fn parse_month_label(label: &str) -> Result<NaiveDate> {
    let parse_err = || CleanError::DateParse {
        label: label.to_string(),
    };
    let caps = MONTH_LABEL_RE.captures(label.trim()).ok_or_else(parse_err)?;
    let month = month_number(&caps[1]).ok_or_else(parse_err)?;
    let year = CENTURY_BASE + caps[2].parse::<i32>().map_err(|_| parse_err())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(parse_err)
}

/// `"Apr to Jun 2023"` → 2023-04-01: a quarter is keyed by its opening month.
pub fn parse_range_label(label: &str) -> Result<NaiveDate> {
    let parse_err = || CleanError::DateParse {
        label: label.to_string(),
    };
    let caps = RANGE_LABEL_RE.captures(label).ok_or_else(parse_err)?;
    let month = month_number(&caps[1]).ok_or_else(parse_err)?;
    let year = caps[3].parse::<i32>().map_err(|_| parse_err())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(parse_err)
}
