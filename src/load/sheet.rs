//! Raw table loading.
//!
//! Opens one sheet of a workbook (xlsx or ods, auto-detected) and returns a
//! generic cell matrix. Workbook access stops at this boundary: the cleaning
//! stages only ever see [`Cell`] and [`RawTable`], never the reader's types.

use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::debug;

use crate::error::{CleanError, Result};

/// A single cell of a loaded sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value of the cell. Text is parsed after stripping the comma
    /// grouping some releases use in figure columns.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(t) => t.replace(',', "").parse().ok(),
            Cell::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The cell as header text. Numeric headers keep their printed form.
    fn header_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(trimmed.to_string())
                }
            }
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            // An error cell carries no usable figure.
            Data::Error(_) => Cell::Empty,
        }
    }
}

/// A sheet as loaded, before any cleaning.
///
/// `headers` holds what the sheet claims its columns are called; the
/// cleaning stages decide what the columns actually mean. Row positions
/// match the physical sheet (minus the skipped leading rows), so
/// marker-relative offsets stay valid.
#[derive(Debug, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Load one sheet as a cell matrix.
///
/// `sheet` is a zero-based index. `skip_rows` leading rows are discarded;
/// the next row becomes the header unless `with_header` is false.
pub fn load_sheet(
    path: &Path,
    sheet: usize,
    skip_rows: usize,
    with_header: bool,
) -> Result<RawTable> {
    let source_err = |message: String| CleanError::SourceRead {
        path: path.to_path_buf(),
        sheet,
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| source_err(e.to_string()))?;
    let names = workbook.sheet_names().to_owned();
    let name = names
        .get(sheet)
        .ok_or_else(|| source_err(format!("workbook only has {} sheet(s)", names.len())))?
        .clone();
    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| source_err(e.to_string()))?;

    let mut row_iter = range
        .rows()
        .skip(skip_rows)
        .map(|row| row.iter().map(Cell::from).collect::<Vec<_>>());

    let headers = if with_header {
        row_iter
            .next()
            .map(|row| row.iter().map(Cell::header_text).collect())
            .unwrap_or_default()
    } else {
        Vec::new()
    };
    let rows: Vec<Vec<Cell>> = row_iter.collect();

    debug!(sheet = %name, rows = rows.len(), headers = headers.len(), "loaded sheet");
    Ok(RawTable { headers, rows })
}
