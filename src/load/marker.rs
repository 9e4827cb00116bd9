//! Locating an embedded sub-table by its marker row.

use tracing::debug;

use super::sheet::Cell;
use crate::error::{CleanError, Result};

/// The sub-table's data begins this many rows after its marker row: the row
/// in between carries the column headings, by convention of the source
/// format. A fixed contract constant, never inferred from the sheet.
pub const DATA_ROW_OFFSET: usize = 2;

/// Scan every cell of every row (row-major, first match wins) and return the
/// zero-based index of the first row containing `marker`.
pub fn find_marker_row(rows: &[Vec<Cell>], marker: &str) -> Result<usize> {
    for (idx, row) in rows.iter().enumerate() {
        let hit = row
            .iter()
            .any(|cell| cell.as_text().is_some_and(|t| t.contains(marker)));
        if hit {
            debug!(marker, row = idx, "located sub-table marker");
            return Ok(idx);
        }
    }
    Err(CleanError::MarkerNotFound {
        marker: marker.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn first_matching_row_wins() {
        let rows = vec![
            vec![Cell::Empty, text("Table 1222a: by operator")],
            vec![text("notes")],
            vec![Cell::Empty, Cell::Empty, text("Table 1222b: by ticket type")],
            vec![text("Table 1222b repeated")],
        ];
        assert_eq!(find_marker_row(&rows, "Table 1222b").unwrap(), 2);
    }

    #[test]
    fn data_offset_skips_the_heading_row() {
        let mut rows = vec![vec![Cell::Empty]; 40];
        rows.push(vec![text("Table 1222b")]);
        rows.push(vec![text("Date"), text("Season")]);
        rows.push(vec![text("Apr to Jun 2023"), Cell::Number(1.0)]);
        let marker = find_marker_row(&rows, "Table 1222b").unwrap();
        assert_eq!(marker, 40);
        assert_eq!(rows[marker + DATA_ROW_OFFSET][0], text("Apr to Jun 2023"));
    }

    #[test]
    fn absent_marker_is_fatal() {
        let rows = vec![vec![text("Table 1222a")], vec![Cell::Number(3.0)]];
        let err = find_marker_row(&rows, "Table 1222b").unwrap_err();
        match err {
            CleanError::MarkerNotFound { marker } => assert_eq!(marker, "Table 1222b"),
            other => panic!("expected MarkerNotFound, got {other:?}"),
        }
    }
}
