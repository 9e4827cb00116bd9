//! Error types for the cleaning pipelines.
//!
//! Every error is fatal to the pipeline invocation that raised it: a failed
//! run yields no table rather than a truncated one. Each variant carries the
//! offending path, label, or date so that a change in the source layout can
//! be diagnosed from the message alone.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CleanError>;

#[derive(Debug, Error)]
pub enum CleanError {
    /// The workbook could not be opened, or the requested sheet is missing.
    #[error("failed to read sheet {sheet} of {}: {message}", .path.display())]
    SourceRead {
        path: PathBuf,
        sheet: usize,
        message: String,
    },

    /// The expected embedded sub-table is absent; the source layout changed.
    #[error("no row containing marker {marker:?} found in the sheet")]
    MarkerNotFound { marker: String },

    /// A period label does not match the grammar the source has always used.
    #[error("period label {label:?} does not match the expected form")]
    DateParse { label: String },

    /// Two period labels resolved to the same calendar date. This signals an
    /// upstream labeling collision and must surface, never be merged.
    #[error("period labels {first:?} and {second:?} both resolve to {date}")]
    DuplicateDate {
        date: NaiveDate,
        first: String,
        second: String,
    },
}
