//! Import and export of gear data files
//!
//! - **json**: catalog and packing list as JSON arrays (import replaces, export is pretty-printed)
//! - **csv**: tabular catalog import (appends)
//!
//! A failed import never touches the collections: parsing completes before
//! anything is handed to the application state.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

pub mod csv;
pub mod json;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid CSV: {0}")]
    Csv(#[from] ::csv::Error),

    /// Top-level JSON value was not an array
    #[error("Invalid JSON format: expected an array of items")]
    NotAnArray,

    #[error("CSV file has no header row")]
    MissingHeader,
}

pub type Result<T> = std::result::Result<T, TransferError>;

/// Dated default export file name, e.g. `hikelite-inventory-2026-10-19.json`
pub fn dated_file_name(prefix: &str, date: NaiveDate, extension: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}-{}.{extension}", date.format("%Y-%m-%d")))
}
