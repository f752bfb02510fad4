#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Scrapes the Austin Police Department incident report search into a CSV
//! file of arrest records.
//!
//! The binary wires the pieces together: [`apd_arrests_fetch`] walks the
//! date range, [`apd_arrests_report`] extracts records from each page, and
//! [`csv_writer::ArrestCsvWriter`] persists them.

pub mod csv_writer;
pub mod pipeline;

use apd_arrests_fetch::FetchError;
use apd_arrests_report::LayoutError;
use chrono::NaiveDate;

/// Date format accepted on the command line.
pub const DATE_ARG_FORMAT: &str = "%m/%d/%Y";

/// Errors that can end a scrape run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The report layout could not be loaded.
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// The fetcher could not be configured.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Writing the CSV output failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses a `MM/DD/YYYY` command-line date.
///
/// # Errors
///
/// Returns a message suitable for the argument parser when `value` is not a
/// valid date in that format.
pub fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_ARG_FORMAT).map_err(|e| {
        format!("{e}: make sure the date is formatted correctly as MM/DD/YYYY")
    })
}
