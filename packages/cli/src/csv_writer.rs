//! CSV output of arrest records.
//!
//! The header row is written as soon as the writer is created, so a run
//! that finds no arrests still produces a valid, header-only file. Rows are
//! written as they arrive; the file is not swapped in atomically.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use apd_arrests_models::{ArrestRecord, CSV_HEADER};

use crate::CliError;

/// Streams [`ArrestRecord`]s into CSV.
pub struct ArrestCsvWriter<W: Write> {
    inner: csv::Writer<W>,
    rows: u64,
}

impl ArrestCsvWriter<File> {
    /// Creates (or truncates) the file at `path` and writes the header.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Csv`] if the file cannot be created or written.
    pub fn create(path: &Path) -> Result<Self, CliError> {
        let inner = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        Self::with_header(inner)
    }
}

impl<W: Write> ArrestCsvWriter<W> {
    /// Wraps an arbitrary writer and writes the header.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Csv`] if the header cannot be written.
    pub fn from_writer(writer: W) -> Result<Self, CliError> {
        let inner = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        Self::with_header(inner)
    }

    fn with_header(mut inner: csv::Writer<W>) -> Result<Self, CliError> {
        inner.write_record(CSV_HEADER)?;
        Ok(Self { inner, rows: 0 })
    }

    /// Appends one record.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Csv`] if the row cannot be written.
    pub fn write(&mut self, record: &ArrestRecord) -> Result<(), CliError> {
        self.inner.serialize(record)?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written so far.
    #[must_use]
    pub const fn rows(&self) -> u64 {
        self.rows
    }

    /// Flushes buffered rows to the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Io`] if flushing fails.
    pub fn flush(&mut self) -> Result<(), CliError> {
        self.inner.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Io`] if flushing fails.
    pub fn into_inner(self) -> Result<W, CliError> {
        self.inner
            .into_inner()
            .map_err(|e| CliError::Io(e.into_error()))
    }
}
