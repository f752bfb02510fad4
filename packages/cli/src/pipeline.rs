//! Scrape pipeline: fetch each day, extract arrests, write CSV rows.
//!
//! Days are processed strictly one at a time. Each fetched page is
//! normalized and its records are written as they are extracted, so only
//! one page is ever held in memory.

use std::io::Write;
use std::pin::pin;
use std::sync::Arc;

use apd_arrests_fetch::progress::ProgressCallback;
use apd_arrests_fetch::{DateRange, DayPage, PageFetcher, RunSummary, fetch_days};
use apd_arrests_report::{ReportLayout, extract_arrests, normalize};
use futures::StreamExt as _;

use crate::CliError;
use crate::csv_writer::ArrestCsvWriter;

/// Fetches every day of `range` and writes the extracted arrests.
///
/// Skipped days are recorded in the returned [`RunSummary`] and do not stop
/// the run.
///
/// # Errors
///
/// Returns [`CliError`] if writing the output fails.
pub async fn scrape<F: PageFetcher, W: Write>(
    fetcher: &F,
    range: DateRange,
    layout: &ReportLayout,
    writer: &mut ArrestCsvWriter<W>,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<RunSummary, CliError> {
    let mut summary = RunSummary::default();
    progress.set_total(range.day_count());

    let mut days = pin!(fetch_days(fetcher, range));

    while let Some(day) = days.next().await {
        let label = day.date.format("%m/%d/%Y").to_string();
        progress.set_message(label.clone());

        match day.page {
            DayPage::Fetched(html) => {
                let text = normalize(&html);
                let mut count: u64 = 0;
                for record in extract_arrests(&text, layout) {
                    writer.write(&record)?;
                    count += 1;
                }
                log::info!("{label}: {count} arrest(s)");
                summary.record_fetched(day.date, count);
            }
            DayPage::Skipped(reason) => summary.record_skipped(day.date, reason),
        }

        progress.inc(1);
    }

    writer.flush()?;
    progress.finish(format!("{} arrest(s) written", writer.rows()));

    Ok(summary)
}
