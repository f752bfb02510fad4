//! Per-day outcomes and the run summary shown at the end of a scrape.
//!
//! A day that cannot be fetched never aborts the run. Instead it is recorded
//! here with the reason it was skipped so the user sees exactly which days
//! are missing from the output.

use std::fmt;

use chrono::NaiveDate;

/// Why a day contributed no records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The request never produced a response (connection, DNS, timeout).
    Transport(String),
    /// The server answered with a status other than 200.
    Status(u16),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "transport error: {message}"),
            Self::Status(status) => write!(f, "HTTP {status}"),
        }
    }
}

/// What happened to one day of the range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOutcome {
    /// The page was fetched and produced this many records.
    Fetched {
        /// Records extracted from the page.
        records: u64,
    },
    /// The day was skipped.
    Skipped(SkipReason),
}

/// Outcome of a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayReport {
    /// The day queried.
    pub date: NaiveDate,
    /// What happened.
    pub outcome: DayOutcome,
}

/// Aggregated outcomes of a whole run, in fetch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    days: Vec<DayReport>,
}

impl RunSummary {
    /// Records a fetched day.
    pub fn record_fetched(&mut self, date: NaiveDate, records: u64) {
        self.days.push(DayReport {
            date,
            outcome: DayOutcome::Fetched { records },
        });
    }

    /// Records a skipped day.
    pub fn record_skipped(&mut self, date: NaiveDate, reason: SkipReason) {
        self.days.push(DayReport {
            date,
            outcome: DayOutcome::Skipped(reason),
        });
    }

    /// All day outcomes in fetch order.
    #[must_use]
    pub fn days(&self) -> &[DayReport] {
        &self.days
    }

    /// Number of days a fetch was attempted for.
    #[must_use]
    pub fn days_attempted(&self) -> usize {
        self.days.len()
    }

    /// Number of days whose page was fetched.
    #[must_use]
    pub fn days_fetched(&self) -> usize {
        self.days
            .iter()
            .filter(|day| matches!(day.outcome, DayOutcome::Fetched { .. }))
            .count()
    }

    /// Skipped days with their reasons.
    pub fn skipped(&self) -> impl Iterator<Item = (NaiveDate, &SkipReason)> {
        self.days.iter().filter_map(|day| match &day.outcome {
            DayOutcome::Skipped(reason) => Some((day.date, reason)),
            DayOutcome::Fetched { .. } => None,
        })
    }

    /// Total records extracted over the run.
    #[must_use]
    pub fn total_records(&self) -> u64 {
        self.days
            .iter()
            .map(|day| match day.outcome {
                DayOutcome::Fetched { records } => records,
                DayOutcome::Skipped(_) => 0,
            })
            .sum()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} record(s) from {}/{} day(s)",
            self.total_records(),
            self.days_fetched(),
            self.days_attempted(),
        )?;
        for (date, reason) in self.skipped() {
            write!(f, "\n  skipped {}: {reason}", date.format("%m/%d/%Y"))?;
        }
        Ok(())
    }
}
