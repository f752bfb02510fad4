//! Calendar date ranges walked from the most recent day backward.

use chrono::NaiveDate;

use crate::FetchError;

/// An inclusive range of days, `start` being nearest to the present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range from `start` (most recent) back to `end`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRange`] if `start` is earlier than `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, FetchError> {
        if start < end {
            return Err(FetchError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The most recent day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// The oldest day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, both ends included.
    #[must_use]
    pub fn day_count(&self) -> u64 {
        (self.start - self.end).num_days().unsigned_abs() + 1
    }

    /// Iterates the days from `start` back to `end`.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |day| {
            day.pred_opt().filter(|previous| *previous >= end)
        })
    }
}
