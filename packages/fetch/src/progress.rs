//! Progress reporting for the day-by-day scrape.
//!
//! [`ProgressCallback`] keeps the scrape loop independent of how progress
//! is rendered. The CLI plugs in an `indicatif` bar; tests and library
//! callers use [`NullProgress`].

use std::sync::Arc;

/// Receives progress updates, one unit per day fetched.
pub trait ProgressCallback: Send + Sync {
    /// Set the total number of days.
    fn set_total(&self, total: u64);

    /// Advance by `delta` days.
    fn inc(&self, delta: u64);

    /// Update the message shown next to the indicator (the current day).
    fn set_message(&self, msg: String);

    /// Mark the scrape complete with a final message.
    fn finish(&self, msg: String);
}

/// A [`ProgressCallback`] that ignores every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`] instance.
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
