#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Day-by-day fetching of the APD incident report search.
//!
//! The search only answers one calendar day per request, so a date range is
//! fetched as a strictly sequential [`Stream`] of [`DayFetch`] items, one
//! per day, walking backward from the most recent day. A day that fails is
//! yielded as skipped with a [`SkipReason`]; it never ends the stream.
//!
//! The [`PageFetcher`] trait is the seam between the stream and the network.
//! [`HttpFetcher`] is the `reqwest` implementation.

pub mod endpoint;
pub mod http;
pub mod progress;
pub mod range;
pub mod summary;

use chrono::NaiveDate;
use futures::Stream;

pub use endpoint::{SearchEndpoint, parse_endpoint_toml};
pub use http::HttpFetcher;
pub use range::DateRange;
pub use summary::{DayOutcome, RunSummary, SkipReason};

/// Errors that can occur while configuring or performing a fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// An HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint TOML failed to parse.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The endpoint parsed but is unusable.
    #[error("Invalid endpoint '{id}': {message}")]
    InvalidEndpoint {
        /// Endpoint identifier.
        id: String,
        /// Description of what went wrong.
        message: String,
    },

    /// The start date is earlier than the end date.
    #[error("start date {start} is earlier than end date {end}")]
    InvalidRange {
        /// Requested start (most recent) date.
        start: NaiveDate,
        /// Requested end (oldest) date.
        end: NaiveDate,
    },
}

/// A raw response to a single-day search.
#[derive(Debug, Clone)]
pub struct Page {
    /// HTTP status of the response.
    pub status: reqwest::StatusCode,
    /// Response body.
    pub body: String,
}

/// Fetches the search results page for one day.
pub trait PageFetcher: Send + Sync {
    /// Performs the request for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if no response could be obtained.
    fn fetch_day(
        &self,
        date: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Page, FetchError>> + Send;
}

/// Result of fetching one day.
#[derive(Debug, Clone)]
pub enum DayPage {
    /// HTTP 200 body, ready for extraction.
    Fetched(String),
    /// No usable page for this day.
    Skipped(SkipReason),
}

/// One item of the day stream.
#[derive(Debug, Clone)]
pub struct DayFetch {
    /// The day queried.
    pub date: NaiveDate,
    /// What came back.
    pub page: DayPage,
}

/// Lazily fetches every day of `range`, most recent first, one request at a
/// time.
///
/// Transport failures and non-200 responses are logged and yielded as
/// [`DayPage::Skipped`].
pub fn fetch_days<F: PageFetcher>(
    fetcher: &F,
    range: DateRange,
) -> impl Stream<Item = DayFetch> + '_ {
    async_stream::stream! {
        for date in range.days() {
            log::debug!("Date: {}", date.format("%m/%d/%Y"));

            let page = match fetcher.fetch_day(date).await {
                Ok(page) if page.status == reqwest::StatusCode::OK => DayPage::Fetched(page.body),
                Ok(page) => {
                    log::warn!("{date}: search returned HTTP {}, skipping day", page.status);
                    DayPage::Skipped(SkipReason::Status(page.status.as_u16()))
                }
                Err(e) => {
                    log::warn!("{date}: request failed, skipping day: {e}");
                    DayPage::Skipped(SkipReason::Transport(e.to_string()))
                }
            };

            yield DayFetch { date, page };
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use futures::StreamExt as _;
    use reqwest::StatusCode;

    use super::*;

    type Responder = fn(NaiveDate) -> Result<Page, FetchError>;

    struct ScriptedFetcher {
        calls: Mutex<Vec<NaiveDate>>,
        respond: Responder,
    }

    impl ScriptedFetcher {
        fn new(respond: Responder) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                respond,
            }
        }

        fn calls(&self) -> Vec<NaiveDate> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl PageFetcher for ScriptedFetcher {
        async fn fetch_day(&self, date: NaiveDate) -> Result<Page, FetchError> {
            self.calls.lock().unwrap().push(date);
            (self.respond)(date)
        }
    }

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn ok_page(date: NaiveDate) -> Result<Page, FetchError> {
        Ok(Page {
            status: StatusCode::OK,
            body: format!("<p>{date}</p>"),
        })
    }

    fn transport_error() -> FetchError {
        let err = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        FetchError::Http(err)
    }

    #[tokio::test]
    async fn one_request_per_day_most_recent_first() {
        let fetcher = ScriptedFetcher::new(ok_page);
        let range = DateRange::new(day(2024, 3, 2), day(2024, 2, 27)).unwrap();

        let days: Vec<DayFetch> = fetch_days(&fetcher, range).collect().await;

        assert_eq!(days.len() as u64, range.day_count());
        assert_eq!(
            fetcher.calls(),
            [
                day(2024, 3, 2),
                day(2024, 3, 1),
                day(2024, 2, 29),
                day(2024, 2, 28),
                day(2024, 2, 27),
            ]
        );
        assert!(matches!(&days[0].page, DayPage::Fetched(body) if body == "<p>2024-03-02</p>"));
    }

    #[tokio::test]
    async fn non_ok_status_is_skipped() {
        let fetcher = ScriptedFetcher::new(|date| {
            if date.format("%d").to_string() == "02" {
                Ok(Page {
                    status: StatusCode::SERVICE_UNAVAILABLE,
                    body: "down".to_string(),
                })
            } else {
                ok_page(date)
            }
        });
        let range = DateRange::new(day(2024, 1, 3), day(2024, 1, 1)).unwrap();

        let days: Vec<DayFetch> = fetch_days(&fetcher, range).collect().await;

        assert_eq!(days.len(), 3);
        assert!(matches!(days[0].page, DayPage::Fetched(_)));
        assert!(matches!(days[1].page, DayPage::Skipped(SkipReason::Status(503))));
        assert!(matches!(days[2].page, DayPage::Fetched(_)));
    }

    #[tokio::test]
    async fn transport_errors_do_not_stop_the_run() {
        let fetcher = ScriptedFetcher::new(|_| Err(transport_error()));
        let range = DateRange::new(day(2024, 1, 2), day(2024, 1, 1)).unwrap();

        let days: Vec<DayFetch> = fetch_days(&fetcher, range).collect().await;

        assert_eq!(fetcher.calls().len(), 2);
        assert!(
            days.iter()
                .all(|d| matches!(d.page, DayPage::Skipped(SkipReason::Transport(_))))
        );
    }

    #[tokio::test]
    async fn stream_is_lazy() {
        let fetcher = ScriptedFetcher::new(ok_page);
        let range = DateRange::new(day(2024, 1, 10), day(2024, 1, 1)).unwrap();

        let first: Vec<DayFetch> = fetch_days(&fetcher, range).take(2).collect().await;

        assert_eq!(first.len(), 2);
        assert_eq!(fetcher.calls().len(), 2);
    }
}
