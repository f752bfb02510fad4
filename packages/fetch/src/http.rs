//! `reqwest`-backed [`PageFetcher`].

use std::time::Duration;

use chrono::NaiveDate;

use crate::endpoint::SearchEndpoint;
use crate::{FetchError, Page, PageFetcher};

/// Fetches one day of reports per request from a [`SearchEndpoint`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    endpoint: SearchEndpoint,
}

impl HttpFetcher {
    /// Builds a client configured with the endpoint's user agent and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the client cannot be built.
    pub fn new(endpoint: SearchEndpoint) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(endpoint.user_agent.as_str())
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// Returns the endpoint this fetcher queries.
    #[must_use]
    pub const fn endpoint(&self) -> &SearchEndpoint {
        &self.endpoint
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_day(&self, date: NaiveDate) -> Result<Page, FetchError> {
        let request = self.endpoint.request(&self.client, date).build()?;
        log::debug!("URL: {}", request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        log::debug!("{date}: HTTP {status}, {} bytes", body.len());

        Ok(Page { status, body })
    }
}
