//! Search endpoint configuration.
//!
//! The report search is the one external dependency of the whole tool, so
//! its URL and query shape live in an embedded TOML file instead of inline
//! literals. Only the date parameter varies between requests.

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

use crate::FetchError;

/// The Austin Police Department search endpoint, embedded at compile time.
const AUSTIN_ENDPOINT_TOML: &str = include_str!("../endpoints/austin.toml");

/// A fixed query parameter sent with every request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryParam {
    /// Parameter name.
    pub name: String,
    /// Parameter value (may be empty).
    pub value: String,
}

/// Everything needed to build a single-day search request.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchEndpoint {
    /// Unique identifier (e.g. `"austin"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// URL of the search page, without a query string.
    pub base_url: String,
    /// Name of the query parameter carrying the day.
    pub date_param: String,
    /// `strftime` format of the day (e.g. `"%m/%d/%Y"`).
    pub date_format: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Fixed parameters, sent in order after the date parameter.
    #[serde(default)]
    pub query: Vec<QueryParam>,
}

impl SearchEndpoint {
    /// Returns the embedded Austin Police Department endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the embedded TOML is malformed.
    pub fn austin() -> Result<Self, FetchError> {
        parse_endpoint_toml(AUSTIN_ENDPOINT_TOML)
    }

    /// Formats `date` the way the endpoint expects it.
    #[must_use]
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }

    /// Returns the full, ordered query for `date`.
    #[must_use]
    pub fn query_for(&self, date: NaiveDate) -> Vec<(&str, String)> {
        std::iter::once((self.date_param.as_str(), self.format_date(date)))
            .chain(
                self.query
                    .iter()
                    .map(|param| (param.name.as_str(), param.value.clone())),
            )
            .collect()
    }

    /// Builds the GET request for `date`.
    #[must_use]
    pub fn request(&self, client: &reqwest::Client, date: NaiveDate) -> reqwest::RequestBuilder {
        client.get(&self.base_url).query(&self.query_for(date))
    }
}

/// Parses and validates a [`SearchEndpoint`] from a TOML string.
///
/// # Errors
///
/// Returns [`FetchError`] if the TOML is malformed or the date format is not
/// a valid `strftime` pattern.
pub fn parse_endpoint_toml(toml_str: &str) -> Result<SearchEndpoint, FetchError> {
    let endpoint: SearchEndpoint = toml::de::from_str(toml_str)?;

    if endpoint.base_url.is_empty() || endpoint.date_param.is_empty() {
        return Err(FetchError::InvalidEndpoint {
            id: endpoint.id,
            message: "base_url and date_param are required".to_string(),
        });
    }

    // An invalid pattern would otherwise panic when the date is rendered.
    if StrftimeItems::new(&endpoint.date_format).any(|item| matches!(item, Item::Error)) {
        return Err(FetchError::InvalidEndpoint {
            message: format!("invalid date_format '{}'", endpoint.date_format),
            id: endpoint.id,
        });
    }

    Ok(endpoint)
}
