#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Arrest record types shared across the APD arrests toolchain.
//!
//! An [`ArrestRecord`] is one row of output: the incident-level fields of a
//! police report paired with one person arrested in that incident. Every
//! field is free text copied out of the report page, so nothing here is
//! guaranteed to be well-formed (dates stay strings, names may be censored
//! for juveniles, etc.).

use serde::{Deserialize, Serialize};

/// Column names of the CSV output, in serialization order.
pub const CSV_HEADER: [&str; 9] = [
    "report", "date", "name", "dob", "sex", "race", "crime", "summary", "location",
];

/// One arrested person within one incident report.
///
/// Incidents with several arrestees produce several records that share
/// `report_id`, `offense_datetime`, `offense_description`, `summary` and
/// `location`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrestRecord {
    /// Report number (e.g. `"12-345678"`).
    #[serde(rename = "report")]
    pub report_id: String,
    /// Offense date/time exactly as printed on the report.
    #[serde(rename = "date")]
    pub offense_datetime: String,
    /// Arrestee name.
    pub name: String,
    /// Arrestee date of birth.
    #[serde(rename = "dob")]
    pub date_of_birth: String,
    /// Arrestee sex.
    pub sex: String,
    /// Arrestee race.
    pub race: String,
    /// Offenses listed on the report, comma separated.
    #[serde(rename = "crime")]
    pub offense_description: String,
    /// Free-text case summary.
    pub summary: String,
    /// Offense location.
    pub location: String,
}

impl ArrestRecord {
    /// Returns the record's values in [`CSV_HEADER`] order.
    #[must_use]
    pub fn to_row(&self) -> [&str; 9] {
        [
            &self.report_id,
            &self.offense_datetime,
            &self.name,
            &self.date_of_birth,
            &self.sex,
            &self.race,
            &self.offense_description,
            &self.summary,
            &self.location,
        ]
    }
}
