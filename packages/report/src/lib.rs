#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Arrest record extraction from APD incident report pages.
//!
//! The report search page is semi-structured HTML. Extraction is a linear
//! pipeline:
//!
//! 1. [`normalize`] the markup into line-oriented text
//! 2. [`split_incidents`] on the block terminator, dropping blocks without
//!    an arrestee
//! 3. [`extract_fields`] reads the incident-level labels
//! 4. [`extract_arrestees`] reads each arrestee and emits one
//!    [`ArrestRecord`] per person
//!
//! Everything page-specific is described by a [`ReportLayout`].

pub mod arrestee;
pub mod fields;
pub mod layout;
pub mod normalize;
pub mod split;

use apd_arrests_models::ArrestRecord;

pub use arrestee::extract_arrestees;
pub use fields::{IncidentFields, extract_fields};
pub use layout::{ReportLayout, parse_layout_toml};
pub use normalize::normalize;
pub use split::{IncidentBlock, split_incidents};

/// Errors that can occur while loading a report layout.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The layout TOML failed to parse.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The label prefix pattern failed to compile.
    #[error("Invalid regex pattern: {0}")]
    Regex(#[from] regex::Error),

    /// The layout parsed but is unusable.
    #[error("Invalid layout '{id}': {message}")]
    Invalid {
        /// Layout identifier.
        id: String,
        /// Description of what went wrong.
        message: String,
    },
}

/// Lazily extracts every arrest record from normalized report text.
pub fn extract_arrests<'a>(
    text: &'a str,
    layout: &'a ReportLayout,
) -> impl Iterator<Item = ArrestRecord> + 'a {
    split_incidents(text, layout).flat_map(move |block| {
        let incident = extract_fields(&block.lines, layout);
        let records = extract_arrestees(&block.lines, &incident, layout);
        for record in &records {
            log::debug!(
                "\t{} {} {} {} {} {} {} {} {}",
                record.report_id,
                record.offense_datetime,
                record.name,
                record.date_of_birth,
                record.sex,
                record.race,
                record.offense_description,
                record.summary,
                record.location,
            );
        }
        records
    })
}

/// Normalizes an HTML report page and extracts all of its arrest records.
#[must_use]
pub fn process_report(html: &str, layout: &ReportLayout) -> Vec<ArrestRecord> {
    let text = normalize(html);
    extract_arrests(&text, layout).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ReportLayout {
        ReportLayout::apd().unwrap()
    }

    #[test]
    fn extracts_single_arrestee_block() {
        let layout = layout();
        let text = "**Report Number:**\n12-345678\n**Offense Date/Time:**\n01/01/2024 10:00\n\
                    **Offense Location:**\n100 MAIN ST\nArrestee Name(s):\nJOHN DOE\n01/01/1990\nM\nW\n";
        let records: Vec<_> = extract_arrests(text, &layout).collect();

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].to_row(),
            [
                "12-345678",
                "01/01/2024 10:00",
                "JOHN DOE",
                "01/01/1990",
                "M",
                "W",
                "",
                "",
                "100 MAIN ST",
            ]
        );
    }

    #[test]
    fn multiple_arrestees_share_incident_fields() {
        let layout = layout();
        let text = "Report Number\nR-1\nOffense(s)\nTHEFT\n**Arrestee:**\nA\n1\nM\nW\n\
                    **Arrestee:**\nB\n2\nF\nB\n**Arrestee:**\nC\n3\nM\nH\nEnd Of Offense";
        let records: Vec<_> = extract_arrests(text, &layout).collect();

        assert_eq!(records.len(), 3);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        for record in &records {
            assert_eq!(record.report_id, "R-1");
            assert_eq!(record.offense_description, "THEFT");
        }
    }

    #[test]
    fn blocks_do_not_leak_fields_into_each_other() {
        let layout = layout();
        let text = "Report Number\nR-1\nArrestee\nA\n1\nM\nW\nEnd Of Offense\n\
                    Arrestee\nB\n2\nF\nB\nEnd Of Offense";
        let records: Vec<_> = extract_arrests(text, &layout).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].report_id, "R-1");
        assert_eq!(records[1].report_id, "");
    }

    #[test]
    fn page_without_arrestees_yields_nothing() {
        let layout = layout();
        let html = "<html><body><p><b>Report Number:</b></p><p>1</p><p>End Of Offense</p></body></html>";
        assert!(process_report(html, &layout).is_empty());
    }

    #[test]
    fn processes_html_report_page() {
        let layout = layout();
        let html = r"<html><body>
            <table>
              <tr><td><b>Report Number:</b></td></tr>
              <tr><td>2024-5001234</td></tr>
              <tr><td><b>Offense Date/Time:</b></td></tr>
              <tr><td>01/15/2024 23:10</td></tr>
              <tr><td><b>Offense(s):</b></td></tr>
              <tr><td>THEFT</td></tr>
              <tr><td>RESIST ARREST</td></tr>
              <tr><td><b>Offense Location:</b></td></tr>
              <tr><td>700 E 6TH ST</td></tr>
              <tr><td><b>Case Summary:</b></td></tr>
              <tr><td>OFFICERS RESPONDED TO A</td></tr>
              <tr><td>DISTURBANCE</td></tr>
              <tr><td><b>Arrestee Name(s):</b></td></tr>
              <tr><td><b>Name</b>: DOE, JOHN</td></tr>
              <tr><td><b>DOB</b>: 03/04/1985</td></tr>
              <tr><td>M</td></tr>
              <tr><td>W</td></tr>
            </table>
            <p>End Of Offense</p>
            <table>
              <tr><td><b>Report Number:</b></td></tr>
              <tr><td>2024-5001299</td></tr>
            </table>
            <p>End Of Offense</p>
            </body></html>";

        let records = process_report(html, &layout);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.report_id, "2024-5001234");
        assert_eq!(record.offense_datetime, "01/15/2024 23:10");
        assert_eq!(record.offense_description, "THEFT, RESIST ARREST");
        assert_eq!(record.location, "700 E 6TH ST");
        assert_eq!(record.summary, "OFFICERS RESPONDED TO A DISTURBANCE");
        assert_eq!(record.name, "DOE, JOHN");
        assert_eq!(record.date_of_birth, "03/04/1985");
        assert_eq!(record.sex, "M");
        assert_eq!(record.race, "W");
    }
}
