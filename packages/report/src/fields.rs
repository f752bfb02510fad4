//! Incident-level field extraction.
//!
//! Walks a block's lines once with an explicit index. A line matching a
//! label in the layout's table triggers a bounds-checked lookahead that reads
//! the value on the following line(s). Lines are never skipped, so a label
//! appearing inside a multi-line value is still honored.

use crate::layout::{EmptyPolicy, ExtractRule, IncidentField, ReportLayout};

/// Incident-scoped values shared by every arrestee of a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentFields {
    /// Report number.
    pub report: String,
    /// Offense date/time.
    pub date: String,
    /// Offense location.
    pub location: String,
    /// Case summary.
    pub summary: String,
    /// Offense list.
    pub crime: String,
}

impl IncidentFields {
    fn set(&mut self, field: IncidentField, value: String) {
        log::trace!("{field}: {value}");
        let slot = match field {
            IncidentField::Report => &mut self.report,
            IncidentField::Date => &mut self.date,
            IncidentField::Location => &mut self.location,
            IncidentField::Summary => &mut self.summary,
            IncidentField::Crime => &mut self.crime,
        };
        *slot = value;
    }
}

/// Extracts the incident-level fields of one block.
///
/// Later occurrences of a label overwrite earlier ones.
#[must_use]
pub fn extract_fields(lines: &[&str], layout: &ReportLayout) -> IncidentFields {
    let mut fields = IncidentFields::default();

    for (index, line) in lines.iter().enumerate() {
        let Some(rule) = layout.match_label(line) else {
            continue;
        };

        match &rule.rule {
            ExtractRule::NextLine => {
                if let Some(value) = lines.get(index + 1) {
                    fields.set(rule.field, (*value).to_string());
                }
            }
            ExtractRule::UntilTerminator {
                separator,
                on_empty,
            } => {
                let gathered = gather_until_terminator(lines, index + 1, layout);
                if gathered.is_empty() {
                    if *on_empty == EmptyPolicy::Clear {
                        fields.set(rule.field, String::new());
                    }
                } else {
                    fields.set(rule.field, gathered.join(separator));
                }
            }
        }
    }

    fields
}

/// Collects lines from `start` up to the first line containing the value
/// terminator. Running off the end of the block keeps what was gathered.
fn gather_until_terminator<'a>(
    lines: &[&'a str],
    start: usize,
    layout: &ReportLayout,
) -> Vec<&'a str> {
    let mut gathered = Vec::new();
    let mut index = start;

    loop {
        match lines.get(index) {
            Some(line) if layout.ends_value(line) => break,
            Some(line) => gathered.push(*line),
            None => {
                log::trace!("value starting at line {start} ran past the end of the block");
                break;
            }
        }
        index += 1;
    }

    gathered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> IncidentFields {
        let layout = ReportLayout::apd().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        extract_fields(&lines, &layout)
    }

    #[test]
    fn reads_single_line_fields() {
        let fields = extract(
            "**Report Number:**\n12-345678\n**Offense Date/Time:**\n01/01/2024 10:00\n**Offense Location:**\n100 MAIN ST",
        );
        assert_eq!(fields.report, "12-345678");
        assert_eq!(fields.date, "01/01/2024 10:00");
        assert_eq!(fields.location, "100 MAIN ST");
        assert_eq!(fields.summary, "");
        assert_eq!(fields.crime, "");
    }

    #[test]
    fn single_line_values_are_verbatim() {
        let fields = extract("Report Number\n  12-345678  ");
        assert_eq!(fields.report, "  12-345678  ");
    }

    #[test]
    fn summary_joins_with_spaces_until_marker() {
        let fields = extract(
            "**Case Summary:**\nSUSPECT WAS OBSERVED\nTAKING ITEMS\nFROM STORE\n**Report Number:**\n1",
        );
        assert_eq!(fields.summary, "SUSPECT WAS OBSERVED TAKING ITEMS FROM STORE");
        assert_eq!(fields.report, "1");
    }

    #[test]
    fn summary_is_empty_when_marker_follows_immediately() {
        let fields = extract("**Case Summary:**\n**Report Number:**\n1");
        assert_eq!(fields.summary, "");
    }

    #[test]
    fn later_empty_summary_clears_earlier_one() {
        let fields = extract("Case Summary\nFIRST\n**\nCase Summary\n**");
        assert_eq!(fields.summary, "");
    }

    #[test]
    fn offenses_join_with_commas_until_marker() {
        let fields = extract("**Offense(s):**\nTHEFT\nCRIMINAL TRESPASS\n**Arrestee Name(s):**");
        assert_eq!(fields.crime, "THEFT, CRIMINAL TRESPASS");
    }

    #[test]
    fn empty_offenses_keep_previous_value() {
        let fields = extract("Offense(s)\nTHEFT\n**\nOffense(s)\n**");
        assert_eq!(fields.crime, "THEFT");
    }

    #[test]
    fn accumulation_past_end_keeps_partial_value() {
        let fields = extract("**Case Summary:**\nRAN OFF\nTHE END");
        assert_eq!(fields.summary, "RAN OFF THE END");

        let fields = extract("**Offense(s):**\nASSAULT");
        assert_eq!(fields.crime, "ASSAULT");
    }

    #[test]
    fn label_on_last_line_is_absorbed() {
        let fields = extract("Report Number\n12\nReport Number");
        assert_eq!(fields.report, "12");

        let fields = extract("Case Summary");
        assert_eq!(fields.summary, "");
    }

    #[test]
    fn later_labels_overwrite_earlier_ones() {
        let fields = extract("Report Number\n1\nReport Number\n2");
        assert_eq!(fields.report, "2");
    }

    #[test]
    fn label_match_is_case_insensitive() {
        let fields = extract("OFFENSE DATE/TIME\n02/02/2024");
        assert_eq!(fields.date, "02/02/2024");
    }

    #[test]
    fn lines_inside_a_value_are_still_scanned() {
        let fields = extract("Case Summary\nSEE REPORT NUMBER\n99-1\n**");
        assert_eq!(fields.summary, "SEE REPORT NUMBER 99-1");
        assert_eq!(fields.report, "99-1");
    }
}
