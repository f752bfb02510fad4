//! Arrestee extraction.
//!
//! Every line mentioning the arrestee marker is followed by four positional
//! lines: name, date of birth, sex, race. Each becomes one [`ArrestRecord`]
//! combined with the block's [`IncidentFields`].

use apd_arrests_models::ArrestRecord;

use crate::fields::IncidentFields;
use crate::layout::ReportLayout;

/// Number of lines read after each arrestee marker.
pub const ARRESTEE_LINES: usize = 4;

/// Builds one record per arrestee marker found in `lines`.
///
/// Lines missing because the block ended early read as empty strings.
#[must_use]
pub fn extract_arrestees(
    lines: &[&str],
    incident: &IncidentFields,
    layout: &ReportLayout,
) -> Vec<ArrestRecord> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| layout.mentions_arrestee(line))
        .map(|(index, _)| {
            let value = |offset: usize| {
                lines
                    .get(index + offset)
                    .map_or_else(String::new, |line| strip_label(line, layout))
            };

            ArrestRecord {
                report_id: clean_value(&incident.report),
                offense_datetime: clean_value(&incident.date),
                name: value(1),
                date_of_birth: value(2),
                sex: value(3),
                race: value(ARRESTEE_LINES),
                offense_description: clean_value(&incident.crime),
                summary: clean_value(&incident.summary),
                location: clean_value(&incident.location),
            }
        })
        .collect()
}

/// Removes one leading label run (e.g. `**Sex**:`) then cleans the value.
#[must_use]
pub fn strip_label(value: &str, layout: &ReportLayout) -> String {
    clean_value(&layout.label_prefix.replace(value, ""))
}

/// Collapses escaped quotes into literal quotes and trims whitespace.
#[must_use]
pub fn clean_value(value: &str) -> String {
    value.replace("\\\"", "\"").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ReportLayout {
        ReportLayout::apd().unwrap()
    }

    fn incident() -> IncidentFields {
        IncidentFields {
            report: " 12-345678 ".to_string(),
            date: "01/01/2024 10:00".to_string(),
            location: "100 MAIN ST".to_string(),
            summary: "SAID \\\"HI\\\"".to_string(),
            crime: "THEFT".to_string(),
        }
    }

    #[test]
    fn strips_one_leading_label_run() {
        let layout = layout();
        assert_eq!(strip_label("**Sex**: M", &layout), "M");
        assert_eq!(strip_label("  *Race*:  W  ", &layout), "W");
        assert_eq!(strip_label("**A**: **B**: C", &layout), "**B**: C");
    }

    #[test]
    fn leaves_unlabeled_values_except_trimming() {
        let layout = layout();
        assert_eq!(strip_label("  JOHN DOE ", &layout), "JOHN DOE");
        assert_eq!(strip_label("DOE **X**: Y", &layout), "DOE **X**: Y");
    }

    #[test]
    fn normalizes_escaped_quotes() {
        assert_eq!(clean_value(" \\\"BIG\\\" JOHN "), "\"BIG\" JOHN");
    }

    #[test]
    fn reads_four_lines_after_each_marker() {
        let lines = [
            "Arrestee Name(s):",
            "JOHN DOE",
            "01/01/1990",
            "M",
            "W",
            "Arrestee Name(s):",
            "**Name**: JANE DOE",
            "**DOB**: 02/02/1992",
            "**Sex**: F",
            "**Race**: B",
        ];
        let records = extract_arrestees(&lines, &incident(), &layout());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "JOHN DOE");
        assert_eq!(records[0].race, "W");
        assert_eq!(records[1].name, "JANE DOE");
        assert_eq!(records[1].date_of_birth, "02/02/1992");
        assert_eq!(records[1].sex, "F");
        assert_eq!(records[1].race, "B");

        for record in &records {
            assert_eq!(record.report_id, "12-345678");
            assert_eq!(record.summary, "SAID \"HI\"");
            assert_eq!(record.offense_description, "THEFT");
            assert_eq!(record.location, "100 MAIN ST");
        }
    }

    #[test]
    fn truncated_block_reads_missing_lines_as_empty() {
        let lines = ["Arrestee", "JOHN DOE"];
        let records = extract_arrestees(&lines, &incident(), &layout());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "JOHN DOE");
        assert_eq!(records[0].date_of_birth, "");
        assert_eq!(records[0].sex, "");
        assert_eq!(records[0].race, "");
    }

    #[test]
    fn no_marker_no_records() {
        let lines = ["Report Number", "1", "JOHN DOE"];
        assert!(extract_arrestees(&lines, &incident(), &layout()).is_empty());
    }
}
