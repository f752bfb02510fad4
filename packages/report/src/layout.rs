//! Config-driven report layout.
//!
//! A [`ReportLayout`] captures everything page-specific about the incident
//! report text: the phrase that ends an incident, the arrestee marker, the
//! character that ends a multi-line value, and the table of labels that the
//! field extractor looks for. The upstream page formatting is the fragile
//! part of the scraper, so it lives in TOML rather than in code.
//!
//! Layouts are embedded at compile time via [`include_str!`].

use regex::Regex;
use serde::Deserialize;
use strum_macros::{AsRefStr, Display};

use crate::LayoutError;

/// The Austin Police Department layout, embedded at compile time.
const APD_LAYOUT_TOML: &str = include_str!("../layouts/apd.toml");

/// Incident-scoped field a label populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IncidentField {
    /// Report number.
    Report,
    /// Offense date/time.
    Date,
    /// Offense location.
    Location,
    /// Case summary.
    Summary,
    /// Offense list.
    Crime,
}

/// What to do when a multi-line rule gathers nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPolicy {
    /// Overwrite the field with an empty string.
    Clear,
    /// Leave whatever value the field already had.
    Keep,
}

/// How the value(s) following a label line are read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtractRule {
    /// The single line after the label, verbatim.
    NextLine,
    /// Every line after the label up to (not including) the first line
    /// containing the layout's value terminator.
    UntilTerminator {
        /// Joins the gathered lines.
        separator: String,
        /// Behaviour when the line right after the label already ends the
        /// value (or the block ends).
        on_empty: EmptyPolicy,
    },
}

/// One entry in the label table.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldRule {
    /// Case-insensitive substring identifying the label line.
    pub label: String,
    /// Field the label populates.
    pub field: IncidentField,
    /// How to read the value.
    pub rule: ExtractRule,
}

/// Raw TOML shape of a layout, before validation.
#[derive(Debug, Deserialize)]
struct LayoutDefinition {
    id: String,
    name: String,
    block_terminator: String,
    arrestee_marker: String,
    value_terminator: String,
    label_prefix: String,
    fields: Vec<FieldRule>,
}

/// A validated report layout ready for extraction.
#[derive(Debug, Clone)]
pub struct ReportLayout {
    /// Unique identifier (e.g. `"apd"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Literal, case-sensitive phrase ending each incident.
    pub block_terminator: String,
    /// Lowercase marker identifying an arrestee line.
    pub arrestee_marker: String,
    /// Substring that ends a multi-line value.
    pub value_terminator: String,
    /// Leading label markup stripped from arrestee values.
    pub label_prefix: Regex,
    /// Label table with lowercase labels, in match priority order.
    pub fields: Vec<FieldRule>,
}

impl ReportLayout {
    /// Returns the embedded Austin Police Department layout.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] if the embedded TOML is malformed.
    pub fn apd() -> Result<Self, LayoutError> {
        parse_layout_toml(APD_LAYOUT_TOML)
    }

    /// Whether `text` mentions the arrestee marker (case-insensitive).
    #[must_use]
    pub fn mentions_arrestee(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.arrestee_marker)
    }

    /// Whether `line` ends a multi-line value.
    #[must_use]
    pub fn ends_value(&self, line: &str) -> bool {
        line.contains(self.value_terminator.as_str())
    }

    /// Returns the first label rule matching `line`, if any.
    #[must_use]
    pub fn match_label(&self, line: &str) -> Option<&FieldRule> {
        let lower = line.to_lowercase();
        self.fields.iter().find(|rule| lower.contains(&rule.label))
    }
}

/// Parses and validates a [`ReportLayout`] from a TOML string.
///
/// # Errors
///
/// Returns [`LayoutError`] if the TOML is malformed, the label prefix is not
/// a valid regex, or a required marker is empty.
pub fn parse_layout_toml(toml_str: &str) -> Result<ReportLayout, LayoutError> {
    let definition: LayoutDefinition = toml::de::from_str(toml_str)?;

    let invalid = |message: &str| LayoutError::Invalid {
        id: definition.id.clone(),
        message: message.to_string(),
    };

    if definition.block_terminator.is_empty() {
        return Err(invalid("block_terminator is empty"));
    }
    if definition.arrestee_marker.trim().is_empty() {
        return Err(invalid("arrestee_marker is empty"));
    }
    if definition.value_terminator.is_empty() {
        return Err(invalid("value_terminator is empty"));
    }
    if let Some(rule) = definition.fields.iter().find(|r| r.label.trim().is_empty()) {
        return Err(invalid(&format!("empty label for field '{}'", rule.field)));
    }

    let label_prefix = Regex::new(&definition.label_prefix)?;

    let fields = definition
        .fields
        .into_iter()
        .map(|rule| FieldRule {
            label: rule.label.to_lowercase(),
            ..rule
        })
        .collect();

    Ok(ReportLayout {
        id: definition.id,
        name: definition.name,
        block_terminator: definition.block_terminator,
        arrestee_marker: definition.arrestee_marker.to_lowercase(),
        value_terminator: definition.value_terminator,
        label_prefix,
        fields,
    })
}
