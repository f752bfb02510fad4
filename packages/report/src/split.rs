//! Splits normalized report text into incident blocks.

use crate::layout::ReportLayout;

/// The lines of one incident, between two block terminators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentBlock<'a> {
    /// Lines of the block in document order.
    pub lines: Vec<&'a str>,
}

impl<'a> IncidentBlock<'a> {
    /// Splits a block's text into lines.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
        }
    }
}

/// Lazily splits `text` on the layout's block terminator, yielding only the
/// blocks that mention an arrestee.
///
/// The terminator match is literal and case-sensitive; the arrestee check is
/// case-insensitive.
pub fn split_incidents<'a>(
    text: &'a str,
    layout: &'a ReportLayout,
) -> impl Iterator<Item = IncidentBlock<'a>> + 'a {
    text.split(layout.block_terminator.as_str())
        .filter(|block| layout.mentions_arrestee(block))
        .map(IncidentBlock::new)
}
