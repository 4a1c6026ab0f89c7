//! Element classification.

use crate::body::{BodyUnit, NumberingCatalog};
use crate::model::NumberingId;

/// What a body unit turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// First item of a list run; hand over to the list accumulator
    ListCandidate(NumberingId),
    /// Paragraph set larger than body text
    Header,
    /// Single-row table set larger than body text
    TableHeaderBanner,
    /// Data table
    Table,
    /// Ordinary paragraph
    Paragraph,
}

/// Classify a body unit.
///
/// Rules, in order: a paragraph whose numbering reference exists in the
/// catalog is a list candidate; a paragraph larger than the document default
/// is a header; a one-row table larger than the default is a banner; any
/// other table is a table; everything else is a paragraph.
///
/// Returns `None` for a paragraph without runs, which contributes nothing.
pub fn classify(
    unit: &BodyUnit,
    effective_font_size: u32,
    document_default: u32,
    catalog: &impl NumberingCatalog,
) -> Option<Classification> {
    let larger_than_body = effective_font_size > document_default;

    match unit {
        BodyUnit::Paragraph(p) => {
            if !p.has_runs() {
                return None;
            }
            if let Some(id) = p.numbering.filter(|id| catalog.contains(*id)) {
                return Some(Classification::ListCandidate(id));
            }
            if larger_than_body {
                Some(Classification::Header)
            } else {
                Some(Classification::Paragraph)
            }
        }
        BodyUnit::Table(t) => {
            if larger_than_body && t.rows.len() == 1 {
                Some(Classification::TableHeaderBanner)
            } else {
                Some(Classification::Table)
            }
        }
    }
}
