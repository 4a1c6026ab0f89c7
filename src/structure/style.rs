//! Effective font size resolution.

use crate::body::BodyUnit;

/// Default font size assumed when a document declares none.
///
/// This is a guess, not a measured value. Callers that know better should
/// pass their own fallback through [`super::BuildOptions`].
pub const FALLBACK_FONT_SIZE: u32 = 10;

/// Resolve the document default font size once, at document-open time.
pub fn resolve_default_font_size(declared: Option<u32>, fallback: u32) -> u32 {
    declared.unwrap_or(fallback)
}

/// Resolve the effective font size of a body unit.
///
/// The unit's style size wins. When the style sets none, the first run's
/// explicit size is used, and finally the document default.
pub fn resolve_font_size(unit: &BodyUnit, document_default: u32) -> u32 {
    unit.style_font_size()
        .or_else(|| unit.first_run().and_then(|run| run.font_size))
        .unwrap_or(document_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{StyledParagraph, StyledRun, StyledTable};

    #[test]
    fn test_default_font_size_fallback() {
        assert_eq!(resolve_default_font_size(Some(11), FALLBACK_FONT_SIZE), 11);
        assert_eq!(resolve_default_font_size(None, FALLBACK_FONT_SIZE), 10);
        assert_eq!(resolve_default_font_size(None, 12), 12);
    }

    #[test]
    fn test_style_size_wins() {
        let unit = BodyUnit::Paragraph(
            StyledParagraph::new(vec![StyledRun::sized("Title", 18)]).with_style_font_size(12),
        );
        assert_eq!(resolve_font_size(&unit, 10), 12);
    }

    #[test]
    fn test_small_run_in_heading_style() {
        let unit = BodyUnit::Paragraph(
            StyledParagraph::new(vec![StyledRun::sized("Overview", 10)]).with_style_font_size(16),
        );
        assert_eq!(resolve_font_size(&unit, 10), 16);
    }

    #[test]
    fn test_run_size_when_style_unset() {
        let unit = BodyUnit::Paragraph(StyledParagraph::new(vec![StyledRun::sized("Title", 18)]));
        assert_eq!(resolve_font_size(&unit, 10), 18);
    }

    #[test]
    fn test_style_size_when_run_unset() {
        let unit = BodyUnit::Paragraph(
            StyledParagraph::new(vec![StyledRun::new("Heading")]).with_style_font_size(16),
        );
        assert_eq!(resolve_font_size(&unit, 10), 16);
    }

    #[test]
    fn test_only_first_run_counts() {
        let unit = BodyUnit::Paragraph(StyledParagraph::new(vec![
            StyledRun::new("plain "),
            StyledRun::sized("huge", 40),
        ]));
        assert_eq!(resolve_font_size(&unit, 11), 11);
    }

    #[test]
    fn test_document_default_when_nothing_resolves() {
        let unit = BodyUnit::Paragraph(StyledParagraph::default());
        assert_eq!(resolve_font_size(&unit, 10), 10);
    }

    #[test]
    fn test_table_uses_table_style_then_first_cell_run() {
        let sized = StyledTable::new(vec![vec![vec![StyledParagraph::new(vec![
            StyledRun::sized("Q1", 9),
        ])]]])
        .with_style_font_size(14);
        assert_eq!(resolve_font_size(&BodyUnit::Table(sized), 10), 14);

        let unstyled = StyledTable::new(vec![vec![vec![StyledParagraph::new(vec![
            StyledRun::sized("Q1", 9),
        ])]]]);
        assert_eq!(resolve_font_size(&BodyUnit::Table(unstyled), 10), 9);

        let styled = StyledTable::new(vec![vec![vec![StyledParagraph::new(vec![
            StyledRun::new("Q1"),
        ])]]])
        .with_style_font_size(14);
        assert_eq!(resolve_font_size(&BodyUnit::Table(styled), 10), 14);
    }
}
