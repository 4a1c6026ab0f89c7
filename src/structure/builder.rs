//! Single-pass document builder.

use crate::body::{BodyUnit, NumberingCatalog, StyledBody, StyledParagraph, StyledTable};
use crate::error::{Error, Result};
use crate::model::{Document, Element, Table, TableCell, TableRow};

use super::classify::{classify, Classification};
use super::cursor::UnitCursor;
use super::list::accumulate;
use super::options::BuildOptions;
use super::style::{resolve_default_font_size, resolve_font_size};

/// Builds a [`Document`] from a styled body in one forward pass.
///
/// Header levels are left unranked; run
/// [`super::HeaderLevelNormalizer`] afterwards.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    options: BuildOptions,
}

impl DocumentBuilder {
    /// Create a builder.
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Classify every body unit and append the results in encounter order.
    pub fn build(&self, body: StyledBody) -> Result<Document> {
        let StyledBody {
            metadata,
            default_font_size,
            numbering,
            units,
        } = body;

        let default_size =
            resolve_default_font_size(default_font_size, self.options.fallback_font_size);
        log::debug!(
            "default font size {} (declared: {:?})",
            default_size,
            default_font_size
        );

        let unit_count = units.len();
        let mut document = Document::new(metadata);
        let mut cursor = UnitCursor::new(units.into_iter());

        while let Some(unit) = cursor.advance() {
            let size = resolve_font_size(&unit, default_size);
            let Some(class) = classify(&unit, size, default_size, &numbering) else {
                log::trace!("skipping paragraph without runs");
                continue;
            };

            let element = match (class, unit) {
                (Classification::ListCandidate(id), BodyUnit::Paragraph(p)) => {
                    log::debug!("list found (numbering {})", id);
                    Element::List(accumulate(&mut cursor, p, id, numbering.kind(id))?)
                }
                (Classification::Header, BodyUnit::Paragraph(p)) => {
                    log::debug!("header found (size {})", size);
                    Element::header(p.text(), size)
                }
                (Classification::Paragraph, BodyUnit::Paragraph(p)) => {
                    Element::Paragraph(p.to_paragraph())
                }
                (Classification::TableHeaderBanner, BodyUnit::Table(t)) => {
                    log::debug!("table header found (size {})", size);
                    Element::TableHeader {
                        text: banner_text(&t),
                        font_size: size,
                    }
                }
                (Classification::Table, BodyUnit::Table(t)) => {
                    log::debug!("table found ({} rows)", t.rows.len());
                    Element::Table(convert_table(&t))
                }
                (class, _) => {
                    return Err(Error::InvariantViolation(format!(
                        "classification {:?} does not match unit kind",
                        class
                    )))
                }
            };
            document.push(element);
        }

        if cursor.consumed() != unit_count {
            return Err(Error::InvariantViolation(format!(
                "consumed {} of {} body units",
                cursor.consumed(),
                unit_count
            )));
        }

        log::info!(
            "built {} elements from {} body units",
            document.len(),
            unit_count
        );
        Ok(document)
    }
}

fn convert_table(table: &StyledTable) -> Table {
    let mut converted = Table::new();
    for row in &table.rows {
        let cells = row
            .iter()
            .map(|cell| {
                TableCell::with_content(
                    cell.iter()
                        .filter(|p| p.has_runs())
                        .map(StyledParagraph::to_paragraph)
                        .collect(),
                )
            })
            .collect();
        converted.add_row(TableRow::new(cells));
    }
    converted
}

fn banner_text(table: &StyledTable) -> String {
    table
        .rows
        .iter()
        .flatten()
        .map(|cell| {
            cell.iter()
                .map(StyledParagraph::text)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Numbering, StyledRun};
    use crate::model::{ListKind, Metadata, NumberingId};

    fn sized(text: &str, size: u32) -> BodyUnit {
        BodyUnit::Paragraph(StyledParagraph::new(vec![StyledRun::sized(text, size)]))
    }

    fn numbered(text: &str, id: u32) -> BodyUnit {
        BodyUnit::Paragraph(
            StyledParagraph::new(vec![StyledRun::new(text)]).with_numbering(NumberingId(id)),
        )
    }

    fn body(units: Vec<BodyUnit>) -> StyledBody {
        StyledBody {
            metadata: Metadata::default(),
            default_font_size: Some(10),
            numbering: [(NumberingId(1), ListKind::Ordered)].into_iter().collect(),
            units,
        }
    }

    #[test]
    fn test_headers_and_paragraphs_in_order() {
        let doc = DocumentBuilder::default()
            .build(body(vec![
                sized("Title", 18),
                sized("Subtitle", 18),
                sized("body", 10),
                sized("Section", 12),
                sized("more body", 10),
            ]))
            .unwrap();

        let kinds: Vec<_> = doc.elements.iter().map(|e| e.is_header()).collect();
        assert_eq!(kinds, vec![true, true, false, true, false]);
        assert_eq!(doc.elements[3].plain_text(), "Section");
    }

    #[test]
    fn test_list_collapses_into_one_element() {
        let doc = DocumentBuilder::default()
            .build(body(vec![
                numbered("one", 1),
                numbered("two", 1),
                numbered("three", 1),
                sized("after", 10),
            ]))
            .unwrap();

        assert_eq!(doc.len(), 2);
        match &doc.elements[0] {
            Element::List(list) => {
                assert_eq!(list.len(), 3);
                assert_eq!(list.kind, ListKind::Ordered);
            }
            other => panic!("expected list, got {:?}", other),
        }
        assert_eq!(doc.elements[1].plain_text(), "after");
    }

    #[test]
    fn test_pushed_back_unit_is_reclassified() {
        let doc = DocumentBuilder::default()
            .build(body(vec![numbered("one", 1), sized("Next section", 16)]))
            .unwrap();

        assert_eq!(doc.len(), 2);
        assert!(doc.elements[1].is_header());
    }

    #[test]
    fn test_back_to_back_lists_stay_separate() {
        let mut input = body(vec![numbered("a", 1), numbered("b", 2), numbered("c", 2)]);
        input.numbering.insert(NumberingId(2), ListKind::Bullet);

        let doc = DocumentBuilder::default().build(input).unwrap();

        assert_eq!(doc.len(), 2);
        assert!(matches!(&doc.elements[1], Element::List(l) if l.len() == 2));
    }

    #[test]
    fn test_empty_paragraphs_are_skipped() {
        let doc = DocumentBuilder::default()
            .build(body(vec![
                BodyUnit::Paragraph(StyledParagraph::default()),
                sized("text", 10),
                BodyUnit::Paragraph(StyledParagraph::default()),
            ]))
            .unwrap();

        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_single_row_large_table_becomes_banner() {
        let banner = StyledTable::new(vec![vec![
            vec![StyledParagraph::new(vec![StyledRun::sized("Annual", 16)])],
            vec![StyledParagraph::new(vec![StyledRun::sized("Report", 16)])],
        ]]);
        let data = StyledTable::new(vec![
            vec![vec![StyledParagraph::new(vec![StyledRun::new("a")])]],
            vec![vec![StyledParagraph::new(vec![StyledRun::new("b")])]],
        ]);

        let doc = DocumentBuilder::default()
            .build(body(vec![BodyUnit::Table(banner), BodyUnit::Table(data)]))
            .unwrap();

        assert_eq!(
            doc.elements[0],
            Element::TableHeader {
                text: "Annual Report".to_string(),
                font_size: 16,
            }
        );
        assert!(matches!(&doc.elements[1], Element::Table(t) if t.row_count() == 2));
    }

    #[test]
    fn test_fallback_font_size_is_a_parameter() {
        let mut input = body(vec![sized("maybe header", 11)]);
        input.default_font_size = None;

        let doc = DocumentBuilder::default().build(input.clone()).unwrap();
        assert!(doc.elements[0].is_header());

        let doc = DocumentBuilder::new(BuildOptions::new().with_fallback_font_size(12))
            .build(input)
            .unwrap();
        assert!(!doc.elements[0].is_header());
    }

    #[test]
    fn test_unknown_numbering_is_plain_paragraph() {
        let doc = DocumentBuilder::default()
            .build(StyledBody {
                numbering: Numbering::new(),
                ..body(vec![numbered("orphan", 1)])
            })
            .unwrap();

        assert!(matches!(&doc.elements[0], Element::Paragraph(_)));
    }
}
