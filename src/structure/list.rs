//! List-run accumulation.

use crate::body::{BodyUnit, StyledParagraph};
use crate::error::Result;
use crate::model::{ListBlock, ListKind, NumberingId};

use super::cursor::UnitCursor;

/// Fold a run of paragraphs sharing `numbering_id` into one list.
///
/// `first` has already been taken from the cursor and classified as a list
/// candidate. Following paragraphs with the same numbering reference are
/// consumed; the first unit that does not belong (a table, or a paragraph
/// with different or no numbering) is pushed back for the caller to
/// classify. Member paragraphs without runs keep the run going but add no
/// item.
pub fn accumulate<I: Iterator<Item = BodyUnit>>(
    cursor: &mut UnitCursor<I>,
    first: StyledParagraph,
    numbering_id: NumberingId,
    kind: ListKind,
) -> Result<ListBlock> {
    let mut list = ListBlock::new(numbering_id, kind);
    list.add_item(first.to_paragraph());

    while let Some(unit) = cursor.advance() {
        match unit {
            BodyUnit::Paragraph(p) if p.numbering == Some(numbering_id) => {
                if p.has_runs() {
                    list.add_item(p.to_paragraph());
                }
            }
            other => {
                cursor.pushback(other)?;
                break;
            }
        }
    }

    log::debug!(
        "list {} closed with {} items",
        numbering_id,
        list.items.len()
    );
    Ok(list)
}
