//! Body-unit cursor with one-unit lookahead and pushback.

use std::iter::Peekable;

use crate::body::BodyUnit;
use crate::error::{Error, Result};

/// Forward cursor over body units.
///
/// Holds at most one pushed-back unit, which `peek` and `advance` yield
/// before anything still in the underlying stream.
pub struct UnitCursor<I: Iterator<Item = BodyUnit>> {
    inner: Peekable<I>,
    pushed_back: Option<BodyUnit>,
    consumed: usize,
}

impl<I: Iterator<Item = BodyUnit>> UnitCursor<I> {
    /// Wrap a unit stream.
    pub fn new(units: I) -> Self {
        Self {
            inner: units.peekable(),
            pushed_back: None,
            consumed: 0,
        }
    }

    /// Look at the next unit without consuming it.
    pub fn peek(&mut self) -> Option<&BodyUnit> {
        match self.pushed_back {
            Some(ref unit) => Some(unit),
            None => self.inner.peek(),
        }
    }

    /// Consume and return the next unit.
    pub fn advance(&mut self) -> Option<BodyUnit> {
        let unit = self.pushed_back.take().or_else(|| self.inner.next());
        if unit.is_some() {
            self.consumed += 1;
        }
        unit
    }

    /// Return a unit to the front of the stream.
    ///
    /// Only one unit can be pending; a second pushback before the next
    /// `advance` is an invariant violation.
    pub fn pushback(&mut self, unit: BodyUnit) -> Result<()> {
        if self.pushed_back.is_some() {
            return Err(Error::InvariantViolation(
                "cursor already holds a pushed-back unit".to_string(),
            ));
        }
        self.consumed = self.consumed.saturating_sub(1);
        self.pushed_back = Some(unit);
        Ok(())
    }

    /// Number of units consumed so far, net of pushbacks.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Check if the stream is exhausted.
    #[cfg(test)]
    pub fn is_exhausted(&mut self) -> bool {
        self.peek().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{StyledParagraph, StyledRun};

    fn unit(text: &str) -> BodyUnit {
        BodyUnit::Paragraph(StyledParagraph::new(vec![StyledRun::new(text)]))
    }

    fn text_of(unit: &BodyUnit) -> String {
        match unit {
            BodyUnit::Paragraph(p) => p.text(),
            BodyUnit::Table(_) => String::from("<table>"),
        }
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut cursor = UnitCursor::new(vec![unit("a"), unit("b")].into_iter());
        assert_eq!(cursor.peek().map(text_of).as_deref(), Some("a"));
        assert_eq!(cursor.peek().map(text_of).as_deref(), Some("a"));
        assert_eq!(cursor.consumed(), 0);

        assert_eq!(cursor.advance().as_ref().map(text_of).as_deref(), Some("a"));
        assert_eq!(cursor.advance().as_ref().map(text_of).as_deref(), Some("b"));
        assert!(cursor.advance().is_none());
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.consumed(), 2);
    }

    #[test]
    fn test_pushback_is_yielded_first() {
        let mut cursor = UnitCursor::new(vec![unit("a"), unit("b")].into_iter());
        let a = cursor.advance().unwrap();
        cursor.pushback(a).unwrap();

        assert_eq!(cursor.consumed(), 0);
        assert_eq!(cursor.peek().map(text_of).as_deref(), Some("a"));
        assert_eq!(cursor.advance().as_ref().map(text_of).as_deref(), Some("a"));
        assert_eq!(cursor.advance().as_ref().map(text_of).as_deref(), Some("b"));
    }

    #[test]
    fn test_double_pushback_fails() {
        let mut cursor = UnitCursor::new(vec![unit("a"), unit("b")].into_iter());
        let a = cursor.advance().unwrap();
        let b = cursor.advance().unwrap();
        cursor.pushback(b).unwrap();

        let err = cursor.pushback(a).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
    }
}
