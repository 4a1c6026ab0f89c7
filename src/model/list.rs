//! List types.

use super::Paragraph;
use serde::{Deserialize, Serialize};

/// Identifier of a numbering definition (the `w:numId` of a Word paragraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumberingId(pub u32);

impl std::fmt::Display for NumberingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Marker style of a numbering definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Bulleted list
    #[default]
    Bullet,
    /// Numbered list
    Ordered,
}

/// Contiguous paragraphs sharing one numbering identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListBlock {
    /// Numbering definition every item belongs to
    pub numbering_id: NumberingId,

    /// Marker style
    pub kind: ListKind,

    /// List items in source order
    pub items: Vec<Paragraph>,
}

impl ListBlock {
    /// Create an empty list for a numbering definition.
    pub fn new(numbering_id: NumberingId, kind: ListKind) -> Self {
        Self {
            numbering_id,
            kind,
            items: Vec::new(),
        }
    }

    /// Append an item.
    pub fn add_item(&mut self, item: Paragraph) {
        self.items.push(item);
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items joined one per line.
    pub fn plain_text(&self) -> String {
        self.items
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
