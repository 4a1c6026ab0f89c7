//! Top-level document elements.

use super::{ListBlock, Paragraph, Table};
use serde::{Deserialize, Serialize};

/// Deepest heading level; every smaller header size collapses onto it.
pub const MAX_HEADER_LEVEL: u8 = 7;

/// A classified top-level element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// A heading inferred from a font size above the body default
    Header {
        /// Heading text
        text: String,
        /// Effective font size in points
        font_size: u32,
        /// Heading level (1 = most prominent); 0 until ranked
        level: u8,
    },

    /// An ordinary paragraph
    Paragraph(Paragraph),

    /// A run of paragraphs sharing one numbering definition
    List(ListBlock),

    /// A data table
    Table(Table),

    /// A single-row table set in a header-sized font
    TableHeader {
        /// Text of the row's cells
        text: String,
        /// Effective font size in points
        font_size: u32,
    },
}

impl Element {
    /// Create an unranked header.
    pub fn header(text: impl Into<String>, font_size: u32) -> Self {
        Element::Header {
            text: text.into(),
            font_size,
            level: 0,
        }
    }

    /// Check if this element is a header.
    pub fn is_header(&self) -> bool {
        matches!(self, Element::Header { .. })
    }

    /// Heading level, if this is a header.
    pub fn header_level(&self) -> Option<u8> {
        match self {
            Element::Header { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Get plain text content of the element.
    pub fn plain_text(&self) -> String {
        match self {
            Element::Header { text, .. } | Element::TableHeader { text, .. } => text.clone(),
            Element::Paragraph(p) => p.text(),
            Element::List(list) => list.plain_text(),
            Element::Table(t) => t.plain_text(),
        }
    }
}
