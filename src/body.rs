//! Styled body units handed over by a parser.
//!
//! A parser decodes its container format into a [`StyledBody`]: the document
//! default font size, a numbering catalog and the ordered body units with
//! whatever font sizes the source states explicitly. Nothing here is
//! classified yet; that is the job of [`crate::structure`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{ListKind, Metadata, NumberingId, Paragraph, TextRun, TextStyle};

/// A text run as found in the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyledRun {
    /// The text content
    pub text: String,

    /// Explicit run font size in points, if the source sets one
    pub font_size: Option<u32>,

    /// Emphasis flags
    pub style: TextStyle,
}

impl StyledRun {
    /// Create a run without an explicit size.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a run with an explicit size.
    pub fn sized(text: impl Into<String>, font_size: u32) -> Self {
        Self {
            text: text.into(),
            font_size: Some(font_size),
            ..Default::default()
        }
    }

    fn to_text_run(&self) -> TextRun {
        let mut style = self.style.clone();
        style.font_size = self.font_size;
        TextRun::styled(self.text.clone(), style)
    }
}

/// A paragraph as found in the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyledParagraph {
    /// Runs in source order
    pub runs: Vec<StyledRun>,

    /// Font size of the paragraph's named style, if set
    pub style_font_size: Option<u32>,

    /// Numbering reference, if the paragraph is numbered or bulleted
    pub numbering: Option<NumberingId>,
}

impl StyledParagraph {
    /// Create a paragraph from runs.
    pub fn new(runs: Vec<StyledRun>) -> Self {
        Self {
            runs,
            ..Default::default()
        }
    }

    /// Set the style font size.
    pub fn with_style_font_size(mut self, size: u32) -> Self {
        self.style_font_size = Some(size);
        self
    }

    /// Set the numbering reference.
    pub fn with_numbering(mut self, id: NumberingId) -> Self {
        self.numbering = Some(id);
        self
    }

    /// Check if the paragraph has no runs at all.
    pub fn has_runs(&self) -> bool {
        !self.runs.is_empty()
    }

    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Convert into a model paragraph, keeping run styling.
    pub fn to_paragraph(&self) -> Paragraph {
        Paragraph::from_runs(self.runs.iter().map(StyledRun::to_text_run).collect())
    }
}

/// A table as found in the source: rows of cells of paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyledTable {
    /// Rows, each an ordered list of cells
    pub rows: Vec<Vec<Vec<StyledParagraph>>>,

    /// Font size of the table style, if set
    pub style_font_size: Option<u32>,
}

impl StyledTable {
    /// Create a table from rows.
    pub fn new(rows: Vec<Vec<Vec<StyledParagraph>>>) -> Self {
        Self {
            rows,
            style_font_size: None,
        }
    }

    /// Set the table style font size.
    pub fn with_style_font_size(mut self, size: u32) -> Self {
        self.style_font_size = Some(size);
        self
    }

    /// First run of the first cell paragraph that has one.
    pub fn first_run(&self) -> Option<&StyledRun> {
        self.rows
            .iter()
            .flatten()
            .flatten()
            .find_map(|p| p.runs.first())
    }
}

/// One element of the body stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyUnit {
    /// A paragraph
    Paragraph(StyledParagraph),
    /// A table
    Table(StyledTable),
}

impl BodyUnit {
    /// First styled run of the unit.
    pub fn first_run(&self) -> Option<&StyledRun> {
        match self {
            BodyUnit::Paragraph(p) => p.runs.first(),
            BodyUnit::Table(t) => t.first_run(),
        }
    }

    /// Font size of the unit's named style.
    pub fn style_font_size(&self) -> Option<u32> {
        match self {
            BodyUnit::Paragraph(p) => p.style_font_size,
            BodyUnit::Table(t) => t.style_font_size,
        }
    }

    /// Numbering reference; tables never carry one.
    pub fn numbering(&self) -> Option<NumberingId> {
        match self {
            BodyUnit::Paragraph(p) => p.numbering,
            BodyUnit::Table(_) => None,
        }
    }
}

/// Existence-by-id lookup of numbering definitions.
pub trait NumberingCatalog {
    /// Check whether a numbering definition exists.
    fn contains(&self, id: NumberingId) -> bool;

    /// Marker style of a numbering definition.
    fn kind(&self, id: NumberingId) -> ListKind;
}

/// Numbering definitions keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Numbering {
    definitions: HashMap<NumberingId, ListKind>,
}

impl Numbering {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a numbering definition.
    pub fn insert(&mut self, id: NumberingId, kind: ListKind) {
        self.definitions.insert(id, kind);
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl NumberingCatalog for Numbering {
    fn contains(&self, id: NumberingId) -> bool {
        self.definitions.contains_key(&id)
    }

    fn kind(&self, id: NumberingId) -> ListKind {
        self.definitions.get(&id).copied().unwrap_or_default()
    }
}

impl FromIterator<(NumberingId, ListKind)> for Numbering {
    fn from_iter<T: IntoIterator<Item = (NumberingId, ListKind)>>(iter: T) -> Self {
        Self {
            definitions: iter.into_iter().collect(),
        }
    }
}

/// Everything a parser hands over for structuring.
#[derive(Debug, Clone, Default)]
pub struct StyledBody {
    /// Source metadata
    pub metadata: Metadata,

    /// Default run font size of the document, if the source declares one
    pub default_font_size: Option<u32>,

    /// Numbering definitions
    pub numbering: Numbering,

    /// Body units in traversal order
    pub units: Vec<BodyUnit>,
}

impl StyledBody {
    /// Create an empty body.
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            ..Default::default()
        }
    }

    /// Append a unit.
    pub fn push(&mut self, unit: BodyUnit) {
        self.units.push(unit);
    }
}
