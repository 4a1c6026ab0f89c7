//! Document model types ("SimpleHtml").
//!
//! This module defines the normalized representation that sits between
//! structural inference and rendering. It is format-agnostic: Word and PDF
//! inputs end up as the same flat, ordered list of [`Element`]s.

mod document;
mod element;
mod list;
mod paragraph;
mod table;

pub use document::{format_timestamp, Document, Metadata, SourceFormat, TIMESTAMP_FORMAT};
pub use element::{Element, MAX_HEADER_LEVEL};
pub use list::{ListBlock, ListKind, NumberingId};
pub use paragraph::{Paragraph, TextRun, TextStyle};
pub use table::{Table, TableCell, TableRow};
