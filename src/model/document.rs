//! Document-level types.

use super::{Element, MAX_HEADER_LEVEL};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display pattern for metadata timestamps, e.g. `Tue, Jan 9, 2024 03:04:05 PM UTC`.
pub const TIMESTAMP_FORMAT: &str = "%a, %b %-d, %Y %I:%M:%S %p UTC";

/// Format a metadata timestamp for display.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// A structured document.
///
/// Built once per input by [`crate::structure::DocumentBuilder`], then ranked
/// by the header normalizer and handed read-only to a renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Source metadata (format, name, timestamps)
    pub metadata: Metadata,

    /// Elements in source traversal order
    pub elements: Vec<Element>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            elements: Vec::new(),
        }
    }

    /// Append an element.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Check if the document has any elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of top-level elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Iterate over `(font_size, level)` of every header.
    pub fn headers(&self) -> impl Iterator<Item = (u32, u8)> + '_ {
        self.elements.iter().filter_map(|e| match e {
            Element::Header {
                font_size, level, ..
            } => Some((*font_size, *level)),
            _ => None,
        })
    }

    /// Check that every header carries a finalized level in `1..=7`.
    pub fn validate(&self) -> Result<()> {
        for (font_size, level) in self.headers() {
            if !(1..=MAX_HEADER_LEVEL).contains(&level) {
                return Err(Error::InvariantViolation(format!(
                    "header of size {} has level {}",
                    font_size, level
                )));
            }
        }
        Ok(())
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.elements
            .iter()
            .map(|e| e.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Format of the source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Office Open XML word-processing document (.docx)
    #[default]
    Word,
    /// Portable Document Format
    Pdf,
}

impl SourceFormat {
    /// Map a file extension (without dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "docx" => Some(SourceFormat::Word),
            "pdf" => Some(SourceFormat::Pdf),
            _ => None,
        }
    }

    /// Tag used in rendered output.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Word => "word",
            SourceFormat::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Source format tag
    #[serde(rename = "type")]
    pub format: SourceFormat,

    /// Source file name
    pub name: Option<String>,

    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create metadata for the given source format.
    pub fn new(format: SourceFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Set the source file name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Creation date formatted for display.
    pub fn created_display(&self) -> Option<String> {
        self.created.as_ref().map(format_timestamp)
    }

    /// Modification date formatted for display.
    pub fn modified_display(&self) -> Option<String> {
        self.modified.as_ref().map(format_timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;
    use chrono::TimeZone;

    #[test]
    fn test_document_new() {
        let doc = Document::new(Metadata::new(SourceFormat::Pdf));
        assert!(doc.is_empty());
        assert_eq!(doc.metadata.format, SourceFormat::Pdf);
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 9, 15, 4, 5).unwrap();
        assert_eq!(format_timestamp(&ts), "Tue, Jan 9, 2024 03:04:05 PM UTC");
    }

    #[test]
    fn test_created_and_modified_are_independent() {
        let mut metadata = Metadata::new(SourceFormat::Word);
        metadata.created = Some(Utc.with_ymd_and_hms(2020, 5, 1, 8, 0, 0).unwrap());
        metadata.modified = Some(Utc.with_ymd_and_hms(2023, 7, 2, 9, 30, 0).unwrap());

        assert_eq!(
            metadata.created_display().as_deref(),
            Some("Fri, May 1, 2020 08:00:00 AM UTC")
        );
        assert_eq!(
            metadata.modified_display().as_deref(),
            Some("Sun, Jul 2, 2023 09:30:00 AM UTC")
        );
    }

    #[test]
    fn test_source_format_from_extension() {
        assert_eq!(SourceFormat::from_extension("DOCX"), Some(SourceFormat::Word));
        assert_eq!(SourceFormat::from_extension("pdf"), Some(SourceFormat::Pdf));
        assert_eq!(SourceFormat::from_extension("odt"), None);
    }

    #[test]
    fn test_validate_rejects_unranked_header() {
        let mut doc = Document::default();
        doc.push(Element::header("Title", 18));
        assert!(matches!(doc.validate(), Err(Error::InvariantViolation(_))));

        doc.elements[0] = Element::Header {
            text: "Title".to_string(),
            font_size: 18,
            level: 1,
        };
        doc.push(Element::Paragraph(Paragraph::with_text("body")));
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_metadata_serializes_type_tag() {
        let metadata = Metadata::new(SourceFormat::Word).with_name("report.docx");
        let json = serde_json::to_string(&metadata).unwrap();
        assert!(json.contains("\"type\":\"word\""));
        assert!(json.contains("report.docx"));
    }
}
