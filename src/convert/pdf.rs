//! PDF document converter implementation.

use crate::error::Result;
use crate::model::Document;
use crate::parser::{ParseOptions, PdfParser};
use crate::structure::structure_document;

use super::DocumentConverter;

/// PDF document converter.
#[derive(Debug, Clone, Default)]
pub struct PdfConverter {
    _private: (),
}

impl PdfConverter {
    /// Create a new PDF converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for PdfConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn structure(&self, bytes: &[u8], options: &ParseOptions) -> Result<Document> {
        let body = PdfParser::from_bytes_with_options(bytes, *options)?.parse()?;
        structure_document(body, options.build_options())
    }
}
