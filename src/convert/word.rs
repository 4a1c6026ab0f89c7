//! Word document converter implementation.

use crate::error::Result;
use crate::model::Document;
use crate::parser::{DocxParser, ParseOptions};
use crate::structure::structure_document;

use super::DocumentConverter;

/// Word (.docx) document converter.
#[derive(Debug, Clone, Default)]
pub struct WordConverter {
    _private: (),
}

impl WordConverter {
    /// Create a new Word converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for WordConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn name(&self) -> &str {
        "word"
    }

    fn structure(&self, bytes: &[u8], options: &ParseOptions) -> Result<Document> {
        let body = DocxParser::from_bytes_with_options(bytes, *options)?.parse()?;
        structure_document(body, options.build_options())
    }
}
