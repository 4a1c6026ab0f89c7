//! # docsift
//!
//! Structural inference for Word and PDF documents.
//!
//! Word processors and PDF writers only record how text looks. This library
//! reads the font sizes and numbering of a document body and recovers what
//! the text is: headings ranked by size, bulleted and numbered lists, tables
//! and single-row table banners. The result renders as plain text, minimal
//! HTML or JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::{parse_file, render};
//!
//! fn main() -> docsift::Result<()> {
//!     let doc = parse_file("report.docx")?;
//!
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&doc, &options)?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. A parser ([`DocxParser`], [`PdfParser`]) decodes the container into a
//!    [`body::StyledBody`].
//! 2. [`structure::DocumentBuilder`] classifies every body unit in one
//!    forward pass.
//! 3. [`structure::HeaderLevelNormalizer`] ranks header font sizes into
//!    levels 1 to 7.
//! 4. A renderer in [`render`] writes the output.

pub mod body;
pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod structure;

// Re-export commonly used types
pub use convert::{
    convert_batch, convert_file, ConvertOptions, ConvertResult, ConverterRegistry,
    DocumentConverter, OutputMode, PdfConverter, WordConverter,
};
pub use detect::{detect_format_from_bytes, detect_format_from_extension, detect_format_from_path};
pub use error::{Error, Result};
pub use model::{
    Document, Element, ListBlock, ListKind, Metadata, NumberingId, Paragraph, SourceFormat, Table,
    TableCell, TableRow, TextRun, TextStyle,
};
pub use parser::{DocxParser, ErrorMode, ParseOptions, PdfParser};
pub use render::{JsonFormat, RenderOptions};
pub use structure::{structure_document, BuildOptions};

use std::path::Path;

/// Parse and structure a Word or PDF file, chosen by extension.
///
/// # Example
///
/// ```no_run
/// use docsift::parse_file;
///
/// let doc = parse_file("minutes.pdf").unwrap();
/// for (size, level) in doc.headers() {
///     println!("h{} ({}pt)", level, size);
/// }
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Parse and structure a file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    ConverterRegistry::with_defaults().structure(path.as_ref(), &options)
}

/// Parse and structure in-memory bytes, detecting the format from the signature.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    parse_bytes_with_options(data, ParseOptions::default())
}

/// Parse and structure in-memory bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let body = match detect_format_from_bytes(data)? {
        SourceFormat::Word => DocxParser::from_bytes_with_options(data, options)?.parse()?,
        SourceFormat::Pdf => PdfParser::from_bytes_with_options(data, options)?.parse()?,
    };
    structure_document(body, options.build_options())
}

/// Convert a file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_text(&doc, options)
}

/// Convert a file to HTML.
pub fn to_html<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_html(&doc, options)
}

/// Convert a file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for configuring parsing and rendering together.
///
/// # Example
///
/// ```no_run
/// use docsift::Docsift;
///
/// let text = Docsift::new()
///     .lenient()
///     .with_fallback_font_size(11)
///     .parse("scan.pdf")?
///     .to_text()?;
/// # Ok::<(), docsift::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Docsift {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Docsift {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip undecodable content instead of failing.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Default font size assumed when the document declares none.
    pub fn with_fallback_font_size(mut self, size: u32) -> Self {
        self.parse_options = self.parse_options.with_fallback_font_size(size);
        self
    }

    /// Emit a metadata preamble in rendered output.
    pub fn with_metadata(mut self) -> Self {
        self.render_options = self.render_options.with_metadata(true);
        self
    }

    /// Set the bullet marker for text output.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.render_options = self.render_options.with_list_marker(marker);
        self
    }

    /// Parse and structure a file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<DocsiftResult> {
        let document = parse_file_with_options(path, self.parse_options)?;
        Ok(DocsiftResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse and structure in-memory bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<DocsiftResult> {
        let document = parse_bytes_with_options(data, self.parse_options)?;
        Ok(DocsiftResult {
            document,
            render_options: self.render_options,
        })
    }
}

/// A structured document together with its render options.
pub struct DocsiftResult {
    /// The structured document
    pub document: Document,
    render_options: RenderOptions,
}

impl DocsiftResult {
    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to HTML.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
