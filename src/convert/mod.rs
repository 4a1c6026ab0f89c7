//! Converter registry and file conversion.
//!
//! A [`DocumentConverter`] turns the bytes of one source format into a
//! structured [`Document`]. The [`ConverterRegistry`] dispatches on file
//! extension, and [`convert_file`] runs the whole pipeline for one path,
//! writing `<filename>.<ext>` next to the input only once rendering has
//! succeeded.
//!
//! # Example
//!
//! ```no_run
//! use docsift::convert::{convert_file, ConvertOptions, OutputMode};
//!
//! fn main() -> docsift::Result<()> {
//!     let options = ConvertOptions::new().with_mode(OutputMode::Html);
//!     let result = convert_file("report.docx", &options)?;
//!     println!("wrote {:?}", result.output_path);
//!     Ok(())
//! }
//! ```

mod pdf;
mod word;

pub use pdf::PdfConverter;
pub use word::WordConverter;

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{Document, Metadata};
use crate::parser::{file_name, ParseOptions};
use crate::render::{to_html, to_json, to_text, JsonFormat, RenderOptions};

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Parsing options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Output mode
    pub mode: OutputMode,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set output mode.
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Output mode for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// Plain text
    #[default]
    Text,

    /// Minimal HTML
    Html,

    /// JSON structure
    Json,
}

impl OutputMode {
    /// Extension appended to the input file name.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputMode::Text => "txt",
            OutputMode::Html => "html",
            OutputMode::Json => "json",
        }
    }

    /// MIME type of the rendered output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputMode::Text => "text/plain",
            OutputMode::Html => "text/html",
            OutputMode::Json => "application/json",
        }
    }

    /// Parse a mode name (`text`, `html` or `json`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(OutputMode::Text),
            "html" => Some(OutputMode::Html),
            "json" => Some(OutputMode::Json),
            _ => None,
        }
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Rendered content
    pub content: String,

    /// Source document metadata
    pub metadata: Metadata,

    /// Output mode used
    pub mode: OutputMode,

    /// File the content was written to, if any
    pub output_path: Option<PathBuf>,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(content: String, metadata: Metadata, mode: OutputMode) -> Self {
        Self {
            content,
            metadata,
            mode,
            output_path: None,
        }
    }

    /// MIME type of the content.
    pub fn mime_type(&self) -> &'static str {
        self.mode.mime_type()
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Trait for document converters.
///
/// Implement this trait to add support for a new source format.
pub trait DocumentConverter: Send + Sync {
    /// Get the supported file extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["pdf"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Parse and structure a document from bytes.
    fn structure(&self, bytes: &[u8], options: &ParseOptions) -> Result<Document>;

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Render a structured document in the given mode.
pub fn render(doc: &Document, mode: OutputMode, options: &RenderOptions) -> Result<String> {
    match mode {
        OutputMode::Text => to_text(doc, options),
        OutputMode::Html => to_html(doc, options),
        OutputMode::Json => to_json(doc, JsonFormat::Pretty),
    }
}

/// Path of the output file for an input: the input name plus the mode's extension.
///
/// `report.docx` becomes `report.docx.txt` in text mode.
pub fn output_path<P: AsRef<Path>>(input: P, mode: OutputMode) -> PathBuf {
    let mut name = OsString::from(input.as_ref().as_os_str());
    name.push(".");
    name.push(mode.extension());
    PathBuf::from(name)
}

/// Registry for document converters.
///
/// The registry maps file extensions to converters and provides
/// convenient methods for converting documents.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the Word and PDF converters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(WordConverter::new()));
        registry.register(Arc::new(PdfConverter::new()));
        registry
    }

    /// Register a converter.
    ///
    /// The converter will be registered for all its supported extensions.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters.insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name.insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.converters.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Converter for a path, by its extension.
    pub fn converter_for(&self, path: &Path) -> Result<Arc<dyn DocumentConverter>> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|ext| self.get_by_extension(ext))
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))
    }

    /// Parse and structure a file.
    pub fn structure(&self, path: &Path, options: &ParseOptions) -> Result<Document> {
        let converter = self.converter_for(path)?;
        let bytes = std::fs::read(path)?;
        log::debug!("structuring {} with {} converter", path.display(), converter.name());

        let mut doc = converter.structure(&bytes, options)?;
        doc.metadata.name = Some(file_name(path));
        Ok(doc)
    }

    /// Structure and render a file without writing anything.
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let doc = self.structure(path, &options.parse)?;
        let content = render(&doc, options.mode, &options.render)?;
        Ok(ConvertResult::new(content, doc.metadata, options.mode))
    }

    /// Structure and render bytes, using the extension to pick the converter.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(ext.to_string()))?;

        let doc = converter.structure(bytes, &options.parse)?;
        let content = render(&doc, options.mode, &options.render)?;
        Ok(ConvertResult::new(content, doc.metadata, options.mode))
    }

    /// Convert a file and write the output next to it.
    ///
    /// Nothing is written unless parsing, structuring and rendering all succeed.
    pub fn convert_file(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let mut result = self.convert(path, options)?;
        let target = output_path(path, options.mode);
        std::fs::write(&target, &result.content)?;
        log::info!("wrote {}", target.display());
        result.output_path = Some(target);
        Ok(result)
    }

    /// Convert many files in parallel.
    ///
    /// Results come back in input order; one failure does not stop the others.
    pub fn convert_batch<P>(&self, paths: &[P], options: &ConvertOptions) -> Vec<Result<ConvertResult>>
    where
        P: AsRef<Path> + Sync,
    {
        paths
            .par_iter()
            .map(|path| self.convert_file(path.as_ref(), options))
            .collect()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Convert a file with the default registry and write the output next to it.
pub fn convert_file<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<ConvertResult> {
    ConverterRegistry::with_defaults().convert_file(path.as_ref(), options)
}

/// Convert many files with the default registry.
pub fn convert_batch<P>(paths: &[P], options: &ConvertOptions) -> Vec<Result<ConvertResult>>
where
    P: AsRef<Path> + Sync,
{
    ConverterRegistry::with_defaults().convert_batch(paths, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_parse_options(ParseOptions::new().lenient())
            .with_mode(OutputMode::Html);

        assert_eq!(options.parse, ParseOptions::new().lenient());
        assert_eq!(options.mode, OutputMode::Html);
    }

    #[test]
    fn test_output_mode_names() {
        assert_eq!(OutputMode::from_name("TEXT"), Some(OutputMode::Text));
        assert_eq!(OutputMode::from_name("html"), Some(OutputMode::Html));
        assert_eq!(OutputMode::from_name("markdown"), None);
        assert_eq!(OutputMode::Json.mime_type(), "application/json");
    }

    #[test]
    fn test_output_path_appends_extension() {
        assert_eq!(
            output_path("dir/report.docx", OutputMode::Text),
            PathBuf::from("dir/report.docx.txt")
        );
        assert_eq!(
            output_path("scan.PDF", OutputMode::Html),
            PathBuf::from("scan.PDF.html")
        );
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = ConverterRegistry::with_defaults();
        assert!(registry.supports("pdf"));
        assert!(registry.supports("DOCX"));
        assert!(!registry.supports("doc"));
        assert_eq!(registry.supported_extensions(), vec!["docx", "pdf"]);
    }

    #[test]
    fn test_registry_get_by_name() {
        let registry = ConverterRegistry::with_defaults();
        assert_eq!(registry.get_by_name("Word").unwrap().name(), "word");
        assert!(registry.get_by_name("odt").is_none());
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let registry = ConverterRegistry::with_defaults();

        let result = registry.convert(Path::new("notes.odt"), &ConvertOptions::default());
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));

        let result = registry.convert_bytes(b"", "rtf", &ConvertOptions::default());
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));

        let result = registry.convert(Path::new("README"), &ConvertOptions::default());
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }
}
