//! Source format detection.

use crate::error::{Error, Result};
use crate::model::SourceFormat;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// ZIP local file header: PK\x03\x04 (every .docx starts with one).
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Detect the source format from the file extension.
///
/// # Example
/// ```
/// use docsift::detect::detect_format_from_extension;
/// use docsift::SourceFormat;
///
/// assert_eq!(detect_format_from_extension("Report.DOCX").unwrap(), SourceFormat::Word);
/// assert!(detect_format_from_extension("notes.odt").is_err());
/// ```
pub fn detect_format_from_extension<P: AsRef<Path>>(path: P) -> Result<SourceFormat> {
    let path = path.as_ref();
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(SourceFormat::from_extension)
        .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))
}

/// Detect the source format from the first bytes of the file.
///
/// # Returns
/// * `Ok(SourceFormat)` if the data starts with a ZIP or PDF signature
/// * `Err(Error::UnsupportedFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<SourceFormat> {
    if data.starts_with(ZIP_MAGIC) {
        Ok(SourceFormat::Word)
    } else if data.starts_with(PDF_MAGIC) {
        Ok(SourceFormat::Pdf)
    } else {
        Err(Error::UnsupportedFormat(
            "unrecognized file signature".to_string(),
        ))
    }
}

/// Detect the source format by reading the file header.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<SourceFormat> {
    let mut header = [0u8; 8];
    let read = File::open(path)?.read(&mut header)?;
    detect_format_from_bytes(&header[..read])
}

/// Check if a file has a supported extension.
pub fn is_supported<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_extension(path).is_ok()
}
