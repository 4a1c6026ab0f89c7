//! Error types for docsift.

use std::io;
use thiserror::Error;

/// Result type alias for docsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while structuring a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No parser is registered for the input's extension or magic bytes.
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// The container or one of its parts could not be decoded.
    #[error("Malformed input: {0}")]
    Malformed(String),

    /// An internal invariant was broken. Never produced by valid input.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Error during rendering (text, HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Malformed(err.to_string()),
        }
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::Malformed(format!("XML: {}", err))
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Malformed(format!("PDF: {}", err)),
        }
    }
}
