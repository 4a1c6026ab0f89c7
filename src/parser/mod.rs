//! Source format readers.
//!
//! Each reader decodes one container format into a [`crate::body::StyledBody`]
//! for the structuring pass.

mod docx;
mod options;
mod pdf;
mod text;

use std::path::Path;

pub use docx::DocxParser;
pub use options::{ErrorMode, ParseOptions};
pub use pdf::PdfParser;
pub use text::{decode_text_simple, is_spaceless_script_char, normalize_text};

/// File name component of a path, for document metadata.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
