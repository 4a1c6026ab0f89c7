//! Structuring options.

use super::style::FALLBACK_FONT_SIZE;

/// Options for building a document from a styled body.
///
/// Each build owns its copy, so concurrent builds never share a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Default font size used when the document declares none
    pub fallback_font_size: u32,
}

impl BuildOptions {
    /// Create new build options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback default font size.
    pub fn with_fallback_font_size(mut self, size: u32) -> Self {
        self.fallback_font_size = size;
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            fallback_font_size: FALLBACK_FONT_SIZE,
        }
    }
}
