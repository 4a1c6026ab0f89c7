//! Parsing options and configuration.

use crate::structure::{BuildOptions, FALLBACK_FONT_SIZE};

/// Options for parsing and structuring documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Default font size assumed when a document declares none
    pub fallback_font_size: u32,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip undecodable content).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the fallback default font size.
    pub fn with_fallback_font_size(mut self, size: u32) -> Self {
        self.fallback_font_size = size;
        self
    }

    /// Options for the structuring pass.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::new().with_fallback_font_size(self.fallback_font_size)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            fallback_font_size: FALLBACK_FONT_SIZE,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip undecodable content and continue
    Lenient,
}
