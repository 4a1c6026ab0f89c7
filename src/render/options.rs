//! Rendering options and configuration.

/// Options for rendering document content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit title, author and timestamps ahead of the body
    pub include_metadata: bool,

    /// Character to use for bullet list markers in text output
    pub list_marker: char,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the metadata preamble.
    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_metadata: false,
            list_marker: '-',
        }
    }
}
