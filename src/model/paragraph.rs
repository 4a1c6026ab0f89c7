//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of styled text runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in source order
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph from runs.
    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        Self { runs }
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![TextRun::new(text)],
        }
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a text run with the given style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Text styling carried through to rendering.
///
/// Only `font_size` takes part in structural inference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Explicit font size in points
    pub font_size: Option<u32>,
}

impl TextStyle {
    /// Check if any emphasis is applied.
    pub fn has_emphasis(&self) -> bool {
        self.bold || self.italic || self.underline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_text() {
        let mut p = Paragraph::new();
        p.add_run(TextRun::new("Hello "));
        p.add_run(TextRun::styled(
            "world",
            TextStyle {
                bold: true,
                ..Default::default()
            },
        ));

        assert_eq!(p.text(), "Hello world");
        assert!(!p.is_empty());
    }

    #[test]
    fn test_whitespace_paragraph_is_empty() {
        assert!(Paragraph::with_text("  \t").is_empty());
        assert!(Paragraph::new().is_empty());
    }

    #[test]
    fn test_text_style() {
        assert!(!TextStyle::default().has_emphasis());
        let italic = TextStyle {
            italic: true,
            ..Default::default()
        };
        assert!(italic.has_emphasis());
    }
}
