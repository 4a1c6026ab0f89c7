//! Plain text rendering.

use crate::error::Result;
use crate::model::{Document, Element, ListBlock, ListKind, Metadata, Table};

use super::RenderOptions;

/// Convert a document to plain text.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    TextRenderer::new(options.clone()).render(doc)
}

/// Plain text renderer.
///
/// Elements are separated by blank lines. Bullet items take the configured
/// marker, ordered items are numbered from 1 and table cells are tab-separated.
pub struct TextRenderer {
    options: RenderOptions,
}

impl TextRenderer {
    /// Create a new text renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to text.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut blocks: Vec<String> = Vec::new();

        if self.options.include_metadata {
            let preamble = metadata_lines(&doc.metadata);
            if !preamble.is_empty() {
                blocks.push(preamble.join("\n"));
            }
        }

        for element in &doc.elements {
            let block = match element {
                Element::Header { text, .. } | Element::TableHeader { text, .. } => {
                    text.trim().to_string()
                }
                Element::Paragraph(p) => p.text().trim().to_string(),
                Element::List(list) => self.render_list(list),
                Element::Table(table) => render_table(table),
            };
            if !block.is_empty() {
                blocks.push(block);
            }
        }

        Ok(blocks.join("\n\n"))
    }

    fn render_list(&self, list: &ListBlock) -> String {
        list.items
            .iter()
            .enumerate()
            .map(|(i, item)| match list.kind {
                ListKind::Bullet => format!("{} {}", self.options.list_marker, item.text().trim()),
                ListKind::Ordered => format!("{}. {}", i + 1, item.text().trim()),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn render_table(table: &Table) -> String {
    table
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|c| c.plain_text().trim().to_string())
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn metadata_lines(metadata: &Metadata) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(title) = &metadata.title {
        lines.push(format!("Title: {}", title));
    }
    if let Some(author) = &metadata.author {
        lines.push(format!("Author: {}", author));
    }
    if let Some(created) = metadata.created_display() {
        lines.push(format!("Created: {}", created));
    }
    if let Some(modified) = metadata.modified_display() {
        lines.push(format!("Modified: {}", modified));
    }
    lines
}
