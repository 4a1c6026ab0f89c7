//! Minimal HTML rendering.
//!
//! Headers map to `h1`..`h6`; level 7 has no HTML counterpart and is written
//! as `h6` with `class="h7"`. Banner rows become a one-cell table with a
//! header cell. Run emphasis inside paragraphs and list items is kept.

use std::fmt::Write;

use crate::error::{Error, Result};
use crate::model::{Document, Element, ListBlock, ListKind, Metadata, Paragraph, Table};

use super::RenderOptions;

/// Convert a document to HTML.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    HtmlRenderer::new(options.clone()).render(doc)
}

/// Escape `&`, `<`, `>` and `"` for HTML text and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to a complete HTML page.
    pub fn render(&self, doc: &Document) -> Result<String> {
        self.render_internal(doc)
            .map_err(|e| Error::Render(format!("HTML formatting error: {}", e)))
    }

    fn render_internal(&self, doc: &Document) -> std::result::Result<String, std::fmt::Error> {
        let mut out = String::new();

        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html>")?;
        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset=\"utf-8\">")?;
        if let Some(title) = doc.metadata.title.as_ref().or(doc.metadata.name.as_ref()) {
            writeln!(out, "<title>{}</title>", escape_html(title))?;
        }
        if self.options.include_metadata {
            write_meta_tags(&mut out, &doc.metadata)?;
        }
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;

        for element in &doc.elements {
            match element {
                Element::Header { text, level, .. } => {
                    let tag = (*level).clamp(1, 6);
                    if *level > 6 {
                        writeln!(
                            out,
                            "<h{tag} class=\"h{}\">{}</h{tag}>",
                            level,
                            escape_html(text.trim())
                        )?;
                    } else {
                        writeln!(out, "<h{tag}>{}</h{tag}>", escape_html(text.trim()))?;
                    }
                }
                Element::Paragraph(p) => {
                    if !p.is_empty() {
                        writeln!(out, "<p>{}</p>", runs_html(p))?;
                    }
                }
                Element::List(list) => write_list(&mut out, list)?,
                Element::Table(table) => write_table(&mut out, table)?,
                Element::TableHeader { text, .. } => {
                    writeln!(
                        out,
                        "<table class=\"table-header\"><tr><th>{}</th></tr></table>",
                        escape_html(text.trim())
                    )?;
                }
            }
        }

        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(out)
    }
}

fn write_meta_tags(out: &mut String, metadata: &Metadata) -> std::fmt::Result {
    let entries = [
        ("author", metadata.author.clone()),
        ("created", metadata.created_display()),
        ("modified", metadata.modified_display()),
    ];
    for (name, value) in entries {
        if let Some(value) = value {
            writeln!(
                out,
                "<meta name=\"{}\" content=\"{}\">",
                name,
                escape_html(&value)
            )?;
        }
    }
    Ok(())
}

fn write_list(out: &mut String, list: &ListBlock) -> std::fmt::Result {
    let tag = match list.kind {
        ListKind::Bullet => "ul",
        ListKind::Ordered => "ol",
    };
    writeln!(out, "<{}>", tag)?;
    for item in &list.items {
        writeln!(out, "<li>{}</li>", runs_html(item))?;
    }
    writeln!(out, "</{}>", tag)
}

fn write_table(out: &mut String, table: &Table) -> std::fmt::Result {
    writeln!(out, "<table>")?;
    for row in &table.rows {
        write!(out, "<tr>")?;
        for cell in &row.cells {
            let content: Vec<String> = cell.content.iter().map(runs_html).collect();
            write!(out, "<td>{}</td>", content.join("<br>"))?;
        }
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</table>")
}

fn runs_html(paragraph: &Paragraph) -> String {
    let mut html = String::new();
    for run in &paragraph.runs {
        let mut text = escape_html(&run.text);
        if run.style.underline {
            text = format!("<u>{}</u>", text);
        }
        if run.style.italic {
            text = format!("<i>{}</i>", text);
        }
        if run.style.bold {
            text = format!("<b>{}</b>", text);
        }
        html.push_str(&text);
    }
    html.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        NumberingId, SourceFormat, TableCell, TableRow, TextRun, TextStyle,
    };

    fn header(text: &str, level: u8) -> Element {
        Element::Header {
            text: text.to_string(),
            font_size: 30 - u32::from(level),
            level,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&lt;/a&gt;"
        );
    }

    #[test]
    fn test_headers_and_paragraphs() {
        let mut doc = Document::new(Metadata::new(SourceFormat::Word).with_name("a.docx"));
        doc.push(header("Top", 1));
        doc.push(header("Deep", 7));
        let mut p = Paragraph::new();
        p.add_run(TextRun::new("plain "));
        p.add_run(TextRun::styled(
            "strong",
            TextStyle {
                bold: true,
                ..Default::default()
            },
        ));
        doc.push(Element::Paragraph(p));

        let html = to_html(&doc, &RenderOptions::default()).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.contains("<title>a.docx</title>"));
        assert!(html.contains("<h1>Top</h1>"));
        assert!(html.contains("<h6 class=\"h7\">Deep</h6>"));
        assert!(html.contains("<p>plain <b>strong</b></p>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_lists_and_tables() {
        let mut doc = Document::default();
        let mut list = ListBlock::new(NumberingId(4), ListKind::Ordered);
        list.add_item(Paragraph::with_text("a < b"));
        doc.push(Element::List(list));

        let mut table = Table::new();
        table.add_row(TableRow::new(vec![
            TableCell::text("x"),
            TableCell::with_content(vec![Paragraph::with_text("y1"), Paragraph::with_text("y2")]),
        ]));
        doc.push(Element::Table(table));
        doc.push(Element::TableHeader {
            text: "Totals".to_string(),
            font_size: 14,
        });

        let html = to_html(&doc, &RenderOptions::default()).unwrap();

        assert!(html.contains("<ol>\n<li>a &lt; b</li>\n</ol>"));
        assert!(html.contains("<tr><td>x</td><td>y1<br>y2</td></tr>"));
        assert!(html.contains("<th>Totals</th>"));
        assert!(!html.contains("<title>"));
    }

    #[test]
    fn test_metadata_tags() {
        let mut metadata = Metadata::new(SourceFormat::Pdf);
        metadata.title = Some("Q3 \"final\"".to_string());
        metadata.author = Some("Finance".to_string());
        let doc = Document::new(metadata);

        let html = to_html(&doc, &RenderOptions::new().with_metadata(true)).unwrap();

        assert!(html.contains("<title>Q3 &quot;final&quot;</title>"));
        assert!(html.contains("<meta name=\"author\" content=\"Finance\">"));
        assert!(!html.contains("name=\"created\""));
    }
}
