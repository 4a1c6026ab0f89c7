//! End-to-end conversion tests over in-memory .docx packages.

use std::fs;
use std::io::{Cursor, Write};

use docsift::convert::{output_path, ConvertOptions, ConverterRegistry, OutputMode};
use docsift::{parse_bytes, Docsift, Element, Error, ListKind, SourceFormat};
use tempfile::TempDir;

const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn docx(body: &str) -> Vec<u8> {
    let document = format!(r#"<w:document xmlns:w="{W}"><w:body>{body}</w:body></w:document>"#);
    let styles = format!(
        r#"<w:styles xmlns:w="{W}">
            <w:docDefaults><w:rPrDefault><w:rPr><w:sz w:val="20"/></w:rPr></w:rPrDefault></w:docDefaults>
            <w:style w:type="paragraph" w:styleId="Heading1"><w:rPr><w:sz w:val="32"/></w:rPr></w:style>
            <w:style w:type="paragraph" w:styleId="Heading2"><w:basedOn w:val="Heading1"/><w:rPr><w:sz w:val="26"/></w:rPr></w:style>
        </w:styles>"#
    );
    let numbering = format!(
        r#"<w:numbering xmlns:w="{W}">
            <w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:numFmt w:val="bullet"/></w:lvl></w:abstractNum>
            <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
        </w:numbering>"#
    );
    let core = r#"<cp:coreProperties
        xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties"
        xmlns:dc="http://purl.org/dc/elements/1.1/"
        xmlns:dcterms="http://purl.org/dc/terms/">
        <dc:title>Handbook</dc:title>
        <dcterms:created>2020-01-01T09:00:00Z</dcterms:created>
        <dcterms:modified>2023-06-30T17:45:00Z</dcterms:modified>
    </cp:coreProperties>"#;

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default();
    for (name, content) in [
        ("word/document.xml", document.as_str()),
        ("word/styles.xml", styles.as_str()),
        ("word/numbering.xml", numbering.as_str()),
        ("docProps/core.xml", core),
    ] {
        writer.start_file(name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn para(style: &str, text: &str) -> String {
    format!(r#"<w:p><w:pPr><w:pStyle w:val="{style}"/></w:pPr><w:r><w:t>{text}</w:t></w:r></w:p>"#)
}

fn bullet(text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>{text}</w:t></w:r></w:p>"#
    )
}

fn plain(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t>{text}</w:t></w:r></w:p>"#)
}

fn handbook() -> Vec<u8> {
    let body = [
        para("Heading1", "Handbook"),
        plain("Welcome aboard."),
        para("Heading2", "Tools"),
        bullet("Laptop"),
        bullet("Badge"),
        "<w:p><w:bookmarkStart/></w:p>".to_string(),
        r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:rPr><w:sz w:val="28"/></w:rPr><w:t>Contacts</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#
            .to_string(),
        r#"<w:tbl>
            <w:tr><w:tc><w:p><w:r><w:t>Name</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Phone</w:t></w:r></w:p></w:tc></w:tr>
            <w:tr><w:tc><w:p><w:r><w:t>Desk</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>100</w:t></w:r></w:p></w:tc></w:tr>
        </w:tbl>"#
            .to_string(),
        "<w:p/>".to_string(),
    ]
    .concat();
    docx(&body)
}

#[test]
fn test_docx_structure() {
    let doc = parse_bytes(&handbook()).unwrap();

    let headers: Vec<(u32, u8)> = doc.headers().collect();
    assert_eq!(headers, vec![(16, 1), (13, 2)]);

    assert!(matches!(doc.elements[1], Element::Paragraph(_)));
    let Element::List(list) = &doc.elements[3] else {
        panic!("expected list, got {:?}", doc.elements[3]);
    };
    assert_eq!(list.kind, ListKind::Bullet);
    assert_eq!(list.plain_text(), "Laptop\nBadge");

    assert!(matches!(
        &doc.elements[4],
        Element::TableHeader { text, font_size: 14 } if text == "Contacts"
    ));
    let Element::Table(table) = &doc.elements[5] else {
        panic!("expected table");
    };
    assert_eq!(table.row_count(), 2);
    assert_eq!(doc.len(), 6);
}

#[test]
fn test_docx_metadata_timestamps_are_separate() {
    let doc = parse_bytes(&handbook()).unwrap();
    let meta = &doc.metadata;

    assert_eq!(meta.format, SourceFormat::Word);
    assert_eq!(meta.title.as_deref(), Some("Handbook"));
    assert_eq!(
        meta.created_display().as_deref(),
        Some("Wed, Jan 1, 2020 09:00:00 AM UTC")
    );
    assert_eq!(
        meta.modified_display().as_deref(),
        Some("Fri, Jun 30, 2023 05:45:00 PM UTC")
    );
}

#[test]
fn test_builder_renders_text() {
    let text = Docsift::new()
        .with_list_marker('*')
        .parse_bytes(&handbook())
        .unwrap()
        .to_text()
        .unwrap();

    assert!(text.starts_with("Handbook\n\nWelcome aboard.\n\nTools\n\n* Laptop\n* Badge"));
    assert!(text.contains("Contacts\n\nName\tPhone\nDesk\t100"));
}

#[test]
fn test_convert_file_writes_next_to_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("handbook.docx");
    fs::write(&input, handbook()).unwrap();

    let options = ConvertOptions::new().with_mode(OutputMode::Html);
    let result = ConverterRegistry::with_defaults()
        .convert_file(&input, &options)
        .unwrap();

    let expected = output_path(&input, OutputMode::Html);
    assert_eq!(result.output_path.as_deref(), Some(expected.as_path()));
    assert_eq!(result.metadata.name.as_deref(), Some("handbook.docx"));

    let html = fs::read_to_string(&expected).unwrap();
    assert_eq!(html, result.content);
    assert!(html.contains("<h1>Handbook</h1>"));
    assert!(html.contains("<h2>Tools</h2>"));
    assert!(html.contains("<ul>\n<li>Laptop</li>\n<li>Badge</li>\n</ul>"));
}

#[test]
fn test_failed_conversion_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.docx");
    fs::write(&input, b"").unwrap();

    let result = ConverterRegistry::with_defaults().convert_file(&input, &ConvertOptions::new());

    assert!(result.is_err());
    assert!(!output_path(&input, OutputMode::Text).exists());
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("slides.pptx");
    fs::write(&input, handbook()).unwrap();

    let result = ConverterRegistry::with_defaults().convert_file(&input, &ConvertOptions::new());

    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
}

#[test]
fn test_batch_keeps_input_order() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("a.docx");
    let bad = dir.path().join("b.odt");
    fs::write(&good, handbook()).unwrap();
    fs::write(&bad, b"x").unwrap();

    let results = docsift::convert_batch(&[good.clone(), bad], &ConvertOptions::new());

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(Error::UnsupportedFormat(_))));
    assert!(output_path(&good, OutputMode::Text).exists());
}
