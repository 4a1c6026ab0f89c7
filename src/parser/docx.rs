//! Word (OOXML) body reader.
//!
//! Decodes `word/document.xml` into styled body units, resolving paragraph,
//! table and character style font sizes from `word/styles.xml`, numbering
//! definitions from `word/numbering.xml` and core properties from
//! `docProps/core.xml`. Font sizes are stored in half-points and reported in
//! whole points.

use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use roxmltree::Node;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::body::{BodyUnit, Numbering, StyledBody, StyledParagraph, StyledRun, StyledTable};
use crate::error::{Error, Result};
use crate::model::{ListKind, Metadata, NumberingId, SourceFormat, TextStyle};

use super::file_name;
use super::options::ParseOptions;
use super::text::normalize_text;

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";
const NUMBERING_PART: &str = "word/numbering.xml";
const CORE_PART: &str = "docProps/core.xml";

/// Word document parser.
pub struct DocxParser {
    archive: ZipArchive<Cursor<Vec<u8>>>,
    options: ParseOptions,
    name: Option<String>,
}

impl DocxParser {
    /// Open a .docx file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a .docx file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let parser = Self::from_bytes_with_options(data, options)?;
        Ok(parser.with_name(file_name(path)))
    }

    /// Read a .docx from bytes.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Read a .docx from bytes with custom options.
    pub fn from_bytes_with_options(data: impl Into<Vec<u8>>, options: ParseOptions) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data.into()))?;
        Ok(Self {
            archive,
            options,
            name: None,
        })
    }

    /// Set the document name reported in metadata.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Options this parser was created with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Decode the package into a styled body.
    pub fn parse(&mut self) -> Result<StyledBody> {
        let document_xml = self
            .read_part(DOCUMENT_PART)?
            .ok_or_else(|| Error::Malformed(format!("missing {}", DOCUMENT_PART)))?;

        let styles = match self.read_part(STYLES_PART)? {
            Some(xml) => StyleSheet::parse(&xml)?,
            None => StyleSheet::default(),
        };
        let numbering = match self.read_part(NUMBERING_PART)? {
            Some(xml) => parse_numbering(&xml)?,
            None => Numbering::new(),
        };

        let mut metadata = Metadata::new(SourceFormat::Word);
        metadata.name = self.name.clone();
        if let Some(xml) = self.read_part(CORE_PART)? {
            read_core_properties(&xml, &mut metadata)?;
        }
        log::debug!("document name: {:?}", metadata.name);
        log::debug!("document created: {:?}", metadata.created);
        log::debug!("document modified: {:?}", metadata.modified);

        let xml = roxmltree::Document::parse(&document_xml)?;
        let body_node = wml(xml.root_element(), "body")
            .ok_or_else(|| Error::Malformed("document has no w:body".to_string()))?;

        let mut body = StyledBody::new(metadata);
        body.default_font_size = styles.default_font_size;
        body.numbering = numbering;
        collect_units(body_node, &styles, &mut body.units);

        log::debug!(
            "read {} body units, {} numbering definitions",
            body.units.len(),
            body.numbering.len()
        );
        Ok(body)
    }

    fn read_part(&mut self, name: &str) -> Result<Option<String>> {
        let mut entry = match self.archive.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut content = String::new();
        entry
            .read_to_string(&mut content)
            .map_err(|e| Error::Malformed(format!("{}: {}", name, e)))?;
        Ok(Some(content))
    }
}

fn wml<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(WML_NS))
}

fn wml_attr<'a, 'input>(node: Node<'a, 'input>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((WML_NS, "val")))
}

/// WML toggle property: present without `val`, or with a truthy `val`.
fn wml_bool(node: Node, name: &str) -> bool {
    wml(node, name).is_some_and(|n| {
        n.attribute((WML_NS, "val"))
            .map_or(true, |v| v != "0" && v != "false" && v != "none")
    })
}

fn is_wml(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == Some(WML_NS)
}

/// `w:sz` value (half-points) as whole points.
fn half_points(rpr: Node) -> Option<u32> {
    wml_attr(rpr, "sz")
        .and_then(|v| v.parse::<u32>().ok())
        .map(|half| half / 2)
}

#[derive(Debug, Clone, Default)]
struct StyleDef {
    based_on: Option<String>,
    font_size: Option<u32>,
}

/// Font sizes declared by `word/styles.xml`.
#[derive(Debug, Clone, Default)]
struct StyleSheet {
    default_font_size: Option<u32>,
    styles: HashMap<String, StyleDef>,
}

impl StyleSheet {
    fn parse(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)?;
        let root = doc.root_element();
        let mut sheet = StyleSheet::default();

        sheet.default_font_size = wml(root, "docDefaults")
            .and_then(|n| wml(n, "rPrDefault"))
            .and_then(|n| wml(n, "rPr"))
            .and_then(half_points);

        for style in root.children().filter(|n| is_wml(n, "style")) {
            let Some(id) = style.attribute((WML_NS, "styleId")) else {
                continue;
            };
            let def = StyleDef {
                based_on: wml_attr(style, "basedOn").map(str::to_string),
                font_size: wml(style, "rPr").and_then(half_points),
            };
            sheet.styles.insert(id.to_string(), def);
        }

        Ok(sheet)
    }

    /// Font size of a style, inherited through `w:basedOn`.
    fn font_size(&self, style_id: &str) -> Option<u32> {
        let mut seen = HashSet::new();
        let mut current = Some(style_id);

        while let Some(id) = current {
            if !seen.insert(id) {
                log::warn!("style {} inherits from itself", id);
                return None;
            }
            let def = self.styles.get(id)?;
            if def.font_size.is_some() {
                return def.font_size;
            }
            current = def.based_on.as_deref();
        }
        None
    }
}

fn parse_numbering(xml: &str) -> Result<Numbering> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();

    let mut abstract_kinds: HashMap<&str, ListKind> = HashMap::new();
    for node in root.children().filter(|n| is_wml(n, "abstractNum")) {
        let Some(abs_id) = node.attribute((WML_NS, "abstractNumId")) else {
            continue;
        };
        let format = node
            .children()
            .filter(|n| is_wml(n, "lvl"))
            .find(|lvl| lvl.attribute((WML_NS, "ilvl")) == Some("0"))
            .and_then(|lvl| wml_attr(lvl, "numFmt"));
        let kind = match format {
            Some("bullet") | Some("none") | None => ListKind::Bullet,
            Some(_) => ListKind::Ordered,
        };
        abstract_kinds.insert(abs_id, kind);
    }

    let mut numbering = Numbering::new();
    for node in root.children().filter(|n| is_wml(n, "num")) {
        let Some(id) = node
            .attribute((WML_NS, "numId"))
            .and_then(|v| v.parse::<u32>().ok())
        else {
            continue;
        };
        let kind = wml_attr(node, "abstractNumId")
            .and_then(|abs| abstract_kinds.get(abs).copied())
            .unwrap_or_default();
        numbering.insert(NumberingId(id), kind);
    }

    Ok(numbering)
}

fn read_core_properties(xml: &str, metadata: &mut Metadata) -> Result<()> {
    let doc = roxmltree::Document::parse(xml)?;
    for node in doc.root_element().children().filter(|n| n.is_element()) {
        let Some(text) = node.text().map(str::trim).filter(|t| !t.is_empty()) else {
            continue;
        };
        match node.tag_name().name() {
            "title" => metadata.title = Some(text.to_string()),
            "creator" => metadata.author = Some(text.to_string()),
            "created" => metadata.created = parse_w3c_date(text),
            "modified" => metadata.modified = parse_w3c_date(text),
            _ => {}
        }
    }
    Ok(())
}

/// Parse a W3CDTF timestamp such as `2024-01-15T10:30:45Z`.
fn parse_w3c_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn collect_units(container: Node, styles: &StyleSheet, units: &mut Vec<BodyUnit>) {
    for child in container.children().filter(|n| n.is_element()) {
        if is_wml(&child, "p") {
            units.push(BodyUnit::Paragraph(read_paragraph(child, styles)));
        } else if is_wml(&child, "tbl") {
            units.push(BodyUnit::Table(read_table(child, styles)));
        } else if is_wml(&child, "sdt") {
            if let Some(content) = wml(child, "sdtContent") {
                collect_units(content, styles, units);
            }
        }
    }
}

fn read_paragraph(node: Node, styles: &StyleSheet) -> StyledParagraph {
    let ppr = wml(node, "pPr");

    let style_font_size = ppr
        .and_then(|p| wml_attr(p, "pStyle"))
        .and_then(|id| styles.font_size(id));
    let numbering = ppr
        .and_then(|p| wml(p, "numPr"))
        .and_then(|n| wml_attr(n, "numId"))
        .and_then(|v| v.parse::<u32>().ok())
        .map(NumberingId);

    let mut runs = Vec::new();
    collect_runs(node, styles, &mut runs);

    StyledParagraph {
        runs,
        style_font_size,
        numbering,
    }
}

fn collect_runs(node: Node, styles: &StyleSheet, runs: &mut Vec<StyledRun>) {
    for child in node.children().filter(|n| n.is_element()) {
        if child.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match child.tag_name().name() {
            "r" => {
                if let Some(run) = read_run(child, styles) {
                    runs.push(run);
                }
            }
            "hyperlink" | "ins" | "smartTag" | "fldSimple" | "customXml" => {
                collect_runs(child, styles, runs)
            }
            "sdt" => {
                if let Some(content) = wml(child, "sdtContent") {
                    collect_runs(content, styles, runs);
                }
            }
            _ => {}
        }
    }
}

fn read_run(node: Node, styles: &StyleSheet) -> Option<StyledRun> {
    let mut text = String::new();
    for child in node.children().filter(|n| n.is_element()) {
        if child.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match child.tag_name().name() {
            "t" => text.push_str(child.text().unwrap_or_default()),
            "tab" => text.push('\t'),
            "br" | "cr" => text.push('\n'),
            "noBreakHyphen" => text.push('-'),
            _ => {}
        }
    }
    if text.is_empty() {
        return None;
    }

    let rpr = wml(node, "rPr");
    let font_size = rpr.and_then(half_points).or_else(|| {
        rpr.and_then(|r| wml_attr(r, "rStyle"))
            .and_then(|id| styles.font_size(id))
    });
    let style = match rpr {
        Some(r) => TextStyle {
            bold: wml_bool(r, "b"),
            italic: wml_bool(r, "i"),
            underline: wml_bool(r, "u"),
            font_size,
        },
        None => TextStyle::default(),
    };

    Some(StyledRun {
        text: normalize_text(&text),
        font_size,
        style,
    })
}

fn read_table(node: Node, styles: &StyleSheet) -> StyledTable {
    let style_font_size = wml(node, "tblPr")
        .and_then(|p| wml_attr(p, "tblStyle"))
        .and_then(|id| styles.font_size(id));

    let rows = node
        .children()
        .filter(|n| is_wml(n, "tr"))
        .map(|tr| {
            tr.children()
                .filter(|n| is_wml(n, "tc"))
                .map(|tc| {
                    tc.children()
                        .filter(|n| is_wml(n, "p"))
                        .map(|p| read_paragraph(p, styles))
                        .collect()
                })
                .collect()
        })
        .collect();

    StyledTable {
        rows,
        style_font_size,
    }
}
