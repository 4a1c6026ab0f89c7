//! PDF body reader.
//!
//! PDF has no paragraph or style objects, so this reader recovers them from
//! the page content streams: positioned text spans are grouped into lines by
//! baseline, and lines into paragraphs by spacing, font size and indentation.
//! Every line becomes one run carrying its rounded font size. The document
//! default font size is the size covering the most characters.
//!
//! PDF carries no numbering definitions, so bodies read here never contain
//! list candidates.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::body::{BodyUnit, StyledBody, StyledParagraph, StyledRun};
use crate::error::{Error, Result};
use crate::model::{Metadata, SourceFormat, TextStyle};

use super::file_name;
use super::options::{ErrorMode, ParseOptions};
use super::text::{decode_text_simple, is_spaceless_script_char, normalize_text};

/// Leading assumed until a `TL` or `TD` operator sets one.
const DEFAULT_LEADING: f32 = 12.0;

/// PDF document parser.
pub struct PdfParser {
    doc: LopdfDocument,
    options: ParseOptions,
    name: Option<String>,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let doc = LopdfDocument::load(path)?;
        Ok(Self {
            doc,
            options,
            name: Some(file_name(path)),
        })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self {
            doc,
            options,
            name: None,
        })
    }

    /// Set the document name reported in metadata.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Decode all pages into a styled body.
    pub fn parse(&self) -> Result<StyledBody> {
        let mut body = StyledBody::new(self.extract_metadata());
        let mut sizes = SizeHistogram::default();

        for (page_num, page_id) in self.doc.get_pages() {
            let spans = match self.extract_page_spans(page_id) {
                Ok(spans) => spans,
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                    continue;
                }
            };

            let lines = group_spans_into_lines(spans);
            for line in &lines {
                sizes.add(line.rounded_size(), line.text().chars().count());
            }
            let blocks = group_lines_into_blocks(lines);
            log::trace!("page {}: {} paragraphs", page_num, blocks.len());

            body.units.extend(
                blocks
                    .iter()
                    .map(|block| BodyUnit::Paragraph(block_to_paragraph(block))),
            );
        }

        body.default_font_size = sizes.most_common();
        log::debug!(
            "read {} paragraphs, body font size {:?}",
            body.units.len(),
            body.default_font_size
        );
        Ok(body)
    }

    fn extract_metadata(&self) -> Metadata {
        let mut metadata = Metadata::new(SourceFormat::Pdf);
        metadata.name = self.name.clone();

        let info = self
            .doc
            .trailer
            .get(b"Info")
            .and_then(Object::as_reference)
            .and_then(|id| self.doc.get_dictionary(id));
        if let Ok(info) = info {
            metadata.title = get_string_from_dict(info, b"Title");
            metadata.author = get_string_from_dict(info, b"Author");
            metadata.created =
                get_string_from_dict(info, b"CreationDate").and_then(|s| parse_pdf_date(&s));
            metadata.modified =
                get_string_from_dict(info, b"ModDate").and_then(|s| parse_pdf_date(&s));
        }

        log::debug!("document name: {:?}", metadata.name);
        log::debug!("document created: {:?}", metadata.created);
        log::debug!("document modified: {:?}", metadata.modified);
        metadata
    }

    /// Extract text spans from a page with position and font information.
    fn extract_page_spans(&self, page_id: ObjectId) -> Result<Vec<TextSpan>> {
        let fonts = self.doc.get_page_fonts(page_id)?;
        let content = self.get_page_content(page_id)?;
        self.parse_content_stream(&content, &fonts)
    }

    fn get_page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page_id)?;
        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            // A page without content streams is blank.
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r)? {
                Object::Stream(s) => Ok(s.decompressed_content()?),
                _ => Err(Error::Malformed("invalid content stream".to_string())),
            },
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            content.extend_from_slice(&s.decompressed_content()?);
                            content.push(b' ');
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::Malformed("invalid content stream".to_string())),
        }
    }

    fn parse_content_stream(
        &self,
        content: &[u8],
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    ) -> Result<Vec<TextSpan>> {
        let content = lopdf::content::Content::decode(content)?;

        let mut spans = Vec::new();
        let mut state = TextState::default();
        let mut ctm = Matrix::IDENTITY;
        let mut saved: Vec<Matrix> = Vec::new();
        let mut in_text_block = false;

        for op in content.operations {
            match op.operator.as_str() {
                "q" => saved.push(ctm),
                "Q" => ctm = saved.pop().unwrap_or(Matrix::IDENTITY),
                "cm" => {
                    if let Some(m) = Matrix::from_operands(&op.operands) {
                        ctm = m.then(&ctm);
                    }
                }
                "BT" => {
                    in_text_block = true;
                    state.matrix = TextMatrix {
                        leading: state.matrix.leading,
                        ..TextMatrix::default()
                    };
                }
                "ET" => in_text_block = false,
                "Tf" => {
                    if let [Object::Name(name), size, ..] = op.operands.as_slice() {
                        state.font_key = name.clone();
                        state.font_name = fonts
                            .get(name)
                            .and_then(|f| f.get(b"BaseFont").ok())
                            .and_then(|o| o.as_name().ok())
                            .map(|n| String::from_utf8_lossy(n).into_owned())
                            .unwrap_or_else(|| String::from_utf8_lossy(name).into_owned());
                        state.font_size = get_number(size).unwrap_or(DEFAULT_LEADING);
                    }
                }
                "TL" => {
                    if let Some(leading) = op.operands.first().and_then(get_number) {
                        state.matrix.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if let [tx, ty, ..] = op.operands.as_slice() {
                        let tx = get_number(tx).unwrap_or(0.0);
                        let ty = get_number(ty).unwrap_or(0.0);
                        if op.operator == "TD" {
                            state.matrix.leading = -ty;
                        }
                        state.matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_operands(&op.operands) {
                        state.matrix.set(m);
                    }
                }
                "T*" => state.matrix.next_line(),
                "Tj" | "TJ" | "'" | "\"" => {
                    if matches!(op.operator.as_str(), "'" | "\"") {
                        state.matrix.next_line();
                    }
                    if !in_text_block {
                        continue;
                    }
                    let text = match op.operator.as_str() {
                        "TJ" => match op.operands.first() {
                            Some(Object::Array(items)) => self.decode_array(items, fonts, &state),
                            _ => String::new(),
                        },
                        "\"" => self.decode_operand(op.operands.get(2), fonts, &state),
                        _ => self.decode_operand(op.operands.first(), fonts, &state),
                    };
                    if !text.trim().is_empty() {
                        let (x, y) = state.matrix.position(&ctm);
                        spans.push(TextSpan::new(
                            text,
                            x,
                            y,
                            state.matrix.font_size(state.font_size, &ctm),
                            &state.font_name,
                        ));
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }

    fn decode_bytes(
        &self,
        bytes: &[u8],
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
        state: &TextState,
    ) -> String {
        let encoding = fonts
            .get(&state.font_key)
            .and_then(|f| f.get_font_encoding(&self.doc).ok());
        match encoding {
            Some(enc) => LopdfDocument::decode_text(&enc, bytes)
                .unwrap_or_else(|_| decode_text_simple(bytes)),
            None => decode_text_simple(bytes),
        }
    }

    fn decode_operand(
        &self,
        operand: Option<&Object>,
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
        state: &TextState,
    ) -> String {
        match operand {
            Some(Object::String(bytes, _)) => self.decode_bytes(bytes, fonts, state),
            _ => String::new(),
        }
    }

    /// Decode a `TJ` array. Large negative adjustments are word gaps.
    fn decode_array(
        &self,
        items: &[Object],
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
        state: &TextState,
    ) -> String {
        const SPACE_THRESHOLD: f32 = 200.0;

        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => {
                    combined.push_str(&self.decode_bytes(bytes, fonts, state))
                }
                other => {
                    let Some(adjustment) = get_number(other).map(|n| -n) else {
                        continue;
                    };
                    let needs_space = combined
                        .chars()
                        .last()
                        .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c));
                    if adjustment > SPACE_THRESHOLD && needs_space {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }
}

/// Text state tracked across content stream operators.
#[derive(Debug, Clone)]
struct TextState {
    matrix: TextMatrix,
    font_key: Vec<u8>,
    font_name: String,
    font_size: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: TextMatrix::default(),
            font_key: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
        }
    }
}

/// Affine transform `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_operands(operands: &[Object]) -> Option<Self> {
        if operands.len() < 6 {
            return None;
        }
        let n: Vec<f32> = operands
            .iter()
            .take(6)
            .map(|o| get_number(o).unwrap_or(0.0))
            .collect();
        Some(Self {
            a: n[0],
            b: n[1],
            c: n[2],
            d: n[3],
            e: n[4],
            f: n[5],
        })
    }

    /// `self` applied first, then `other`.
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }

    /// Length of the transformed unit vertical, i.e. glyph height per text-space unit.
    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Text matrix for tracking position in content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    m: Matrix,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            m: Matrix::IDENTITY,
            leading: DEFAULT_LEADING,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, m: Matrix) {
        self.m = m;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.m.e += tx * self.m.a + ty * self.m.c;
        self.m.f += tx * self.m.b + ty * self.m.d;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    /// Text origin in page space.
    fn position(&self, ctm: &Matrix) -> (f32, f32) {
        ctm.apply(self.m.e, self.m.f)
    }

    /// Rendered size of `font_size` under this matrix and the CTM.
    fn font_size(&self, font_size: f32, ctm: &Matrix) -> f32 {
        font_size * self.m.then(ctm).vertical_scale()
    }
}

/// A positioned piece of text.
#[derive(Debug, Clone)]
struct TextSpan {
    text: String,
    x: f32,
    y: f32,
    font_size: f32,
    bold: bool,
    italic: bool,
}

impl TextSpan {
    fn new(text: String, x: f32, y: f32, font_size: f32, font_name: &str) -> Self {
        let lower = font_name.to_lowercase();
        Self {
            text,
            x,
            y,
            font_size,
            bold: ["bold", "black", "heavy"].iter().any(|k| lower.contains(k)),
            italic: lower.contains("italic") || lower.contains("oblique"),
        }
    }
}

/// Spans sharing a baseline, left to right.
#[derive(Debug, Clone)]
struct TextLine {
    spans: Vec<TextSpan>,
    x: f32,
    y: f32,
    font_size: f32,
}

impl TextLine {
    fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        spans.sort_by(|a, b| a.x.total_cmp(&b.x));

        let total_chars: usize = spans.iter().map(|s| s.text.len()).sum();
        let weighted: f32 = spans
            .iter()
            .map(|s| s.font_size * s.text.len() as f32)
            .sum();
        let font_size = match (total_chars, spans.first()) {
            (0, Some(first)) => first.font_size,
            (0, None) => 0.0,
            (n, _) => weighted / n as f32,
        };
        let (x, y) = spans.first().map_or((0.0, 0.0), |s| (s.x, s.y));

        Self {
            spans,
            x,
            y,
            font_size,
        }
    }

    fn rounded_size(&self) -> u32 {
        self.font_size.round().max(0.0) as u32
    }

    /// Combined span text; no space is inserted between spaceless-script characters.
    fn text(&self) -> String {
        let mut result = String::new();
        for span in &self.spans {
            let prev = result.chars().last();
            let next = span.text.chars().next();
            if let (Some(p), Some(n)) = (prev, next) {
                let glued = is_spaceless_script_char(p) && is_spaceless_script_char(n);
                if !glued && !p.is_whitespace() && !n.is_whitespace() {
                    result.push(' ');
                }
            }
            result.push_str(&span.text);
        }
        result
    }

    fn share(&self, pick: impl Fn(&TextSpan) -> bool) -> bool {
        let total: usize = self.spans.iter().map(|s| s.text.len()).sum();
        let picked: usize = self
            .spans
            .iter()
            .filter(|s| pick(s))
            .map(|s| s.text.len())
            .sum();
        total > 0 && picked * 2 > total
    }
}

fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    // PDF Y grows upwards: top of the page first.
    spans.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.font_size * 0.3;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(TextLine::from_spans(std::mem::take(&mut current)));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        lines.push(TextLine::from_spans(current));
    }

    lines
}

fn average_line_spacing(lines: &[TextLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return DEFAULT_LEADING;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

fn should_break_block(prev: &TextLine, curr: &TextLine, avg_spacing: f32) -> bool {
    (prev.y - curr.y).abs() > avg_spacing * 1.5
        || (prev.font_size - curr.font_size).abs() > 1.0
        || (prev.x - curr.x).abs() > 20.0
}

fn group_lines_into_blocks(lines: Vec<TextLine>) -> Vec<Vec<TextLine>> {
    let avg_spacing = average_line_spacing(&lines);
    let mut blocks: Vec<Vec<TextLine>> = Vec::new();

    for line in lines {
        match blocks.last_mut() {
            Some(block)
                if block
                    .last()
                    .is_some_and(|prev| !should_break_block(prev, &line, avg_spacing)) =>
            {
                block.push(line)
            }
            _ => blocks.push(vec![line]),
        }
    }

    blocks
}

fn block_to_paragraph(lines: &[TextLine]) -> StyledParagraph {
    let runs = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let mut text = line.text();
            if i > 0 {
                text.insert(0, ' ');
            }
            let font_size = Some(line.rounded_size());
            StyledRun {
                text: normalize_text(&text),
                font_size,
                style: TextStyle {
                    bold: line.share(|s| s.bold),
                    italic: line.share(|s| s.italic),
                    underline: false,
                    font_size,
                },
            }
        })
        .collect();
    StyledParagraph::new(runs)
}

/// Character counts per rounded font size.
#[derive(Debug, Default)]
struct SizeHistogram {
    counts: HashMap<u32, usize>,
}

impl SizeHistogram {
    fn add(&mut self, size: u32, chars: usize) {
        *self.counts.entry(size).or_insert(0) += chars;
    }

    /// Size covering the most characters; ties go to the smaller size.
    fn most_common(&self) -> Option<u32> {
        self.counts
            .iter()
            .max_by(|(sa, ca), (sb, cb)| ca.cmp(cb).then(sb.cmp(sa)))
            .map(|(size, _)| *size)
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn get_string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
///
/// A missing offset is read as UTC.
fn parse_pdf_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s).trim();
    let digits_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, tail) = s.split_at(digits_end);
    if digits.len() < 4 {
        return None;
    }

    let field = |range: std::ops::Range<usize>, default: u32| -> u32 {
        digits
            .get(range)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    };
    let year: i32 = digits.get(0..4)?.parse().ok()?;

    let local = NaiveDate::from_ymd_opt(year, field(4..6, 1), field(6..8, 1))?
        .and_hms_opt(field(8..10, 0), field(10..12, 0), field(12..14, 0))?;
    let offset = parse_pdf_offset(tail)?;

    local
        .and_local_timezone(offset)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse the `Z`, `+HH'mm'` or `-HH'mm'` suffix of a PDF date.
fn parse_pdf_offset(tail: &str) -> Option<FixedOffset> {
    let sign = match tail.chars().next() {
        None | Some('Z') => return FixedOffset::east_opt(0),
        Some('+') => 1,
        Some('-') => -1,
        Some(_) => return None,
    };
    let numbers: Vec<i32> = tail[1..]
        .split('\'')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().ok())
        .collect::<Option<_>>()?;
    let hours = numbers.first().copied().unwrap_or(0);
    let minutes = numbers.get(1).copied().unwrap_or(0);

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
