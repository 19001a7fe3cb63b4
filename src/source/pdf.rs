//! Text run provider backed by `lopdf`.
//!
//! Each page's content stream is walked with a small text-state machine
//! (BT/ET, Tf, TL, Td/TD, Tm, T*, Tj/TJ, ' and "). Every text-showing
//! operator yields one run positioned at the current text matrix.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId, Stream};
use unicode_normalization::UnicodeNormalization;

use super::TextRunSource;
use crate::error::{Error, Result};
use crate::model::{PageRuns, TextRun};

/// Page height used when no MediaBox can be found (US Letter).
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.5;

/// TJ adjustment (thousandths of an em) treated as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Guard against cyclic Parent chains.
const MAX_INHERITANCE_DEPTH: usize = 32;

type PageFonts<'a> = BTreeMap<Vec<u8>, &'a Dictionary>;

/// A PDF document read through `lopdf`.
pub struct LopdfSource {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
}

impl LopdfSource {
    /// Load from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_document(LopdfDocument::load(path)?)
    }

    /// Load from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_document(LopdfDocument::load_mem(data)?)
    }

    /// Load from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Wrap an already loaded document.
    pub fn from_document(doc: LopdfDocument) -> Result<Self> {
        let pages = doc.get_pages();
        if pages.is_empty() {
            return Err(Error::PdfParse("document has no pages".to_string()));
        }
        log::debug!("loaded PDF {} with {} pages", doc.version, pages.len());
        Ok(Self { doc, pages })
    }

    /// PDF version from the file header.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page_id(&self, number: u32) -> Result<ObjectId> {
        self.pages
            .get(&number)
            .copied()
            .ok_or(Error::PageOutOfRange(number, self.page_count()))
    }

    /// Height of the page's MediaBox, following the Parent chain.
    fn page_height(&self, page_id: ObjectId) -> f32 {
        let mut current = Some(page_id);
        for _ in 0..MAX_INHERITANCE_DEPTH {
            let Some(id) = current else { break };
            let Ok(dict) = self.doc.get_dictionary(id) else {
                break;
            };
            if let Some(height) = dict.get(b"MediaBox").ok().and_then(|o| self.box_height(o)) {
                return height;
            }
            current = dict.get(b"Parent").and_then(Object::as_reference).ok();
        }

        log::warn!(
            "no usable MediaBox for page object {:?}, assuming height {}",
            page_id,
            DEFAULT_PAGE_HEIGHT
        );
        DEFAULT_PAGE_HEIGHT
    }

    fn box_height(&self, obj: &Object) -> Option<f32> {
        let obj = match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok()?,
            other => other,
        };
        let values: Vec<f32> = obj.as_array().ok()?.iter().filter_map(get_number).collect();
        match values.as_slice() {
            [_, bottom, _, top] => Some((top - bottom).abs()).filter(|h| *h > 0.0),
            _ => None,
        }
    }

    /// Decompressed content stream of a page; empty when the page has none.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page_id)?;
        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(Vec::new());
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r)? {
                Object::Stream(s) => stream_content(s),
                Object::Array(arr) => Ok(self.concat_streams(arr)),
                _ => Err(Error::TextExtract("invalid content stream".to_string())),
            },
            Object::Array(arr) => Ok(self.concat_streams(arr)),
            _ => Err(Error::TextExtract("invalid content stream".to_string())),
        }
    }

    fn concat_streams(&self, refs: &[Object]) -> Vec<u8> {
        let mut content = Vec::new();
        for obj in refs {
            if let Object::Reference(r) = obj {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    match stream_content(s) {
                        Ok(data) => {
                            content.extend_from_slice(&data);
                            content.push(b' ');
                        }
                        Err(e) => log::warn!("skipping unreadable content stream {:?}: {}", r, e),
                    }
                }
            }
        }
        content
    }

    fn decode(&self, fonts: &PageFonts<'_>, font: &[u8], bytes: &[u8]) -> String {
        fonts
            .get(font)
            .and_then(|dict| dict.get_font_encoding(&self.doc).ok())
            .and_then(|enc| LopdfDocument::decode_text(&enc, bytes).ok())
            .unwrap_or_else(|| decode_text_simple(bytes))
    }

    /// Decode a TJ array, inserting a space for large negative adjustments.
    fn decode_array(&self, fonts: &PageFonts<'_>, font: &[u8], items: &[Object]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(fonts, font, bytes)),
                other => {
                    let Some(adjustment) = get_number(other).map(|n| -n) else {
                        continue;
                    };
                    if adjustment > TJ_SPACE_THRESHOLD && wants_space(&combined) {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }

    fn extract_runs(&self, page_id: ObjectId) -> Result<Vec<TextRun>> {
        let fonts = self.doc.get_page_fonts(page_id)?;
        let data = self.page_content(page_id)?;
        if data.is_empty() {
            return Ok(Vec::new());
        }
        let content = lopdf::content::Content::decode(&data)?;

        let mut runs = Vec::new();
        let mut state = TextState::default();

        for op in content.operations {
            let operands = op.operands.as_slice();
            let shown = match op.operator.as_str() {
                "BT" => {
                    state.begin();
                    None
                }
                "ET" => {
                    state.in_text = false;
                    None
                }
                "Tf" => {
                    if let [Object::Name(name), size, ..] = operands {
                        state.font = name.clone();
                        state.font_size = get_number(size).unwrap_or(DEFAULT_FONT_SIZE);
                    }
                    None
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(get_number) {
                        state.leading = leading;
                    }
                    None
                }
                "Td" | "TD" => {
                    if let [tx, ty, ..] = operands {
                        let ty = get_number(ty).unwrap_or(0.0);
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        state.move_line(get_number(tx).unwrap_or(0.0), ty);
                    }
                    None
                }
                "Tm" => {
                    if let [a, b, c, d, e, f, ..] = operands {
                        let n = |o: &Object| get_number(o).unwrap_or(0.0);
                        state.set_matrix(TextMatrix::new(n(a), n(b), n(c), n(d), n(e), n(f)));
                    }
                    None
                }
                "T*" => {
                    state.next_line();
                    None
                }
                "Tj" => match operands.first() {
                    Some(Object::String(bytes, _)) => {
                        Some(self.decode(&fonts, &state.font, bytes))
                    }
                    _ => None,
                },
                "TJ" => match operands.first() {
                    Some(Object::Array(items)) => {
                        Some(self.decode_array(&fonts, &state.font, items))
                    }
                    _ => None,
                },
                "'" | "\"" => {
                    state.next_line();
                    let index = if op.operator == "\"" { 2 } else { 0 };
                    match operands.get(index) {
                        Some(Object::String(bytes, _)) => {
                            Some(self.decode(&fonts, &state.font, bytes))
                        }
                        _ => None,
                    }
                }
                _ => None,
            };

            if let Some(text) = shown {
                if let Some(run) = state.show(&text) {
                    runs.push(run);
                }
            }
        }

        Ok(runs)
    }
}

impl TextRunSource for LopdfSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page(&self, number: u32) -> Result<PageRuns> {
        let page_id = self.page_id(number)?;
        let mut page = PageRuns::new(number, self.page_height(page_id));
        for run in self.extract_runs(page_id)? {
            page.push(run);
        }
        log::debug!("page {}: {} runs, height {}", number, page.len(), page.height);
        Ok(page)
    }
}

/// Affine text matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}

impl TextMatrix {
    fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Text state while walking a content stream.
#[derive(Debug, Clone)]
struct TextState {
    in_text: bool,
    font: Vec<u8>,
    font_size: f32,
    leading: f32,
    /// Start of the current line
    line: TextMatrix,
    /// Current glyph origin
    text: TextMatrix,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            in_text: false,
            font: Vec::new(),
            font_size: DEFAULT_FONT_SIZE,
            leading: DEFAULT_FONT_SIZE,
            line: TextMatrix::default(),
            text: TextMatrix::default(),
        }
    }
}

impl TextState {
    fn begin(&mut self) {
        self.in_text = true;
        self.set_matrix(TextMatrix::default());
    }

    fn set_matrix(&mut self, matrix: TextMatrix) {
        self.line = matrix;
        self.text = matrix;
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line.translate(tx, ty);
        self.text = self.line;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    /// Emit a run for shown text and advance past it.
    fn show(&mut self, text: &str) -> Option<TextRun> {
        if !self.in_text || text.trim().is_empty() {
            return None;
        }
        let text: String = text.nfc().collect();
        let size = self.font_size * self.text.scale();
        let width = text.chars().count() as f32 * size * GLYPH_WIDTH_RATIO;
        let run = TextRun::new(text, self.text.f, width).at_x(self.text.e);
        self.text.e += width;
        Some(run)
    }
}

/// Stream bytes, decoded only when the stream declares a filter.
fn stream_content(stream: &Stream) -> Result<Vec<u8>> {
    if stream.dict.has(b"Filter") {
        Ok(stream.decompressed_content()?)
    } else {
        Ok(stream.content.clone())
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Check whether a TJ word gap after `text` should become a space.
fn wants_space(text: &str) -> bool {
    match text.chars().last() {
        Some(c) => !c.is_whitespace() && !is_spaceless_script_char(c),
        None => false,
    }
}

/// Scripts written without spaces between words (Han, kana, CJK punctuation).
fn is_spaceless_script_char(c: char) -> bool {
    matches!(
        c as u32,
        0x4E00..=0x9FFF
            | 0x3400..=0x4DBF
            | 0x20000..=0x2EBEF
            | 0x3040..=0x309F
            | 0x30A0..=0x30FF
            | 0x3000..=0x303F
    )
}

/// Decoding fallback when no font encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
