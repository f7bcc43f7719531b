//! `PageTextSource` backed by lopdf.
//!
//! Page text is rebuilt from the content stream the way a browser PDF text
//! layer reports it: one fragment per text-showing operator, fragments
//! joined by single spaces. A move to a new text line contributes an empty
//! fragment, so line changes surface as runs of two spaces.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::detect::{sniff_bytes, sniff_path};
use crate::error::{Error, Result};
use crate::model::PageText;

use super::{ExtractOptions, PageTextSource};

/// Kerning (thousandths of an em) past which a `TJ` gap reads as a space.
const TJ_SPACE_THRESHOLD: f32 = -200.0;

/// PDF text source backed by `lopdf::Document`.
pub struct LopdfTextSource {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
    options: ExtractOptions,
}

impl LopdfTextSource {
    /// Load from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Load from a file path with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let path = path.as_ref();
        sniff_path(path)?;
        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc, options)
    }

    /// Load from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Load from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        sniff_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc, options)
    }

    /// Load from a reader.
    pub fn from_reader<R: Read>(mut reader: R, options: ExtractOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    fn from_document(doc: LopdfDocument, options: ExtractOptions) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        let pages = doc.get_pages();
        log::debug!("Loaded PDF {} with {} pages", doc.version, pages.len());
        Ok(Self {
            doc,
            pages,
            options,
        })
    }

    /// PDF version string.
    pub fn version(&self) -> &str {
        &self.doc.version
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        self.pages
            .get(&page)
            .copied()
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }

    fn decode(&self, fonts: &BTreeMap<Vec<u8>, &Dictionary>, font: &[u8], bytes: &[u8]) -> String {
        if let Some(font_dict) = fonts.get(font) {
            if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                    return text;
                }
            }
        }
        decode_text_simple(bytes)
    }
}

impl PageTextSource for LopdfTextSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page: u32) -> Result<PageText> {
        let page_id = self.page_id(page)?;
        let data = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page, e)))?;
        let content = Content::decode(&data)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page, e)))?;
        let fonts = self.doc.get_page_fonts(page_id).unwrap_or_default();

        let mut fragments = Fragments::default();
        let mut font: Vec<u8> = Vec::new();

        for op in &content.operations {
            match op.operator.as_str() {
                "Tf" => {
                    if let Some(Object::Name(name)) = op.operands.first() {
                        font = name.clone();
                    }
                }
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = op.operands.first() {
                        fragments.push(self.decode(&fonts, &font, bytes));
                    }
                }
                "'" | "\"" => {
                    fragments.line_break();
                    if let Some(Object::String(bytes, _)) = op.operands.last() {
                        fragments.push(self.decode(&fonts, &font, bytes));
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = op.operands.first() {
                        let mut text = String::new();
                        for item in items {
                            match item {
                                Object::String(bytes, _) => {
                                    text.push_str(&self.decode(&fonts, &font, bytes));
                                }
                                other => {
                                    if other.as_float().is_ok_and(|k| k < TJ_SPACE_THRESHOLD) {
                                        text.push(' ');
                                    }
                                }
                            }
                        }
                        fragments.push(text);
                    }
                }
                "Td" | "TD" => {
                    let dy = op.operands.get(1).and_then(|o| o.as_float().ok());
                    if dy.is_some_and(|dy| dy != 0.0) {
                        fragments.line_break();
                    }
                }
                "Tm" => {
                    let y = op.operands.get(5).and_then(|o| o.as_float().ok());
                    fragments.move_to(y);
                }
                "T*" | "ET" => fragments.line_break(),
                _ => {}
            }
        }

        Ok(PageText::new(page, fragments.join()))
    }

    fn extract_options(&self) -> &ExtractOptions {
        &self.options
    }
}

/// Text fragments of one page in content-stream order.
#[derive(Default)]
struct Fragments {
    items: Vec<String>,
    last_y: Option<f32>,
}

impl Fragments {
    fn push(&mut self, text: String) {
        if !text.is_empty() {
            self.items.push(text);
        }
    }

    /// Empty fragment; joined with spaces it widens the gap to two.
    fn line_break(&mut self) {
        if self.items.last().is_some_and(|last| !last.is_empty()) {
            self.items.push(String::new());
        }
    }

    /// Absolute positioning only breaks the line when the baseline changes.
    fn move_to(&mut self, y: Option<f32>) {
        if y != self.last_y {
            self.line_break();
        }
        self.last_y = y;
    }

    fn join(self) -> String {
        self.items.join(" ")
    }
}

/// Simple text decoding fallback when no font encoding is available.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}
