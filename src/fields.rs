//! Field extraction for company incorporation entries.
//!
//! Bulletin bodies are free-form legal prose with a handful of recurring
//! labels. Each field is looked up independently against the whole body:
//!
//! | field | label | value ends at |
//! |---|---|---|
//! | `nombre` | (none) | first `Constituci` |
//! | `comienzo` | `Comienzo de operaciones:` | `. <Uppercase>` or end (final `.` dropped) |
//! | `objeto` | `Objeto social:` | `Domicilio:` |
//! | `domicilio` | `Domicilio:` | next `.` |
//! | `capital` | `Capital:` | `. <Uppercase>` or end (final `.` dropped) |
//! | `nombramientos` | `Nombramientos.` | `. <Uppercase>` or end (final `.` dropped) |
//! | `datos` | `Datos registrales.` | end |
//!
//! Labels match case-insensitively; the `Constituci` trigger does not.

use regex::Regex;

use crate::model::{BulletinEntry, CompanyIncorporationFields, ParsedEntry};

/// Substring that marks an incorporation announcement.
pub const INCORPORATION_MARKER: &str = "Constituci";

/// Extracts incorporation fields from entry bodies.
pub struct FieldParser {
    comienzo: Regex,
    objeto: Regex,
    domicilio: Regex,
    capital: Regex,
    nombramientos: Regex,
    datos: Regex,
}

impl FieldParser {
    /// Create a parser with compiled label patterns.
    pub fn new() -> Self {
        Self {
            comienzo: Regex::new(r"(?i:Comienzo de operaciones:)\s*(.*?)(?:\.\s+\p{Lu}|$)")
                .unwrap(),
            objeto: Regex::new(r"(?i:Objeto social:)\s*(.*?)\.?\s*(?i:Domicilio:)").unwrap(),
            domicilio: Regex::new(r"(?i:Domicilio:)\s*([^.]*)").unwrap(),
            capital: Regex::new(r"(?i:Capital:)\s*(.*?)(?:\.\s+\p{Lu}|$)").unwrap(),
            nombramientos: Regex::new(r"(?i:Nombramientos\.)\s*(.*?)(?:\.\s+\p{Lu}|$)").unwrap(),
            datos: Regex::new(r"(?i:Datos registrales\.)\s*(.*)$").unwrap(),
        }
    }

    /// Extract incorporation fields, or `None` if the body does not announce
    /// an incorporation.
    pub fn extract(&self, body: &str) -> Option<CompanyIncorporationFields> {
        let marker = body.find(INCORPORATION_MARKER)?;

        let fields = CompanyIncorporationFields {
            nombre: non_empty(&body[..marker]),
            comienzo: capture_sentence(&self.comienzo, body),
            objeto: capture(&self.objeto, body),
            domicilio: capture(&self.domicilio, body),
            capital: capture_sentence(&self.capital, body),
            nombramientos: capture_sentence(&self.nombramientos, body),
            datos: capture(&self.datos, body),
        };

        log::debug!(
            "Incorporation entry with {} labeled fields",
            fields.labeled().len()
        );
        Some(fields)
    }

    /// Pair an entry with its incorporation fields.
    pub fn parse_entry(&self, entry: BulletinEntry) -> ParsedEntry {
        let incorporation = self.extract(&entry.text);
        ParsedEntry {
            entry,
            incorporation,
        }
    }

    /// Pair every entry with its incorporation fields, keeping order.
    pub fn parse_entries(&self, entries: Vec<BulletinEntry>) -> Vec<ParsedEntry> {
        entries
            .into_iter()
            .map(|entry| self.parse_entry(entry))
            .collect()
    }
}

impl Default for FieldParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract incorporation fields with a fresh parser.
pub fn extract_incorporation_fields(body: &str) -> Option<CompanyIncorporationFields> {
    FieldParser::new().extract(body)
}

fn capture(regex: &Regex, body: &str) -> Option<String> {
    regex
        .captures(body)
        .and_then(|caps| caps.get(1))
        .and_then(|m| non_empty(m.as_str()))
}

/// Like `capture`, minus the period of a sentence that closes the body.
fn capture_sentence(regex: &Regex, body: &str) -> Option<String> {
    capture(regex, body).and_then(|value| match value.strip_suffix('.') {
        Some(stripped) => non_empty(stripped),
        None => Some(value),
    })
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
