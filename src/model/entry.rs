//! Bulletin entry types.

use serde::{Deserialize, Serialize};

/// One numbered announcement of a bulletin issue.
///
/// `id` is a non-empty run of ASCII digits; `text` is the body that
/// followed the identifier, with continuation lines joined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletinEntry {
    /// Numeric identifier as printed in the bulletin
    pub id: String,

    /// Reconstructed body text
    pub text: String,
}

impl BulletinEntry {
    /// Create an entry, rejecting identifiers that are not plain digits.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            id,
            text: text.into(),
        })
    }

    /// Identifier as a number, if it fits in a `u64`.
    pub fn number(&self) -> Option<u64> {
        self.id.parse().ok()
    }
}

/// Fields pulled out of a company incorporation ("Constitución") entry.
///
/// Every field is optional; a missing label leaves its field unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyIncorporationFields {
    /// Company name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,

    /// Start of operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comienzo: Option<String>,

    /// Corporate purpose
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objeto: Option<String>,

    /// Registered address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domicilio: Option<String>,

    /// Share capital
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,

    /// Appointments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombramientos: Option<String>,

    /// Registry data (volume, folio, sheet, inscription)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datos: Option<String>,
}

impl CompanyIncorporationFields {
    /// Check if no field was found.
    pub fn is_empty(&self) -> bool {
        self.labeled().is_empty() && self.nombre.is_none()
    }

    /// Labeled fields (excluding the name) in display order.
    pub fn labeled(&self) -> Vec<(&'static str, &str)> {
        [
            ("Comienzo de operaciones", &self.comienzo),
            ("Objeto social", &self.objeto),
            ("Domicilio", &self.domicilio),
            ("Capital", &self.capital),
            ("Nombramientos", &self.nombramientos),
            ("Datos registrales", &self.datos),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect()
    }
}

/// An entry together with its incorporation projection, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEntry {
    /// The reconstructed entry
    #[serde(flatten)]
    pub entry: BulletinEntry,

    /// Structured fields when the entry announces an incorporation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incorporation: Option<CompanyIncorporationFields>,
}

impl ParsedEntry {
    /// Check if the entry parsed as an incorporation.
    pub fn is_incorporation(&self) -> bool {
        self.incorporation.is_some()
    }
}
