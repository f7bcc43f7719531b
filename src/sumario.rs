//! Daily summary ("sumario") of a bulletin issue.
//!
//! The open-data API serves the summary as JSON converted from XML, so a
//! repeated element comes out as an array when it occurs more than once
//! and as a bare object when it occurs once. The types below accept both
//! shapes and expose the result as a flat list of [`SummaryNode`]s.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Status code the API uses for a successful response.
const STATUS_OK: &str = "200";

/// Parsed summary response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sumario {
    /// Response status
    #[serde(default)]
    pub status: Status,

    /// Response payload
    #[serde(default)]
    pub data: Option<SumarioData>,
}

/// Response status block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Status {
    #[serde(default, deserialize_with = "scalar")]
    pub code: String,
    #[serde(default, deserialize_with = "scalar")]
    pub text: String,
}

/// `data` wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SumarioData {
    #[serde(default)]
    pub sumario: SumarioBody,
}

/// The summary proper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SumarioBody {
    #[serde(default)]
    pub metadatos: Option<Metadatos>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub diario: Vec<Diario>,
}

/// Publication metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadatos {
    #[serde(default, deserialize_with = "scalar")]
    pub publicacion: String,
    /// Publication date as `YYYYMMDD`
    #[serde(default, deserialize_with = "scalar")]
    pub fecha_publicacion: String,
}

/// One issue of the day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diario {
    #[serde(default, deserialize_with = "scalar")]
    pub numero: String,
    #[serde(default)]
    pub sumario_diario: Option<SumarioDiario>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub seccion: Vec<Seccion>,
}

/// Issue-level summary document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SumarioDiario {
    #[serde(default, deserialize_with = "scalar")]
    pub identificador: String,
    #[serde(default)]
    pub url_pdf: Option<UrlPdf>,
}

/// A section of the issue (e.g. "A" for registered acts).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seccion {
    #[serde(default, deserialize_with = "scalar")]
    pub codigo: String,
    #[serde(default, deserialize_with = "scalar")]
    pub nombre: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub item: Vec<Item>,
}

/// A listed document (one province's announcements, for section A).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "scalar")]
    pub identificador: String,
    #[serde(default, deserialize_with = "scalar")]
    pub titulo: String,
    #[serde(default)]
    pub url_pdf: Option<UrlPdf>,
}

/// PDF link, either `{ "texto": url, ... }` or a bare string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UrlPdf {
    Link {
        #[serde(deserialize_with = "scalar")]
        texto: String,
    },
    Plain(String),
}

impl UrlPdf {
    /// The URL.
    pub fn as_str(&self) -> &str {
        match self {
            UrlPdf::Link { texto } => texto,
            UrlPdf::Plain(url) => url,
        }
    }
}

/// Navigable view of a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SummaryNode {
    /// A section heading
    Section { codigo: String, nombre: String },
    /// A listed document
    Entry {
        identificador: String,
        titulo: String,
        url_pdf: Option<String>,
    },
    /// A labeled value
    Field { label: String, value: String },
}

impl Sumario {
    /// Parse a summary response, failing on a non-OK status.
    ///
    /// The status is checked before the payload is mapped, since error
    /// responses carry no usable `data`.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let status = value
            .get("status")
            .cloned()
            .map(serde_json::from_value::<Status>)
            .transpose()?
            .unwrap_or_default();
        if status.code != STATUS_OK {
            return Err(Error::Summary(format!(
                "status {}: {}",
                status.code, status.text
            )));
        }

        let sumario: Sumario = serde_json::from_value(value)?;
        log::debug!("Summary with {} issues", sumario.diarios().len());
        Ok(sumario)
    }

    /// Metadata block, if present.
    pub fn metadatos(&self) -> Option<&Metadatos> {
        self.data.as_ref().and_then(|d| d.sumario.metadatos.as_ref())
    }

    /// Issues of the day.
    pub fn diarios(&self) -> &[Diario] {
        self.data
            .as_ref()
            .map(|d| d.sumario.diario.as_slice())
            .unwrap_or_default()
    }

    /// Publication date, if the metadata carries a valid `YYYYMMDD`.
    pub fn publication_date(&self) -> Option<NaiveDate> {
        self.metadatos()
            .and_then(|m| NaiveDate::parse_from_str(&m.fecha_publicacion, "%Y%m%d").ok())
    }

    /// Flatten into fields, sections and entries in document order.
    pub fn nodes(&self) -> Vec<SummaryNode> {
        let mut nodes = Vec::new();

        if let Some(meta) = self.metadatos() {
            nodes.push(field("Publicación", &meta.publicacion));
            nodes.push(field("Fecha de publicación", &meta.fecha_publicacion));
        }

        for diario in self.diarios() {
            nodes.push(field("Diario", &diario.numero));
            if let Some(sd) = &diario.sumario_diario {
                nodes.push(field("Identificador", &sd.identificador));
                if let Some(url) = &sd.url_pdf {
                    nodes.push(field("PDF", url.as_str()));
                }
            }
            for seccion in &diario.seccion {
                nodes.push(SummaryNode::Section {
                    codigo: seccion.codigo.clone(),
                    nombre: seccion.nombre.clone(),
                });
                nodes.extend(seccion.item.iter().map(|item| SummaryNode::Entry {
                    identificador: item.identificador.clone(),
                    titulo: item.titulo.clone(),
                    url_pdf: item.url_pdf.as_ref().map(|u| u.as_str().to_string()),
                }));
            }
        }

        nodes
    }

    /// PDF URLs of listed documents, optionally restricted to one section code.
    pub fn pdf_urls(&self, section: Option<&str>) -> Vec<&str> {
        self.diarios()
            .iter()
            .flat_map(|d| d.seccion.iter())
            .filter(|s| section.map_or(true, |code| s.codigo.eq_ignore_ascii_case(code)))
            .flat_map(|s| s.item.iter())
            .filter_map(|item| item.url_pdf.as_ref().map(UrlPdf::as_str))
            .collect()
    }
}

fn field(label: &str, value: &str) -> SummaryNode {
    SummaryNode::Field {
        label: label.to_string(),
        value: value.to_string(),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

fn one_or_many<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

/// Strings that XML conversion may have turned into numbers or booleans.
fn scalar<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => String::new(),
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Number(n)) => n.to_string(),
        Some(Scalar::Flag(b)) => b.to_string(),
    })
}
