//! # borme
//!
//! Entry reconstruction and field extraction for the Spanish commercial
//! registry bulletin (BORME).
//!
//! The bulletin publishes one PDF per province and day. This library turns
//! those PDFs into numbered entries and pulls the labeled fields out of
//! company incorporation announcements.
//!
//! ## Quick Start
//!
//! ```no_run
//! use borme::{parse_file, render};
//!
//! fn main() -> borme::Result<()> {
//!     let report = parse_file("BORME-A-2024-2-02.pdf")?;
//!     let text = render::to_text(&report.entries, &render::RenderOptions::default());
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! PDF bytes → [`extract::PageTextSource`] (per-page text) →
//! [`reconstruct::LineReconstructor`] (entries) →
//! [`fields::FieldParser`] (incorporation fields) → [`render`].

pub mod detect;
pub mod error;
pub mod extract;
#[cfg(feature = "http")]
pub mod fetch;
pub mod fields;
pub mod model;
pub mod reconstruct;
pub mod render;
pub mod sumario;

// Re-export commonly used types
pub use detect::{is_pdf_bytes, sniff_bytes, PdfHeader};
pub use error::{Error, Result};
pub use extract::{
    ErrorMode, ExtractOptions, LopdfTextSource, PageSelection, PageTextSource, TextPages,
};
#[cfg(feature = "http")]
pub use fetch::{BormeClient, ClientConfig};
pub use fields::{extract_incorporation_fields, FieldParser};
pub use model::{BulletinEntry, CompanyIncorporationFields, PageText, ParsedEntry};
pub use reconstruct::{reconstruct, LineReconstructor, ReconstructOptions, SegmentationMode};
pub use render::{EntryReport, EntryStats, JsonFormat, RenderOptions};
pub use sumario::{Sumario, SummaryNode};

use std::path::Path;

/// Rebuild and parse the entries of a bulletin PDF file.
///
/// # Example
///
/// ```no_run
/// let report = borme::parse_file("BORME-A-2024-2-02.pdf").unwrap();
/// println!("{} entries", report.stats.entry_count);
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<EntryReport> {
    Borme::new().parse_file(path)
}

/// Rebuild and parse the entries of a bulletin PDF held in memory.
pub fn parse_bytes(data: &[u8]) -> Result<EntryReport> {
    Borme::new().parse_bytes(data)
}

/// Rebuild and parse entries from already-extracted page texts.
pub fn parse_page_texts<I, S>(pages: I) -> EntryReport
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let pages = PageText::from_strings(pages);
    Borme::new().parse_pages(&pages)
}

/// Builder tying extraction, reconstruction and field parsing together.
///
/// # Example
///
/// ```no_run
/// use borme::{Borme, PageSelection};
///
/// let report = Borme::new()
///     .lenient()
///     .per_page()
///     .with_pages(PageSelection::Range(1..=3))
///     .parse_file("BORME-A-2024-2-02.pdf")?;
/// # Ok::<(), borme::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Borme {
    extract_options: ExtractOptions,
    reconstruct_options: ReconstructOptions,
}

impl Borme {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Replace the reconstruction options.
    pub fn with_reconstruct_options(mut self, options: ReconstructOptions) -> Self {
        self.reconstruct_options = options;
        self
    }

    /// Blank out pages that fail to extract instead of failing.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Restrict extraction to some pages.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.extract_options = self.extract_options.with_pages(pages);
        self
    }

    /// Segment every page on its own.
    pub fn per_page(mut self) -> Self {
        self.reconstruct_options = self.reconstruct_options.per_page();
        self
    }

    /// Parse a PDF file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<EntryReport> {
        let source = LopdfTextSource::open_with_options(path, self.extract_options.clone())?;
        self.parse_source(&source)
    }

    /// Parse a PDF from bytes.
    pub fn parse_bytes(&self, data: &[u8]) -> Result<EntryReport> {
        let source = LopdfTextSource::from_bytes_with_options(data, self.extract_options.clone())?;
        self.parse_source(&source)
    }

    /// Parse any page text source.
    ///
    /// A failing source yields the error and no entries.
    pub fn parse_source<S: PageTextSource + ?Sized>(&self, source: &S) -> Result<EntryReport> {
        let pages = source.page_texts()?;
        Ok(self.parse_pages(&pages))
    }

    /// Parse page texts that are already extracted.
    pub fn parse_pages(&self, pages: &[PageText]) -> EntryReport {
        let entries = LineReconstructor::new(self.reconstruct_options.clone()).reconstruct(pages);
        let parsed = FieldParser::new().parse_entries(entries);
        EntryReport::new(parsed, pages.len() as u32)
    }
}
