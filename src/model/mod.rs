//! Data model shared by extraction, reconstruction and rendering.
//!
//! Everything here is built fresh per extraction run; nothing is cached or
//! persisted.

mod entry;
mod page;

pub use entry::{BulletinEntry, CompanyIncorporationFields, ParsedEntry};
pub use page::PageText;
