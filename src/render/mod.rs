//! Rendering of parsed entries.
//!
//! Incorporations render as structured fields; every other entry falls back
//! to its raw text.

mod json;
mod options;
mod result;
mod text;

pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
pub use result::{EntryReport, EntryStats};
pub use text::{entries_to_lines, summary_line, to_text, truncate};
