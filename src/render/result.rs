//! Extraction result with statistics.

use serde::{Deserialize, Serialize};

use crate::model::ParsedEntry;

/// Entries of one bulletin document, with counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryReport {
    /// Parsed entries in document order
    pub entries: Vec<ParsedEntry>,

    /// Counts gathered while building the report
    pub stats: EntryStats,
}

impl EntryReport {
    /// Build a report, computing statistics from the entries.
    pub fn new(entries: Vec<ParsedEntry>, page_count: u32) -> Self {
        let incorporations = entries.iter().filter(|e| e.is_incorporation()).count() as u32;
        let stats = EntryStats {
            page_count,
            entry_count: entries.len() as u32,
            incorporation_count: incorporations,
        };
        Self { entries, stats }
    }

    /// Check if no entries were found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Statistics collected during extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryStats {
    /// Pages the entries were rebuilt from
    pub page_count: u32,

    /// Entries found
    pub entry_count: u32,

    /// Entries that parsed as incorporations
    pub incorporation_count: u32,
}
