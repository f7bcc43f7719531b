//! Entry reconstruction from raw page text.
//!
//! PDF text extraction yields one string per page with fragments joined by
//! single spaces and no usable line structure. Layout gaps survive as runs
//! of whitespace, which is all there is to rebuild lines from:
//!
//! 1. every run of two or more whitespace characters becomes a line break;
//! 2. the masthead block of each page, from the masthead line up to and
//!    including the verification URL line, is dropped;
//! 3. lines before the first `<digits> - <text>` line are dropped;
//! 4. each `<digits> - <text>` line opens an entry and every other line
//!    is appended to the open entry;
//! 5. each entry is split into its numeric id and its body.

mod options;

pub use options::{
    ReconstructOptions, SegmentationMode, DEFAULT_BOUNDARY_MARKER, DEFAULT_MASTHEAD,
};

use regex::Regex;

use crate::model::{BulletinEntry, PageText};

/// Rebuilds bulletin entries from page texts.
///
/// Holds compiled patterns only; `reconstruct` keeps no state between calls.
pub struct LineReconstructor {
    options: ReconstructOptions,
    gap_regex: Regex,
    entry_start_regex: Regex,
    entry_split_regex: Regex,
}

impl LineReconstructor {
    /// Create a reconstructor with the given options.
    pub fn new(options: ReconstructOptions) -> Self {
        Self {
            options,
            gap_regex: Regex::new(r"\s{2,}").unwrap(),
            entry_start_regex: Regex::new(r"^[0-9]+\s*-\s*.+").unwrap(),
            entry_split_regex: Regex::new(r"^([0-9]+)\s*-\s*(.+)$").unwrap(),
        }
    }

    /// Options in use.
    pub fn options(&self) -> &ReconstructOptions {
        &self.options
    }

    /// Rebuild the entries of a document from its pages, in page order.
    pub fn reconstruct(&self, pages: &[PageText]) -> Vec<BulletinEntry> {
        let entries = match self.options.segmentation {
            SegmentationMode::Document => {
                let lines: Vec<String> = pages
                    .iter()
                    .flat_map(|page| self.clean_page(page))
                    .collect();
                self.segment(&lines)
            }
            SegmentationMode::PerPage => pages
                .iter()
                .flat_map(|page| self.segment(&self.clean_page(page)))
                .collect(),
        };

        log::debug!(
            "Reconstructed {} entries from {} pages",
            entries.len(),
            pages.len()
        );
        entries
    }

    /// Turn whitespace gaps into line breaks; trim lines and drop empty ones.
    ///
    /// Earlier extractors collapsed runs of three or more whitespace
    /// characters before runs of two; a single two-or-more pass yields the
    /// same lines.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        self.gap_regex
            .replace_all(text, "\n")
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Drop masthead blocks.
    ///
    /// A line containing the masthead starts skipping; a line containing the
    /// boundary marker stops it. Both lines are dropped with the block.
    pub fn strip_boilerplate(&self, lines: Vec<String>) -> Vec<String> {
        let mut kept = Vec::with_capacity(lines.len());
        let mut skipping = false;

        for line in lines {
            if skipping {
                if line.contains(self.options.boundary_marker.as_str()) {
                    skipping = false;
                }
                continue;
            }
            if line.contains(self.options.masthead.as_str()) {
                skipping = true;
                continue;
            }
            kept.push(line);
        }

        kept
    }

    /// Check if a line opens a new entry.
    pub fn is_entry_start(&self, line: &str) -> bool {
        self.entry_start_regex.is_match(line)
    }

    /// Group cleaned lines into entries.
    pub fn segment(&self, lines: &[String]) -> Vec<BulletinEntry> {
        let Some(first) = lines.iter().position(|line| self.is_entry_start(line)) else {
            return Vec::new();
        };

        let mut flushed = Vec::new();
        let mut accumulator = String::new();

        for line in &lines[first..] {
            if self.is_entry_start(line) {
                if !accumulator.is_empty() {
                    flushed.push(accumulator.trim().to_string());
                }
                accumulator = line.clone();
            } else {
                if !accumulator.is_empty() {
                    accumulator.push(' ');
                }
                accumulator.push_str(line);
            }
        }
        if !accumulator.is_empty() {
            flushed.push(accumulator.trim().to_string());
        }

        flushed
            .iter()
            .filter_map(|raw| self.split_entry(raw))
            .collect()
    }

    /// Split `<digits> - <text>` into an entry.
    pub fn split_entry(&self, raw: &str) -> Option<BulletinEntry> {
        let entry = self.entry_split_regex.captures(raw).and_then(|caps| {
            BulletinEntry::new(caps[1].to_string(), caps[2].trim().to_string())
        });
        if entry.is_none() {
            log::warn!("Dropping malformed entry fragment: {:?}", raw);
        }
        entry
    }

    fn clean_page(&self, page: &PageText) -> Vec<String> {
        let mut lines = self.normalize(&page.text);

        let leading = self.options.skip_leading_lines.min(lines.len());
        lines.drain(..leading);
        let trailing = self.options.skip_trailing_lines.min(lines.len());
        lines.truncate(lines.len() - trailing);

        self.strip_boilerplate(lines)
    }
}

impl Default for LineReconstructor {
    fn default() -> Self {
        Self::new(ReconstructOptions::default())
    }
}

/// Rebuild entries with default options.
pub fn reconstruct(pages: &[PageText]) -> Vec<BulletinEntry> {
    LineReconstructor::default().reconstruct(pages)
}
