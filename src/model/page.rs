//! Page-level types.

use serde::{Deserialize, Serialize};

/// Raw extracted text of a single page.
///
/// Text fragments are joined with single spaces; layout gaps show up as
/// runs of two or more whitespace characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// Page number (1-indexed)
    pub number: u32,

    /// Space-joined text fragments in reading order
    pub text: String,
}

impl PageText {
    /// Create a page text.
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// Build numbered pages (1..=N) from plain strings.
    pub fn from_strings<I, S>(texts: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Self::new(i as u32 + 1, text))
            .collect()
    }

    /// Check if the page carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of whitespace-separated words on the page.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
