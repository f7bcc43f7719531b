//! Rendering options.

/// Options for rendering parsed entries.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum characters of raw text shown for non-incorporation entries
    /// (0 = full text)
    pub summary_width: usize,

    /// Print the raw body under the structured fields of incorporations
    pub include_raw_text: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw-text truncation width.
    pub fn with_summary_width(mut self, width: usize) -> Self {
        self.summary_width = width;
        self
    }

    /// Show full raw text for every entry.
    pub fn full_text(mut self) -> Self {
        self.summary_width = 0;
        self
    }

    /// Include raw text below structured fields.
    pub fn with_raw_text(mut self, include: bool) -> Self {
        self.include_raw_text = include;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            summary_width: 120,
            include_raw_text: false,
        }
    }
}
