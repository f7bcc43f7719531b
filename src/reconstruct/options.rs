//! Reconstruction options and configuration.

/// Literal masthead that opens a page header block.
pub const DEFAULT_MASTHEAD: &str = "BOLETÍN OFICIAL DEL REGISTRO MERCANTIL";

/// Verification URL that closes a page header/footer block.
pub const DEFAULT_BOUNDARY_MARKER: &str = "https://www.boe.es";

/// Options for rebuilding bulletin entries from page texts.
#[derive(Debug, Clone)]
pub struct ReconstructOptions {
    /// How page boundaries interact with entry segmentation
    pub segmentation: SegmentationMode,

    /// Lines dropped from the top of every page before boilerplate removal
    pub skip_leading_lines: usize,

    /// Lines dropped from the bottom of every page before boilerplate removal
    pub skip_trailing_lines: usize,

    /// Text that switches boilerplate skipping on
    pub masthead: String,

    /// Text that switches boilerplate skipping off
    pub boundary_marker: String,
}

impl ReconstructOptions {
    /// Create new reconstruction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set segmentation mode.
    pub fn with_segmentation(mut self, mode: SegmentationMode) -> Self {
        self.segmentation = mode;
        self
    }

    /// Segment every page on its own.
    pub fn per_page(mut self) -> Self {
        self.segmentation = SegmentationMode::PerPage;
        self
    }

    /// Drop a fixed number of lines at the top and bottom of every page.
    pub fn with_page_margins(mut self, leading: usize, trailing: usize) -> Self {
        self.skip_leading_lines = leading;
        self.skip_trailing_lines = trailing;
        self
    }

    /// Set the masthead text.
    pub fn with_masthead(mut self, masthead: impl Into<String>) -> Self {
        self.masthead = masthead.into();
        self
    }

    /// Set the boundary marker text.
    pub fn with_boundary_marker(mut self, marker: impl Into<String>) -> Self {
        self.boundary_marker = marker.into();
        self
    }
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            segmentation: SegmentationMode::Document,
            skip_leading_lines: 0,
            skip_trailing_lines: 0,
            masthead: DEFAULT_MASTHEAD.to_string(),
            boundary_marker: DEFAULT_BOUNDARY_MARKER.to_string(),
        }
    }
}

/// Scope of entry segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentationMode {
    /// Concatenate cleaned lines of all pages, so entries may span pages
    #[default]
    Document,
    /// Segment each page independently; continuations never cross pages
    PerPage,
}
