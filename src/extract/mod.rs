//! PDF text extraction service.
//!
//! Provides a trait-based interface for getting per-page text out of a
//! document, isolating the concrete PDF library (lopdf) from entry
//! reconstruction.

mod lopdf_source;
mod options;

pub use lopdf_source::LopdfTextSource;
pub use options::{ErrorMode, ExtractOptions, PageSelection};

use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::PageText;

/// Abstract source of per-page plain text in reading order.
pub trait PageTextSource {
    /// Total number of pages in the document.
    fn page_count(&self) -> u32;

    /// Raw text of one page (1-indexed).
    fn page_text(&self, page: u32) -> Result<PageText>;

    /// Options the source was built with.
    fn extract_options(&self) -> &ExtractOptions;

    /// Text of every selected page, in page order.
    ///
    /// In strict mode the first failing page fails the document. In lenient
    /// mode a failing page is logged and yields blank text.
    fn page_texts(&self) -> Result<Vec<PageText>> {
        let options = self.extract_options();
        let mut pages = Vec::new();

        for number in 1..=self.page_count() {
            if !options.pages.includes(number) {
                continue;
            }

            let mut page = match self.page_text(number) {
                Ok(page) => page,
                Err(e) if options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Failed to extract text from page {}: {}", number, e);
                    PageText::new(number, "")
                }
                Err(e) => return Err(e),
            };

            if options.normalize_unicode {
                page.text = page.text.nfc().collect();
            }
            pages.push(page);
        }

        log::debug!(
            "Extracted {} of {} pages",
            pages.len(),
            self.page_count()
        );
        Ok(pages)
    }
}

/// In-memory page texts, for text that was already extracted elsewhere.
#[derive(Debug, Clone, Default)]
pub struct TextPages {
    pages: Vec<String>,
    options: ExtractOptions,
}

impl TextPages {
    /// Wrap page strings (page 1 first).
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_options(pages, ExtractOptions::default())
    }

    /// Wrap page strings with custom options.
    pub fn with_options<I, S>(pages: I, options: ExtractOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
            options,
        }
    }
}

impl PageTextSource for TextPages {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page: u32) -> Result<PageText> {
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .map(|text| PageText::new(page, text.clone()))
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }

    fn extract_options(&self) -> &ExtractOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source whose even pages fail.
    struct FlakySource {
        options: ExtractOptions,
    }

    impl PageTextSource for FlakySource {
        fn page_count(&self) -> u32 {
            3
        }

        fn page_text(&self, page: u32) -> Result<PageText> {
            if page % 2 == 0 {
                Err(Error::TextExtract(format!("Page {}: bad stream", page)))
            } else {
                Ok(PageText::new(page, format!("{} - texto", page)))
            }
        }

        fn extract_options(&self) -> &ExtractOptions {
            &self.options
        }
    }

    #[test]
    fn test_text_pages_in_order() {
        let source = TextPages::new(["uno", "dos", "tres"]);
        let pages = source.page_texts().unwrap();
        let numbers: Vec<u32> = pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(pages[2].text, "tres");
    }

    #[test]
    fn test_text_pages_out_of_range() {
        let source = TextPages::new(["uno"]);
        assert!(matches!(
            source.page_text(0),
            Err(Error::PageOutOfRange(0, 1))
        ));
        assert!(matches!(
            source.page_text(2),
            Err(Error::PageOutOfRange(2, 1))
        ));
    }

    #[test]
    fn test_page_selection_is_honored() {
        let options = ExtractOptions::new().with_pages(PageSelection::Pages(vec![1, 3]));
        let source = TextPages::with_options(["uno", "dos", "tres"], options);
        let pages = source.page_texts().unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].number, 3);
    }

    #[test]
    fn test_strict_mode_fails_document() {
        let source = FlakySource {
            options: ExtractOptions::new(),
        };
        assert!(matches!(source.page_texts(), Err(Error::TextExtract(_))));
    }

    #[test]
    fn test_lenient_mode_blanks_failed_pages() {
        let source = FlakySource {
            options: ExtractOptions::new().lenient(),
        };
        let pages = source.page_texts().unwrap();
        assert_eq!(pages.len(), 3);
        assert!(pages[1].is_blank());
        assert_eq!(pages[2].text, "3 - texto");
    }

    #[test]
    fn test_nfc_normalization() {
        // "BOLETÍN" with a combining acute accent
        let decomposed = "BOLETI\u{301}N";
        let source = TextPages::new([decomposed]);
        assert_eq!(source.page_texts().unwrap()[0].text, "BOLETÍN");

        let raw = TextPages::with_options(
            [decomposed],
            ExtractOptions::new().with_unicode_normalization(false),
        );
        assert_eq!(raw.page_texts().unwrap()[0].text, decomposed);
    }
}
