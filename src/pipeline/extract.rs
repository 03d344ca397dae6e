//! Plain-text extraction from PDF bytes.
//!
//! The core depends only on a minimal collaborator contract — "give me the
//! page count and, for each page, its text items" — expressed as the
//! [`PageSource`] trait. The production implementation is backed by
//! [`pdf_extract`], which can panic on malformed input rather than return
//! an error, so the call is wrapped in `catch_unwind` and every failure
//! mode is mapped to [`StudyError::ExtractionFailed`] (terminal for the
//! session until reset).

use crate::artifact::Document;
use crate::error::StudyError;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info};

/// The extraction collaborator contract.
///
/// Pages are indexed from 0 and each yields its text items in reading order.
pub trait PageSource {
    fn page_count(&self) -> usize;
    fn items(&self, page_index: usize) -> Vec<String>;
}

/// Concatenate a source into the single extracted-text string.
///
/// All pages' items, in page order, joined with single spaces:
/// pages `["Hello","world"]` and `["Foo","bar"]` yield
/// `"Hello world Foo bar"`.
pub fn concatenate(source: &impl PageSource) -> String {
    let mut items: Vec<String> = Vec::new();
    for page in 0..source.page_count() {
        items.extend(source.items(page));
    }
    items.join(" ")
}

/// A parsed PDF exposing per-page whitespace-delimited text items.
pub struct PdfPages {
    pages: Vec<String>,
}

impl PdfPages {
    /// Parse PDF bytes into per-page text.
    ///
    /// Panics from the underlying library are caught and converted to
    /// [`StudyError::ExtractionFailed`].
    pub fn parse(bytes: &[u8]) -> Result<Self, StudyError> {
        let owned = bytes.to_vec(); // owned copy for the unwind boundary
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&owned)
        }));
        match result {
            Ok(Ok(pages)) => {
                debug!("Parsed PDF with {} pages", pages.len());
                Ok(Self { pages })
            }
            Ok(Err(e)) => Err(StudyError::ExtractionFailed {
                detail: e.to_string(),
            }),
            Err(_) => Err(StudyError::ExtractionFailed {
                detail: "PDF parser panicked (malformed document)".into(),
            }),
        }
    }
}

impl PageSource for PdfPages {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn items(&self, page_index: usize) -> Vec<String> {
        self.pages
            .get(page_index)
            .map(|text| text.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

/// Extract the full plain text from PDF bytes.
pub fn extract_text(bytes: &[u8]) -> Result<String, StudyError> {
    let pages = PdfPages::parse(bytes)?;
    let text = concatenate(&pages);
    info!(
        "Extracted {} characters from {} pages",
        text.len(),
        pages.page_count()
    );
    Ok(text)
}

/// Build the immutable [`Document`] record from validated input bytes.
pub fn build_document(name: String, bytes: &[u8]) -> Result<Document, StudyError> {
    let extracted_text = extract_text(bytes)?;
    Ok(Document {
        name,
        byte_size: bytes.len() as u64,
        extracted_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSource {
        pages: Vec<Vec<&'static str>>,
    }

    impl PageSource for FakeSource {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn items(&self, page_index: usize) -> Vec<String> {
            self.pages[page_index].iter().map(|s| s.to_string()).collect()
        }
    }

    #[test]
    fn two_page_items_join_with_single_spaces() {
        let source = FakeSource {
            pages: vec![vec!["Hello", "world"], vec!["Foo", "bar"]],
        };
        assert_eq!(concatenate(&source), "Hello world Foo bar");
    }

    #[test]
    fn empty_source_yields_empty_text() {
        let source = FakeSource { pages: vec![] };
        assert_eq!(concatenate(&source), "");
    }

    #[test]
    fn empty_pages_are_transparent() {
        let source = FakeSource {
            pages: vec![vec!["alpha"], vec![], vec!["beta"]],
        };
        assert_eq!(concatenate(&source), "alpha beta");
    }

    #[test]
    fn pdf_pages_splits_on_whitespace() {
        let pages = PdfPages {
            pages: vec!["Hello\n  world\t!".into(), "next page".into()],
        };
        assert_eq!(pages.items(0), vec!["Hello", "world", "!"]);
        assert_eq!(concatenate(&pages), "Hello world ! next page");
    }

    #[test]
    fn garbage_bytes_fail_extraction() {
        let err = extract_text(b"%PDF-1.4 but actually garbage").unwrap_err();
        assert!(matches!(err, StudyError::ExtractionFailed { .. }));
    }
}
