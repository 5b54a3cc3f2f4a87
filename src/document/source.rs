//! Page-text extraction capability and its lopdf implementation

use crate::{Pdf2AudioError, Result};
use lopdf::Document;
use std::io::Read;
use tracing::debug;

/// Text content of a PDF, one page at a time in document order
pub trait PdfTextSource {
    /// Number of pages
    fn page_count(&self) -> usize;

    /// Raw extracted text of the page at 0-based `index`
    fn page_text(&self, index: usize) -> Result<String>;
}

/// [`PdfTextSource`] backed by a parsed lopdf document
pub struct LopdfSource {
    document: Document,
    /// lopdf page numbers (1-based) in document order
    page_numbers: Vec<u32>,
}

impl LopdfSource {
    /// Parse a PDF from a byte stream
    ///
    /// The reader is consumed and dropped before this returns.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document = Document::load_from(reader)
            .map_err(|e| Pdf2AudioError::PdfError(format!("Failed to load PDF: {}", e)))?;

        let page_numbers: Vec<u32> = document.get_pages().into_keys().collect();
        debug!("Loaded PDF with {} page(s)", page_numbers.len());

        Ok(Self {
            document,
            page_numbers,
        })
    }
}

impl PdfTextSource for LopdfSource {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        let page_number = *self.page_numbers.get(index).ok_or_else(|| {
            Pdf2AudioError::InvalidArgument(format!(
                "Page index {} out of range ({} pages)",
                index,
                self.page_numbers.len()
            ))
        })?;

        self.document.extract_text(&[page_number]).map_err(|e| {
            Pdf2AudioError::PdfError(format!(
                "Failed to extract text from page {}: {}",
                page_number, e
            ))
        })
    }
}
