//! PDF text-layer extraction.
//!
//! Uses `lopdf` to walk pages in page-number order. No OCR, images or tables.

use lopdf::Document as PdfDocument;
use tracing::{debug, warn};

/// Outcome of extracting one document.
///
/// Unreadable input is a normal value rather than an error: callers skip the
/// document and keep processing the rest of the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Text(String),
    Unreadable { reason: String },
}

impl Extraction {
    /// Extracted text, or `""` for unreadable documents.
    pub fn into_text(self) -> String {
        match self {
            Extraction::Text(t) => t,
            Extraction::Unreadable { .. } => String::new(),
        }
    }

    pub fn is_unreadable(&self) -> bool {
        matches!(self, Extraction::Unreadable { .. })
    }
}

/// Extracts the text of every page and concatenates it in page order.
///
/// Pages are joined without any boundary marker. A page whose content
/// cannot be decoded is skipped with a warning; a payload that is not a
/// parseable PDF yields [`Extraction::Unreadable`].
pub fn extract_pdf_text(bytes: &[u8]) -> Extraction {
    let doc = match PdfDocument::load_mem(bytes) {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, bytes = bytes.len(), "failed to parse PDF");
            return Extraction::Unreadable {
                reason: e.to_string(),
            };
        }
    };

    // BTreeMap keyed by page number: iteration is already in page order.
    let pages = doc.get_pages();
    let mut text = String::new();
    let mut skipped = 0usize;

    for &page_no in pages.keys() {
        match doc.extract_text(&[page_no]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                skipped += 1;
                warn!(page = page_no, error = %e, "failed to extract page text; skipping page");
            }
        }
    }

    debug!(
        pages = pages.len(),
        skipped,
        chars = text.chars().count(),
        "PDF text extracted"
    );
    Extraction::Text(text)
}
