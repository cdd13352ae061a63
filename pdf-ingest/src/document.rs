use tracing::{debug, info};

use crate::extract::extract_pdf_text;
use crate::splitter::RecursiveSplitter;

/// One uploaded file. Lives only for the duration of an upload.
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Per-file outcome of [`prepare_chunks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub filename: String,
    pub chunks: usize,
    pub unreadable: bool,
}

/// Chunks of a whole upload, in upload order then document order.
#[derive(Debug, Clone, Default)]
pub struct PreparedBatch {
    pub chunks: Vec<String>,
    pub per_document: Vec<DocumentReport>,
}

impl PreparedBatch {
    pub fn unreadable(&self) -> usize {
        self.per_document.iter().filter(|d| d.unreadable).count()
    }
}

/// Extracts and splits every document, concatenating the chunk sequences.
///
/// Unreadable documents contribute zero chunks and never fail the batch.
pub fn prepare_chunks(documents: &[Document], splitter: &RecursiveSplitter) -> PreparedBatch {
    let mut batch = PreparedBatch::default();

    for doc in documents {
        let extraction = extract_pdf_text(&doc.bytes);
        let unreadable = extraction.is_unreadable();
        let chunks = splitter.split(&extraction.into_text());

        debug!(
            filename = %doc.filename,
            bytes = doc.bytes.len(),
            chunks = chunks.len(),
            unreadable,
            "document prepared"
        );
        batch.per_document.push(DocumentReport {
            filename: doc.filename.clone(),
            chunks: chunks.len(),
            unreadable,
        });
        batch.chunks.extend(chunks);
    }

    info!(
        documents = documents.len(),
        unreadable = batch.unreadable(),
        chunks = batch.chunks.len(),
        "upload batch prepared"
    );
    batch
}
