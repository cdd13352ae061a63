//! Document preparation: PDF bytes in, ordered text chunks out.
//!
//! - [`extract`] turns a PDF payload into plain text, soft-failing on
//!   unreadable input so one bad upload never aborts a batch.
//! - [`splitter`] cuts text into overlapping, bounded chunks, preferring
//!   paragraph, line and word boundaries over raw character cuts.
//!
//! Both steps are CPU-bound and synchronous; async callers should run them
//! on a blocking pool.

pub mod document;
pub mod errors;
pub mod extract;
pub mod splitter;

pub use document::{Document, DocumentReport, PreparedBatch, prepare_chunks};
pub use errors::SplitterError;
pub use extract::{Extraction, extract_pdf_text};
pub use splitter::{RecursiveSplitter, SplitterConfig};
