use thiserror::Error;

/// Invalid chunking parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitterError {
    #[error("[pdf-ingest] chunk_size must be greater than zero")]
    ZeroChunkSize,

    #[error("[pdf-ingest] chunk_overlap ({overlap}) must be smaller than chunk_size ({size})")]
    OverlapTooLarge { size: usize, overlap: usize },

    #[error("[pdf-ingest] invalid number in {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}
