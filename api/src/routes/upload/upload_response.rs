use serde::Serialize;

pub const UPLOAD_STATUS: &str = "PDFs processed and stored in vector DB";

/// Response payload for `/upload/`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    /// Number of chunks stored in the fresh collection.
    pub chunks: usize,
}

impl UploadResponse {
    pub fn stored(chunks: usize) -> Self {
        Self {
            status: UPLOAD_STATUS,
            chunks,
        }
    }
}
