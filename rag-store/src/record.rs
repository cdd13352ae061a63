//! Core data models used by the library.

use serde_json::{Value, json};

/// One chunk as persisted in the vector store.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredRecord {
    pub id: String,
    pub vector: Vec<f32>,
    pub text: String,
    /// Collection the chunk was indexed for.
    pub source: String,
}

impl StoredRecord {
    /// New record with a random UUIDv4 id.
    pub fn new(text: impl Into<String>, source: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            vector,
            text: text.into(),
            source: source.into(),
        }
    }

    /// Payload layout: `{ "page_content": .., "metadata": { "source": .. } }`.
    pub fn payload(&self) -> Value {
        json!({
            "page_content": self.text,
            "metadata": { "source": self.source },
        })
    }
}

/// Query parameters for retrieval.
#[derive(Clone, Copy, Debug)]
pub struct RagQuery<'a> {
    pub text: &'a str,
    pub top_k: u64,
}

/// A single retrieval hit with score, text and source.
#[derive(Clone, Debug)]
pub struct RagHit {
    pub score: f32,
    pub text: String,
    pub source: Option<String>,
    pub payload: Value,
}

impl RagHit {
    /// Reads text and source back from a stored payload.
    ///
    /// Missing fields become an empty text and `None`.
    pub fn from_payload(score: f32, payload: Value) -> Self {
        let text = payload
            .get("page_content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let source = payload
            .pointer("/metadata/source")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self {
            score,
            text,
            source,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_reads_back_into_hit() {
        let rec = StoredRecord::new("Petitioner: Jane Doe", "legal_documents", vec![0.0; 3]);
        let hit = RagHit::from_payload(0.9, rec.payload());
        assert_eq!(hit.text, "Petitioner: Jane Doe");
        assert_eq!(hit.source.as_deref(), Some("legal_documents"));
    }

    #[test]
    fn ids_are_unique_uuids() {
        let a = StoredRecord::new("a", "c", vec![]);
        let b = StoredRecord::new("a", "c", vec![]);
        assert_ne!(a.id, b.id);
        assert!(uuid::Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn foreign_payload_degrades_gracefully() {
        let hit = RagHit::from_payload(0.1, json!({ "text": "x" }));
        assert_eq!(hit.text, "");
        assert!(hit.source.is_none());
    }
}
