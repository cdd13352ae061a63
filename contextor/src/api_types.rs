//! Public API types re-used by external crates (e.g., the HTTP API layer).

/// A context chunk that was fed to the model.
#[derive(Clone, Debug)]
pub struct UsedChunk {
    pub score: f32,
    pub source: Option<String>,
    pub text: String,
}

/// Final answer together with the exact context passed to the model.
///
/// # Example
/// ```
/// use contextor::{QaAnswer, UsedChunk};
/// let qa = QaAnswer {
///     answer: "Hello! The petitioner is Jane Doe.".into(),
///     context: vec![UsedChunk { score: 0.9, source: None, text: "Petitioner: Jane Doe".into() }],
/// };
/// assert_eq!(qa.context.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct QaAnswer {
    pub answer: String,
    pub context: Vec<UsedChunk>,
}
