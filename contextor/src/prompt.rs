//! Prompt builder: fixed system instruction + context/question user turn.

use ai_llm_service::ChatMessage;

/// Fallback the model is told to give when the context lacks the answer.
pub const NOT_AVAILABLE_ANSWER: &str =
    "The requested information is not available in the provided documents.";

/// System instruction for every question.
///
/// Grounding is requested here and nowhere else; the reply is not checked
/// against the context afterwards.
pub const SYSTEM_PROMPT: &str = "\
Start with greeting the user.
You are an expert legal assistant specialized in extracting precise information from court judgments and legal documents.
You must only use the content provided in the context below to answer the question.
If the context contains the phrases 'Based on the provided context' or 'According to the provided context', IGNORE those lines completely when generating your answer.
Additionally, DO NOT repeat or include the phrases 'Based on the context', 'According to the context', or any similar wording in your response.
Your goal is to extract person names, roles (e.g., Petitioner, Respondent), and factual information with precision.
If the answer is not clearly mentioned in the text, respond with: 'The requested information is not available in the provided documents.'
Do not infer, speculate, or rely on prior knowledge. Stick strictly to the provided text.
Ensure your answer is factual, concise, and free from unnecessary introductory phrases.";

/// Joins chunk texts with `"\n"`, keeping retrieval order.
pub fn build_context_block<'a, I>(chunks: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    chunks.into_iter().collect::<Vec<_>>().join("\n")
}

/// User turn: context block, then the question.
///
/// # Example
/// ```
/// use contextor::prompt::build_user_prompt;
/// let p = build_user_prompt("Who is the petitioner?", "Petitioner: Jane Doe");
/// assert!(p.starts_with("Context:\nPetitioner: Jane Doe"));
/// assert!(p.ends_with("Answer:"));
/// ```
pub fn build_user_prompt(question: &str, context_block: &str) -> String {
    format!("Context:\n{context_block}\n\nQuestion: {question}\n\nAnswer:")
}

/// Exactly two messages: system, then user.
pub fn build_messages(question: &str, context_block: &str) -> [ChatMessage; 2] {
    [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_user_prompt(question, context_block)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_llm_service::ChatRole;

    #[test]
    fn system_prompt_carries_the_fallback_sentence() {
        assert!(SYSTEM_PROMPT.contains(NOT_AVAILABLE_ANSWER));
        assert!(SYSTEM_PROMPT.contains("Petitioner, Respondent"));
        assert!(SYSTEM_PROMPT.starts_with("Start with greeting the user."));
    }

    #[test]
    fn context_block_keeps_order_and_newlines() {
        let block = build_context_block(["b first", "a second"]);
        assert_eq!(block, "b first\na second");
        assert_eq!(build_context_block(Vec::<&str>::new()), "");
    }

    #[test]
    fn messages_are_system_then_user() {
        let [sys, user] = build_messages("Who is the judge?", "");
        assert_eq!(sys.role, ChatRole::System);
        assert_eq!(user.role, ChatRole::User);
        assert_eq!(user.content, "Context:\n\n\nQuestion: Who is the judge?\n\nAnswer:");
    }
}
