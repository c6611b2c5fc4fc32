use crate::core::models::Message;

/// System instruction sent ahead of every conversation transcript
pub const SUMMARY_INSTRUCTION: &str =
    "Please provide a brief, concise summary of this conversation.";

/// Upper bound on the number of tokens the model may produce per summary
pub const MAX_SUMMARY_TOKENS: u32 = 150;

/// Placeholder returned when no OpenAI key has been validated
pub const SUMMARY_UNCONFIGURED: &str = "Summary unavailable - OpenAI not configured";

/// Formats the placeholder returned when a summary request fails
#[must_use]
pub fn summary_error(error: &str) -> String {
    format!("Summary unavailable - Error: {error}")
}

/// Renders messages, in order, as one `sender: content` line each
#[must_use]
pub fn format_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|msg| format!("{}: {}", msg.sender, msg.content))
        .collect::<Vec<_>>()
        .join("\n")
}
