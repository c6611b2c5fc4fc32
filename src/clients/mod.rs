//! Client modules for external API interactions

pub mod llm_client;
pub mod summarizer;

pub use llm_client::LlmClient;
pub use summarizer::ConversationSummarizer;
