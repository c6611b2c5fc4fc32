use tracing::{error, info, warn};

use super::llm_client::LlmClient;
use crate::core::config::AppConfig;
use crate::core::models::Message;
use crate::prompt::{SUMMARY_UNCONFIGURED, format_transcript, summary_error};

/// Keeps the `OpenAI` client once its key has been validated.
pub struct ConversationSummarizer {
    api_base: String,
    model_name: Option<String>,
    client: Option<LlmClient>,
}

impl ConversationSummarizer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api_base: config.openai_api_base.clone(),
            model_name: config.openai_model.clone(),
            client: None,
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Validates `api_key` by listing models. The client is kept only when
    /// the call succeeds; any failure leaves the summarizer unconfigured.
    pub async fn initialize(&mut self, api_key: &str) -> bool {
        self.client = None;

        let client = LlmClient::new(api_key.to_string(), &self.api_base, self.model_name.clone());
        match client.list_models().await {
            Ok(models) => {
                info!(models, model = %client.model_name(), "OpenAI key validated");
                self.client = Some(client);
                true
            }
            Err(e) => {
                warn!("OpenAI key validation failed: {}", e);
                false
            }
        }
    }

    /// Summarizes `messages`. Failures come back as a placeholder string.
    pub async fn summarize(&self, messages: &[Message]) -> String {
        let Some(client) = &self.client else {
            return SUMMARY_UNCONFIGURED.to_string();
        };

        let prompt = client.build_prompt(&format_transcript(messages));
        match client.generate_summary(prompt).await {
            Ok(summary) => summary,
            Err(e) => {
                error!("Failed to summarize conversation: {}", e);
                summary_error(&e.to_string())
            }
        }
    }
}
