//! Process-wide state shared by every handler.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::clients::ConversationSummarizer;
use crate::core::config::AppConfig;
use crate::skype::{MessagingBackend, SkypeManager, SkypeWebClient};

/// One Skype session and one summarizer for the whole process.
///
/// Handlers lock what they touch for the full request, so session-bound
/// requests run one at a time. A handler never waits on `skype` while it
/// holds `summarizer`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub skype: Arc<Mutex<SkypeManager>>,
    pub summarizer: Arc<Mutex<ConversationSummarizer>>,
}

impl AppState {
    /// State backed by the Skype web API
    pub fn new(config: AppConfig) -> Self {
        let backend = Arc::new(SkypeWebClient::new(
            config.skype_auth_url.clone(),
            config.skype_chat_url.clone(),
        ));
        Self::with_backend(config, backend)
    }

    pub fn with_backend(config: AppConfig, backend: Arc<dyn MessagingBackend>) -> Self {
        let summarizer = ConversationSummarizer::new(&config);
        Self {
            config: Arc::new(config),
            skype: Arc::new(Mutex::new(SkypeManager::new(backend))),
            summarizer: Arc::new(Mutex::new(summarizer)),
        }
    }
}
