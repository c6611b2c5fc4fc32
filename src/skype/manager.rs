//! Skype session ownership and recent-conversation retrieval.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::backend::{MessagingBackend, MessagingSession, RawChat};
use crate::core::models::Conversation;
use crate::errors::DigestError;
use crate::utils::filters::{filter_recent, resolve_title, retention_cutoff};

/// What happened to a single chat during a fetch
#[derive(Debug)]
pub enum ChatOutcome {
    /// The chat had recent messages
    Included(Conversation),
    /// Nothing inside the retention window
    Empty { chat_id: String },
    /// Processing the chat failed; the fetch carries on without it
    Skipped { chat_id: String, reason: String },
}

/// A chat dropped from a fetch because processing it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedChat {
    pub chat_id: String,
    pub reason: String,
}

/// Result of one pass over the session's recent chats
#[derive(Debug, Default)]
pub struct FetchReport {
    pub conversations: Vec<Conversation>,
    pub skipped: Vec<SkippedChat>,
}

impl FetchReport {
    fn record(&mut self, outcome: ChatOutcome) {
        match outcome {
            ChatOutcome::Included(conversation) => self.conversations.push(conversation),
            ChatOutcome::Empty { .. } => {}
            ChatOutcome::Skipped { chat_id, reason } => {
                self.skipped.push(SkippedChat { chat_id, reason });
            }
        }
    }
}

struct Credentials {
    username: String,
    password: String,
}

/// Holds the Skype credentials and the session opened with them.
///
/// Credentials are kept after every `authenticate` call, successful or not,
/// and each refresh opens a brand new session with them. A rejected login
/// also drops any session opened earlier, so a later fetch reports
/// [`DigestError::NotAuthenticated`] rather than [`DigestError::RefreshFailed`].
pub struct SkypeManager {
    backend: Arc<dyn MessagingBackend>,
    credentials: Option<Credentials>,
    session: Option<Box<dyn MessagingSession>>,
}

impl SkypeManager {
    pub fn new(backend: Arc<dyn MessagingBackend>) -> Self {
        Self {
            backend,
            credentials: None,
            session: None,
        }
    }

    #[must_use]
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.username.as_str())
    }

    /// Stores the credentials and tries to open a session with them.
    ///
    /// # Errors
    ///
    /// Rejected credentials yield `Ok(false)`; transport and protocol failures
    /// are returned as errors.
    pub async fn authenticate(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<bool, DigestError> {
        self.credentials = Some(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        });

        self.open_session().await
    }

    /// Replaces the current session with a fresh one from the stored
    /// credentials. Without stored credentials nothing is attempted.
    ///
    /// # Errors
    ///
    /// Same classification as [`SkypeManager::authenticate`].
    pub async fn refresh_connection(&mut self) -> Result<bool, DigestError> {
        if self.credentials.is_none() {
            return Ok(false);
        }

        self.open_session().await
    }

    async fn open_session(&mut self) -> Result<bool, DigestError> {
        let Some(creds) = &self.credentials else {
            return Ok(false);
        };

        match self.backend.connect(&creds.username, &creds.password).await {
            Ok(session) => {
                self.session = Some(session);
                Ok(true)
            }
            Err(DigestError::AuthFailed(reason)) => {
                warn!(username = %creds.username, %reason, "Skype authentication rejected");
                self.session = None;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Conversations with at least one message in the last `retention_days`.
    ///
    /// # Errors
    ///
    /// Fails when no session was ever opened, when `retention_days` is not a
    /// usable window, when the forced refresh is rejected, or when the chat
    /// listing itself fails.
    pub async fn get_recent_conversations(
        &mut self,
        retention_days: i64,
    ) -> Result<Vec<Conversation>, DigestError> {
        let report = self.fetch_recent(retention_days, Utc::now()).await?;
        Ok(report.conversations)
    }

    /// Walks every recent chat and reports what was kept and what was skipped.
    ///
    /// # Errors
    ///
    /// See [`SkypeManager::get_recent_conversations`].
    pub async fn fetch_recent(
        &mut self,
        retention_days: i64,
        now: DateTime<Utc>,
    ) -> Result<FetchReport, DigestError> {
        if self.session.is_none() {
            return Err(DigestError::NotAuthenticated);
        }

        let cutoff = retention_cutoff(now, retention_days)
            .inspect_err(|e| error!("Error in get_recent_conversations: {}", e))?;

        let refreshed = self
            .refresh_connection()
            .await
            .inspect_err(|e| error!("Error in get_recent_conversations: {}", e))?;
        if !refreshed {
            error!("Error in get_recent_conversations: session refresh rejected");
            return Err(DigestError::RefreshFailed);
        }

        let session = self.session.as_deref().ok_or(DigestError::NotAuthenticated)?;

        let chats = session.recent_chats().await.inspect_err(|e| {
            error!("Error in get_recent_conversations: {}", e);
        })?;

        let mut report = FetchReport::default();

        for chat in chats {
            let outcome = process_chat(session, chat, cutoff).await;
            if let ChatOutcome::Skipped { chat_id, reason } = &outcome {
                error!(chat_id = %chat_id, "Error processing chat: {}", reason);
            }
            report.record(outcome);
        }

        info!(
            conversations = report.conversations.len(),
            skipped = report.skipped.len(),
            retention_days,
            "Fetched recent conversations"
        );

        Ok(report)
    }
}

async fn process_chat(
    session: &dyn MessagingSession,
    chat: RawChat,
    cutoff: DateTime<Utc>,
) -> ChatOutcome {
    let title = resolve_title(&chat);

    let raw_messages = match session.chat_messages(&chat.id).await {
        Ok(messages) => messages,
        Err(e) => {
            return ChatOutcome::Skipped {
                chat_id: chat.id,
                reason: e.to_string(),
            };
        }
    };

    let messages = filter_recent(raw_messages, cutoff);
    if messages.is_empty() {
        return ChatOutcome::Empty { chat_id: chat.id };
    }

    ChatOutcome::Included(Conversation {
        id: chat.id,
        title,
        messages,
        summary: None,
    })
}
