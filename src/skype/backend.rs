//! Seam between the session manager and the messaging service.
//!
//! Everything the service returns is optional here; turning raw records into
//! API models (and picking placeholders for missing fields) happens in
//! `utils::filters`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;

use crate::errors::DigestError;

/// The other party of a one-to-one chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUser {
    pub id: String,
    pub display_name: Option<String>,
}

impl fmt::Display for RawUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChat {
    pub id: String,
    pub user: Option<RawUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMessage {
    pub id: Option<String>,
    pub content: Option<String>,
    pub time: Option<DateTime<Utc>>,
    pub sender: Option<String>,
}

/// Opens authenticated sessions against the messaging service.
#[async_trait]
pub trait MessagingBackend: Send + Sync {
    /// Rejected credentials are reported as `DigestError::AuthFailed`; any
    /// other variant means the attempt itself went wrong.
    async fn connect(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Box<dyn MessagingSession>, DigestError>;
}

/// An authenticated connection. Dropping it ends the session.
#[async_trait]
pub trait MessagingSession: Send + Sync {
    async fn recent_chats(&self) -> Result<Vec<RawChat>, DigestError>;

    async fn chat_messages(&self, chat_id: &str) -> Result<Vec<RawMessage>, DigestError>;
}
