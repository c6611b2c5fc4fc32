#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use skype_tldr::errors::DigestError;
use skype_tldr::skype::{MessagingBackend, MessagingSession, RawChat, RawMessage, RawUser};

pub const GOOD_PASSWORD: &str = "hunter2";
/// Password that makes `connect` fail with a transport error instead of a rejection
pub const NETWORK_DOWN_PASSWORD: &str = "network-down";

#[derive(Clone)]
pub struct FakeChat {
    pub chat: RawChat,
    pub messages: Result<Vec<RawMessage>, String>,
}

/// In-memory messaging service
#[derive(Default)]
pub struct FakeBackend {
    pub chats: Vec<FakeChat>,
    pub fail_listing: bool,
    /// Connections accepted before every further attempt is rejected
    pub accept_limit: Option<usize>,
    pub connects: AtomicUsize,
    pub attempts: Mutex<Vec<(String, String)>>,
}

impl FakeBackend {
    pub fn with_chats(chats: Vec<FakeChat>) -> Self {
        Self {
            chats,
            ..Self::default()
        }
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn attempts(&self) -> Vec<(String, String)> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingBackend for FakeBackend {
    async fn connect(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Box<dyn MessagingSession>, DigestError> {
        let attempt = self.connects.fetch_add(1, Ordering::SeqCst) + 1;
        self.attempts
            .lock()
            .unwrap()
            .push((username.to_string(), password.to_string()));

        if password == NETWORK_DOWN_PASSWORD {
            return Err(DigestError::HttpError("connection refused".to_string()));
        }
        if password != GOOD_PASSWORD {
            return Err(DigestError::AuthFailed("bad password".to_string()));
        }
        if self.accept_limit.is_some_and(|limit| attempt > limit) {
            return Err(DigestError::AuthFailed("session expired".to_string()));
        }

        Ok(Box::new(FakeSession {
            chats: self.chats.clone(),
            fail_listing: self.fail_listing,
        }))
    }
}

struct FakeSession {
    chats: Vec<FakeChat>,
    fail_listing: bool,
}

#[async_trait]
impl MessagingSession for FakeSession {
    async fn recent_chats(&self) -> Result<Vec<RawChat>, DigestError> {
        if self.fail_listing {
            return Err(DigestError::ApiError("chat listing unavailable".to_string()));
        }
        Ok(self.chats.iter().map(|c| c.chat.clone()).collect())
    }

    async fn chat_messages(&self, chat_id: &str) -> Result<Vec<RawMessage>, DigestError> {
        let chat = self
            .chats
            .iter()
            .find(|c| c.chat.id == chat_id)
            .ok_or_else(|| DigestError::ApiError(format!("no chat {chat_id}")))?;

        chat.messages.clone().map_err(DigestError::ApiError)
    }
}

pub fn user_chat(id: &str, user_id: &str, name: Option<&str>) -> RawChat {
    RawChat {
        id: id.to_string(),
        user: Some(RawUser {
            id: user_id.to_string(),
            display_name: name.map(ToString::to_string),
        }),
    }
}

pub fn group_chat(id: &str) -> RawChat {
    RawChat {
        id: id.to_string(),
        user: None,
    }
}

pub fn message_days_ago(id: &str, sender: &str, content: &str, days: i64) -> RawMessage {
    RawMessage {
        id: Some(id.to_string()),
        content: Some(content.to_string()),
        time: Some(Utc::now() - Duration::days(days)),
        sender: Some(sender.to_string()),
    }
}

/// One fresh 1:1 chat, one stale group chat and one chat whose messages fail to load
pub fn mixed_backend() -> Arc<FakeBackend> {
    Arc::new(FakeBackend::with_chats(vec![
        FakeChat {
            chat: user_chat("8:live:alice", "live:alice", Some("Alice")),
            messages: Ok(vec![
                message_days_ago("m1", "live:alice", "lunch tomorrow?", 1),
                message_days_ago("m0", "live:alice", "old news", 9),
                message_days_ago("m2", "live:me", "sure", 0),
            ]),
        },
        FakeChat {
            chat: group_chat("19:stale@thread.skype"),
            messages: Ok(vec![message_days_ago("g1", "live:bob", "ancient", 30)]),
        },
        FakeChat {
            chat: user_chat("8:live:carol", "live:carol", None),
            messages: Err("history endpoint timed out".to_string()),
        },
    ]))
}
