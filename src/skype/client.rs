//! Skype web API backend
//!
//! Speaks JSON over HTTPS: one login call that exchanges credentials for a
//! `skypetoken`, then the chat service's conversation and message listings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use super::backend::{MessagingBackend, MessagingSession, RawChat, RawMessage, RawUser};
use crate::errors::DigestError;

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

const PAGE_SIZE: u32 = 100;
const CONVERSATION_VIEW: &str = "msnp24Equivalent";
const USER_CHAT_PREFIX: &str = "8:";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    skypetoken: String,
}

#[derive(Debug, Deserialize)]
struct ConversationsResponse {
    #[serde(default)]
    conversations: Vec<WireConversation>,
}

#[derive(Debug, Deserialize)]
struct WireConversation {
    id: String,
    #[serde(rename = "lastMessage", default)]
    last_message: Option<WireMessage>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    messages: Vec<WireMessage>,
}

#[derive(Debug, Default, Deserialize)]
struct WireMessage {
    id: Option<String>,
    content: Option<String>,
    originalarrivaltime: Option<String>,
    from: Option<String>,
    imdisplayname: Option<String>,
}

/// Extracts the user id from a contact URL such as
/// `https://host/v1/users/ME/contacts/8:live:bob` (yields `live:bob`).
#[must_use]
pub fn user_id_from_contact_url(url: &str) -> Option<String> {
    let last = url.rsplit('/').next()?.trim();
    if last.is_empty() {
        return None;
    }
    Some(last.strip_prefix(USER_CHAT_PREFIX).unwrap_or(last).to_string())
}

impl WireMessage {
    fn sender_id(&self) -> Option<String> {
        self.from.as_deref().and_then(user_id_from_contact_url)
    }

    fn into_raw(self) -> RawMessage {
        let time = self
            .originalarrivaltime
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc));
        let sender = self.sender_id();

        RawMessage {
            id: self.id,
            content: self.content,
            time,
            sender,
        }
    }
}

impl WireConversation {
    fn into_raw(self) -> RawChat {
        let user = self.id.strip_prefix(USER_CHAT_PREFIX).map(|user_id| {
            let display_name = self
                .last_message
                .as_ref()
                .filter(|m| m.sender_id().as_deref() == Some(user_id))
                .and_then(|m| m.imdisplayname.clone())
                .filter(|name| !name.trim().is_empty());

            RawUser {
                id: user_id.to_string(),
                display_name,
            }
        });

        RawChat { id: self.id, user }
    }
}

/// Messaging backend for the Skype web API
#[derive(Debug, Clone)]
pub struct SkypeWebClient {
    auth_url: String,
    chat_url: String,
}

impl SkypeWebClient {
    pub fn new(auth_url: impl Into<String>, chat_url: impl Into<String>) -> Self {
        Self {
            auth_url: auth_url.into(),
            chat_url: chat_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MessagingBackend for SkypeWebClient {
    async fn connect(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Box<dyn MessagingSession>, DigestError> {
        let resp = HTTP_CLIENT
            .post(&self.auth_url)
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(|e| DigestError::HttpError(format!("Skype login request failed: {}", e)))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let text = resp.text().await.unwrap_or_default();
            return Err(DigestError::AuthFailed(format!("{} {}", status, text.trim())));
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(DigestError::ApiError(format!(
                "Skype login failed: {} - {}",
                status, text
            )));
        }

        let login: LoginResponse = resp.json().await.map_err(|e| {
            DigestError::ParseError(format!("Failed to parse Skype login response: {}", e))
        })?;

        debug!(username = %username, "Skype session opened");

        Ok(Box::new(SkypeWebSession {
            token: login.skypetoken,
            chat_url: self.chat_url.clone(),
        }))
    }
}

struct SkypeWebSession {
    token: String,
    chat_url: String,
}

impl SkypeWebSession {
    async fn get_json<T>(&self, url: &str) -> Result<T, DigestError>
    where
        T: serde::de::DeserializeOwned,
    {
        let resp = HTTP_CLIENT
            .get(url)
            .header("Authentication", format!("skypetoken={}", self.token))
            .query(&[
                ("startTime", "0".to_string()),
                ("view", CONVERSATION_VIEW.to_string()),
                ("pageSize", PAGE_SIZE.to_string()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            warn!(%status, url = %url, "Skype API call failed");
            return Err(DigestError::ApiError(format!("{} - {}", status, text)));
        }

        resp.json::<T>()
            .await
            .map_err(|e| DigestError::ParseError(format!("Failed to parse Skype response: {}", e)))
    }
}

#[async_trait]
impl MessagingSession for SkypeWebSession {
    async fn recent_chats(&self) -> Result<Vec<RawChat>, DigestError> {
        let url = format!("{}/v1/users/ME/conversations", self.chat_url);
        let listing: ConversationsResponse = self.get_json(&url).await?;

        Ok(listing
            .conversations
            .into_iter()
            .map(WireConversation::into_raw)
            .collect())
    }

    async fn chat_messages(&self, chat_id: &str) -> Result<Vec<RawMessage>, DigestError> {
        let url = format!(
            "{}/v1/users/ME/conversations/{}/messages",
            self.chat_url,
            urlencoding::encode(chat_id)
        );
        let listing: MessagesResponse = self.get_json(&url).await?;

        Ok(listing
            .messages
            .into_iter()
            .map(WireMessage::into_raw)
            .collect())
    }
}
