use serde::{Deserialize, Serialize};

/// A single chat message as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub time: String,
    pub sender: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub summary: Option<String>,
}

/// Body of `POST /api/auth`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthRequest {
    pub openai_api_key: String,
    pub skype_username: String,
    pub skype_password: String,
}
