use thiserror::Error;

#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Skype rejected the credentials: {0}")]
    AuthFailed(String),

    #[error("Skype not authenticated")]
    NotAuthenticated,

    #[error("Failed to refresh Skype connection")]
    RefreshFailed,

    #[error("Failed to access Skype API: {0}")]
    ApiError(String),

    #[error("Failed to access OpenAI API: {0}")]
    OpenAIError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Invalid retention window: {0} days")]
    InvalidRetention(i64),
}

impl From<reqwest::Error> for DigestError {
    fn from(error: reqwest::Error) -> Self {
        DigestError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for DigestError {
    fn from(error: serde_json::Error) -> Self {
        DigestError::ParseError(error.to_string())
    }
}

impl From<anyhow::Error> for DigestError {
    fn from(error: anyhow::Error) -> Self {
        DigestError::ApiError(error.to_string())
    }
}
