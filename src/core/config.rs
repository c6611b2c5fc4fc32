use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_RETENTION_DAYS: i64 = 5;
pub const MAX_RETENTION_DAYS: i64 = 3650;
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_SKYPE_AUTH_URL: &str = "https://login.skype.com/login/token";
pub const DEFAULT_SKYPE_CHAT_URL: &str = "https://client-s.gateway.messenger.live.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub openai_api_base: String,
    pub openai_model: Option<String>,
    pub skype_auth_url: String,
    pub skype_chat_url: String,
    pub retention_days: i64,
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            openai_api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            openai_model: None,
            skype_auth_url: DEFAULT_SKYPE_AUTH_URL.to_string(),
            skype_chat_url: DEFAULT_SKYPE_CHAT_URL.to_string(),
            retention_days: DEFAULT_RETENTION_DAYS,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl AppConfig {
    /// Reads configuration from the process environment. Every variable is
    /// optional; a present but unparseable numeric value is an error.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        Ok(Self {
            port: match env::var("PORT") {
                Ok(raw) => raw
                    .trim()
                    .parse::<u16>()
                    .map_err(|e| format!("PORT: {}", e))?,
                Err(_) => defaults.port,
            },
            openai_api_base: env::var("OPENAI_API_BASE").unwrap_or(defaults.openai_api_base),
            openai_model: env::var("OPENAI_MODEL").ok(),
            skype_auth_url: env::var("SKYPE_AUTH_URL").unwrap_or(defaults.skype_auth_url),
            skype_chat_url: env::var("SKYPE_CHAT_URL").unwrap_or(defaults.skype_chat_url),
            retention_days: match env::var("RETENTION_DAYS") {
                Ok(raw) => parse_retention_days(&raw)?,
                Err(_) => defaults.retention_days,
            },
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        })
    }
}

/// Retention window in days, between 1 and [`MAX_RETENTION_DAYS`].
pub fn parse_retention_days(raw: &str) -> Result<i64, String> {
    let days = raw
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("RETENTION_DAYS: {}", e))?;

    if !(1..=MAX_RETENTION_DAYS).contains(&days) {
        return Err(format!(
            "RETENTION_DAYS: {} is outside 1..={}",
            days, MAX_RETENTION_DAYS
        ));
    }
    Ok(days)
}
