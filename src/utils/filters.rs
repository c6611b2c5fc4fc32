use chrono::{DateTime, TimeDelta, Utc};

use crate::core::models::Message;
use crate::errors::DigestError;
use crate::skype::backend::{RawChat, RawMessage};

pub const UNKNOWN_USER: &str = "Unknown User";
pub const UNKNOWN_FIELD: &str = "unknown";

/// Oldest timestamp still inside a retention window ending at `now`.
///
/// # Errors
///
/// Windows that are not positive or that reach past the representable
/// date range give [`DigestError::InvalidRetention`].
pub fn retention_cutoff(
    now: DateTime<Utc>,
    retention_days: i64,
) -> Result<DateTime<Utc>, DigestError> {
    if retention_days <= 0 {
        return Err(DigestError::InvalidRetention(retention_days));
    }

    TimeDelta::try_days(retention_days)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or(DigestError::InvalidRetention(retention_days))
}

/// Title shown for a chat: the other user's display name, then their id,
/// then `"Unknown User"`.
#[must_use]
pub fn resolve_title(chat: &RawChat) -> String {
    match &chat.user {
        Some(user) => user
            .display_name
            .clone()
            .unwrap_or_else(|| user.to_string()),
        None => UNKNOWN_USER.to_string(),
    }
}

/// Keeps messages stamped at or after `cutoff`, in their original order.
/// Messages without a timestamp never qualify.
#[must_use]
pub fn filter_recent(messages: Vec<RawMessage>, cutoff: DateTime<Utc>) -> Vec<Message> {
    messages
        .into_iter()
        .filter_map(|msg| {
            let time = msg.time?;
            if time < cutoff {
                return None;
            }

            Some(Message {
                id: msg.id.unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
                content: msg.content.unwrap_or_default(),
                time: time.to_rfc3339(),
                sender: msg.sender.unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
            })
        })
        .collect()
}
