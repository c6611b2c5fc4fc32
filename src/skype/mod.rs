//! All Skype-specific functionality

pub mod backend;
pub mod client;
pub mod manager;

// Re-export main types for convenience
pub use backend::{MessagingBackend, MessagingSession, RawChat, RawMessage, RawUser};
pub use client::SkypeWebClient;
pub use manager::{ChatOutcome, FetchReport, SkippedChat, SkypeManager};
