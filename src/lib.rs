//! skype-tldr - a small web service that summarizes recent Skype conversations using ChatGPT.
//!
//! # Architecture
//!
//! A single axum server owns two pieces of state:
//! 1. A Skype session manager that signs in, lists recent chats and keeps
//!    only messages inside the retention window
//! 2. A conversation summarizer that validates an `OpenAI` key and turns each
//!    conversation into a short summary
//!
//! `POST /api/auth` sets both up, `GET /api/conversations` reads and
//! summarizes, `GET /` serves the landing page.
//!
//! # Example
//!
//! ```no_run
//! use skype_tldr::api::{AppState, build_router};
//! use skype_tldr::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     skype_tldr::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
//!     let app = build_router(AppState::new(config));
//!
//!     let listener = tokio::net::TcpListener::bind(addr).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod api;
pub mod clients;
pub mod core;
pub mod errors;
pub mod prompt;
pub mod skype;
pub mod utils;

/// Configure structured logging with JSON format.
///
/// Log level comes from `RUST_LOG` and defaults to `info`. Calling it more
/// than once is harmless; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// skype_tldr::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
