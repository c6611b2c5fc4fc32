//! HTTP handlers for the authentication and conversation endpoints.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use tracing::{error, info};

use super::helpers::{self, ApiResponse};
use super::parsing::parse_auth_request;
use super::state::AppState;
use crate::core::models::AuthRequest;
use crate::errors::DigestError;

/// `POST /api/auth`
///
/// Validates the `OpenAI` key first, then opens the Skype session.
#[tracing::instrument(level = "info", skip_all, fields(correlation_id = %uuid::Uuid::new_v4()))]
pub async fn authenticate(State(state): State<AppState>, body: Bytes) -> ApiResponse {
    let request = match parse_auth_request(&body) {
        Ok(request) => request,
        Err(e) => {
            info!("Rejected auth request: {}", e.message());
            return helpers::err_response(StatusCode::BAD_REQUEST, e.message());
        }
    };

    match run_authentication(&state, &request).await {
        Ok(response) => response,
        Err(e) => {
            error!("Error in authenticate: {}", e);
            helpers::err_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

async fn run_authentication(
    state: &AppState,
    request: &AuthRequest,
) -> Result<ApiResponse, DigestError> {
    let key_ok = state
        .summarizer
        .lock()
        .await
        .initialize(&request.openai_api_key)
        .await;
    if !key_ok {
        return Ok(helpers::err_response(
            StatusCode::UNAUTHORIZED,
            "Invalid OpenAI API key",
        ));
    }

    let mut skype = state.skype.lock().await;
    if !skype
        .authenticate(&request.skype_username, &request.skype_password)
        .await?
    {
        return Ok(helpers::err_response(
            StatusCode::UNAUTHORIZED,
            "Skype authentication failed",
        ));
    }

    info!(username = %request.skype_username, "Authentication successful");
    Ok(helpers::ok_message("Authentication successful"))
}

/// `GET /api/conversations`
///
/// Refreshes the Skype session, fetches recent conversations and, when an
/// `OpenAI` key has been validated, attaches a summary to each.
#[tracing::instrument(level = "info", skip_all, fields(correlation_id = %uuid::Uuid::new_v4()))]
pub async fn get_conversations(State(state): State<AppState>) -> ApiResponse {
    match run_conversations(&state).await {
        Ok(response) => response,
        Err(e) => {
            error!("Error in get_conversations: {}", e);
            helpers::err_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

async fn run_conversations(state: &AppState) -> Result<ApiResponse, DigestError> {
    let mut skype = state.skype.lock().await;

    if !skype.has_session() {
        return Ok(helpers::err_response(
            StatusCode::UNAUTHORIZED,
            "Not authenticated",
        ));
    }

    if !skype.refresh_connection().await? {
        return Ok(helpers::err_response(
            StatusCode::UNAUTHORIZED,
            "Failed to refresh connection",
        ));
    }

    let mut conversations = skype
        .get_recent_conversations(state.config.retention_days)
        .await?;

    let summarizer = state.summarizer.lock().await;
    if summarizer.is_configured() {
        for conversation in &mut conversations {
            conversation.summary = Some(summarizer.summarize(&conversation.messages).await);
        }
    }

    info!(count = conversations.len(), "Returning conversations");
    Ok(helpers::ok(json!({ "data": conversations })))
}
