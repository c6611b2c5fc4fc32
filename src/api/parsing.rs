//! Parsing of the `POST /api/auth` body.

use serde_json::Value;

use crate::core::models::AuthRequest;

pub const REQUIRED_AUTH_FIELDS: [&str; 3] = ["openai_api_key", "skype_username", "skype_password"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthBodyError {
    NoData,
    MissingFields,
}

impl AuthBodyError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            AuthBodyError::NoData => "No data provided",
            AuthBodyError::MissingFields => "Missing required fields",
        }
    }
}

/// `null`, `false`, `0`, `""`, `[]` and `{}` all count as no data.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Turns a raw request body into credentials.
///
/// Empty or unparseable bodies are reported as `NoData`; a body lacking any
/// required field, or holding a non-string value for one, as `MissingFields`.
pub fn parse_auth_request(body: &[u8]) -> Result<AuthRequest, AuthBodyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AuthBodyError::NoData);
    }

    let value: Value = serde_json::from_slice(body).map_err(|_| AuthBodyError::NoData)?;
    if is_blank(&value) {
        return Err(AuthBodyError::NoData);
    }

    let field = |name: &str| {
        value
            .get(name)
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .ok_or(AuthBodyError::MissingFields)
    };

    Ok(AuthRequest {
        openai_api_key: field(REQUIRED_AUTH_FIELDS[0])?,
        skype_username: field(REQUIRED_AUTH_FIELDS[1])?,
        skype_password: field(REQUIRED_AUTH_FIELDS[2])?,
    })
}
