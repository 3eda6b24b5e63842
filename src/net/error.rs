//! API error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! - `Unauthorized`: the guard already cleared the session and redirected;
//!   callers still see the failure.
//! - `Validation`: a 4xx carrying field errors, flattened to display text.
//! - everything else is an unexpected failure that pages report generically.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

use super::token::TokenError;
use super::transport::TransportError;
use crate::state::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("authentication failed; session cleared")]
    Unauthorized,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("server returned status {status}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid authorization header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("session store failed: {0}")]
    Store(#[from] StoreError),

    #[error("access token unreadable: {0}")]
    Token(#[from] TokenError),

    #[error("no refresh token stored")]
    MissingRefreshToken,
}

impl ApiError {
    /// Classify a non-success, non-401 response.
    #[must_use]
    pub fn from_status(status: u16, body: String) -> Self {
        if (400..500).contains(&status) {
            if let Ok(value) = serde_json::from_str::<Value>(&body) {
                let text = flatten_field_errors(&value);
                if !text.is_empty() {
                    return Self::Validation(text);
                }
            }
        }
        Self::Status { status, body }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Field-error text for validation failures.
    #[must_use]
    pub fn validation_text(&self) -> Option<&str> {
        match self {
            Self::Validation(text) => Some(text),
            _ => None,
        }
    }
}

/// Flatten a DRF-style error body into one line.
///
/// Object values are taken in order, arrays are flattened one level, and the
/// pieces are joined with a single space: `{"username": ["taken"], "age":
/// ["required"]}` becomes `"taken required"`.
#[must_use]
pub fn flatten_field_errors(value: &Value) -> String {
    let mut pieces = Vec::new();
    match value {
        Value::Object(map) => map.values().for_each(|v| push_flat(v, &mut pieces)),
        other => push_flat(other, &mut pieces),
    }
    pieces.retain(|piece| !piece.is_empty());
    pieces.join(" ")
}

fn push_flat(value: &Value, pieces: &mut Vec<String>) {
    match value {
        Value::Array(items) => pieces.extend(items.iter().map(scalar_text)),
        other => pieces.push(scalar_text(other)),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
