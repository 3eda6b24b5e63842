//! Page controllers.
//!
//! Each controller owns the state one screen renders and exposes the actions
//! that screen's buttons trigger. Gate checks happen before a controller is
//! built (see [`crate::routes::enter`]); controllers do not re-check them.
//!
//! Failures come back as [`PageError`], whose `Display` is the user-facing
//! message. Toast-style outcomes additionally go through the
//! [`crate::shell::Notifier`].

pub mod admin;
pub mod diagnosis;
pub mod history;
pub mod home;
pub mod login;
pub mod navbar;
pub mod profile;
pub mod register;
pub mod review_form;

use crate::net::error::ApiError;

/// A failed page action. `Display` yields the message shown to the user.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct PageError {
    message: String,
    #[source]
    cause: Option<ApiError>,
}

impl PageError {
    #[must_use]
    pub fn new(message: impl Into<String>, cause: ApiError) -> Self {
        Self { message: message.into(), cause: Some(cause) }
    }

    /// Rejected before any request was sent.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self { message: message.into(), cause: None }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn cause(&self) -> Option<&ApiError> {
        self.cause.as_ref()
    }
}

/// Log `error` against `action` and wrap it with the user-facing `message`.
pub(crate) fn failed(action: &'static str, message: &str, error: impl Into<ApiError>) -> PageError {
    let error = error.into();
    tracing::error!(error = %error, action, "page action failed");
    PageError::new(message, error)
}
