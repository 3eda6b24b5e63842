//! Session guard: the single choke point for backend calls.
//!
//! Before a request leaves, the stored access token (if any) is attached as
//! `Authorization: Bearer <token>`. After a response arrives, a 401 clears the
//! stored credentials, raises one session-expired notice, and performs one
//! hard redirect to login. The caller still receives
//! [`ApiError::Unauthorized`].
//!
//! No retries: each request resolves once or fails once.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::routes::Route;
use crate::shell::{Navigator, Notice, Notifier};
use crate::state::session::Session;

pub const SESSION_EXPIRED_NOTICE: &str = "세션이 만료되었습니다. 다시 로그인해주세요.";

const UNAUTHORIZED: u16 = 401;

pub struct SessionGuard {
    transport: Arc<dyn Transport>,
    session: Session,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl SessionGuard {
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Session,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { transport, session, navigator, notifier }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    #[must_use]
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Add the bearer credential when a token is stored; otherwise leave the
    /// request untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidHeader`] if the stored token is not a valid
    /// header value.
    pub fn attach_credentials(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        if let Some(token) = self.session.access_token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            request.set_header(AUTHORIZATION, value);
        }
        Ok(())
    }

    /// Send a request through the guard.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] after a 401 (session already cleared)
    /// - [`ApiError::Validation`] / [`ApiError::Status`] for other failures
    /// - [`ApiError::Transport`] when no response was obtained
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.attach_credentials(&mut request)?;

        let method = request.method.clone();
        let path = request.path.clone();
        tracing::debug!(%method, %path, "sending request");

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, %method, %path, "request failed before a response");
                return Err(e.into());
            }
        };
        self.inspect(&path, response)
    }

    /// Send and decode a JSON response body.
    ///
    /// # Errors
    ///
    /// As [`SessionGuard::send`], plus [`ApiError::Decode`] for a body that
    /// does not match `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        Ok(response.json()?)
    }

    fn inspect(&self, path: &str, response: ApiResponse) -> Result<ApiResponse, ApiError> {
        if response.status == UNAUTHORIZED {
            self.expire(path);
            return Err(ApiError::Unauthorized);
        }
        if !response.is_success() {
            tracing::debug!(status = response.status, %path, "request rejected");
            return Err(ApiError::from_status(response.status, response.body));
        }
        Ok(response)
    }

    fn expire(&self, path: &str) {
        tracing::warn!(%path, "authentication failed; clearing session");
        if let Err(e) = self.session.sign_out() {
            tracing::error!(error = %e, "failed to clear session credentials");
        }
        self.notifier.notify(Notice::error(SESSION_EXPIRED_NOTICE));
        self.navigator.hard_redirect(Route::Login);
    }
}
