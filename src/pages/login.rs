#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use super::{PageError, failed};
use crate::net::api::Api;
use crate::net::token::decode_claims;
use crate::routes::Route;
use crate::state::session::SessionSnapshot;

pub const LOGIN_FAILED: &str = "잘못된 사용자 이름 또는 비밀번호입니다.";

pub struct LoginPage {
    api: Api,
}

impl LoginPage {
    #[must_use]
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// Exchange credentials for tokens, persist them, and land on the
    /// diagnosis page. Claims are decoded before anything is written, so a
    /// malformed token leaves storage untouched.
    ///
    /// # Errors
    ///
    /// [`LOGIN_FAILED`] for any backend, token, or storage failure.
    pub async fn submit(&self, username: &str, password: &str) -> Result<SessionSnapshot, PageError> {
        let tokens = self
            .api
            .login(username, password)
            .await
            .map_err(|e| failed("login", LOGIN_FAILED, e))?;
        let claims = decode_claims(&tokens.access).map_err(|e| failed("login", LOGIN_FAILED, e))?;

        let session = self.api.session();
        session
            .sign_in(&tokens.access, &tokens.refresh, claims.is_staff)
            .map_err(|e| failed("login", LOGIN_FAILED, e))?;
        tracing::info!(
            username = claims.username.as_deref().unwrap_or(username),
            is_staff = claims.is_staff,
            "logged in"
        );

        self.api.guard().navigator().navigate(Route::LANDING);
        Ok(session.snapshot())
    }
}
