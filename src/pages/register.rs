#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use super::PageError;
use crate::net::api::Api;
use crate::net::error::ApiError;
use crate::net::types::RegisterRequest;
use crate::routes::Route;
use crate::shell::Notice;

pub const REGISTERED: &str = "회원가입이 완료되었습니다! 2초 후 로그인 페이지로 이동합니다.";
pub const REGISTER_FAILED: &str = "회원가입에 실패했습니다. 다시 시도해 주세요.";

pub struct RegisterPage {
    api: Api,
}

impl RegisterPage {
    #[must_use]
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// The backend's field errors when it sent any, otherwise the transport
    /// failure text, otherwise [`REGISTER_FAILED`].
    pub async fn submit(&self, form: &RegisterRequest) -> Result<(), PageError> {
        if let Err(e) = self.api.register(form).await {
            tracing::error!(error = %e, username = %form.username, "registration failed");
            return Err(PageError::new(failure_message(&e), e));
        }

        tracing::info!(username = %form.username, "registered");
        let guard = self.api.guard();
        guard.notifier().notify(Notice::success(REGISTERED));
        guard.navigator().navigate(Route::Login);
        Ok(())
    }
}

fn failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Validation(text) => text.clone(),
        ApiError::Transport(e) => e.to_string(),
        _ => REGISTER_FAILED.to_owned(),
    }
}
