#[cfg(test)]
#[path = "review_form_test.rs"]
mod review_form_test;

use super::{PageError, failed};
use crate::net::api::Api;
use crate::net::types::Review;
use crate::shell::Notice;

pub const REVIEW_INCOMPLETE: &str = "별점과 후기 내용을 모두 입력해주세요.";
pub const REVIEW_LOGIN_REQUIRED: &str = "후기를 작성하려면 로그인이 필요합니다.";
pub const REVIEW_FAILED: &str = "후기 작성 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";
pub const REVIEW_THANKS: &str = "소중한 후기 감사합니다!";

pub const MAX_RATING: u8 = 5;

pub struct ReviewForm {
    api: Api,
}

impl ReviewForm {
    #[must_use]
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// Post a review. Input is checked before the session, and neither check
    /// sends a request.
    ///
    /// # Errors
    ///
    /// [`REVIEW_INCOMPLETE`] for a rating outside `1..=5` or blank text,
    /// [`REVIEW_LOGIN_REQUIRED`] without a token, [`REVIEW_FAILED`] when the
    /// backend rejects the post.
    pub async fn submit(&self, rating: u8, text: &str) -> Result<Review, PageError> {
        if !(1..=MAX_RATING).contains(&rating) || text.trim().is_empty() {
            return Err(PageError::rejected(REVIEW_INCOMPLETE));
        }
        if !self.api.session().is_logged_in() {
            return Err(PageError::rejected(REVIEW_LOGIN_REQUIRED));
        }

        let review = self
            .api
            .create_review(rating, text)
            .await
            .map_err(|e| failed("create_review", REVIEW_FAILED, e))?;
        self.api.guard().notifier().notify(Notice::success(REVIEW_THANKS));
        Ok(review)
    }
}
