#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use super::{PageError, failed};
use crate::net::api::Api;
use crate::net::types::Review;

pub const REVIEWS_LOAD_FAILED: &str = "후기를 불러오는 데 실패했습니다.";

/// Landing page: public review wall plus, when logged in, the review form.
pub struct HomePage {
    api: Api,
    reviews: Vec<Review>,
}

impl HomePage {
    #[must_use]
    pub fn new(api: Api) -> Self {
        Self { api, reviews: Vec::new() }
    }

    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Whether to render the review form.
    #[must_use]
    pub fn shows_review_form(&self) -> bool {
        self.api.session().is_logged_in()
    }

    /// # Errors
    ///
    /// [`REVIEWS_LOAD_FAILED`]; previously loaded reviews are kept.
    pub async fn load_reviews(&mut self) -> Result<&[Review], PageError> {
        self.reviews = self
            .api
            .reviews()
            .await
            .map_err(|e| failed("load_reviews", REVIEWS_LOAD_FAILED, e))?;
        Ok(&self.reviews)
    }
}
