//! Typed wrappers for every backend endpoint. All calls go through the
//! [`SessionGuard`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::guard::SessionGuard;
use super::token::decode_claims;
use super::transport::{ApiRequest, FormPart};
use super::types::{
    ExampleImages, HistoryEntry, ImageUpload, LoginRequest, NewReview, Page,
    PasswordChange, PredictOutcome, RefreshRequest, RefreshedToken, RegisterRequest, Review, TokenPair,
    UserProfile,
};
use crate::state::session::Session;

/// Admin console collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminResource {
    Users,
    Reviews,
    Diagnoses,
}

impl AdminResource {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Users => "/admin/users/",
            Self::Reviews => "/admin/reviews/",
            Self::Diagnoses => "/admin/diagnoses/",
        }
    }

    #[must_use]
    pub fn item_path(self, id: i64) -> String {
        format!("{}{id}/", self.path())
    }
}

/// Cheap-to-clone handle over a shared guard.
#[derive(Clone)]
pub struct Api {
    guard: Arc<SessionGuard>,
}

impl Api {
    #[must_use]
    pub fn new(guard: Arc<SessionGuard>) -> Self {
        Self { guard }
    }

    #[must_use]
    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        self.guard.session()
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// `POST /users/login/`. Does not touch the session; see
    /// [`crate::pages::login::LoginPage`].
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the guard or body decoding.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        let body = to_json(&LoginRequest { username, password })?;
        self.guard.send_json(ApiRequest::post("/users/login/").json(body)).await
    }

    /// `POST /users/register/`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] carries the backend's field errors.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let body = to_json(request)?;
        self.guard.send(ApiRequest::post("/users/register/").json(body)).await?;
        Ok(())
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Never called implicitly; the guard does not retry on 401.
    ///
    /// # Errors
    ///
    /// [`ApiError::MissingRefreshToken`] when nothing is stored, otherwise any
    /// guard, decode, or store failure.
    pub async fn refresh_session(&self) -> Result<(), ApiError> {
        let refresh = self.session().refresh_token().ok_or(ApiError::MissingRefreshToken)?;
        let body = to_json(&RefreshRequest { refresh: &refresh })?;
        let refreshed: RefreshedToken = self
            .guard
            .send_json(ApiRequest::post("/token/refresh/").json(body))
            .await?;
        let claims = decode_claims(&refreshed.access)?;
        self.session()
            .replace_access_token(&refreshed.access, claims.is_staff)?;
        tracing::info!("access token refreshed");
        Ok(())
    }

    // =========================================================================
    // DIAGNOSIS
    // =========================================================================

    /// `POST /predict/` as `multipart/form-data`. Example images are not
    /// saved to history by the backend.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the guard or body decoding.
    pub async fn predict(&self, image: ImageUpload, is_example: bool) -> Result<PredictOutcome, ApiError> {
        let parts = vec![
            FormPart::File { name: "image".to_owned(), file_name: image.file_name, mime: image.mime, bytes: image.bytes },
            FormPart::Text { name: "is_example".to_owned(), value: is_example.to_string() },
        ];
        self.guard.send_json(ApiRequest::post("/predict/").multipart(parts)).await
    }

    /// `GET /examples/`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the guard or body decoding.
    pub async fn example_images(&self) -> Result<Vec<String>, ApiError> {
        let examples: ExampleImages = self.guard.send_json(ApiRequest::get("/examples/")).await?;
        Ok(examples.example_images)
    }

    /// `GET /history/?page=N&page_size=M`. The backend paginates with
    /// `page_size` when sent, so page counts computed with the same size agree.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the guard or body decoding.
    pub async fn history(&self, page: u64, page_size: u64) -> Result<Page<HistoryEntry>, ApiError> {
        let request = ApiRequest::get("/history/").query("page", page).query("page_size", page_size);
        self.guard.send_json(request).await
    }

    /// `DELETE /history/{id}/`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the guard.
    pub async fn delete_history(&self, id: i64) -> Result<(), ApiError> {
        self.guard.send(ApiRequest::delete(format!("/history/{id}/"))).await?;
        Ok(())
    }

    // =========================================================================
    // REVIEWS & PROFILE
    // =========================================================================

    /// `GET /reviews/`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the guard or body decoding.
    pub async fn reviews(&self) -> Result<Vec<Review>, ApiError> {
        self.guard.send_json(ApiRequest::get("/reviews/")).await
    }

    /// `POST /reviews/create/`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the guard or body decoding.
    pub async fn create_review(&self, rating: u8, text: &str) -> Result<Review, ApiError> {
        let body = to_json(&NewReview { rating, text })?;
        self.guard.send_json(ApiRequest::post("/reviews/create/").json(body)).await
    }

    /// `GET /profile/`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the guard or body decoding.
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.guard.send_json(ApiRequest::get("/profile/")).await
    }

    /// `PUT /profile/`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the guard or body decoding.
    pub async fn update_profile(&self, profile: &UserProfile) -> Result<UserProfile, ApiError> {
        let body = to_json(profile)?;
        self.guard.send_json(ApiRequest::put("/profile/").json(body)).await
    }

    /// `PUT /change-password/`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when the current password is wrong.
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<(), ApiError> {
        let body = to_json(&PasswordChange { old_password, new_password })?;
        self.guard.send(ApiRequest::put("/change-password/").json(body)).await?;
        Ok(())
    }

    // =========================================================================
    // ADMIN
    // =========================================================================

    /// `GET /admin/{resource}/`, e.g. `admin_list::<AdminUser>(AdminResource::Users)`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the guard or body decoding.
    pub async fn admin_list<T: DeserializeOwned>(&self, resource: AdminResource) -> Result<Vec<T>, ApiError> {
        self.guard.send_json(ApiRequest::get(resource.path())).await
    }

    /// `DELETE /admin/{resource}/{id}/`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the guard.
    pub async fn admin_delete(&self, resource: AdminResource, id: i64) -> Result<(), ApiError> {
        self.guard.send(ApiRequest::delete(resource.item_path(id))).await?;
        Ok(())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    Ok(serde_json::to_value(value)?)
}
