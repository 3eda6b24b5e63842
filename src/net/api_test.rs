use reqwest::Method;
use serde_json::json;

use super::*;
use crate::net::transport::RequestBody;
use crate::net::types::AdminUser;
use crate::state::store::StorageKey;
use crate::test_helpers::{Harness, make_token};

// =========================================================================
// Auth
// =========================================================================

#[tokio::test]
async fn login_posts_credentials_and_leaves_session_alone() {
    let h = Harness::new();
    h.transport.respond(200, &json!({ "access": "a.b.c", "refresh": "r" }));

    let tokens = h.api.login("alice", "pw").await.unwrap();

    assert_eq!(tokens, TokenPair { access: "a.b.c".into(), refresh: "r".into() });
    let sent = h.transport.last_request();
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.path, "/users/login/");
    assert_eq!(sent.body, RequestBody::Json(json!({ "username": "alice", "password": "pw" })));
    assert!(!h.session.is_logged_in());
}

#[tokio::test]
async fn register_surfaces_field_errors() {
    let h = Harness::new();
    h.transport.respond(400, &json!({ "username": ["이미 사용중인 아이디입니다."] }));

    let request = RegisterRequest {
        username: "alice".into(),
        password: "pw".into(),
        age: 30,
        gender: "F".into(),
        skin_type: "oily".into(),
    };
    let err = h.api.register(&request).await.unwrap_err();

    assert_eq!(err.validation_text(), Some("이미 사용중인 아이디입니다."));
    let sent = h.transport.last_request();
    assert_eq!(
        sent.body,
        RequestBody::Json(json!({ "username": "alice", "password": "pw", "age": 30, "gender": "F", "skin_type": "oily" }))
    );
}

#[tokio::test]
async fn refresh_session_replaces_access_token() {
    let h = Harness::logged_in(false);
    let fresh = make_token(&json!({ "is_staff": true }));
    h.transport.respond(200, &json!({ "access": &fresh }));

    h.api.refresh_session().await.unwrap();

    let sent = h.transport.last_request();
    assert_eq!(sent.path, "/token/refresh/");
    assert_eq!(sent.body, RequestBody::Json(json!({ "refresh": "refresh-1" })));
    assert_eq!(h.stored(StorageKey::AccessToken), Some(fresh));
    assert_eq!(h.stored(StorageKey::RefreshToken).as_deref(), Some("refresh-1"));
    assert!(h.session.is_staff());
}

#[tokio::test]
async fn refresh_without_token_sends_nothing() {
    let h = Harness::new();
    let err = h.api.refresh_session().await.unwrap_err();
    assert!(matches!(err, ApiError::MissingRefreshToken));
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn refresh_rejected_is_session_expiry() {
    let h = Harness::logged_in(false);
    h.transport.respond(401, &json!({ "detail": "Token is invalid or expired" }));

    let err = h.api.refresh_session().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!h.session.is_logged_in());
}

// =========================================================================
// Diagnosis & history
// =========================================================================

#[tokio::test]
async fn predict_sends_image_and_example_flag() {
    let h = Harness::logged_in(false);
    h.transport.respond(200, &json!({ "predictions": [{ "label": "건선", "confidence": 55.1 }], "tips": [] }));

    let image = ImageUpload { file_name: "arm.png".into(), mime: Some("image/png".into()), bytes: vec![0x89, 0x50] };
    let outcome = h.api.predict(image, true).await.unwrap();

    assert!(matches!(outcome, PredictOutcome::Report(ref r) if r.predictions[0].label == "건선"));
    let sent = h.transport.last_request();
    assert_eq!(sent.path, "/predict/");
    let RequestBody::Multipart(parts) = sent.body else {
        panic!("expected multipart body");
    };
    assert_eq!(
        parts,
        vec![
            FormPart::File {
                name: "image".into(),
                file_name: "arm.png".into(),
                mime: Some("image/png".into()),
                bytes: vec![0x89, 0x50]
            },
            FormPart::Text { name: "is_example".into(), value: "true".into() },
        ]
    );
}

#[tokio::test]
async fn history_requests_page_query() {
    let h = Harness::logged_in(false);
    h.transport.respond(200, &json!({ "count": 0, "next": null, "previous": null, "results": [] }));

    let page = h.api.history(2, 6).await.unwrap();

    assert_eq!(page.count, 0);
    let sent = h.transport.last_request();
    assert_eq!(sent.method, Method::GET);
    assert_eq!(sent.path, "/history/");
    assert_eq!(
        sent.query,
        vec![("page".to_owned(), "2".to_owned()), ("page_size".to_owned(), "6".to_owned())]
    );
}

#[tokio::test]
async fn delete_history_accepts_empty_body() {
    let h = Harness::logged_in(false);
    h.transport.respond_raw(204, "");

    h.api.delete_history(42).await.unwrap();

    let sent = h.transport.last_request();
    assert_eq!(sent.method, Method::DELETE);
    assert_eq!(sent.path, "/history/42/");
}

#[tokio::test]
async fn example_images_unwraps_list() {
    let h = Harness::new();
    h.transport.respond(200, &json!({ "example_images": ["test1.jpg", "test2.jpg"] }));
    assert_eq!(h.api.example_images().await.unwrap(), vec!["test1.jpg", "test2.jpg"]);
}

// =========================================================================
// Reviews, profile, admin
// =========================================================================

#[tokio::test]
async fn create_review_posts_rating_and_text() {
    let h = Harness::logged_in(false);
    h.transport.respond(201, &json!({ "id": 9, "user": { "username": "alice" }, "rating": 5, "text": "최고" }));

    let review = h.api.create_review(5, "최고").await.unwrap();

    assert_eq!(review.id, 9);
    assert_eq!(h.transport.last_request().body, RequestBody::Json(json!({ "rating": 5, "text": "최고" })));
}

#[tokio::test]
async fn change_password_puts_both_fields() {
    let h = Harness::logged_in(false);
    h.transport.respond(200, &json!({ "status": "success" }));

    h.api.change_password("old", "new").await.unwrap();

    let sent = h.transport.last_request();
    assert_eq!(sent.method, Method::PUT);
    assert_eq!(sent.body, RequestBody::Json(json!({ "old_password": "old", "new_password": "new" })));
}

#[test]
fn admin_resource_paths() {
    assert_eq!(AdminResource::Users.path(), "/admin/users/");
    assert_eq!(AdminResource::Reviews.item_path(3), "/admin/reviews/3/");
    assert_eq!(AdminResource::Diagnoses.item_path(12), "/admin/diagnoses/12/");
}

#[tokio::test]
async fn admin_delete_targets_item() {
    let h = Harness::logged_in(true);
    h.transport.respond_raw(204, "");

    h.api.admin_delete(AdminResource::Users, 5).await.unwrap();

    let sent = h.transport.last_request();
    assert_eq!(sent.method, Method::DELETE);
    assert_eq!(sent.path, "/admin/users/5/");
}

#[tokio::test]
async fn admin_users_parse() {
    let h = Harness::logged_in(true);
    h.transport.respond(200, &json!([{ "id": 1, "username": "root", "is_staff": true, "is_active": true }]));

    let users: Vec<AdminUser> = h.api.admin_list(AdminResource::Users).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "root");
}
