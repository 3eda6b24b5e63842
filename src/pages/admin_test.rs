use reqwest::Method;
use serde_json::json;

use super::*;
use crate::test_helpers::Harness;

fn users() -> serde_json::Value {
    json!([
        { "id": 1, "username": "root", "email": "root@example.com", "is_staff": true, "is_active": true },
        { "id": 5, "username": "mallory", "email": "", "is_staff": false, "is_active": true }
    ])
}

#[tokio::test]
async fn users_load_and_delete_by_name() {
    let h = Harness::logged_in(true);
    h.transport.respond(200, &users());
    h.transport.respond_raw(204, "");
    h.transport.respond(200, &json!([{ "id": 1, "username": "root", "is_staff": true, "is_active": true }]));

    let mut page = AdminUsersPage::new(h.api.clone());
    assert_eq!(page.load().await.unwrap().len(), 2);
    page.delete(5).await.unwrap();

    let sent = h.transport.requests();
    assert_eq!(sent[1].method, Method::DELETE);
    assert_eq!(sent[1].path, "/admin/users/5/");
    assert_eq!(sent[2].path, "/admin/users/");
    assert_eq!(page.records().len(), 1);
    assert_eq!(h.notifier.notices(), vec![Notice::success("사용자 'mallory'이(가) 삭제되었습니다.")]);
}

#[tokio::test]
async fn review_delete_names_id() {
    let h = Harness::logged_in(true);
    h.transport.respond_raw(204, "");
    h.transport.respond(200, &json!([]));

    let mut page = AdminReviewsPage::new(h.api.clone());
    page.delete(12).await.unwrap();

    assert_eq!(h.transport.requests()[0].path, "/admin/reviews/12/");
    assert_eq!(h.notifier.notices(), vec![Notice::success("리뷰 ID #12이(가) 삭제되었습니다.")]);
}

#[tokio::test]
async fn diagnosis_delete_failure_toasts_and_skips_refetch() {
    let h = Harness::logged_in(true);
    h.transport.respond(404, &json!({ "detail": "Not found." }));

    let mut page = AdminDiagnosesPage::new(h.api.clone());
    let err = page.delete(3).await.unwrap_err();

    assert_eq!(err.message(), "진단 기록 삭제에 실패했습니다.");
    assert_eq!(h.transport.requests().len(), 1);
    assert_eq!(h.notifier.notices(), vec![Notice::error("진단 기록 삭제에 실패했습니다.")]);
}

#[tokio::test]
async fn load_failures_are_per_collection() {
    let h = Harness::logged_in(true);
    h.transport.respond_raw(500, "");
    h.transport.respond_raw(500, "");
    h.transport.respond_raw(500, "");

    let users = AdminUsersPage::new(h.api.clone()).load().await.map(<[_]>::len).unwrap_err();
    let reviews = AdminReviewsPage::new(h.api.clone()).load().await.map(<[_]>::len).unwrap_err();
    let diagnoses = AdminDiagnosesPage::new(h.api.clone()).load().await.map(<[_]>::len).unwrap_err();

    assert_eq!(users.message(), "사용자 목록을 불러오는 데 실패했습니다.");
    assert_eq!(reviews.message(), "리뷰 목록을 불러오는 데 실패했습니다.");
    assert_eq!(diagnoses.message(), "진단 기록 목록을 불러오는 데 실패했습니다.");
}

#[tokio::test]
async fn diagnoses_parse_owner() {
    let h = Harness::logged_in(true);
    h.transport.respond(
        200,
        &json!([{
            "id": 8,
            "user": { "username": "alice" },
            "image": "/media/uploads/8.jpg",
            "result": { "predictions": [], "tips": [] },
            "created_at": "2024-06-02T12:00:00Z"
        }]),
    );

    let mut page = AdminDiagnosesPage::new(h.api.clone());
    let records = page.load().await.unwrap();

    assert_eq!(records[0].user.username, "alice");
}
