use axum::http::StatusCode;
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;
use uuid::Uuid;

use erp_api_schema::users;
use erp_testing::identity::MockIdentityProvider;

use crate::helpers::{bearer, db_with, empty_db, profile_row, sign_up_user, spawn_app};

#[tokio::test]
async fn should_list_profiles_newest_first() {
    let base = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let rows = vec![
        profile_row(3, Uuid::new_v4(), "admin", base + Duration::hours(2)),
        profile_row(2, Uuid::new_v4(), "manager", base + Duration::hours(1)),
        profile_row(1, Uuid::new_v4(), "staff", base),
    ];
    let app = spawn_app(MockIdentityProvider::start().await, db_with(vec![rows])).await;

    let resp = app.server.get("/api/users").await;

    resp.assert_status_ok();
    let body: Vec<Value> = resp.json();
    assert_eq!(body.len(), 3);
    assert_eq!(body[0]["id"], 3);
    assert_eq!(body[0]["role"], "admin");
    assert_eq!(body[0]["firstName"], "Ada");
    assert_eq!(body[0]["createdAt"], "2025-03-01T14:00:00.000Z");

    let stamps: Vec<&str> = body
        .iter()
        .map(|p| p["createdAt"].as_str().unwrap())
        .collect();
    assert!(stamps.windows(2).all(|w| w[0] >= w[1]), "{stamps:?}");
}

#[tokio::test]
async fn should_return_empty_array_for_empty_store() {
    let app = spawn_app(
        MockIdentityProvider::start().await,
        db_with(vec![Vec::<users::Model>::new()]),
    )
    .await;

    let resp = app.server.get("/api/users").await;

    resp.assert_status_ok();
    assert_eq!(resp.json::<Vec<Value>>().len(), 0);
}

#[tokio::test]
async fn should_return_500_for_corrupt_role() {
    let app = spawn_app(
        MockIdentityProvider::start().await,
        db_with(vec![vec![profile_row(1, Uuid::new_v4(), "owner", Utc::now())]]),
    )
    .await;

    let resp = app.server.get("/api/users").await;

    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.json::<Value>()["kind"], "STORE_ERROR");
}

#[tokio::test]
async fn should_return_own_profile_once_trigger_has_run() {
    let provider = MockIdentityProvider::start_auto_confirm().await;
    let id = sign_up_user(&provider, "a@x.com").await;
    let app = spawn_app(
        provider,
        db_with(vec![vec![profile_row(9, id, "staff", Utc::now())]]),
    )
    .await;
    let (name, value) = bearer(&MockIdentityProvider::access_token_for(id));

    let resp = app.server.get("/api/users/me").add_header(name, value).await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["id"], 9);
    assert_eq!(body["authId"], id.to_string());
}

#[tokio::test]
async fn should_return_null_before_trigger_has_run() {
    let provider = MockIdentityProvider::start_auto_confirm().await;
    let id = sign_up_user(&provider, "a@x.com").await;
    let app = spawn_app(provider, db_with(vec![Vec::<users::Model>::new()])).await;
    let (name, value) = bearer(&MockIdentityProvider::access_token_for(id));

    let resp = app.server.get("/api/users/me").add_header(name, value).await;

    resp.assert_status_ok();
    assert!(resp.json::<Value>().is_null());
}

#[tokio::test]
async fn should_require_session_for_own_profile() {
    let app = spawn_app(MockIdentityProvider::start().await, empty_db()).await;
    app.server
        .get("/api/users/me")
        .await
        .assert_status_unauthorized();
}
