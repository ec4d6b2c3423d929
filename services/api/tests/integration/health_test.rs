use serde_json::{Value, json};

use erp_testing::identity::MockIdentityProvider;

use crate::helpers::{empty_db, spawn_app};

#[tokio::test]
async fn should_report_server_running() {
    let app = spawn_app(MockIdentityProvider::start().await, empty_db()).await;

    let resp = app.server.get("/api/health").await;

    resp.assert_status_ok();
    assert_eq!(
        resp.json::<Value>(),
        json!({ "status": "OK", "message": "ERP Server is running" })
    );
    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(resp.headers()["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn should_return_404_for_unknown_route() {
    let app = spawn_app(MockIdentityProvider::start().await, empty_db()).await;
    app.server
        .get("/api/nope")
        .expect_failure()
        .await
        .assert_status_not_found();
}
