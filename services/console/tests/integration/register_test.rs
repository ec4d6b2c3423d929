use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{StubApi, console_for, form};

#[tokio::test]
async fn should_show_verification_message_on_success() {
    let api = StubApi::start().await;
    let console = console_for(&api.url);

    let resp = console.post("/register").json(&form("a@x.com")).await;

    resp.assert_status_ok();
    let view: Value = resp.json();
    assert_eq!(view["success"], true);
    assert_eq!(
        view["message"],
        "User registered successfully! Please check your email to verify your account."
    );
    assert!(view.get("fields").is_none());
}

#[tokio::test]
async fn should_show_raw_provider_message_on_refusal() {
    let api = StubApi::start().await;
    let console = console_for(&api.url);

    let view: Value = console
        .post("/register")
        .json(&form("taken@x.com"))
        .await
        .json();

    assert_eq!(view["success"], false);
    assert_eq!(view["message"], "User already registered");
}

#[tokio::test]
async fn should_carry_invalid_fields() {
    let api = StubApi::start().await;
    let console = console_for(&api.url);

    let mut body = form("a@x.com");
    body["firstName"] = json!("");
    let view: Value = console.post("/register").json(&body).await.json();

    assert_eq!(view["success"], false);
    assert_eq!(view["fields"], json!(["firstName"]));
}

#[tokio::test]
async fn should_forward_mistyped_fields_for_the_api_to_name() {
    let api = StubApi::start().await;
    let console = console_for(&api.url);

    let mut body = form("a@x.com");
    body["firstName"] = Value::Null;
    let view: Value = console.post("/register").json(&body).await.json();

    assert_eq!(view["success"], false);
    assert_eq!(view["fields"], json!(["firstName"]));
}

#[tokio::test]
async fn should_refuse_unreadable_form_without_calling_api() {
    let api = StubApi::start().await;
    let console = console_for(&api.url);

    let resp = console.post("/register").text("email=a@x.com").await;

    resp.assert_status_ok();
    let view: Value = resp.json();
    assert_eq!(view["success"], false);
    assert!(!view["message"].as_str().unwrap().is_empty());
    assert_eq!(api.register_calls(), 0);
}

#[tokio::test]
async fn should_return_bad_gateway_when_provider_is_down() {
    let api = StubApi::start().await;
    let console = console_for(&api.url);

    let resp = console.post("/register").json(&form("down@x.com")).await;

    resp.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(resp.json::<Value>()["kind"], "UPSTREAM_UNAVAILABLE");
}

#[tokio::test]
async fn should_report_readiness_of_api() {
    let api = StubApi::start().await;
    console_for(&api.url).get("/readyz").await.assert_status_ok();

    console_for("http://127.0.0.1:9")
        .get("/readyz")
        .await
        .assert_status(StatusCode::BAD_GATEWAY);
}
