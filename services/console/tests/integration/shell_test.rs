use serde_json::Value;

use crate::helpers::{StubApi, console_for, profile};

fn active_paths(view: &Value) -> Vec<&str> {
    view["nav"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|item| item["active"] == true)
        .map(|item| item["path"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn should_render_dashboard_with_single_active_entry() {
    let api = StubApi::start().await;
    let console = console_for(&api.url);

    let resp = console.get("/").await;

    resp.assert_status_ok();
    let view: Value = resp.json();
    assert_eq!(view["brand"], "NCM Group");
    assert_eq!(view["page"]["kind"], "dashboard");
    assert_eq!(view["nav"].as_array().unwrap().len(), 6);
    assert_eq!(active_paths(&view), ["/"]);
}

#[tokio::test]
async fn should_render_placeholder_pages() {
    let api = StubApi::start().await;
    let console = console_for(&api.url);

    for (path, title) in [
        ("/inventory", "Inventory Management"),
        ("/analytics", "Analytics & Reports"),
        ("/settings", "System Settings"),
    ] {
        let view: Value = console.get(path).await.json();
        assert_eq!(view["title"], title);
        assert_eq!(view["page"]["body"], "This page is under development.");
        assert_eq!(active_paths(&view), [path]);
    }
}

#[tokio::test]
async fn should_fall_back_to_coming_soon_without_active_entry() {
    let api = StubApi::start().await;
    let console = console_for(&api.url);

    let resp = console.get("/purchase-orders").await;

    resp.assert_status_ok();
    let view: Value = resp.json();
    assert_eq!(view["page"]["kind"], "coming-soon");
    assert_eq!(view["title"], "Page Coming Soon");
    assert_eq!(
        view["page"]["body"],
        "This page is under development. Check back later!"
    );
    assert!(active_paths(&view).is_empty());
}

#[tokio::test]
async fn should_render_register_page_on_get() {
    let api = StubApi::start().await;
    let console = console_for(&api.url);

    let view: Value = console.get("/register").await.json();

    assert_eq!(view["page"]["kind"], "register");
    assert_eq!(active_paths(&view), ["/register"]);
}

#[tokio::test]
async fn should_render_loaded_listing() {
    let api = StubApi::start().await;
    api.set_users(vec![
        profile(2, "2025-03-02T00:00:00.000Z"),
        profile(1, "2025-03-01T00:00:00.000Z"),
    ]);
    let console = console_for(&api.url);

    let view: Value = console.get("/users").await.json();

    let listing = &view["page"]["listing"];
    assert_eq!(listing["state"], "loaded");
    assert_eq!(listing["records"].as_array().unwrap().len(), 2);
    assert_eq!(listing["records"][0]["id"], 2);
    assert!(listing["banner"].is_null());
    assert_eq!(listing["summary"], "2 users found");
}

#[tokio::test]
async fn should_render_empty_state_for_empty_store() {
    let api = StubApi::start().await;
    let console = console_for(&api.url);

    let view: Value = console.get("/users").await.json();

    let listing = &view["page"]["listing"];
    assert_eq!(listing["emptyMessage"], "No users found");
    assert!(listing["banner"].is_null());
}

#[tokio::test]
async fn should_render_banner_when_store_is_down() {
    let api = StubApi::start().await;
    api.set_store_down(true);
    let console = console_for(&api.url);

    let resp = console.get("/users").await;

    resp.assert_status_ok();
    let listing = &resp.json::<Value>()["page"]["listing"];
    assert_eq!(listing["state"], "errored");
    assert_eq!(listing["banner"], "profile store unavailable");
    assert!(listing["records"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn should_render_dismissed_banner_as_empty_table() {
    let api = StubApi::start().await;
    api.set_store_down(true);
    let console = console_for(&api.url);

    let view: Value = console.get("/users?dismissed=true").await.json();

    let listing = &view["page"]["listing"];
    assert_eq!(listing["state"], "errored");
    assert!(listing["banner"].is_null());
    assert!(listing["emptyMessage"].is_null());
    assert!(listing["records"].as_array().unwrap().is_empty());
    assert_eq!(active_paths(&view), ["/users"]);
}

#[tokio::test]
async fn should_ignore_dismissal_when_listing_loads() {
    let api = StubApi::start().await;
    api.set_users(vec![profile(1, "2025-03-01T00:00:00.000Z")]);
    let console = console_for(&api.url);

    let view: Value = console.get("/users?dismissed=true").await.json();

    let listing = &view["page"]["listing"];
    assert_eq!(listing["state"], "loaded");
    assert_eq!(listing["summary"], "1 user found");
}
