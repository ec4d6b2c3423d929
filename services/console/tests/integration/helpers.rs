use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_test::TestServer;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use erp_console::infra::api::ApiClient;
use erp_console::router::build_router;
use erp_console::state::AppState;

// ── Stub API server ──────────────────────────────────────────────────────────

#[derive(Default)]
struct StubState {
    users: Vec<Value>,
    store_down: bool,
    register_calls: usize,
}

type Shared = Arc<Mutex<StubState>>;

/// Minimal stand-in for the API server, bound to `127.0.0.1:0`.
pub struct StubApi {
    pub url: String,
    state: Shared,
    task: JoinHandle<()>,
}

impl StubApi {
    pub async fn start() -> Self {
        let state: Shared = Arc::default();
        let app = Router::new()
            .route("/api/health", get(|| async { StatusCode::OK }))
            .route("/api/users", get(list_users))
            .route("/api/auth/register", post(register))
            .with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            url: format!("http://127.0.0.1:{port}"),
            state,
            task,
        }
    }

    pub fn set_users(&self, users: Vec<Value>) {
        self.state.lock().unwrap().users = users;
    }

    pub fn set_store_down(&self, down: bool) {
        self.state.lock().unwrap().store_down = down;
    }

    pub fn register_calls(&self) -> usize {
        self.state.lock().unwrap().register_calls
    }
}

impl Drop for StubApi {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn envelope(status: StatusCode, kind: &str, message: &str) -> Response {
    (status, Json(json!({ "kind": kind, "message": message }))).into_response()
}

async fn list_users(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    if state.store_down {
        return envelope(
            StatusCode::SERVICE_UNAVAILABLE,
            "STORE_UNAVAILABLE",
            "profile store unavailable",
        );
    }
    Json(state.users.clone()).into_response()
}

async fn register(State(state): State<Shared>, Json(form): Json<Value>) -> Response {
    state.lock().unwrap().register_calls += 1;
    match form["email"].as_str().unwrap_or_default() {
        "taken@x.com" => envelope(
            StatusCode::CONFLICT,
            "DUPLICATE_EMAIL",
            "User already registered",
        ),
        "down@x.com" => envelope(
            StatusCode::SERVICE_UNAVAILABLE,
            "PROVIDER_UNAVAILABLE",
            "identity provider unavailable",
        ),
        _ if form["firstName"].as_str().unwrap_or_default().is_empty() => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "kind": "VALIDATION",
                "message": "invalid input: firstName",
                "fields": ["firstName"],
            })),
        )
            .into_response(),
        _ => (
            StatusCode::CREATED,
            Json(json!({
                "outcome": "success",
                "userId": "7f1b7a5e-4d3c-4a7e-9d57-1f6f1b0e9a10",
                "pendingVerification": true,
                "profileVisible": null,
                "message": "User registered successfully! Please check your email to verify your account.",
            })),
        )
            .into_response(),
    }
}

// ── Console under test ───────────────────────────────────────────────────────

pub fn console_for(api_url: &str) -> TestServer {
    let api = ApiClient::new(api_url, Duration::from_secs(2)).unwrap();
    TestServer::new(build_router(AppState { api })).unwrap()
}

pub fn profile(id: i64, created_at: &str) -> Value {
    json!({
        "id": id,
        "authId": "0b6f2b3e-8a59-4d5c-9a43-3c1b9f4f2d11",
        "email": format!("user{id}@example.com"),
        "firstName": "Ada",
        "lastName": "Lovelace",
        "role": "staff",
        "createdAt": created_at,
    })
}

pub fn form(email: &str) -> Value {
    json!({
        "email": email,
        "password": "secret1",
        "confirmPassword": "secret1",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "role": "staff",
    })
}
