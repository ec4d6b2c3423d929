//! Mock identity provider.
//!
//! Serves the subset of the GoTrue HTTP API the ERP adapter uses
//! (`/auth/v1/signup`, `/auth/v1/token`, `/auth/v1/user`, `/auth/v1/logout`)
//! from an axum app bound to `127.0.0.1:0`. State is in memory and can be
//! inspected or steered from the test.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// API key the mock accepts in the `apikey` header.
pub const MOCK_API_KEY: &str = "test-anon-key";

/// Minimum password length enforced by the mock, matching the hosted default.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Lifetime reported for issued access tokens.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, Clone)]
struct MockUser {
    id: Uuid,
    email: String,
    password: String,
    confirmed_at: Option<String>,
    metadata: Value,
    created_at: String,
}

#[derive(Debug, Default)]
struct ProviderState {
    users: Vec<MockUser>,
    auto_confirm: bool,
    unavailable: bool,
    signup_calls: usize,
}

type Shared = Arc<Mutex<ProviderState>>;

fn lock(state: &Shared) -> MutexGuard<'_, ProviderState> {
    // A panicking test thread must not wedge the other handlers.
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Handle to a running mock provider. The server stops when the handle drops.
pub struct MockIdentityProvider {
    base_url: String,
    state: Shared,
    task: JoinHandle<()>,
}

impl MockIdentityProvider {
    /// Start a provider that requires email confirmation (sign-up returns no session).
    pub async fn start() -> Self {
        Self::start_with(false).await
    }

    /// Start a provider that confirms emails immediately and returns a session on sign-up.
    pub async fn start_auto_confirm() -> Self {
        Self::start_with(true).await
    }

    async fn start_with(auto_confirm: bool) -> Self {
        let state: Shared = Arc::new(Mutex::new(ProviderState {
            auto_confirm,
            ..ProviderState::default()
        }));
        let app = Router::new()
            .route("/auth/v1/signup", post(signup))
            .route("/auth/v1/token", post(token))
            .route("/auth/v1/user", get(user))
            .route("/auth/v1/logout", post(logout))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock identity provider");
        let port = listener.local_addr().expect("local addr").port();
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock identity provider");
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            state,
            task,
        }
    }

    /// Base URL to configure the adapter with.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Mark an email as verified, as if the user clicked the confirmation link.
    pub fn confirm_email(&self, email: &str) {
        let mut state = lock(&self.state);
        if let Some(user) = state.users.iter_mut().find(|u| u.email == email) {
            user.confirmed_at = Some(Utc::now().to_rfc3339());
        }
    }

    /// When set, every endpoint answers 503.
    pub fn set_unavailable(&self, unavailable: bool) {
        lock(&self.state).unavailable = unavailable;
    }

    /// Number of sign-up requests received (including rejected ones).
    pub fn signup_calls(&self) -> usize {
        lock(&self.state).signup_calls
    }

    /// Id issued to `email`, if registered.
    pub fn user_id(&self, email: &str) -> Option<Uuid> {
        lock(&self.state)
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.id)
    }

    /// Access token the mock issues for a user id.
    pub fn access_token_for(id: Uuid) -> String {
        format!("access-{id}")
    }
}

impl Drop for MockIdentityProvider {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn error(status: StatusCode, error_code: &str, msg: &str) -> Response {
    (
        status,
        Json(json!({ "code": status.as_u16(), "error_code": error_code, "msg": msg })),
    )
        .into_response()
}

/// Common gate: availability switch and API key check.
fn gate(state: &ProviderState, headers: &HeaderMap) -> Option<Response> {
    if state.unavailable {
        return Some(error(
            StatusCode::SERVICE_UNAVAILABLE,
            "unexpected_failure",
            "service unavailable",
        ));
    }
    let key = headers.get("apikey").and_then(|v| v.to_str().ok());
    if key != Some(MOCK_API_KEY) {
        return Some(
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Invalid API key" })),
            )
                .into_response(),
        );
    }
    None
}

fn user_json(user: &MockUser, identities: bool) -> Value {
    let identities = if identities {
        json!([{ "id": user.id, "provider": "email", "identity_data": { "email": user.email } }])
    } else {
        json!([])
    };
    json!({
        "id": user.id,
        "aud": "authenticated",
        "role": "authenticated",
        "email": user.email,
        "email_confirmed_at": user.confirmed_at,
        "user_metadata": user.metadata,
        "app_metadata": { "provider": "email" },
        "identities": identities,
        "created_at": user.created_at,
    })
}

fn session_json(user: &MockUser) -> Value {
    json!({
        "access_token": MockIdentityProvider::access_token_for(user.id),
        "refresh_token": format!("refresh-{}", user.id),
        "token_type": "bearer",
        "expires_in": ACCESS_TOKEN_TTL_SECS,
        "user": user_json(user, true),
    })
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn user_for_token<'a>(state: &'a ProviderState, headers: &HeaderMap) -> Option<&'a MockUser> {
    let token = bearer(headers)?;
    let id: Uuid = token.strip_prefix("access-")?.parse().ok()?;
    state.users.iter().find(|u| u.id == id)
}

#[derive(Deserialize)]
struct SignUpBody {
    email: String,
    password: String,
    #[serde(default)]
    data: Value,
}

async fn signup(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<SignUpBody>,
) -> Response {
    let mut state = lock(&state);
    if let Some(resp) = gate(&state, &headers) {
        return resp;
    }
    state.signup_calls += 1;

    if body.password.chars().count() < MIN_PASSWORD_LEN {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "weak_password",
            "Password should be at least 6 characters.",
        );
    }

    if let Some(existing) = state.users.iter().find(|u| u.email == body.email) {
        // With confirmations on the hosted service hides existing accounts
        // behind a user object with no identities.
        return if state.auto_confirm {
            error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "user_already_exists",
                "User already registered",
            )
        } else {
            let mut masked = existing.clone();
            masked.id = Uuid::new_v4();
            (StatusCode::OK, Json(user_json(&masked, false))).into_response()
        };
    }

    let now = Utc::now().to_rfc3339();
    let user = MockUser {
        id: Uuid::new_v4(),
        email: body.email,
        password: body.password,
        confirmed_at: state.auto_confirm.then(|| now.clone()),
        metadata: if body.data.is_null() { json!({}) } else { body.data },
        created_at: now,
    };
    let resp = if state.auto_confirm {
        session_json(&user)
    } else {
        user_json(&user, true)
    };
    state.users.push(user);
    (StatusCode::OK, Json(resp)).into_response()
}

#[derive(Deserialize)]
struct TokenBody {
    email: String,
    password: String,
}

async fn token(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<TokenBody>,
) -> Response {
    let state = lock(&state);
    if let Some(resp) = gate(&state, &headers) {
        return resp;
    }
    if query.get("grant_type").map(String::as_str) != Some("password") {
        return error(
            StatusCode::BAD_REQUEST,
            "validation_failed",
            "unsupported grant_type",
        );
    }
    let Some(user) = state
        .users
        .iter()
        .find(|u| u.email == body.email && u.password == body.password)
    else {
        return error(
            StatusCode::BAD_REQUEST,
            "invalid_credentials",
            "Invalid login credentials",
        );
    };
    if user.confirmed_at.is_none() {
        return error(
            StatusCode::BAD_REQUEST,
            "email_not_confirmed",
            "Email not confirmed",
        );
    }
    (StatusCode::OK, Json(session_json(user))).into_response()
}

async fn user(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = lock(&state);
    if let Some(resp) = gate(&state, &headers) {
        return resp;
    }
    match user_for_token(&state, &headers) {
        Some(user) => (StatusCode::OK, Json(user_json(user, true))).into_response(),
        None => error(StatusCode::UNAUTHORIZED, "bad_jwt", "invalid JWT"),
    }
}

async fn logout(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = lock(&state);
    if let Some(resp) = gate(&state, &headers) {
        return resp;
    }
    match user_for_token(&state, &headers) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => error(StatusCode::UNAUTHORIZED, "bad_jwt", "invalid JWT"),
    }
}
