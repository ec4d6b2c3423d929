use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, header};
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::{Value, json};
use uuid::Uuid;

use erp_api::domain::repository::IdentityProvider as _;
use erp_api::domain::types::SignUpRequest;
use erp_api::infra::identity::HttpIdentityProvider;
use erp_api::router::build_router;
use erp_api::state::AppState;
use erp_api::usecase::register::ProfileWait;
use erp_api_schema::users;
use erp_domain::user::UserRole;
use erp_testing::identity::{MOCK_API_KEY, MockIdentityProvider};

// ── Test app ─────────────────────────────────────────────────────────────────

pub struct TestApp {
    pub server: TestServer,
    /// Kept alive for the duration of the test; dropping it stops the provider.
    pub provider: MockIdentityProvider,
}

pub async fn spawn_app(provider: MockIdentityProvider, db: Arc<DatabaseConnection>) -> TestApp {
    spawn_app_with_wait(provider, db, ProfileWait::DISABLED).await
}

pub async fn spawn_app_with_wait(
    provider: MockIdentityProvider,
    db: Arc<DatabaseConnection>,
    profile_wait: ProfileWait,
) -> TestApp {
    let identity = identity_client(&provider);
    let state = AppState {
        db,
        identity,
        profile_wait,
        cookie_secure: false,
    };
    TestApp {
        server: TestServer::new(build_router(state)).unwrap(),
        provider,
    }
}

pub fn identity_client(provider: &MockIdentityProvider) -> HttpIdentityProvider {
    HttpIdentityProvider::new(
        provider.url(),
        MOCK_API_KEY.to_owned(),
        Duration::from_secs(5),
    )
    .unwrap()
}

/// Register `email` directly with the provider, bypassing the API.
pub async fn sign_up_user(provider: &MockIdentityProvider, email: &str) -> Uuid {
    identity_client(provider)
        .sign_up(&SignUpRequest {
            email: email.to_owned(),
            password: "secret1".to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            role: UserRole::Staff,
        })
        .await
        .unwrap()
        .identity_id
}

/// A connection with no scripted results; any query against it errors.
pub fn empty_db() -> Arc<DatabaseConnection> {
    Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}

pub fn db_with(results: Vec<Vec<users::Model>>) -> Arc<DatabaseConnection> {
    let db = results
        .into_iter()
        .fold(MockDatabase::new(DatabaseBackend::Postgres), |db, rows| {
            db.append_query_results([rows])
        })
        .into_connection();
    Arc::new(db)
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn registration(email: &str) -> Value {
    json!({
        "email": email,
        "password": "secret1",
        "confirmPassword": "secret1",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "role": "staff",
    })
}

pub fn profile_row(id: i64, auth_id: Uuid, role: &str, created_at: DateTime<Utc>) -> users::Model {
    users::Model {
        id,
        auth_id,
        email: format!("user{id}@example.com"),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        role: role.into(),
        created_at,
    }
}

pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    )
}
