use axum::{
    Router,
    routing::{get, post},
};

use erp_core::middleware::with_http_stack;

use crate::handlers::{
    auth::{login, logout, register, session},
    health::{health, ready},
    users::{get_me, list_users},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/api/health", get(health))
        .route("/api/ready", get(ready))
        // Auth
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/session", get(session))
        .route("/api/auth/logout", post(logout))
        // Users
        .route("/api/users", get(list_users))
        .route("/api/users/me", get(get_me))
        .with_state(state);
    with_http_stack(router)
}
