use axum::{Router, routing::get};

use erp_core::health::healthz;
use erp_core::middleware::with_http_stack;

use crate::handlers::{health::readyz, register::submit_registration, shell::render};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // The register page also takes the form submission
        .route("/register", get(render).post(submit_registration))
        // Every other GET renders the shell
        .fallback(get(render))
        .with_state(state);
    with_http_stack(router)
}
