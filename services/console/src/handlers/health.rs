use axum::{extract::State, http::StatusCode};

use erp_core::error::AppError;

use crate::state::AppState;

/// `GET /readyz`. Ready once the API server answers its health check.
pub async fn readyz(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.api.ping().await?;
    Ok(StatusCode::OK)
}
