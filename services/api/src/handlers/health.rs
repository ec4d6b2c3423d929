use axum::{Json, extract::State, http::StatusCode};

use erp_core::health::{HealthStatus, health_response};

use crate::error::{ApiError, StoreError};
use crate::state::AppState;

/// `GET /api/health`. Liveness only; touches no dependency.
pub async fn health() -> (StatusCode, Json<HealthStatus>) {
    health_response(HealthStatus::running("ERP Server"))
}

/// `GET /api/ready`. 200 once the database answers a ping.
pub async fn ready(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state
        .db
        .ping()
        .await
        .map_err(|e| ApiError::StoreUnavailable(StoreError::Connection(e)))?;
    Ok(StatusCode::OK)
}
