use axum::Json;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Body of the public health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

impl HealthStatus {
    /// A healthy status reporting that `service` is running.
    pub fn running(service: &str) -> Self {
        Self {
            status: "OK".to_owned(),
            message: format!("{service} is running"),
        }
    }
}

/// Handler for `GET /healthz`, a bare liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Wrap a [`HealthStatus`] as a 200 JSON response.
pub fn health_response(status: HealthStatus) -> (StatusCode, Json<HealthStatus>) {
    (StatusCode::OK, Json(status))
}
