use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

/// Build the `{kind, message, ...}` JSON error envelope shared by all services.
///
/// `extra` fields are merged into the top-level object; `kind` and `message`
/// always win over keys of the same name in `extra`.
pub fn envelope(status: StatusCode, kind: &str, message: &str, extra: Map<String, Value>) -> Response {
    let mut body = extra;
    body.insert("kind".to_owned(), Value::from(kind));
    body.insert("message".to_owned(), Value::from(message));
    (status, axum::Json(Value::Object(body))).into_response()
}

/// Error for services that only front other services.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("upstream unavailable: {0}")]
    Upstream(String),
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Upstream(_) => "UPSTREAM_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(e) => tracing::error!(error = %e, kind = "INTERNAL", "internal error"),
            Self::Upstream(e) => tracing::warn!(error = %e, kind = "UPSTREAM_UNAVAILABLE", "upstream unavailable"),
        }
        envelope(self.status(), self.kind(), &self.to_string(), Map::new())
    }
}
