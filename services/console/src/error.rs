use erp_core::error::AppError;

/// Failures talking to the API server.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("API server unreachable")]
    Transport(#[source] reqwest::Error),
    /// Non-success status; `message` is the API's own error message when it sent one.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unreadable API response")]
    Decode(#[source] reqwest::Error),
}

impl From<ApiClientError> for AppError {
    fn from(err: ApiClientError) -> Self {
        AppError::Upstream(err.to_string())
    }
}
