use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::DbErr;
use serde_json::{Map, Value};

use erp_core::error::envelope;

use crate::domain::types::{RejectReason, ValidationFailure};

/// Failures reported by the identity-provider adapter.
#[derive(Debug, thiserror::Error)]
pub enum AuthProviderError {
    #[error("{0}")]
    DuplicateEmail(String),
    #[error("{0}")]
    WeakPassword(String),
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{0}")]
    EmailNotConfirmed(String),
    /// Any other 4xx, with the provider's message verbatim.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// Transport failure, timeout, 5xx or an unreadable response.
    #[error("identity provider unavailable")]
    Unavailable(#[source] anyhow::Error),
}

/// Failures reported by the profile store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("profile store connection failed")]
    Connection(#[source] DbErr),
    #[error("profile store query failed")]
    Query(#[source] DbErr),
    /// A stored row violates a domain invariant.
    #[error("corrupt profile row: {0}")]
    Corrupt(String),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::Connection(err),
            _ => Self::Query(err),
        }
    }
}

/// API server error variants, one per client-visible failure kind.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    /// Body could not be read as a JSON object.
    #[error("{0}")]
    MalformedBody(#[from] JsonRejection),
    #[error("{0}")]
    DuplicateEmail(String),
    #[error("{0}")]
    WeakPassword(String),
    #[error("{0}")]
    ProviderRejected(String),
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{0}")]
    EmailNotConfirmed(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("identity provider unavailable")]
    ProviderUnavailable(#[source] anyhow::Error),
    #[error("profile store unavailable")]
    StoreUnavailable(#[source] StoreError),
    #[error("profile store error")]
    Store(#[source] StoreError),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) => "VALIDATION",
            Self::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::ProviderRejected(_) => "PROVIDER_REJECTED",
            Self::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            Self::EmailNotConfirmed(_) => "EMAIL_NOT_CONFIRMED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::ProviderUnavailable(_) => "PROVIDER_UNAVAILABLE",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Store(_) => "STORE_ERROR",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) | Self::ProviderRejected(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::DuplicateEmail(_) => StatusCode::CONFLICT,
            Self::WeakPassword(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidCredentials(_) | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::EmailNotConfirmed(_) => StatusCode::FORBIDDEN,
            Self::ProviderUnavailable(_) | Self::StoreUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthProviderError> for ApiError {
    fn from(err: AuthProviderError) -> Self {
        match err {
            AuthProviderError::DuplicateEmail(m) => Self::DuplicateEmail(m),
            AuthProviderError::WeakPassword(m) => Self::WeakPassword(m),
            AuthProviderError::InvalidCredentials(m) => Self::InvalidCredentials(m),
            AuthProviderError::EmailNotConfirmed(m) => Self::EmailNotConfirmed(m),
            AuthProviderError::Rejected { message, .. } => Self::ProviderRejected(message),
            AuthProviderError::Unavailable(e) => Self::ProviderUnavailable(e),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Connection(_) => Self::StoreUnavailable(err),
            _ => Self::Store(err),
        }
    }
}

impl From<RejectReason> for ApiError {
    fn from(reason: RejectReason) -> Self {
        match reason {
            RejectReason::Validation(v) => Self::Validation(v),
            RejectReason::DuplicateEmail(m) => Self::DuplicateEmail(m),
            RejectReason::WeakPassword(m) => Self::WeakPassword(m),
            RejectReason::Provider(m) => Self::ProviderRejected(m),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // 4xx are recorded by TraceLayer; only server-side faults are logged, with their cause chain.
        match &self {
            Self::Internal(e) | Self::ProviderUnavailable(e) => {
                tracing::error!(error = format!("{e:#}"), kind = self.kind(), "request failed");
            }
            Self::Store(e) | Self::StoreUnavailable(e) => {
                tracing::error!(error = %e, cause = ?std::error::Error::source(e), kind = self.kind(), "request failed");
            }
            _ => {}
        }
        let mut extra = Map::new();
        match &self {
            Self::Validation(v) => {
                extra.insert("fields".to_owned(), Value::from(v.fields.clone()));
            }
            Self::MalformedBody(_) => {
                extra.insert("fields".to_owned(), Value::Array(Vec::new()));
            }
            _ => {}
        }
        envelope(self.status(), self.kind(), &self.to_string(), extra)
    }
}
