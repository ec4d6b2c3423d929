use axum::extract::rejection::JsonRejection;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use erp_auth_types::cookie::{clear_session_cookies, set_session_cookies};
use erp_auth_types::session::SessionToken;
use erp_core::serde::string_or_empty;

use crate::domain::types::{Identity, RegistrationInput, RegistrationOutcome};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::register::RegisterUseCase;
use crate::usecase::session::{CurrentSessionUseCase, LoginInput, LoginUseCase, LogoutUseCase};

/// Refresh-token cookie lifetime: one week.
const REFRESH_TOKEN_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

const REGISTERED_PENDING_MESSAGE: &str =
    "User registered successfully! Please check your email to verify your account.";
const REGISTERED_MESSAGE: &str = "User registered successfully!";

/// Collapse a missing or blank token into the API's own 401 envelope.
fn require_session(token: Result<SessionToken, StatusCode>) -> Result<SessionToken, ApiError> {
    token.map_err(|_| ApiError::Unauthorized)
}

// ── POST /api/auth/register ──────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub outcome: &'static str,
    pub user_id: Uuid,
    pub pending_verification: bool,
    pub profile_visible: Option<bool>,
    pub message: &'static str,
}

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegistrationInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = body?;
    let usecase = RegisterUseCase {
        identity: state.identity_provider(),
        profiles: state.profile_repo(),
        profile_wait: state.profile_wait,
    };

    let outcome = usecase.execute(input).await;

    match outcome {
        RegistrationOutcome::Success {
            identity_id,
            pending_verification,
            profile_visible,
        } => Ok((
            StatusCode::CREATED,
            Json(RegisterResponse {
                outcome: "success",
                user_id: identity_id,
                pending_verification,
                profile_visible,
                message: if pending_verification {
                    REGISTERED_PENDING_MESSAGE
                } else {
                    REGISTERED_MESSAGE
                },
            }),
        )),
        RegistrationOutcome::Rejected(reason) => Err(reason.into()),
        RegistrationOutcome::Unavailable => Err(ApiError::ProviderUnavailable(anyhow::anyhow!(
            "sign-up could not reach the identity provider"
        ))),
    }
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "string_or_empty")]
    pub email: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
    pub user: SessionUser,
}

#[derive(Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let usecase = LoginUseCase {
        identity: state.identity_provider(),
    };
    let session = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = set_session_cookies(
        jar,
        session.access_token.clone(),
        session.refresh_token.clone(),
        session.expires_in,
        REFRESH_TOKEN_MAX_AGE_SECS,
        state.cookie_secure,
    );

    let body = LoginResponse {
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        expires_in: session.expires_in,
        token_type: session.token_type,
        user: SessionUser {
            id: session.identity.id,
            email: session.identity.email,
        },
    };
    Ok((jar, Json(body)))
}

// ── GET /api/auth/session ────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: Uuid,
    pub email: Option<String>,
    pub email_confirmed: bool,
    pub metadata: Map<String, Value>,
}

impl From<Identity> for SessionResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            email_confirmed: identity.email_confirmed,
            metadata: identity.metadata,
        }
    }
}

pub async fn session(
    State(state): State<AppState>,
    token: Result<SessionToken, StatusCode>,
) -> Result<Json<SessionResponse>, ApiError> {
    let token = require_session(token)?;
    let usecase = CurrentSessionUseCase {
        identity: state.identity_provider(),
    };
    let identity = usecase.execute(token.as_str()).await?;
    Ok(Json(identity.into()))
}

// ── POST /api/auth/logout ────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    token: Result<SessionToken, StatusCode>,
) -> Result<impl IntoResponse, ApiError> {
    // Without a token there is nothing to revoke; still clear whatever cookies linger.
    if let Ok(token) = token {
        let usecase = LogoutUseCase {
            identity: state.identity_provider(),
        };
        usecase.execute(token.as_str()).await?;
    }
    let jar = clear_session_cookies(jar, state.cookie_secure);
    Ok((StatusCode::NO_CONTENT, jar))
}
