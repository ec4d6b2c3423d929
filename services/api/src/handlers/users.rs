use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use erp_auth_types::session::SessionToken;
use erp_core::serde::to_rfc3339_ms;
use erp_domain::user::UserRole;

use crate::domain::types::ProfileRecord;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::profile::{CurrentProfileUseCase, ListProfilesUseCase};
use crate::usecase::session::CurrentSessionUseCase;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i64,
    pub auth_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<ProfileRecord> for ProfileResponse {
    fn from(p: ProfileRecord) -> Self {
        Self {
            id: p.id,
            auth_id: p.auth_id,
            email: p.email,
            first_name: p.first_name,
            last_name: p.last_name,
            role: p.role,
            created_at: p.created_at,
        }
    }
}

// ── GET /api/users ───────────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let usecase = ListProfilesUseCase {
        profiles: state.profile_repo(),
    };
    let profiles = usecase.execute().await?;
    Ok(Json(profiles.into_iter().map(Into::into).collect()))
}

// ── GET /api/users/me ────────────────────────────────────────────────────────

pub async fn get_me(
    State(state): State<AppState>,
    token: Result<SessionToken, StatusCode>,
) -> Result<Json<Option<ProfileResponse>>, ApiError> {
    let token = token.map_err(|_| ApiError::Unauthorized)?;
    let identity = CurrentSessionUseCase {
        identity: state.identity_provider(),
    }
    .execute(token.as_str())
    .await?;

    let usecase = CurrentProfileUseCase {
        profiles: state.profile_repo(),
    };
    let profile = usecase.execute(identity.id).await?;
    Ok(Json(profile.map(Into::into)))
}
