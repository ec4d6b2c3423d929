use uuid::Uuid;

use crate::domain::repository::ProfileRepository;
use crate::domain::types::ProfileRecord;
use crate::error::ApiError;

// ── ListProfiles ─────────────────────────────────────────────────────────────

pub struct ListProfilesUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> ListProfilesUseCase<P> {
    pub async fn execute(&self) -> Result<Vec<ProfileRecord>, ApiError> {
        Ok(self.profiles.list_all().await?)
    }
}

// ── CurrentProfile ───────────────────────────────────────────────────────────

/// The caller's own profile. `None` while the trigger has not produced it yet.
pub struct CurrentProfileUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> CurrentProfileUseCase<P> {
    pub async fn execute(&self, identity_id: Uuid) -> Result<Option<ProfileRecord>, ApiError> {
        Ok(self.profiles.find_by_auth_id(identity_id).await?)
    }
}
