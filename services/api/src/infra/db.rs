use std::sync::Arc;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use erp_api_schema::users;
use erp_domain::user::UserRole;

use crate::domain::repository::ProfileRepository;
use crate::domain::types::ProfileRecord;
use crate::error::StoreError;

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: Arc<DatabaseConnection>,
}

impl ProfileRepository for DbProfileRepository {
    async fn find_by_auth_id(&self, auth_id: Uuid) -> Result<Option<ProfileRecord>, StoreError> {
        let model = users::Entity::find()
            .filter(users::Column::AuthId.eq(auth_id))
            .one(self.db.as_ref())
            .await?;
        model.map(profile_from_model).transpose()
    }

    async fn list_all(&self) -> Result<Vec<ProfileRecord>, StoreError> {
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .order_by_desc(users::Column::Id)
            .all(self.db.as_ref())
            .await?;
        models.into_iter().map(profile_from_model).collect()
    }
}

fn profile_from_model(m: users::Model) -> Result<ProfileRecord, StoreError> {
    let role = m
        .role
        .parse::<UserRole>()
        .map_err(|e| StoreError::Corrupt(format!("user {}: {e}", m.id)))?;
    Ok(ProfileRecord {
        id: m.id,
        auth_id: m.auth_id,
        email: m.email,
        first_name: m.first_name,
        last_name: m.last_name,
        role,
        created_at: m.created_at,
    })
}
