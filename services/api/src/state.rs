use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::infra::db::DbProfileRepository;
use crate::infra::identity::HttpIdentityProvider;
use crate::usecase::register::ProfileWait;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub identity: HttpIdentityProvider,
    pub profile_wait: ProfileWait,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn identity_provider(&self) -> HttpIdentityProvider {
        self.identity.clone()
    }
}
