#![allow(async_fn_in_trait)]

use crate::domain::types::{ProfileRow, RegistrationForm, RegistrationReply};
use crate::error::ApiClientError;

/// Anything that can produce the full profile list.
pub trait ProfileSource: Send + Sync {
    async fn fetch_profiles(&self) -> Result<Vec<ProfileRow>, ApiClientError>;
}

/// Forwards registration forms to the API server.
pub trait RegistrationGateway: Send + Sync {
    async fn submit(&self, form: &RegistrationForm) -> Result<RegistrationReply, ApiClientError>;
}
