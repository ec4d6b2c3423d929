#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{Identity, ProfileRecord, Session, SignUpOutcome, SignUpRequest};
use crate::error::{AuthProviderError, StoreError};

/// Port to the hosted identity provider.
///
/// Calls are surfaced to the caller as-is: no retries, no backoff.
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthProviderError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthProviderError>;

    /// Resolve an access token to its identity. An expired or unknown token is `Ok(None)`.
    async fn current_session(
        &self,
        access_token: &str,
    ) -> Result<Option<Identity>, AuthProviderError>;

    /// Revoke the session behind `access_token`. Already-invalid tokens are not an error.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthProviderError>;
}

/// Read access to the local `users` relation.
///
/// Rows are created by a database trigger, so there is no insert here.
pub trait ProfileRepository: Send + Sync {
    /// Exact match on the provider id; zero rows is `Ok(None)`.
    async fn find_by_auth_id(&self, auth_id: Uuid) -> Result<Option<ProfileRecord>, StoreError>;

    /// Every profile, newest first. Unpaginated.
    async fn list_all(&self) -> Result<Vec<ProfileRecord>, StoreError>;
}
