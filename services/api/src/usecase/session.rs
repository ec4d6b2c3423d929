use crate::domain::repository::IdentityProvider;
use crate::domain::types::{Identity, Session, ValidationFailure};
use crate::error::ApiError;

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<I: IdentityProvider> {
    pub identity: I,
}

impl<I: IdentityProvider> LoginUseCase<I> {
    pub async fn execute(&self, input: LoginInput) -> Result<Session, ApiError> {
        let mut missing = Vec::new();
        if input.email.trim().is_empty() {
            missing.push("email".to_owned());
        }
        if input.password.is_empty() {
            missing.push("password".to_owned());
        }
        if !missing.is_empty() {
            return Err(ValidationFailure { fields: missing }.into());
        }

        let session = self
            .identity
            .sign_in(input.email.trim(), &input.password)
            .await?;
        tracing::info!(identity_id = %session.identity.id, "session issued");
        Ok(session)
    }
}

// ── CurrentSession ───────────────────────────────────────────────────────────

pub struct CurrentSessionUseCase<I: IdentityProvider> {
    pub identity: I,
}

impl<I: IdentityProvider> CurrentSessionUseCase<I> {
    pub async fn execute(&self, access_token: &str) -> Result<Identity, ApiError> {
        self.identity
            .current_session(access_token)
            .await?
            .ok_or(ApiError::Unauthorized)
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<I: IdentityProvider> {
    pub identity: I,
}

impl<I: IdentityProvider> LogoutUseCase<I> {
    pub async fn execute(&self, access_token: &str) -> Result<(), ApiError> {
        self.identity.sign_out(access_token).await?;
        Ok(())
    }
}
