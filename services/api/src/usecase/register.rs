use std::time::Duration;

use tokio::time::{Instant, sleep};
use uuid::Uuid;

use erp_domain::user::UserRole;

use crate::domain::repository::{IdentityProvider, ProfileRepository};
use crate::domain::types::{RegistrationInput, RegistrationOutcome, RejectReason};
use crate::error::AuthProviderError;

/// Bounded wait for the trigger-created profile row after sign-up.
#[derive(Debug, Clone, Copy)]
pub struct ProfileWait {
    /// Zero disables the wait.
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl ProfileWait {
    pub const DISABLED: Self = Self {
        timeout: Duration::ZERO,
        poll_interval: Duration::from_millis(250),
    };

    pub fn is_enabled(&self) -> bool {
        !self.timeout.is_zero()
    }
}

impl Default for ProfileWait {
    fn default() -> Self {
        Self::DISABLED
    }
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterUseCase<I: IdentityProvider, P: ProfileRepository> {
    pub identity: I,
    pub profiles: P,
    pub profile_wait: ProfileWait,
}

impl<I: IdentityProvider, P: ProfileRepository> RegisterUseCase<I, P> {
    /// Validate, sign up with the provider, then optionally wait for the profile row.
    ///
    /// Never fails: every path ends in one of the three outcomes.
    pub async fn execute(&self, input: RegistrationInput) -> RegistrationOutcome {
        let request = match input.into_sign_up() {
            Ok(request) => request,
            Err(failure) => {
                return RegistrationOutcome::Rejected(RejectReason::Validation(failure));
            }
        };

        if request.role == UserRole::Admin {
            tracing::warn!(email = %request.email, "self-registration requested admin role");
        }

        let outcome = match self.identity.sign_up(&request).await {
            Ok(outcome) => outcome,
            Err(err) => return reject(err),
        };
        tracing::info!(
            identity_id = %outcome.identity_id,
            pending_verification = outcome.pending_verification,
            "user registered"
        );

        let profile_visible = if self.profile_wait.is_enabled() {
            Some(self.wait_for_profile(outcome.identity_id).await)
        } else {
            None
        };

        RegistrationOutcome::Success {
            identity_id: outcome.identity_id,
            pending_verification: outcome.pending_verification,
            profile_visible,
        }
    }

    async fn wait_for_profile(&self, identity_id: Uuid) -> bool {
        let deadline = Instant::now() + self.profile_wait.timeout;
        loop {
            match self.profiles.find_by_auth_id(identity_id).await {
                Ok(Some(_)) => return true,
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(%identity_id, error = %err, "profile lookup failed while waiting");
                    return false;
                }
            }
            let now = Instant::now();
            if now >= deadline {
                tracing::info!(%identity_id, "profile not visible before wait elapsed");
                return false;
            }
            sleep(self.profile_wait.poll_interval.min(deadline - now)).await;
        }
    }
}

fn reject(err: AuthProviderError) -> RegistrationOutcome {
    let reason = match err {
        AuthProviderError::DuplicateEmail(m) => RejectReason::DuplicateEmail(m),
        AuthProviderError::WeakPassword(m) => RejectReason::WeakPassword(m),
        AuthProviderError::Rejected { message, .. } => RejectReason::Provider(message),
        // Sign-up never asks for credentials; treat these as plain refusals.
        AuthProviderError::InvalidCredentials(m) | AuthProviderError::EmailNotConfirmed(m) => {
            RejectReason::Provider(m)
        }
        AuthProviderError::Unavailable(source) => {
            tracing::warn!(error = format!("{source:#}"), "identity provider unavailable during sign-up");
            return RegistrationOutcome::Unavailable;
        }
    };
    RegistrationOutcome::Rejected(reason)
}
