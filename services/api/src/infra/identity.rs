use std::time::Duration;

use anyhow::{Context as _, anyhow};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::domain::repository::IdentityProvider;
use crate::domain::types::{Identity, Session, SignUpOutcome, SignUpRequest};
use crate::error::AuthProviderError;

/// GoTrue-compatible identity provider reached over HTTPS.
#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpIdentityProvider {
    /// Build the client once; every request inherits `timeout`.
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("build identity provider HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, AuthProviderError> {
        request
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                AuthProviderError::Unavailable(
                    anyhow::Error::new(e).context("identity provider request failed"),
                )
            })
    }

    async fn check(response: Response) -> Result<Response, AuthProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.json::<ProviderErrorBody>().await.unwrap_or_default();
        Err(classify(status, &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AuthProviderError> {
        response.json::<T>().await.map_err(|e| {
            AuthProviderError::Unavailable(
                anyhow::Error::new(e).context("unreadable identity provider response"),
            )
        })
    }
}

impl IdentityProvider for HttpIdentityProvider {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthProviderError> {
        let body = json!({
            "email": request.email,
            "password": request.password,
            "data": {
                "first_name": request.first_name,
                "last_name": request.last_name,
                "role": request.role.as_str(),
            },
        });
        let response = self
            .dispatch(
                self.client
                    .post(self.endpoint("signup"))
                    .bearer_auth(&self.api_key)
                    .json(&body),
            )
            .await?;
        let response = Self::check(response).await?;

        match Self::decode::<SignUpResponse>(response).await? {
            SignUpResponse::Session(session) => Ok(SignUpOutcome {
                identity_id: session.user.id,
                email: session.user.email.unwrap_or_else(|| request.email.clone()),
                pending_verification: false,
            }),
            // An existing address comes back as a decoy user without identities.
            SignUpResponse::User(user) if matches!(user.identities.as_deref(), Some([])) => {
                Err(AuthProviderError::DuplicateEmail(
                    "User already registered".to_owned(),
                ))
            }
            SignUpResponse::User(user) => Ok(SignUpOutcome {
                identity_id: user.id,
                pending_verification: user.email_confirmed_at.is_none(),
                email: user.email.unwrap_or_else(|| request.email.clone()),
            }),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthProviderError> {
        let response = self
            .dispatch(
                self.client
                    .post(self.endpoint("token?grant_type=password"))
                    .json(&json!({ "email": email, "password": password })),
            )
            .await?;
        let response = Self::check(response).await?;
        let session = Self::decode::<ProviderSession>(response).await?;
        Ok(session.into())
    }

    async fn current_session(
        &self,
        access_token: &str,
    ) -> Result<Option<Identity>, AuthProviderError> {
        let response = self
            .dispatch(self.client.get(self.endpoint("user")).bearer_auth(access_token))
            .await?;
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }
        let response = Self::check(response).await?;
        let user = Self::decode::<ProviderUser>(response).await?;
        Ok(Some(user.into()))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthProviderError> {
        let response = self
            .dispatch(self.client.post(self.endpoint("logout")).bearer_auth(access_token))
            .await?;
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
        ) {
            return Ok(());
        }
        Self::check(response).await?;
        Ok(())
    }
}

// ── Provider wire types ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: Uuid,
    email: Option<String>,
    email_confirmed_at: Option<String>,
    #[serde(default)]
    user_metadata: Map<String, Value>,
    identities: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ProviderSession {
    access_token: String,
    refresh_token: String,
    token_type: String,
    expires_in: i64,
    user: ProviderUser,
}

/// Sign-up answers with a session when confirmation is off, a bare user otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(ProviderSession),
    User(ProviderUser),
}

impl From<ProviderUser> for Identity {
    fn from(user: ProviderUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            email_confirmed: user.email_confirmed_at.is_some(),
            metadata: user.user_metadata,
        }
    }
}

impl From<ProviderSession> for Session {
    fn from(session: ProviderSession) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            token_type: session.token_type,
            expires_in: session.expires_in,
            identity: session.user.into(),
        }
    }
}

/// Error body in either dialect the provider speaks:
/// `{code|error_code, msg|message}` or `{error, error_description}`.
#[derive(Debug, Default, Deserialize)]
struct ProviderErrorBody {
    code: Option<Value>,
    error_code: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

impl ProviderErrorBody {
    fn code(&self) -> Option<&str> {
        self.error_code
            .as_deref()
            .or_else(|| self.code.as_ref().and_then(Value::as_str))
            .or(self.error.as_deref())
    }

    fn message(&self) -> String {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error_description.as_deref())
            .or(self.error.as_deref())
            .unwrap_or("identity provider rejected the request")
            .to_owned()
    }
}

fn classify(status: StatusCode, body: &ProviderErrorBody) -> AuthProviderError {
    let message = body.message();
    if status.is_server_error() {
        return AuthProviderError::Unavailable(anyhow!(
            "identity provider returned {status}: {message}"
        ));
    }
    let lowered = message.to_lowercase();
    match body.code() {
        Some("user_already_exists" | "email_exists") => {
            AuthProviderError::DuplicateEmail(message)
        }
        Some("weak_password") => AuthProviderError::WeakPassword(message),
        Some("invalid_credentials" | "invalid_grant") => {
            AuthProviderError::InvalidCredentials(message)
        }
        Some("email_not_confirmed") => AuthProviderError::EmailNotConfirmed(message),
        _ if lowered.contains("already registered") => AuthProviderError::DuplicateEmail(message),
        _ if status == StatusCode::UNPROCESSABLE_ENTITY && lowered.contains("password") => {
            AuthProviderError::WeakPassword(message)
        }
        _ => AuthProviderError::Rejected {
            status: status.as_u16(),
            message,
        },
    }
}
