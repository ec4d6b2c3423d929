use std::time::Duration;

use anyhow::Context as _;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use crate::domain::repository::{ProfileSource, RegistrationGateway};
use crate::domain::types::{ProfileRow, RegistrationForm, RegistrationReply};
use crate::error::ApiClientError;

/// reqwest client for the ERP API server.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("build API HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Liveness of the API server, for the console's readiness probe.
    pub async fn ping(&self) -> Result<(), ApiClientError> {
        let response = self
            .client
            .get(self.endpoint("/api/health"))
            .send()
            .await
            .map_err(ApiClientError::Transport)?;
        expect_success(response).await.map(|_| ())
    }
}

/// `{kind, message, fields?}` as produced by the API's error mapper.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    kind: String,
    message: Option<String>,
    #[serde(default)]
    fields: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterAccepted {
    message: String,
    pending_verification: bool,
}

async fn expect_success(response: Response) -> Result<Response, ApiClientError> {
    if response.status().is_success() {
        return Ok(response);
    }
    Err(status_error(response).await)
}

async fn status_error(response: Response) -> ApiClientError {
    let status = response.status();
    let envelope = response.json::<ErrorEnvelope>().await.unwrap_or_default();
    ApiClientError::Status {
        status: status.as_u16(),
        message: envelope
            .message
            .unwrap_or_else(|| format!("API server returned {status}")),
    }
}

impl ProfileSource for ApiClient {
    async fn fetch_profiles(&self) -> Result<Vec<ProfileRow>, ApiClientError> {
        let response = self
            .client
            .get(self.endpoint("/api/users"))
            .send()
            .await
            .map_err(ApiClientError::Transport)?;
        expect_success(response)
            .await?
            .json()
            .await
            .map_err(ApiClientError::Decode)
    }
}

impl RegistrationGateway for ApiClient {
    async fn submit(&self, form: &RegistrationForm) -> Result<RegistrationReply, ApiClientError> {
        let response = self
            .client
            .post(self.endpoint("/api/auth/register"))
            .json(form)
            .send()
            .await
            .map_err(ApiClientError::Transport)?;

        let status = response.status();
        if status.is_success() {
            let accepted: RegisterAccepted =
                response.json().await.map_err(ApiClientError::Decode)?;
            return Ok(RegistrationReply::Accepted {
                message: accepted.message,
                pending_verification: accepted.pending_verification,
            });
        }
        // Rejections are answers, not failures; outages stay errors.
        if status.is_client_error() && status != StatusCode::UNAUTHORIZED {
            let envelope = response.json::<ErrorEnvelope>().await.unwrap_or_default();
            return Ok(RegistrationReply::Refused {
                kind: envelope.kind,
                message: envelope
                    .message
                    .unwrap_or_else(|| "Registration failed".to_owned()),
                fields: envelope.fields,
            });
        }
        Err(status_error(response).await)
    }
}
