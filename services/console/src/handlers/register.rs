use axum::extract::rejection::JsonRejection;
use axum::{Json, extract::State};
use serde::Serialize;

use erp_core::error::AppError;

use crate::domain::repository::RegistrationGateway;
use crate::domain::types::{RegistrationForm, RegistrationReply};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RegisterFormView {
    pub success: bool,
    pub message: String,
    /// Invalid fields to highlight, by wire name.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl From<RegistrationReply> for RegisterFormView {
    fn from(reply: RegistrationReply) -> Self {
        match reply {
            RegistrationReply::Accepted { message, .. } => Self {
                success: true,
                message,
                fields: Vec::new(),
            },
            RegistrationReply::Refused {
                message, fields, ..
            } => Self {
                success: false,
                message,
                fields,
            },
        }
    }
}

// ── POST /register ───────────────────────────────────────────────────────────

pub async fn submit_registration(
    State(state): State<AppState>,
    form: Result<Json<RegistrationForm>, JsonRejection>,
) -> Result<Json<RegisterFormView>, AppError> {
    let form = match form {
        Ok(Json(form)) => form,
        Err(rejection) => {
            return Ok(Json(RegisterFormView {
                success: false,
                message: rejection.body_text(),
                fields: Vec::new(),
            }));
        }
    };
    let reply = state.registration_gateway().submit(&form).await?;
    if let RegistrationReply::Refused { kind, .. } = &reply {
        tracing::info!(kind = %kind, "registration refused");
    }
    Ok(Json(reply.into()))
}
