use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use erp_core::serde::string_or_empty;
use erp_domain::user::UserRole;

/// One row of the user table, as served by `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRow {
    pub id: i64,
    pub auth_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Registration form as submitted; the API validates it.
///
/// Mistyped fields are forwarded as empty strings so the API names them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationForm {
    #[serde(deserialize_with = "string_or_empty")]
    pub email: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub password: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub confirm_password: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub first_name: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub last_name: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub role: String,
}

/// What the API said about a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationReply {
    Accepted {
        message: String,
        pending_verification: bool,
    },
    /// Validation failure or provider refusal, with the message to show verbatim.
    Refused {
        kind: String,
        message: String,
        fields: Vec<String>,
    },
}
