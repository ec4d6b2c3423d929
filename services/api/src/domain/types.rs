use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use erp_core::serde::string_or_empty;
use erp_domain::user::UserRole;

/// Local profile, a denormalized copy of an identity-provider user.
///
/// `auth_id` is a weak back-reference: the provider owns the identity, this
/// service owns only the profile row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub id: i64,
    pub auth_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Identity as reported by the provider for a live session.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub id: Uuid,
    pub email: Option<String>,
    pub email_confirmed: bool,
    /// Free-form attributes supplied at sign-up (`first_name`, `last_name`, `role`).
    pub metadata: Map<String, Value>,
}

/// Tokens issued by the provider on password sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access-token lifetime in seconds.
    pub expires_in: i64,
    pub identity: Identity,
}

/// Validated sign-up request handed to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

/// Provider result of a successful sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub identity_id: Uuid,
    pub email: String,
    /// True when the provider still expects the user to confirm their email.
    pub pending_verification: bool,
}

/// Registration form as posted to `POST /api/auth/register`.
///
/// Absent, null or mistyped fields decode as empty so validation reports them
/// by name instead of failing the whole body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(test, derive(serde::Serialize))]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationInput {
    #[validate(email)]
    #[serde(deserialize_with = "string_or_empty")]
    pub email: String,
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "string_or_empty")]
    pub password: String,
    #[validate(must_match(other = "password"))]
    #[serde(deserialize_with = "string_or_empty")]
    pub confirm_password: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(deserialize_with = "string_or_empty")]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(deserialize_with = "string_or_empty")]
    pub last_name: String,
    #[validate(custom(function = "known_role"))]
    #[serde(deserialize_with = "string_or_empty")]
    pub role: String,
}

/// `RegistrationInput` field name to the key it is posted under.
const REGISTRATION_FIELDS: [(&str, &str); 6] = [
    ("email", "email"),
    ("password", "password"),
    ("confirm_password", "confirmPassword"),
    ("first_name", "firstName"),
    ("last_name", "lastName"),
    ("role", "role"),
];

fn posted_name(field: &str) -> String {
    REGISTRATION_FIELDS
        .iter()
        .find(|(name, _)| *name == field)
        .map_or(field, |(_, posted)| posted)
        .to_owned()
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn known_role(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<UserRole>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("unknown_role"))
}

impl RegistrationInput {
    /// Validate every field and produce the provider request.
    pub fn into_sign_up(self) -> Result<SignUpRequest, ValidationFailure> {
        self.validate()?;
        let role = self
            .role
            .parse::<UserRole>()
            .map_err(|_| ValidationFailure::field("role"))?;
        Ok(SignUpRequest {
            email: self.email,
            password: self.password,
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            role,
        })
    }
}

/// Local input validation failure, listing offending fields by their posted names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid input: {}", .fields.join(", "))]
pub struct ValidationFailure {
    pub fields: Vec<String>,
}

impl ValidationFailure {
    pub fn field(name: &str) -> Self {
        Self {
            fields: vec![posted_name(name)],
        }
    }
}

impl From<ValidationErrors> for ValidationFailure {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|name| posted_name(name))
            .collect();
        fields.sort();
        Self { fields }
    }
}

/// Why a registration was turned down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Validation(ValidationFailure),
    DuplicateEmail(String),
    WeakPassword(String),
    /// Any other provider refusal, carrying the provider's message verbatim.
    Provider(String),
}

/// Terminal states of the registration workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Success {
        identity_id: Uuid,
        pending_verification: bool,
        /// `None` when the workflow did not wait for the profile row.
        profile_visible: Option<bool>,
    },
    Rejected(RejectReason),
    Unavailable,
}
