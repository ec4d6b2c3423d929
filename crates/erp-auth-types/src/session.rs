//! Session-token extractor.

use axum::extract::FromRequestParts;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt as _};
use http::StatusCode;
use http::request::Parts;

use crate::cookie::ERP_ACCESS_TOKEN;

/// Provider-issued access token presented by the caller.
///
/// Read from `Authorization: Bearer <token>` first, then from the
/// `erp_access_token` cookie. Returns 401 when neither is present or the value
/// is blank. The token is opaque here; the identity provider validates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_parts(parts: &Parts) -> Option<Self> {
        let bearer = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .map(|auth| auth.token().to_owned());
        let token = bearer.or_else(|| {
            CookieJar::from_headers(&parts.headers)
                .get(ERP_ACCESS_TOKEN)
                .map(|c| c.value().to_owned())
        })?;
        let token = token.trim();
        (!token.is_empty()).then(|| Self(token.to_owned()))
    }
}

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Extract synchronously and return a 'static future so no borrow of
    // `parts` is captured across the await point.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = Self::from_parts(parts);
        async move { token.ok_or(StatusCode::UNAUTHORIZED) }
    }
}
