//! Cookie builders for the provider-issued session tokens.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the access token.
pub const ERP_ACCESS_TOKEN: &str = "erp_access_token";

/// Cookie name for the refresh token.
pub const ERP_REFRESH_TOKEN: &str = "erp_refresh_token";

/// Path scope of the refresh-token cookie; only auth endpoints ever see it.
pub const REFRESH_TOKEN_PATH: &str = "/api/auth";

fn session_cookie(
    name: &'static str,
    value: String,
    path: &'static str,
    max_age: Duration,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path(path)
        .max_age(max_age)
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Store both session tokens on the jar.
///
/// The access cookie lives as long as the provider says the access token does;
/// the refresh cookie is kept for `refresh_max_age_secs`.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use erp_auth_types::cookie::{set_session_cookies, ERP_ACCESS_TOKEN, ERP_REFRESH_TOKEN};
///
/// let jar = set_session_cookies(CookieJar::new(), "a".into(), "r".into(), 3600, 604800, true);
/// let access = jar.get(ERP_ACCESS_TOKEN).unwrap();
/// assert_eq!(access.path(), Some("/"));
/// assert_eq!(access.max_age(), Some(time::Duration::seconds(3600)));
/// assert!(access.http_only().unwrap_or(false));
/// assert!(access.secure().unwrap_or(false));
/// let refresh = jar.get(ERP_REFRESH_TOKEN).unwrap();
/// assert_eq!(refresh.path(), Some("/api/auth"));
/// ```
pub fn set_session_cookies(
    jar: CookieJar,
    access_token: String,
    refresh_token: String,
    access_max_age_secs: i64,
    refresh_max_age_secs: i64,
    secure: bool,
) -> CookieJar {
    let access = session_cookie(
        ERP_ACCESS_TOKEN,
        access_token,
        "/",
        Duration::seconds(access_max_age_secs),
        secure,
    );
    let refresh = session_cookie(
        ERP_REFRESH_TOKEN,
        refresh_token,
        REFRESH_TOKEN_PATH,
        Duration::seconds(refresh_max_age_secs),
        secure,
    );
    jar.add(access).add(refresh)
}

/// Clear both session cookies by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use erp_auth_types::cookie::{clear_session_cookies, ERP_ACCESS_TOKEN, ERP_REFRESH_TOKEN};
///
/// let jar = clear_session_cookies(CookieJar::new(), false);
/// assert_eq!(jar.get(ERP_ACCESS_TOKEN).unwrap().max_age(), Some(time::Duration::ZERO));
/// assert_eq!(jar.get(ERP_REFRESH_TOKEN).unwrap().max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookies(jar: CookieJar, secure: bool) -> CookieJar {
    let access = session_cookie(ERP_ACCESS_TOKEN, String::new(), "/", Duration::ZERO, secure);
    let refresh = session_cookie(
        ERP_REFRESH_TOKEN,
        String::new(),
        REFRESH_TOKEN_PATH,
        Duration::ZERO,
        secure,
    );
    jar.add(access).add(refresh)
}
