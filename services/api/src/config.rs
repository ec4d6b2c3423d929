use std::time::Duration;

use anyhow::{Context as _, anyhow, ensure};
use url::Url;

use erp_core::config::{optional, optional_or, parse_or, required};

use crate::usecase::register::ProfileWait;

/// API server configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// Identity provider base URL. Env var: `SUPABASE_URL`.
    pub provider_url: String,
    /// Public (anon) API key sent with every provider call. Env var: `SUPABASE_ANON_KEY`.
    pub provider_api_key: String,
    /// Postgres URL, either `DATABASE_URL` or assembled from the `DB_*` parts.
    pub database_url: String,
    pub production: bool,
    /// Allowed CORS origin (default `http://localhost:3000`). Env var: `CLIENT_URL`.
    pub client_url: String,
    /// TCP port for the HTTP server (default 5000). Env var: `PORT`.
    pub port: u16,
    pub identity_timeout: Duration,
    pub profile_wait: ProfileWait,
    pub cookie_secure: bool,
}

/// Connection parts used when `DATABASE_URL` is not set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbParts {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let provider_url = required("SUPABASE_URL")?;
        Url::parse(&provider_url).with_context(|| format!("invalid SUPABASE_URL {provider_url:?}"))?;
        let provider_api_key = required("SUPABASE_ANON_KEY")?;

        let environment = optional("APP_ENV")
            .or_else(|| optional("NODE_ENV"))
            .unwrap_or_else(|| "development".to_owned());
        let production = environment == "production";

        let database_url = match optional("DATABASE_URL") {
            Some(url) => url,
            None => database_url(
                &DbParts {
                    host: optional_or("DB_HOST", "localhost"),
                    port: parse_or("DB_PORT", 5432)?,
                    name: optional_or("DB_NAME", "postgres"),
                    user: optional_or("DB_USER", "postgres"),
                    password: optional("DB_PASSWORD").unwrap_or_default(),
                },
                production,
            )?,
        };

        Ok(Self {
            provider_url,
            provider_api_key,
            database_url,
            production,
            client_url: optional_or("CLIENT_URL", "http://localhost:3000"),
            port: parse_or("PORT", 5000)?,
            identity_timeout: Duration::from_secs(parse_or("IDENTITY_TIMEOUT_SECS", 10)?),
            profile_wait: profile_wait(
                parse_or("PROFILE_WAIT_MS", 0)?,
                parse_or("PROFILE_POLL_MS", 250)?,
            )?,
            cookie_secure: parse_or("COOKIE_SECURE", production)?,
        })
    }
}

/// Profile-visibility wait from its millisecond settings. A zero timeout disables it.
pub fn profile_wait(timeout_ms: u64, poll_ms: u64) -> anyhow::Result<ProfileWait> {
    let wait = ProfileWait {
        timeout: Duration::from_millis(timeout_ms),
        poll_interval: Duration::from_millis(poll_ms),
    };
    ensure!(
        !wait.is_enabled() || !wait.poll_interval.is_zero(),
        "PROFILE_POLL_MS must be greater than 0 when PROFILE_WAIT_MS is set"
    );
    Ok(wait)
}

/// Assemble a Postgres URL from its parts; production connections require TLS.
pub fn database_url(parts: &DbParts, production: bool) -> anyhow::Result<String> {
    let mut url = Url::parse(&format!("postgres://{}", parts.host))
        .with_context(|| format!("invalid DB_HOST {:?}", parts.host))?;
    url.set_port(Some(parts.port))
        .map_err(|()| anyhow!("cannot set port on database URL"))?;
    url.set_username(&parts.user)
        .map_err(|()| anyhow!("cannot set user on database URL"))?;
    if !parts.password.is_empty() {
        url.set_password(Some(&parts.password))
            .map_err(|()| anyhow!("cannot set password on database URL"))?;
    }
    url.set_path(&parts.name);
    if production {
        url.query_pairs_mut().append_pair("sslmode", "require");
    }
    Ok(url.into())
}
