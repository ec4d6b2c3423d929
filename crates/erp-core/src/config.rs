//! Environment-variable helpers for service configuration.
//!
//! Each service owns a typed config struct whose `from_env()` is built from
//! these helpers. Missing required variables are reported with the variable
//! name so startup fails with an actionable message.

use std::str::FromStr;

use anyhow::{Context as _, anyhow};

/// Read a required variable. Empty values count as missing.
pub fn required(name: &str) -> anyhow::Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(anyhow!("missing required environment variable {name}")),
    }
}

/// Read an optional variable, falling back to `default` when unset or empty.
pub fn optional_or(name: &str, default: &str) -> String {
    optional(name).unwrap_or_else(|| default.to_owned())
}

/// Read an optional variable. Empty values are treated as unset.
pub fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Parse an optional variable, falling back to `default` when unset.
///
/// A value that is present but unparsable is an error rather than silently
/// replaced by the default.
pub fn parse_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {name}: {raw:?}")),
        None => Ok(default),
    }
}
