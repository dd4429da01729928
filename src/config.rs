//! Lookup configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::validate::{Revision, UnknownRevision};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL '{0}' (expected http:// or https://)")]
    InvalidBaseUrl(String),
    #[error(transparent)]
    UnknownRevision(#[from] UnknownRevision),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Scheme and host of the lookup service, without a trailing slash.
    pub base_url: String,
    pub revision: Revision,
    pub timeouts: Timeouts,
}

impl LookupConfig {
    /// Build a config, normalizing and checking the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] unless `base_url` is http(s).
    pub fn new(base_url: &str, revision: Revision, timeouts: Timeouts) -> Result<Self, ConfigError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, revision, timeouts })
    }

    /// Build typed lookup config from environment variables.
    ///
    /// Optional:
    /// - `LOOKUP_BASE_URL`: default `http://127.0.0.1:3000`
    /// - `LOOKUP_REVISION`: `preview`, `query` or `json` (default)
    /// - `LOOKUP_REQUEST_TIMEOUT_SECS`: default 15
    /// - `LOOKUP_CONNECT_TIMEOUT_SECS`: default 5
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or revision cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("LOOKUP_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let revision = match std::env::var("LOOKUP_REVISION") {
            Ok(raw) => Revision::parse(&raw)?,
            Err(_) => Revision::Json,
        };
        let timeouts = Timeouts {
            request_secs: env_parse_u64("LOOKUP_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("LOOKUP_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Self::new(&base_url, revision, timeouts)
    }

    /// Full URL of the lookup endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/api/find-value", self.base_url)
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));
    match host {
        Some(host) if !host.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_owned())),
    }
}
