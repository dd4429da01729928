//! Client for the employee lookup endpoint.
//!
//! DESIGN
//! ======
//! [`LookupService`] is the seam between the form controller and the
//! network so the controller can be driven by a mock in tests.
//! [`HttpLookupService`] is the reqwest implementation and speaks both
//! request shapes the endpoint has accepted over time (GET with a `name`
//! query parameter, POST with a `{"name": …}` body).
//!
//! ERROR HANDLING
//! ==============
//! The `{status, data}` body is authoritative. When the body is not
//! decodable and the HTTP status is not 2xx, the HTTP status is used with
//! an empty payload, so a bare `429` from a proxy still reads as rate
//! limited.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::config::{LookupConfig, Timeouts};
use crate::record::LookupResult;
use crate::validate::Revision;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    #[error("lookup request timed out")]
    Timeout,

    /// Connection or transfer failure.
    #[error("lookup request failed: {0}")]
    Request(String),

    #[error("lookup response parse failed: {0}")]
    Decode(String),
}

/// Body of a lookup call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupRequest {
    pub name: String,
}

impl LookupRequest {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Trait for looking up an employee by name.
#[async_trait::async_trait]
pub trait LookupService: Send + Sync {
    /// Perform exactly one lookup call.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] on transport failure, timeout, or an
    /// undecodable success body.
    async fn find(&self, request: &LookupRequest) -> Result<LookupResult, LookupError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStyle {
    /// `GET <endpoint>?name=<name>`
    Query,
    /// `POST <endpoint>` with `{"name": <name>}`
    Json,
}

impl RequestStyle {
    /// Request shape used by `revision`; `None` when it never calls out.
    #[must_use]
    pub fn for_revision(revision: Revision) -> Option<Self> {
        match revision {
            Revision::Preview => None,
            Revision::Query => Some(Self::Query),
            Revision::Json => Some(Self::Json),
        }
    }

    fn method(self) -> &'static str {
        match self {
            Self::Query => "GET",
            Self::Json => "POST",
        }
    }
}

pub struct HttpLookupService {
    http: reqwest::Client,
    endpoint: String,
    style: RequestStyle,
}

impl HttpLookupService {
    /// Build a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::HttpClientBuild`] if reqwest rejects the settings.
    pub fn new(endpoint: impl Into<String>, style: RequestStyle, timeouts: Timeouts) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LookupError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, endpoint: endpoint.into(), style })
    }

    /// Build a client from typed config. The preview revision never calls
    /// out, so it gets the JSON style.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::HttpClientBuild`] if reqwest rejects the settings.
    pub fn from_config(config: &LookupConfig) -> Result<Self, LookupError> {
        let style = RequestStyle::for_revision(config.revision).unwrap_or(RequestStyle::Json);
        Self::new(config.endpoint(), style, config.timeouts)
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn style(&self) -> RequestStyle {
        self.style
    }
}

#[async_trait::async_trait]
impl LookupService for HttpLookupService {
    async fn find(&self, request: &LookupRequest) -> Result<LookupResult, LookupError> {
        let builder = match self.style {
            RequestStyle::Query => self.http.get(&self.endpoint).query(&[("name", request.name.as_str())]),
            RequestStyle::Json => self.http.post(&self.endpoint).json(request),
        };

        let response = builder.send().await.map_err(request_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(request_error)?;
        debug!(method = self.style.method(), endpoint = %self.endpoint, %status, "lookup response");

        decode_response(status, &body)
    }
}

fn request_error(error: reqwest::Error) -> LookupError {
    if error.is_timeout() {
        LookupError::Timeout
    } else {
        LookupError::Request(error.to_string())
    }
}

fn decode_response(http_status: u16, body: &[u8]) -> Result<LookupResult, LookupError> {
    match serde_json::from_slice::<LookupResult>(body) {
        Ok(result) => Ok(result),
        Err(_) if !(200..300).contains(&http_status) => Ok(LookupResult::empty(http_status)),
        Err(e) => Err(LookupError::Decode(e.to_string())),
    }
}
