//! HTTP transport to the solving service.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;
use tracing::{debug, warn};

use super::errors::SolveError;
use super::request::{Endpoint, SolveRequest};
use super::response::{detail_of, parse_reply, SolveReply};

/// Anything that can turn a [`SolveRequest`] into a reply.
///
/// The dispatcher only talks to this trait, so tests can swap the network out.
pub trait SolveTransport: Send + Sync {
    fn post(&self, request: &SolveRequest) -> Result<SolveReply, SolveError>;
}

/// Blocking `reqwest` client posting JSON to `{base_url}{endpoint}`
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport. `timeout` of `None` keeps the client's default.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, SolveError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SolveError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

impl SolveTransport for HttpTransport {
    fn post(&self, request: &SolveRequest) -> Result<SolveReply, SolveError> {
        let endpoint = request.endpoint();
        let url = self.url(endpoint);
        debug!(%url, "posting solve request");

        let response = self
            .client
            .post(&url)
            .header(USER_AGENT, format!("solvetty/{}", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .json(request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<Value>()
                .ok()
                .as_ref()
                .and_then(detail_of);
            warn!(status = status.as_u16(), ?detail, "solve request failed");
            return Err(SolveError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let body: Value = response
            .json()
            .map_err(|e| SolveError::Decode(e.to_string()))?;
        parse_reply(endpoint, body)
    }
}
