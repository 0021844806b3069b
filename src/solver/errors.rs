//! Transport-level failures of a solve request
//!
//! Application-level errors (a 2xx body with `status: "error"`) are not errors
//! here; they arrive as [`SolveReply::Rejected`](super::response::SolveReply).

use thiserror::Error;

/// Prefix shown before every transport-level failure
pub const SERVER_ERROR_PREFIX: &str = "SERVER_ERROR";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SolveError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status
    #[error("server returned status {status}")]
    Status {
        status: u16,
        /// FastAPI's `detail` field, when the body carried one
        detail: Option<String>,
    },

    /// A 2xx body that is not valid JSON or does not fit the endpoint's shape
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The HTTP client could not be built
    #[error("could not create HTTP client: {0}")]
    Client(String),
}

impl SolveError {
    /// Best-effort detail: the server's `detail` field, else the transport message
    pub fn detail(&self) -> String {
        match self {
            SolveError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            SolveError::Status {
                status,
                detail: None,
            } => format!("Request failed with status code {}", status),
            SolveError::Network(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Message shown to the user in place of a result
    pub fn user_message(&self) -> String {
        format!("{}: {}", SERVER_ERROR_PREFIX, self.detail())
    }
}

impl From<reqwest::Error> for SolveError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SolveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
