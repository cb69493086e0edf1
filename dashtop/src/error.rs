//! Error types for the data path. Rendering never fails: absent regions and a
//! missing chart backend are logged no-ops, not errors.

use thiserror::Error;

use crate::api::Endpoint;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (connect, timeout, body read).
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: Endpoint, status: u16 },

    /// The body was not the JSON shape we expected.
    #[error("{endpoint} returned malformed JSON: {source}")]
    Parse {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid backend URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("cannot load TLS CA '{path}': {reason}")]
    TlsCa { path: String, reason: String },

    #[error("building HTTP client failed: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// Network-level failure (no response or an error status), as opposed to a
    /// response we could not parse.
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Request { .. } | FetchError::Status { .. })
    }
}
