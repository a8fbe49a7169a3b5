//! Error types for the client.

use servicecloud_wire::remote::RemoteParseError;
use thiserror::Error;

/// Message used when a failed envelope omits one.
pub(crate) const UNKNOWN_ERROR: &str = "Unknown error";

/// Errors surfaced by resolution and invocation.
///
/// Each error scopes to the single resolve/call chain that produced it;
/// nothing is retried or swallowed at this layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Malformed remote URL. Fails synchronously, before any I/O.
    #[error(transparent)]
    Remote(#[from] RemoteParseError),

    /// Connection-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with a non-success HTTP status.
    #[error("Error {status} - {message}")]
    Status { status: u16, message: String },

    /// The redirect budget ran out before the chain converged.
    #[error("TTL expired")]
    TtlExpired,

    /// The service reported failure (`success: false` in the envelope).
    #[error("{0}")]
    Application(String),

    /// A ping response that neither confirms authority nor names a usable
    /// next hop.
    #[error("Malformed ping response: {0}")]
    MalformedPing(String),

    /// A payload failed to decode.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias for Result with ClientError.
pub type ClientResult<T> = Result<T, ClientError>;
