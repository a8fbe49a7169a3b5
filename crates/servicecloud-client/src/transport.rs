//! Transport — one JSON POST exchange against a computed URL.
//!
//! The [`Transport`] trait is the seam between the protocol core and the
//! network. Implementations perform a single request/response and interpret
//! nothing beyond the HTTP layer; envelope semantics live in
//! [`request_data`], which every request type (ping, info, execute) goes
//! through.

use crate::error::{ClientError, ClientResult, UNKNOWN_ERROR};
use async_trait::async_trait;
use serde_json::Value;
use servicecloud_wire::message::{CallEnvelope, ServiceRequest};
use servicecloud_wire::remote::Remote;
use std::time::Duration;
use tracing::debug;

/// A single request/response exchange. No retries, no caching.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `request` to `url` and return the decoded envelope.
    ///
    /// A non-success HTTP status is a transport error, distinct from an
    /// envelope with `success: false`.
    async fn exchange(&self, url: &str, request: &ServiceRequest) -> ClientResult<CallEnvelope>;
}

/// Send `request` to `service_name` at `remote` and unwrap the envelope.
///
/// `success: false` becomes [`ClientError::Application`] (falling back to
/// `"Unknown error"` when the server omitted a message); `success: true`
/// yields `data`, defaulting to JSON `null` when omitted.
pub async fn request_data(
    transport: &dyn Transport,
    service_name: &str,
    remote: &Remote,
    request: &ServiceRequest,
) -> ClientResult<Value> {
    let url = remote.service_url(service_name);
    let envelope = transport.exchange(&url, request).await?;
    if !envelope.success {
        return Err(ClientError::Application(
            envelope.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        ));
    }
    Ok(envelope.data.unwrap_or(Value::Null))
}

/// Request timeout applied by [`HttpTransport::new`].
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The built-in HTTP transport, backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Transport with a 30-second request timeout.
    pub fn new() -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// Transport over a caller-configured reqwest client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn exchange(&self, url: &str, request: &ServiceRequest) -> ClientResult<CallEnvelope> {
        debug!(%url, "POST");
        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }
        Ok(response.json::<CallEnvelope>().await?)
    }
}
