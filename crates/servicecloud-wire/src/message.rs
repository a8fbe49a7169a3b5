//! Wire message types.
//!
//! Requests are a union tagged by `type`. Every response, whatever the
//! request, arrives wrapped in a [`CallEnvelope`]; protocol payloads
//! ([`PingResponse`], [`ServiceInformation`]) ride in the envelope's `data`
//! field.

use crate::remote::Remote;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request POSTed to a remote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServiceRequest {
    /// Ask a service to describe itself.
    Info,
    /// Ask a remote whether it is authoritative for a service/action, or
    /// whether it knows who is. `action_name` absent means "just identify
    /// yourself".
    #[serde(rename_all = "camelCase")]
    Ping {
        service_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        action_name: Option<String>,
        ttl: u32,
    },
    /// Invoke an action with an opaque payload the protocol never inspects.
    #[serde(rename_all = "camelCase")]
    Execute { action_name: String, data: Value },
}

/// Answer to a `ping` request.
///
/// `found` means the responder is authoritative for the queried pair.
/// Otherwise the populated fields name the next location to try.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResponse {
    #[serde(default)]
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<Remote>,
}

/// The `{success, error, data}` wrapper around every response body.
///
/// Application-level failure (`success: false`) is distinct from
/// transport-level failure (a non-2xx status, which never reaches this
/// type).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl CallEnvelope {
    /// A successful envelope carrying `data`.
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    /// A failed envelope carrying an error message.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            data: None,
        }
    }
}

/// A service's capability description, returned for `info` requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInformation {
    pub name: String,
    pub actions: Vec<String>,
    #[serde(default)]
    pub system_actions: Vec<String>,
}
