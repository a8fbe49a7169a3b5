//! Resolver — converge on the authoritative remote for a service/action.
//!
//! A caller starts from a possibly stale or proxying remote. Each hop pings
//! the current candidate; the candidate either confirms authority or names
//! the next `(service, action, remote)` triple to try. A TTL bounds the
//! chain and is the only cycle protection: two remotes redirecting to each
//! other burn budget until the TTL expires, they are never detected early.

use crate::error::{ClientError, ClientResult};
use crate::transport::{request_data, Transport};
use servicecloud_wire::message::{PingResponse, ServiceRequest};
use servicecloud_wire::remote::Remote;
use tracing::debug;

/// Default hop budget for a resolution chain.
pub const DEFAULT_TTL: u32 = 100;

/// The authoritative location of a service/action pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub service_name: String,
    /// Absent when the caller only asked the service to identify itself.
    pub action_name: Option<String>,
    pub remote: Remote,
}

/// Follow ping redirects from `remote` until a responder claims authority
/// for `(service_name, action_name)` or the TTL runs out.
///
/// Hops are strictly sequential; each one decrements the budget, and the
/// decremented value goes on the wire. Transport failures propagate
/// unchanged, with no retry at this layer.
pub async fn resolve(
    transport: &dyn Transport,
    service_name: &str,
    action_name: Option<&str>,
    remote: &Remote,
    ttl: u32,
) -> ClientResult<Resolution> {
    let mut service = service_name.to_string();
    let mut action = action_name.map(str::to_string);
    let mut remote = remote.clone();
    let mut ttl = ttl;

    loop {
        if ttl == 0 {
            return Err(ClientError::TtlExpired);
        }

        let ping = ServiceRequest::Ping {
            service_name: service.clone(),
            action_name: action.clone(),
            ttl: ttl - 1,
        };
        // Pings target the remote itself, not a service path.
        let data = request_data(transport, "", &remote, &ping).await?;
        let response: PingResponse = serde_json::from_value(data)?;

        if is_authoritative(&response, &service, action.as_deref(), &remote) {
            return Ok(Resolution {
                service_name: service,
                action_name: action,
                remote,
            });
        }

        let next_service = response
            .service_name
            .ok_or_else(|| ClientError::MalformedPing("redirect without a service name".into()))?;
        let next_remote = response
            .remote
            .ok_or_else(|| ClientError::MalformedPing("redirect without a remote".into()))?;

        debug!(
            service = %next_service,
            address = %next_remote.address,
            ttl,
            "redirected"
        );

        service = next_service;
        action = response.action_name;
        remote = next_remote;
        ttl -= 1;
    }
}

/// A responder is authoritative when it says so outright, or when it echoes
/// back exactly the triple it was asked about. Both checks are kept; a
/// server may set `found` or rely on the echo, and either ends the chain.
fn is_authoritative(
    response: &PingResponse,
    service: &str,
    action: Option<&str>,
    remote: &Remote,
) -> bool {
    if response.found {
        return true;
    }
    response.service_name.as_deref() == Some(service)
        && response.action_name.as_deref() == action
        && response
            .remote
            .as_ref()
            .is_some_and(|r| r.equivalent(remote))
}
