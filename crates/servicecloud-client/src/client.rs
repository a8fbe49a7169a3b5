//! Client facade — resolve, invoke, and enumerate a service's actions.
//!
//! [`ServiceClient`] binds a `(service, remote)` pair; the free functions
//! serve one-shot use without constructing a client. Every operation
//! resolves the authoritative remote first, live — nothing is cached, so a
//! service that moves between calls is found again on the next one.

use crate::error::ClientResult;
use crate::resolver::{resolve, Resolution, DEFAULT_TTL};
use crate::transport::{request_data, HttpTransport, Transport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use servicecloud_wire::message::{ServiceInformation, ServiceRequest};
use servicecloud_wire::remote::Remote;
use std::collections::HashMap;
use std::sync::Arc;

/// Invoke `action_name` on `service_name`, resolving the authoritative
/// remote first. Resolution errors propagate verbatim.
pub async fn call(
    transport: &dyn Transport,
    service_name: &str,
    action_name: &str,
    remote: &Remote,
    data: Value,
    ttl: u32,
) -> ClientResult<Value> {
    let resolved = resolve(transport, service_name, Some(action_name), remote, ttl).await?;
    let request = ServiceRequest::Execute {
        action_name: resolved
            .action_name
            .unwrap_or_else(|| action_name.to_string()),
        data,
    };
    request_data(transport, service_name, &resolved.remote, &request).await
}

/// Fetch a service's capability description.
///
/// Resolves with no action name ("just identify yourself"), then issues an
/// `info` request against the resolved remote.
pub async fn information(
    transport: &dyn Transport,
    service_name: &str,
    remote: &Remote,
    ttl: u32,
) -> ClientResult<ServiceInformation> {
    let resolved = resolve(transport, service_name, None, remote, ttl).await?;
    let data = request_data(
        transport,
        &resolved.service_name,
        &resolved.remote,
        &ServiceRequest::Info,
    )
    .await?;
    Ok(serde_json::from_value(data)?)
}

/// An action bound to its service and starting remote, callable without
/// further lookup.
///
/// Holds the *starting* remote, not a resolved one: each call resolves
/// afresh, so a bound handle never goes stale.
#[derive(Clone)]
pub struct BoundAction {
    service_name: String,
    action_name: String,
    remote: Remote,
    transport: Arc<dyn Transport>,
    ttl: u32,
}

impl BoundAction {
    /// Name of the bound action.
    pub fn name(&self) -> &str {
        &self.action_name
    }

    /// Invoke the bound action with an untyped payload.
    pub async fn call(&self, data: Value) -> ClientResult<Value> {
        call(
            self.transport.as_ref(),
            &self.service_name,
            &self.action_name,
            &self.remote,
            data,
            self.ttl,
        )
        .await
    }
}

/// A client bound to one `(service, remote)` pair.
#[derive(Clone)]
pub struct ServiceClient {
    service_name: String,
    remote: Remote,
    transport: Arc<dyn Transport>,
    ttl: u32,
}

impl ServiceClient {
    /// Client over the built-in HTTP transport.
    pub fn new(service_name: impl Into<String>, remote: Remote) -> ClientResult<Self> {
        Ok(Self::with_transport(
            service_name,
            remote,
            Arc::new(HttpTransport::new()?),
        ))
    }

    /// Client over a caller-supplied transport.
    pub fn with_transport(
        service_name: impl Into<String>,
        remote: Remote,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            remote,
            transport,
            ttl: DEFAULT_TTL,
        }
    }

    /// Override the resolution hop budget (default 100).
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// The service name this client is bound to.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// The starting remote this client is bound to.
    pub fn remote(&self) -> &Remote {
        &self.remote
    }

    /// Resolve the authoritative remote for one action.
    pub async fn resolve(&self, action_name: &str) -> ClientResult<Resolution> {
        resolve(
            self.transport.as_ref(),
            &self.service_name,
            Some(action_name),
            &self.remote,
            self.ttl,
        )
        .await
    }

    /// Invoke an action with an untyped JSON payload.
    pub async fn call_raw(&self, action_name: &str, data: Value) -> ClientResult<Value> {
        call(
            self.transport.as_ref(),
            &self.service_name,
            action_name,
            &self.remote,
            data,
            self.ttl,
        )
        .await
    }

    /// Invoke an action with typed request and response payloads.
    ///
    /// The payload shape is a contract between the caller and the action;
    /// the protocol passes it through uninspected.
    pub async fn call<I, O>(&self, action_name: &str, data: &I) -> ClientResult<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let raw = self.call_raw(action_name, serde_json::to_value(data)?).await?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Fetch the service's capability description. Never cached.
    pub async fn information(&self) -> ClientResult<ServiceInformation> {
        information(
            self.transport.as_ref(),
            &self.service_name,
            &self.remote,
            self.ttl,
        )
        .await
    }

    /// Names of the service's actions.
    pub async fn list_actions(&self) -> ClientResult<Vec<String>> {
        Ok(self.information().await?.actions)
    }

    /// Bind every advertised action to a directly callable handle.
    ///
    /// Returns a lookup table keyed by action name; callers index the table
    /// instead of relying on dynamically materialized members.
    pub async fn expand_actions(&self) -> ClientResult<HashMap<String, BoundAction>> {
        let actions = self.list_actions().await?;
        Ok(actions
            .into_iter()
            .map(|name| {
                (
                    name.clone(),
                    BoundAction {
                        service_name: self.service_name.clone(),
                        action_name: name,
                        remote: self.remote.clone(),
                        transport: Arc::clone(&self.transport),
                        ttl: self.ttl,
                    },
                )
            })
            .collect())
    }
}
