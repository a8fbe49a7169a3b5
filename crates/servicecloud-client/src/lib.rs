//! ServiceCloud client — invoke named actions on logically-named services.
//!
//! A service is addressed by name, not by location. The client pings a
//! starting remote; a remote that is not authoritative for the requested
//! service/action answers with the next location to try, and the client
//! follows the chain — bounded by a TTL — before issuing the actual action
//! request. Location is queried live on every call; callers wanting caching
//! wrap the client themselves.
//!
//! ## Architecture
//!
//! - **Transport**: one JSON POST exchange ([`HttpTransport`] over reqwest,
//!   or any [`Transport`] implementation)
//! - **Resolver**: the ping/redirect protocol core ([`resolve`])
//! - **Client**: the [`ServiceClient`] facade plus one-shot free functions
//!
//! ```no_run
//! use servicecloud_client::{Remote, ServiceClient};
//!
//! # async fn demo() -> servicecloud_client::ClientResult<()> {
//! let remote = Remote::parse("http://gateway.internal:8080")?;
//! let client = ServiceClient::new("billing", remote)?;
//! let total: serde_json::Value = client
//!     .call("sumInvoices", &serde_json::json!({ "year": 2025 }))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod resolver;
pub mod transport;

pub use client::{call, information, BoundAction, ServiceClient};
pub use error::{ClientError, ClientResult};
pub use resolver::{resolve, Resolution, DEFAULT_TTL};
pub use transport::{request_data, HttpTransport, Transport};

pub use servicecloud_wire::message::{
    CallEnvelope, PingResponse, ServiceInformation, ServiceRequest,
};
pub use servicecloud_wire::remote::{Remote, RemoteParseError};
