//! ServiceCloud wire protocol — the data model shared by clients and servers.
//!
//! Every exchange is a JSON document POSTed over HTTP. This crate holds the
//! protocol types only; it performs no I/O.
//!
//! ## Architecture
//!
//! - **Remote**: a network endpoint with default-aware equivalence
//! - **ServiceRequest**: the tagged request union (`info` / `ping` / `execute`)
//! - **CallEnvelope**: the `{success, error, data}` response wrapper
//! - **PingResponse** / **ServiceInformation**: payloads carried in `data`

pub mod message;
pub mod remote;

pub use message::{CallEnvelope, PingResponse, ServiceInformation, ServiceRequest};
pub use remote::{Remote, RemoteParseError};
