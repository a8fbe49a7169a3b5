//! Remote endpoint model — where a service may currently live.
//!
//! A [`Remote`] names a network location as `(address, port, protocol, path)`
//! with well-known defaults for everything but the address. Two remotes are
//! *equivalent* when each field is either literally equal or one side carries
//! the default while the other is absent; the resolver uses this to decide
//! that a redirect chain has converged.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// Port assumed when a remote omits one.
pub const DEFAULT_PORT: u16 = 80;
/// Protocol assumed when a remote omits one, colon included as on the wire.
pub const DEFAULT_PROTOCOL: &str = "http:";
/// Path assumed when a remote omits one.
pub const DEFAULT_PATH: &str = "";

/// Errors from parsing a remote URL string.
#[derive(Debug, Error)]
pub enum RemoteParseError {
    #[error("Malformed remote URL: {0}")]
    Malformed(#[from] url::ParseError),
    #[error("Remote URL has no host: {0}")]
    MissingHost(String),
}

/// A network endpoint at which a service may currently be reachable.
///
/// Immutable value type; constructed fresh on every parse, compared by
/// structure only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remote {
    /// Host name or IP address.
    pub address: String,
    /// TCP port; absent means 80.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// URL scheme with trailing colon (`"http:"`); absent means `"http:"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Base path under which services are mounted; absent means none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Remote {
    /// A remote with only an address, every other field at its default.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            port: None,
            protocol: None,
            path: None,
        }
    }

    /// Parse a URL string into its structured form. No network I/O.
    ///
    /// Scheme-default ports (80 for http) stay absent, as does an empty or
    /// bare-`/` path. Fails on malformed URLs and URLs without a host; the
    /// address is never silently defaulted.
    pub fn parse(input: &str) -> Result<Self, RemoteParseError> {
        let url = Url::parse(input)?;
        let address = url
            .host_str()
            .ok_or_else(|| RemoteParseError::MissingHost(input.to_string()))?
            .to_string();
        let path = match url.path() {
            "" | "/" => None,
            p => Some(p.to_string()),
        };
        Ok(Self {
            address,
            port: url.port(),
            protocol: Some(format!("{}:", url.scheme())),
            path,
        })
    }

    /// A copy with every default filled in explicitly.
    ///
    /// Idempotent under [`Remote::equivalent`]: a remote is always
    /// equivalent to its normalized form.
    pub fn normalized(&self) -> Self {
        Self {
            address: self.address.clone(),
            port: Some(self.port.unwrap_or(DEFAULT_PORT)),
            protocol: Some(
                self.protocol
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PROTOCOL.to_string()),
            ),
            path: Some(self.path.clone().unwrap_or_else(|| DEFAULT_PATH.to_string())),
        }
    }

    /// Field-wise equality where an absent field matches the default.
    ///
    /// `{address: "h"}` is equivalent to
    /// `{address: "h", port: 80, protocol: "http:", path: ""}`, but not to
    /// any remote with a non-default port, protocol, or path.
    pub fn equivalent(&self, other: &Remote) -> bool {
        self.address == other.address
            && is_same(self.port.as_ref(), other.port.as_ref(), &DEFAULT_PORT)
            && is_same(
                self.protocol.as_deref(),
                other.protocol.as_deref(),
                DEFAULT_PROTOCOL,
            )
            && is_same(self.path.as_deref(), other.path.as_deref(), DEFAULT_PATH)
    }

    /// Build the absolute URL used to reach `service_name` at this remote.
    ///
    /// Leading slashes are stripped from the service name, leading and
    /// trailing slashes from the path; a non-empty path is re-prefixed with
    /// a single slash. Never fails for a structurally valid remote —
    /// malformed hosts or protocols pass through uninterpreted.
    pub fn service_url(&self, service_name: &str) -> String {
        let service = service_name.trim_start_matches('/');
        let path = self
            .path
            .as_deref()
            .unwrap_or(DEFAULT_PATH)
            .trim_start_matches('/')
            .trim_end_matches('/');
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("/{path}")
        };
        format!(
            "{}//{}:{}{}/{}",
            self.protocol.as_deref().unwrap_or(DEFAULT_PROTOCOL),
            self.address,
            self.port.unwrap_or(DEFAULT_PORT),
            prefix,
            service,
        )
    }
}

impl FromStr for Remote {
    type Err = RemoteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Remote::parse(s)
    }
}

/// Equal, or one side is the default while the other is absent.
fn is_same<T: PartialEq + ?Sized>(a: Option<&T>, b: Option<&T>, default: &T) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => x == y,
        (Some(x), None) | (None, Some(x)) => x == default,
        (None, None) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_url() {
        let remote = Remote::parse("https://gateway.internal:8443/api/v1").unwrap();
        assert_eq!(remote.address, "gateway.internal");
        assert_eq!(remote.port, Some(8443));
        assert_eq!(remote.protocol.as_deref(), Some("https:"));
        assert_eq!(remote.path.as_deref(), Some("/api/v1"));
    }

    #[test]
    fn test_parse_bare_host_leaves_port_and_path_absent() {
        let remote = Remote::parse("http://example.com").unwrap();
        assert_eq!(remote.address, "example.com");
        assert_eq!(remote.port, None);
        assert_eq!(remote.protocol.as_deref(), Some("http:"));
        assert_eq!(remote.path, None);
    }

    #[test]
    fn test_parse_scheme_default_port_stays_absent() {
        let remote = Remote::parse("http://example.com:80/").unwrap();
        assert_eq!(remote.port, None);
        assert_eq!(remote.path, None);
    }

    #[test]
    fn test_parse_malformed_url_fails() {
        assert!(Remote::parse("not a url").is_err());
    }

    #[test]
    fn test_parse_missing_host_fails() {
        let err = Remote::parse("mailto:someone@example.com").unwrap_err();
        assert!(matches!(err, RemoteParseError::MissingHost(_)));
    }

    #[test]
    fn test_from_str() {
        let remote: Remote = "http://h:9000".parse().unwrap();
        assert_eq!(remote.address, "h");
        assert_eq!(remote.port, Some(9000));
    }

    #[test]
    fn test_equivalent_to_normalized() {
        let remotes = [
            Remote::new("h"),
            Remote::parse("http://h:8080/base").unwrap(),
            Remote {
                address: "h".to_string(),
                port: Some(80),
                protocol: None,
                path: Some("/x".to_string()),
            },
        ];
        for remote in &remotes {
            assert!(remote.equivalent(&remote.normalized()));
            assert!(remote.normalized().equivalent(remote));
            // Normalization is idempotent.
            assert_eq!(remote.normalized(), remote.normalized().normalized());
        }
    }

    #[test]
    fn test_equivalent_default_substitution() {
        let bare = Remote::new("h");
        let explicit = Remote {
            address: "h".to_string(),
            port: Some(80),
            protocol: Some("http:".to_string()),
            path: Some(String::new()),
        };
        assert!(bare.equivalent(&explicit));
        assert!(explicit.equivalent(&bare));
    }

    #[test]
    fn test_equivalent_rejects_differences() {
        let base = Remote::new("h");
        let other_port = Remote {
            port: Some(8080),
            ..Remote::new("h")
        };
        let other_host = Remote::new("g");
        let other_path = Remote {
            path: Some("/api".to_string()),
            ..Remote::new("h")
        };
        assert!(!base.equivalent(&other_port));
        assert!(!base.equivalent(&other_host));
        assert!(!base.equivalent(&other_path));
    }

    #[test]
    fn test_service_url_defaults_are_transparent() {
        let bare = Remote::new("h");
        let explicit = Remote {
            address: "h".to_string(),
            port: Some(80),
            protocol: Some("http:".to_string()),
            path: Some(String::new()),
        };
        assert_eq!(bare.service_url("svc"), "http://h:80/svc");
        assert_eq!(explicit.service_url("svc"), bare.service_url("svc"));
    }

    #[test]
    fn test_service_url_normalizes_slashes() {
        for path in ["/a/b/", "a/b", "//a/b//"] {
            let remote = Remote {
                path: Some(path.to_string()),
                ..Remote::new("h")
            };
            assert_eq!(remote.service_url("svc"), "http://h:80/a/b/svc");
        }
    }

    #[test]
    fn test_service_url_strips_leading_slash_from_service() {
        assert_eq!(Remote::new("h").service_url("//svc"), "http://h:80/svc");
    }

    #[test]
    fn test_service_url_empty_service_targets_remote_itself() {
        assert_eq!(Remote::new("h").service_url(""), "http://h:80/");
        let with_path = Remote {
            path: Some("/mesh".to_string()),
            ..Remote::new("h")
        };
        assert_eq!(with_path.service_url(""), "http://h:80/mesh/");
    }

    #[test]
    fn test_serde_omits_absent_fields() {
        let json = serde_json::to_string(&Remote::new("h")).unwrap();
        assert_eq!(json, r#"{"address":"h"}"#);

        let decoded: Remote = serde_json::from_str(r#"{"address":"h","port":8080}"#).unwrap();
        assert_eq!(decoded.port, Some(8080));
        assert_eq!(decoded.protocol, None);
    }
}
