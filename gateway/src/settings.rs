//! Gateway configuration loaded via OrthoConfig.
//!
//! Values layer from a configuration file and `SSO_*`/`GATEWAY_*` environment
//! variables, the latter taking precedence. Command-line flags are not read:
//! both structs share the process, so only the program name is passed.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_PORT: u16 = 8080;

/// Identity provider settings for token introspection.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SSO")]
pub struct SsoSettings {
    /// RFC 7662 introspection endpoint. Unset means every query fails
    /// validation with a configuration error.
    pub introspection_url: Option<String>,
    /// Confidential client identifier.
    pub client_id: Option<String>,
    /// Confidential client secret.
    pub client_secret: Option<String>,
    /// Introspection timeout in milliseconds.
    #[ortho_config(default = 10_000)]
    pub timeout_ms: u64,
}

impl SsoSettings {
    /// Parsed introspection URL; blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns the parse error when a non-blank value is not a URL.
    pub fn introspection_url(&self) -> Result<Option<Url>, url::ParseError> {
        match self.introspection_url.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Url::parse(raw).map(Some),
        }
    }

    pub fn client_id(&self) -> &str {
        self.client_id.as_deref().unwrap_or_default()
    }

    pub fn client_secret(&self) -> &str {
        self.client_secret.as_deref().unwrap_or_default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl std::fmt::Debug for SsoSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsoSettings")
            .field("introspection_url", &self.introspection_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Listener and backend call settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GATEWAY")]
pub struct GatewaySettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// Backend call timeout in milliseconds.
    #[ortho_config(default = 30_000)]
    pub backend_timeout_ms: u64,
}

impl GatewaySettings {
    /// Configured listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_BIND_PORT)))
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_millis(self.backend_timeout_ms)
    }
}
