use std::time::Duration;

/// Transport configuration for catalog API requests.
#[derive(Debug, Clone)]
pub struct CatalogApiConfig {
    /// Catalog server hostname (bare authority; schemes are stripped).
    pub hostname: String,
    /// Service-user client id for the credentials exchange.
    pub client_id: String,
    /// Service-user client secret for the credentials exchange.
    pub client_secret: String,
    /// Send `x-authentication-scheme: LocalBearer` during the channel
    /// handshake. Only needed when a local proxy fronts the real channel.
    pub local_bearer: bool,
    /// Optional timeout applied to token-endpoint requests.
    pub timeout: Option<Duration>,
}

impl CatalogApiConfig {
    pub fn new(
        hostname: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            local_bearer: false,
            timeout: None,
        }
    }

    pub fn with_local_bearer(mut self, enabled: bool) -> Self {
        self.local_bearer = enabled;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
