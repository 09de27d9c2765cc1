//! HTTP server configuration object.

use std::net::SocketAddr;

use relay::config::RuntimeConfig;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) swagger_ui: bool,
}

impl ServerConfig {
    /// Bind on `bind_addr` with Swagger UI disabled.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            swagger_ui: false,
        }
    }

    /// Derive the server settings from the resolved runtime configuration.
    ///
    /// Listens on every interface. Swagger UI is mounted only in debug,
    /// non-prod builds.
    #[must_use]
    pub fn from_runtime(config: &RuntimeConfig) -> Self {
        Self::new(SocketAddr::from(([0, 0, 0, 0], config.port)))
            .with_swagger_ui(cfg!(debug_assertions) && !config.environment.is_prod())
    }

    /// Toggle the Swagger UI at `/docs`.
    #[must_use]
    pub fn with_swagger_ui(mut self, enabled: bool) -> Self {
        self.swagger_ui = enabled;
        self
    }
}
