//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use tenant_backend::settings::ServerSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) hash_salt: Option<String>,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr` with an
    /// unsalted secret transform.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            hash_salt: None,
        }
    }

    /// Salt every secret before hashing.
    #[must_use]
    pub fn with_hash_salt(mut self, salt: impl Into<String>) -> Self {
        self.hash_salt = Some(salt.into());
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

impl From<&ServerSettings> for ServerConfig {
    fn from(settings: &ServerSettings) -> Self {
        let config = Self::new(settings.bind_addr());
        match settings.hash_salt() {
            Some(salt) => config.with_hash_salt(salt),
            None => config,
        }
    }
}
