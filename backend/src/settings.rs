//! Process configuration loaded via OrthoConfig.
//!
//! Values come from `TENANCY_*` environment variables, configuration files,
//! and command-line flags, in increasing order of precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// HTTP server and secret transform settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TENANCY")]
pub struct ServerSettings {
    /// Address to listen on.
    pub host: Option<IpAddr>,
    /// Port to listen on.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Static salt prepended to secrets before hashing.
    pub hash_salt: Option<String>,
}

impl ServerSettings {
    /// Configured host, falling back to `0.0.0.0`.
    pub fn host(&self) -> IpAddr {
        self.host.unwrap_or(DEFAULT_HOST)
    }

    /// Configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host(), self.port())
    }

    /// Salt for the secret transform, ignoring blank values.
    pub fn hash_salt(&self) -> Option<&str> {
        self.hash_salt
            .as_deref()
            .filter(|salt| !salt.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("tenant-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_bind_every_interface_on_8080() {
        let _guard = lock_env([
            ("TENANCY_HOST", None::<String>),
            ("TENANCY_PORT", None::<String>),
            ("TENANCY_HASH_SALT", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("socket addr"));
        assert!(settings.hash_salt().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TENANCY_HOST", Some("127.0.0.1".to_owned())),
            ("TENANCY_PORT", Some("9090".to_owned())),
            ("TENANCY_HASH_SALT", Some("pepper".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "127.0.0.1:9090".parse().expect("socket addr"));
        assert_eq!(settings.hash_salt(), Some("pepper"));
    }

    #[rstest]
    fn blank_salt_is_ignored() {
        let settings = ServerSettings {
            host: None,
            port: 8080,
            hash_salt: Some("  ".to_owned()),
        };
        assert!(settings.hash_salt().is_none());
    }
}
