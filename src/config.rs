//! Server configuration for TinyQueue.

use std::net::{IpAddr, SocketAddr};

use crate::error::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Listening address for the queue server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: 0,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Resolve the configured host and port to a socket address.
    ///
    /// The host must be a literal IPv4 or IPv6 address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| Error::Config(format!("Invalid host {:?}: {}", self.host, e)))?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binds_all_interfaces() {
        let addr = ServerConfig::default().socket_addr().unwrap();
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn test_ipv4_and_ipv6_hosts() {
        let v4 = ServerConfig::new("127.0.0.1", 8080).socket_addr().unwrap();
        assert_eq!(v4.to_string(), "127.0.0.1:8080");

        let v6 = ServerConfig::new("::1", 8080).socket_addr().unwrap();
        assert_eq!(v6.to_string(), "[::1]:8080");
    }

    #[test]
    fn test_invalid_host() {
        let err = ServerConfig::new("localhost:80", 80).socket_addr().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
