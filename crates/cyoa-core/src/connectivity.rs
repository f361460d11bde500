//! Online/offline signal, read once at startup.

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::Url;
use tracing::debug;

pub trait ConnectivityProbe: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Connectivity decided up front, e.g. by an `--offline` switch.
#[derive(Debug, Clone, Copy)]
pub struct FixedConnectivity(pub bool);

impl FixedConnectivity {
    pub fn online() -> Self {
        Self(true)
    }

    pub fn offline() -> Self {
        Self(false)
    }
}

impl ConnectivityProbe for FixedConnectivity {
    fn is_online(&self) -> bool {
        self.0
    }
}

/// Reports online when a TCP connection to the API host can be opened.
///
/// `is_online` blocks on the host lookup and connect; call it from
/// `spawn_blocking` or before the runtime starts.
#[derive(Debug, Clone)]
pub struct ReachabilityProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl ReachabilityProbe {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    /// Probe the host and port the given API URI points at
    pub fn for_uri(uri: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(uri).with_context(|| format!("Invalid API URI: {}", uri))?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow!("API URI has no host: {}", uri))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| anyhow!("API URI has no known port: {}", uri))?;
        Ok(Self::new(host, port, timeout))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl ConnectivityProbe for ReachabilityProbe {
    fn is_online(&self) -> bool {
        let addrs = match (self.host.as_str(), self.port).to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(e) => {
                debug!(host = %self.host, error = %e, "Host lookup failed, treating as offline");
                return false;
            }
        };

        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(_) => return true,
                Err(e) => debug!(%addr, error = %e, "Connectivity probe failed"),
            }
        }
        false
    }
}
