//! Server Config

use std::time::Duration;

use clap::Args;

/// Server runtime network settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "5000")]
    pub port: u16,

    /// Seconds in-flight requests get to finish after a shutdown signal
    #[arg(long, env = "SERVER_SHUTDOWN_GRACE_SECS", default_value_t = 30_u64)]
    pub shutdown_grace_secs: u64,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding. IPv6 hosts are bracketed.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    #[must_use]
    pub fn shutdown_grace_period(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_addr_brackets_ipv6_hosts() {
        let v4 = ServerRuntimeConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
            shutdown_grace_secs: 30,
        };
        let v6 = ServerRuntimeConfig {
            host: "::1".to_string(),
            port: 5000,
            shutdown_grace_secs: 30,
        };

        assert_eq!(v4.socket_addr(), "127.0.0.1:5000");
        assert_eq!(v6.socket_addr(), "[::1]:5000");
    }
}
