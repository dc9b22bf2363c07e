//! Server configuration parsed from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid HOST '{0}': expected an IP address")]
    InvalidHost(String),
    #[error("invalid PORT '{0}': expected an integer in 1..=65535")]
    InvalidPort(String),
    #[error("SITE_ROOT is set but empty")]
    EmptySiteRoot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Overrides the Leptos `site_root` for compiled assets.
    pub site_root: Option<PathBuf>,
}

impl ServerConfig {
    /// Build typed server config from the process environment.
    ///
    /// Optional:
    /// - `HOST`: default `0.0.0.0`
    /// - `PORT`: default `3000`
    /// - `SITE_ROOT`: default from the Leptos configuration
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_host(lookup("HOST").as_deref())?;
        let port = parse_port(lookup("PORT").as_deref())?;
        let site_root = match lookup("SITE_ROOT") {
            Some(raw) if raw.trim().is_empty() => return Err(ConfigError::EmptySiteRoot),
            Some(raw) => Some(PathBuf::from(raw)),
            None => None,
        };
        Ok(Self { host, port, site_root })
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_host(raw: Option<&str>) -> Result<IpAddr, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_HOST),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidHost(value.to_owned())),
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => match value.parse::<u16>() {
            Ok(0) | Err(_) => Err(ConfigError::InvalidPort(value.to_owned())),
            Ok(port) => Ok(port),
        },
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
