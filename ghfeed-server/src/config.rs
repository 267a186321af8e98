//! Server configuration, read from the environment (and an optional `.env`).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use config::{Config, Environment};
use ghfeed_core::{FeedError, FeedResult, PaginationMode};
use serde::Deserialize;

const DEFAULT_PORT: u16 = 5001;
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_GITHUB_TIMEOUT_SECS: u64 = 10;

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_github_api_url() -> String {
    DEFAULT_GITHUB_API_URL.to_string()
}

fn default_github_timeout_secs() -> u64 {
    DEFAULT_GITHUB_TIMEOUT_SECS
}

/// Environment variables map onto fields by lowercasing their names:
/// `PORT`, `BIND_ADDRESS`, `GITHUB_TOKEN`, `GITHUB_API_URL`,
/// `GITHUB_TIMEOUT_SECS`, `PAGINATION_MODE`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    /// Personal access token sent to GitHub. Without it upstream calls are
    /// unauthenticated and will likely fail, which the feed absorbs.
    #[serde(default)]
    pub github_token: Option<String>,

    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    #[serde(default = "default_github_timeout_secs")]
    pub github_timeout_secs: u64,

    #[serde(default)]
    pub pagination_mode: PaginationMode,
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn load() -> FeedResult<Self> {
        Self::from_environment(Environment::default())
    }

    /// Load from an explicit variable map instead of the process environment.
    #[cfg(test)]
    pub fn from_vars(vars: std::collections::HashMap<String, String>) -> FeedResult<Self> {
        Self::from_environment(Environment::default().source(Some(vars)))
    }

    fn from_environment(env: Environment) -> FeedResult<Self> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .and_then(|c| c.try_deserialize::<ServerConfig>())
            .map_err(|e| FeedError::Config(e.to_string()))?;

        if config.github_timeout_secs == 0 {
            return Err(FeedError::Config(
                "GITHUB_TIMEOUT_SECS must be greater than zero".into(),
            ));
        }

        Ok(config)
    }

    /// The configured token, ignoring an empty value.
    pub fn token(&self) -> Option<&str> {
        self.github_token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn github_timeout(&self) -> Duration {
        Duration::from_secs(self.github_timeout_secs)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}
