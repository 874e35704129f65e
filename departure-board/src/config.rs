//! Board configuration.
//!
//! Everything the board needs is carried in one explicit [`BoardConfig`],
//! built from the environment at start-up and handed to the pipeline.

use std::net::SocketAddr;
use std::time::Duration;

use crate::pipeline::PipelineConfig;
use crate::vasttrafik::VasttrafikConfig;

/// Environment variable holding the client secret.
pub const SECRET_VAR: &str = "VASTTRAFIK_API_SECRET";

/// Default address for the JSON surface.
const DEFAULT_LISTEN_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
    3000,
);

/// Errors building configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Complete board configuration.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Transit API credentials and endpoints.
    pub api: VasttrafikConfig,

    /// Stop, board size and token reuse.
    pub pipeline: PipelineConfig,

    /// How often to re-run the pipeline. `None` fetches once at start-up.
    pub refresh_interval: Option<Duration>,

    /// Where to serve the JSON surface.
    pub listen_addr: SocketAddr,
}

impl BoardConfig {
    /// Create a config with the given client secret and default everything else.
    pub fn new(client_secret: impl Into<String>) -> Self {
        Self {
            api: VasttrafikConfig::new(client_secret),
            pipeline: PipelineConfig::default(),
            refresh_interval: None,
            listen_addr: DEFAULT_LISTEN_ADDR,
        }
    }

    /// Set the stop to watch.
    pub fn with_stop_name(mut self, stop_name: impl Into<String>) -> Self {
        self.pipeline.stop_name = stop_name.into();
        self
    }

    /// Re-run the pipeline periodically.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }

    /// Read configuration from the process environment.
    ///
    /// | Variable | Meaning |
    /// |---|---|
    /// | `VASTTRAFIK_API_SECRET` | client secret (required) |
    /// | `VASTTRAFIK_CLIENT_ID` | client identifier |
    /// | `BOARD_STOP_NAME` | stop to watch |
    /// | `BOARD_TOKEN_TTL_SECS` | token reuse window |
    /// | `BOARD_REFRESH_SECS` | re-fetch interval |
    /// | `BOARD_LISTEN_ADDR` | JSON surface address |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = lookup(SECRET_VAR)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing(SECRET_VAR))?;

        let mut config = Self::new(secret);

        if let Some(client_id) = lookup("VASTTRAFIK_CLIENT_ID") {
            config.api = config.api.with_client_id(client_id);
        }

        if let Some(stop_name) = lookup("BOARD_STOP_NAME") {
            config = config.with_stop_name(stop_name);
        }

        if let Some(secs) = parse_secs(&lookup, "BOARD_TOKEN_TTL_SECS")? {
            config.pipeline = config.pipeline.with_token_ttl(secs);
        }

        if let Some(secs) = parse_secs(&lookup, "BOARD_REFRESH_SECS")? {
            config = config.with_refresh_interval(secs);
        }

        if let Some(addr) = lookup("BOARD_LISTEN_ADDR") {
            config.listen_addr = addr.parse().map_err(|_| ConfigError::Invalid {
                var: "BOARD_LISTEN_ADDR",
                value: addr.clone(),
                reason: "expected host:port",
            })?;
        }

        Ok(config)
    }
}

/// Parse a positive number of seconds.
fn parse_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };

    match value.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            var,
            value,
            reason: "must be greater than zero",
        }),
        Ok(secs) => Ok(Some(Duration::from_secs(secs))),
        Err(_) => Err(ConfigError::Invalid {
            var,
            value,
            reason: "expected whole seconds",
        }),
    }
}
