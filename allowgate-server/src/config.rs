//! Process configuration read from the environment

use allowgate_core::MembershipMode;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default listening port
pub const DEFAULT_PORT: u16 = 50051;

/// Default allow-list location, relative to the working directory
pub const DEFAULT_ALLOW_LIST_PATH: &str = "users.json";

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);

/// Invalid process configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set to a value that could not be parsed
    #[error("Invalid value for {name}: '{value}' ({reason})")]
    InvalidValue {
        /// Environment variable name
        name: &'static str,
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Listening port, bound on all interfaces
    pub port: u16,
    /// Allow-list resource
    pub allow_list_path: PathBuf,
    /// How flags take part in decisions
    pub membership_mode: MembershipMode,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Export traces over OTLP
    pub otel_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: DEFAULT_PORT,
            allow_list_path: PathBuf::from(DEFAULT_ALLOW_LIST_PATH),
            membership_mode: MembershipMode::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            otel_enabled: false,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();

        // GRPC_PORT is the name earlier deployments of this service used
        let port_var = ["RPC_PORT", "GRPC_PORT"]
            .into_iter()
            .find_map(|name| lookup(name).map(|raw| (name, raw)));
        if let Some((name, raw)) = port_var {
            // ":50051" is accepted as well as "50051"
            config.port = raw
                .trim()
                .trim_start_matches(':')
                .parse()
                .map_err(|e: std::num::ParseIntError| invalid(name, &raw, e))?;
        }

        if let Some(raw) = lookup("ALLOW_LIST_PATH") {
            if raw.trim().is_empty() {
                return Err(invalid("ALLOW_LIST_PATH", &raw, "empty path"));
            }
            config.allow_list_path = PathBuf::from(raw);
        }

        if let Some(raw) = lookup("MEMBERSHIP_MODE") {
            config.membership_mode = raw
                .parse()
                .map_err(|e| invalid("MEMBERSHIP_MODE", &raw, e))?;
        }

        if let Some(raw) = lookup("REQUEST_TIMEOUT_MS") {
            let millis: u64 = raw
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| invalid("REQUEST_TIMEOUT_MS", &raw, e))?;
            if millis == 0 {
                return Err(invalid("REQUEST_TIMEOUT_MS", &raw, "must be positive"));
            }
            config.request_timeout = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup("OTEL_ENABLED") {
            config.otel_enabled = raw.trim().parse().unwrap_or(false);
        }

        Ok(config)
    }

    /// Address to bind: all interfaces on the configured port
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

fn invalid(name: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
