//! Server configuration from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Default directory for the JSON collections.
pub const DEFAULT_DATA_DIR: &str = "storage";

/// Default listen address. Port 8000 is what the browser client expects.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

pub const DEFAULT_SERVICE_NAME: &str = "pantry-server";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidEnvVar { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory holding `ingredients.json` and `recipes.json`.
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// OTLP collector endpoint; console logging only when unset.
    pub otel_endpoint: Option<String>,
    pub otel_service_name: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// - `PANTRY_DATA_DIR`: data directory (default: "storage")
    /// - `PANTRY_BIND_ADDR`: listen address (default: "0.0.0.0:8000")
    /// - `OTEL_EXPORTER_OTLP_ENDPOINT`: optional collector endpoint
    /// - `OTEL_SERVICE_NAME`: service name for exported telemetry (default: "pantry-server")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data_dir = non_empty("PANTRY_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let bind_raw =
            non_empty("PANTRY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnvVar {
                name: "PANTRY_BIND_ADDR",
                value: bind_raw.clone(),
            })?;

        Ok(Self {
            data_dir,
            bind_addr,
            otel_endpoint: non_empty("OTEL_EXPORTER_OTLP_ENDPOINT"),
            otel_service_name: non_empty("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
        })
    }
}
