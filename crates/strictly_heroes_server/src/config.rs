//! Server configuration.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! `HEROES_*` environment variables (a `.env` file is loaded by the binary).

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_heroes::TurnPolicy;
use tracing::{debug, info, instrument};

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Runtime configuration for the game server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    host: String,

    /// Port to bind.
    port: u16,

    /// Browser origins allowed to open a game socket.
    allowed_origins: Vec<String>,

    /// Reject moves submitted by the player not holding the turn.
    enforce_turn_order: bool,

    /// Capacity of the broadcast channel feeding connected clients.
    broadcast_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            allowed_origins: vec![
                "http://127.0.0.1:5500".to_string(),
                "http://localhost:5500".to_string(),
            ],
            enforce_turn_order: false,
            broadcast_capacity: 64,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if given, then applies environment overrides.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `HEROES_*` overrides read through `lookup`.
    #[instrument(skip(self, lookup))]
    pub fn with_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup("HEROES_HOST") {
            debug!(%host, "Host overridden from environment");
            self.host = host;
        }
        if let Some(port) = lookup("HEROES_PORT") {
            self.port = port
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid HEROES_PORT {:?}: {}", port, e)))?;
        }
        if let Some(origins) = lookup("HEROES_ALLOWED_ORIGINS") {
            self.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(flag) = lookup("HEROES_ENFORCE_TURN_ORDER") {
            self.enforce_turn_order = flag.parse().map_err(|e| {
                ConfigError::new(format!("Invalid HEROES_ENFORCE_TURN_ORDER {:?}: {}", flag, e))
            })?;
        }
        Ok(self)
    }

    /// Overrides the bind address.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Overrides the bind port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Overrides the turn-order check.
    pub fn with_enforce_turn_order(mut self, enforce: bool) -> Self {
        self.enforce_turn_order = enforce;
        self
    }

    /// Turn policy handed to the engine.
    pub fn turn_policy(&self) -> TurnPolicy {
        if self.enforce_turn_order {
            TurnPolicy::Strict
        } else {
            TurnPolicy::Permissive
        }
    }

    /// True if a browser `Origin` header value may connect.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }
}
