//! Configuration for riskd

use risk_engine::{DirectoryUser, EngineConfig};
use risk_types::PhaseMode;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Main daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// User directory configuration
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Workflow engine configuration
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub listen_addr: SocketAddr,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,

    /// Capacity of the live event channel
    #[serde(default = "default_event_capacity")]
    pub event_channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            enable_cors: true,
            request_timeout_secs: default_request_timeout(),
            max_body_size: default_max_body_size(),
            event_channel_capacity: default_event_capacity(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// In-memory storage (for development/testing)
    #[default]
    Memory,

    /// PostgreSQL storage
    Postgres {
        /// Connection URL
        url: String,

        /// Maximum connections in pool
        #[serde(default = "default_pool_size")]
        max_connections: u32,

        /// Connection timeout in seconds
        #[serde(default = "default_connection_timeout")]
        connect_timeout_secs: u64,
    },
}

/// Where user references are resolved
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DirectoryConfig {
    /// Accept any non-blank user id
    #[default]
    Open,

    /// Only the listed users exist
    Static {
        #[serde(default)]
        users: Vec<StaticUser>,
    },
}

/// A directory entry declared in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticUser {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<StaticUser> for DirectoryUser {
    fn from(user: StaticUser) -> Self {
        let mut entry = DirectoryUser::new(user.id);
        entry.display_name = user.display_name;
        entry.email = user.email;
        entry
    }
}

/// Workflow engine configuration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub phase_mode: PhaseMode,
}

impl From<WorkflowConfig> for EngineConfig {
    fn from(config: WorkflowConfig) -> Self {
        EngineConfig {
            phase_mode: config.phase_mode,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_true() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_body_size() -> usize {
    1024 * 1024
}

fn default_event_capacity() -> usize {
    256
}

fn default_pool_size() -> u32 {
    10
}

fn default_connection_timeout() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DaemonConfig {
    /// Load configuration: defaults, then the optional file, then
    /// `RISK_`-prefixed environment variables (`RISK_STORAGE__URL`)
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&DaemonConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("RISK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
