use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] ConfigError),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// General settings
    pub system: SystemSettings,

    /// MegaETH explorer configuration
    pub megaeth: MegaEthSettings,

    /// Keeta ledger-node configuration
    pub keeta: KeetaSettings,

    /// CSV export configuration
    pub export: ExportSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSettings {
    /// Enable debug mode
    pub debug_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MegaEthSettings {
    /// Blockscout-compatible explorer API endpoint
    pub api_base_url: String,

    /// Explorer web UI base, for tx/address links
    pub explorer_url: String,

    /// Optional JSON-RPC endpoint for balance queries (None disables
    /// them)
    pub rpc_url: Option<String>,

    /// Native token symbol
    pub native_symbol: String,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeetaSettings {
    /// Ledger API base URL
    pub api_base_url: String,

    /// Explorer web UI base
    pub explorer_url: String,

    /// History entries requested per account query
    pub history_limit: u32,

    /// Maximum blocks fetched per query
    pub max_blocks: usize,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Directory the default-named CSV is written to
    pub output_dir: String,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            system: SystemSettings { debug_mode: false },
            megaeth: MegaEthSettings {
                api_base_url: "https://megaeth.blockscout.com/api".to_string(),
                explorer_url: "https://megaeth.blockscout.com".to_string(),
                rpc_url: None, // Set to an RPC endpoint to enable balance queries
                native_symbol: "ETH".to_string(),
                request_timeout_seconds: 30,
            },
            keeta: KeetaSettings {
                api_base_url: "https://rep3.main.network.api.keeta.com/api/node/ledger"
                    .to_string(),
                explorer_url: "https://explorer.keeta.com".to_string(),
                history_limit: 100,
                max_blocks: 50,
                request_timeout_seconds: 30,
            },
            export: ExportSettings {
                output_dir: ".".to_string(),
            },
        }
    }
}

impl MegaEthSettings {
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "MegaETH explorer API base URL is required".to_string(),
            ));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ConfigurationError::InvalidValue(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl KeetaSettings {
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "Keeta ledger API base URL is required".to_string(),
            ));
        }

        if self.history_limit == 0 {
            return Err(ConfigurationError::InvalidValue(
                "Keeta history limit must be greater than 0".to_string(),
            ));
        }

        if self.max_blocks == 0 {
            return Err(ConfigurationError::InvalidValue(
                "Keeta max_blocks must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ConfigurationError::InvalidValue(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl ExporterConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let mut config_builder = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&ExporterConfig::default())?);

        // Add config file if it exists
        if config_path.as_ref().exists() {
            info!(
                "Loading configuration from: {}",
                config_path.as_ref().display()
            );
            config_builder = config_builder.add_source(File::from(config_path.as_ref()));
        } else {
            debug!("Config file not found, using defaults and environment variables");
        }

        // Add environment variables with prefix, e.g. TAX__MEGAETH__RPC_URL
        config_builder = config_builder.add_source(
            Environment::with_prefix("TAX")
                .try_parsing(true)
                .separator("__"),
        );

        let config = config_builder.build()?;
        let exporter_config: ExporterConfig = config.try_deserialize()?;

        exporter_config.validate()?;
        Ok(exporter_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.megaeth.validate()?;
        self.keeta.validate()?;

        if self.export.output_dir.is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "Export output directory cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration manager for loading and managing exporter
/// configuration
#[derive(Debug)]
pub struct ConfigManager {
    config: ExporterConfig,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Result<Self> {
        let config = ExporterConfig::load()?;
        info!("Configuration loaded successfully");
        debug!("Configuration: {:#?}", config);

        Ok(Self { config })
    }

    /// Create configuration manager from a specific file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = ExporterConfig::load_from_path(path)?;
        Ok(Self { config })
    }

    /// Get a reference to the current configuration
    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    /// Get a mutable reference to the configuration
    pub fn config_mut(&mut self) -> &mut ExporterConfig {
        &mut self.config
    }

    /// Update configuration
    pub fn update_config(&mut self, new_config: ExporterConfig) -> Result<()> {
        new_config.validate()?;
        self.config = new_config;
        info!("Configuration updated");
        Ok(())
    }

    /// Reload configuration from file and environment
    pub fn reload(&mut self) -> Result<()> {
        self.config = ExporterConfig::load()?;
        info!("Configuration reloaded");
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            config: ExporterConfig::default(),
        })
    }
}
