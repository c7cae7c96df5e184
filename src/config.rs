use bitcoin::Network;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Legacy environment variables consulted for node RPC settings
pub mod env_vars {
    pub const USERNAME: &str = "BITCOIN_USERNAME";
    pub const PASSWORD: &str = "BITCOIN_PASSWORD";
    pub const HOST: &str = "BITCOIN_IP";
    pub const PORT: &str = "BITCOIN_PORT";
}

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub bitcoin_rpc: BitcoinRpcConfig,
    pub parser: ParserConfig,
}

/// Node RPC connection parameters used when a transaction is fetched by hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitcoinRpcConfig {
    pub protocol: String,
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl Default for BitcoinRpcConfig {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            username: "root".to_string(),
            password: "bitcoin".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8332,
        }
    }
}

impl BitcoinRpcConfig {
    /// Defaults overridden by the legacy `BITCOIN_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Endpoint URL handed to the RPC client
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(username) = env::var(env_vars::USERNAME) {
            self.username = username;
        }
        if let Ok(password) = env::var(env_vars::PASSWORD) {
            self.password = password;
        }
        if let Ok(host) = env::var(env_vars::HOST) {
            self.host = host;
        }
        if let Ok(port) = env::var(env_vars::PORT) {
            self.port = port.parse().map_err(|_| {
                ConfigError::Message(format!(
                    "{} must be a port number, got '{}'",
                    env_vars::PORT,
                    port
                ))
            })?;
        }
        Ok(())
    }
}

/// Settings for the tokenizing pass itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Network used when rendering addresses ("bitcoin", "testnet", "signet", "regtest")
    pub network: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            network: "bitcoin".to_string(),
        }
    }
}

impl ParserConfig {
    pub fn network(&self) -> Result<Network, ConfigError> {
        Network::from_str(&self.network)
            .map_err(|e| ConfigError::Message(format!("Unknown network '{}': {}", self.network, e)))
    }
}

impl AppConfig {
    /// Load configuration from config.toml (if present) and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file; the file must exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let rpc = BitcoinRpcConfig::default();
        let parser = ParserConfig::default();
        let config = Config::builder()
            .set_default("bitcoin_rpc.protocol", rpc.protocol)?
            .set_default("bitcoin_rpc.username", rpc.username)?
            .set_default("bitcoin_rpc.password", rpc.password)?
            .set_default("bitcoin_rpc.host", rpc.host)?
            .set_default("bitcoin_rpc.port", i64::from(rpc.port))?
            .set_default("parser.network", parser.network)?
            .add_source(file)
            // TX_TAPE_BITCOIN_RPC__HOST style overrides
            .add_source(
                Environment::with_prefix("TX_TAPE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // Legacy variable names win over everything else
        app_config.bitcoin_rpc.apply_env_overrides()?;

        Ok(app_config)
    }
}
