use crate::config::{AppConfig, ParserConfig};
use crate::errors::{AppError, AppResult};
use crate::parser::{self, ParseOptions};
use crate::tape::SplitRule;
use crate::types::TxRecord;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Fetch (or decode) a transaction and print its tokenized record
#[derive(Args, Debug)]
pub struct ParseCommand {
    /// Transaction ID to fetch from the node
    #[arg(required_unless_present = "raw", conflicts_with = "raw")]
    pub txid: Option<String>,

    /// Raw transaction hex to tokenize instead of fetching
    #[arg(long)]
    pub raw: Option<String>,

    /// Split rules as a JSON array, e.g. '[{"token":{"s":"|"},"include":"c"}]'
    #[arg(long)]
    pub split: Option<String>,

    /// Configuration file (default: ./config.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Bitcoin RPC host (overrides config)
    #[arg(long)]
    pub rpc_host: Option<String>,

    /// Bitcoin RPC port (overrides config)
    #[arg(long)]
    pub rpc_port: Option<u16>,

    /// Bitcoin RPC username (overrides config)
    #[arg(long)]
    pub rpc_username: Option<String>,

    /// Bitcoin RPC password (overrides config)
    #[arg(long)]
    pub rpc_password: Option<String>,

    /// Network used for addresses: bitcoin, testnet, signet or regtest
    #[arg(long)]
    pub network: Option<String>,

    /// Print the record on a single line
    #[arg(long)]
    pub compact: bool,
}

impl ParseCommand {
    pub async fn run(&self) -> AppResult<()> {
        let record = self.execute().await?;
        let rendered = if self.compact {
            serde_json::to_string(&record)?
        } else {
            serde_json::to_string_pretty(&record)?
        };
        println!("{}", rendered);
        Ok(())
    }

    /// Resolve configuration and options, then parse
    pub async fn execute(&self) -> AppResult<TxRecord> {
        let mut app_config = self.load_config()?;
        self.apply_overrides(&mut app_config);

        let options = self.options(&app_config.parser)?;
        if let Some(txid) = &self.txid {
            info!("Tokenizing transaction {}", txid);
        }
        parser::parse(&options, Some(&app_config.bitcoin_rpc)).await
    }

    fn load_config(&self) -> AppResult<AppConfig> {
        let config = match &self.config {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load()?,
        };
        Ok(config)
    }

    fn apply_overrides(&self, app_config: &mut AppConfig) {
        let rpc = &mut app_config.bitcoin_rpc;
        if let Some(host) = &self.rpc_host {
            rpc.host = host.clone();
        }
        if let Some(port) = self.rpc_port {
            rpc.port = port;
        }
        if let Some(username) = &self.rpc_username {
            rpc.username = username.clone();
        }
        if let Some(password) = &self.rpc_password {
            rpc.password = password.clone();
        }
        if let Some(network) = &self.network {
            app_config.parser.network = network.clone();
        }
    }

    fn options(&self, parser_config: &ParserConfig) -> AppResult<ParseOptions> {
        let options = match (&self.txid, &self.raw) {
            (Some(txid), _) => ParseOptions::from_hash(txid.clone()),
            (None, Some(raw)) => ParseOptions::from_hex(raw.clone()),
            (None, None) => {
                return Err(AppError::InvalidInput(
                    "either a txid or --raw is required".to_string(),
                ))
            }
        };

        let split: Vec<SplitRule> = match &self.split {
            Some(json) => serde_json::from_str(json)?,
            None => Vec::new(),
        };

        Ok(options
            .with_split(split)
            .with_network(parser_config.network()?))
    }
}
