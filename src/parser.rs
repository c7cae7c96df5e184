//! Transaction parser - resolve, decode and tokenize one transaction
//!
//! The only suspension point is fetching raw bytes by hash; decoding and
//! tokenizing are synchronous and allocate only call-local state.

use crate::config::BitcoinRpcConfig;
use crate::errors::{AppError, AppResult};
use crate::metadata;
use crate::rpc::{BitcoinRpcClient, RawTransactionSource};
use crate::tape::{SplitRule, Tokenizer, Transform};
use crate::types::{InputRecord, OutputRecord, TxHash, TxRecord};
use bitcoin::{Network, Transaction};
use serde::Deserialize;
use std::borrow::Cow;
use tracing::debug;

/// Where the transaction to parse comes from
#[derive(Debug, Clone)]
pub enum TxSource {
    /// Transaction id, fetched over RPC
    Hash(String),
    /// Hex-encoded raw transaction
    Hex(String),
    /// Serialised raw transaction
    Raw(Vec<u8>),
    /// Already decoded transaction
    Decoded(Box<Transaction>),
}

/// Everything one parse call needs
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub tx: Option<TxSource>,
    pub split: Vec<SplitRule>,
    pub transform: Transform,
    /// Network used when rendering addresses
    pub network: Network,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tx: None,
            split: Vec::new(),
            transform: Transform::default(),
            network: Network::Bitcoin,
        }
    }
}

impl ParseOptions {
    pub fn new(tx: TxSource) -> Self {
        Self {
            tx: Some(tx),
            ..Self::default()
        }
    }

    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self::new(TxSource::Hash(hash.into()))
    }

    pub fn from_hex(raw_hex: impl Into<String>) -> Self {
        Self::new(TxSource::Hex(raw_hex.into()))
    }

    pub fn from_raw(raw: Vec<u8>) -> Self {
        Self::new(TxSource::Raw(raw))
    }

    pub fn from_transaction(tx: Transaction) -> Self {
        Self::new(TxSource::Decoded(Box::new(tx)))
    }

    pub fn with_split(mut self, split: Vec<SplitRule>) -> Self {
        self.split = split;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Build options from the JSON request shape
    /// `{"tx": {"h": txid} | {"r": raw_hex}, "split": [...]}`
    pub fn from_json(json: &str) -> AppResult<Self> {
        let request: ParseRequest = serde_json::from_str(json)?;
        Ok(request.into())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ParseRequest {
    #[serde(default)]
    tx: Option<TxRequest>,
    #[serde(default)]
    split: Vec<SplitRule>,
}

#[derive(Debug, Default, Deserialize)]
struct TxRequest {
    h: Option<String>,
    r: Option<String>,
}

impl From<ParseRequest> for ParseOptions {
    fn from(request: ParseRequest) -> Self {
        // A hash wins when both are present
        let tx = request.tx.and_then(|tx| match (tx.h, tx.r) {
            (Some(hash), _) => Some(TxSource::Hash(hash)),
            (None, Some(raw)) => Some(TxSource::Hex(raw)),
            (None, None) => None,
        });
        Self {
            tx,
            split: request.split,
            ..Self::default()
        }
    }
}

/// Parse one transaction, fetching it over RPC when only a hash is given
///
/// Without an explicit `config`, RPC settings come from
/// [`BitcoinRpcConfig::from_env`], read once here.
pub async fn parse(options: &ParseOptions, config: Option<&BitcoinRpcConfig>) -> AppResult<TxRecord> {
    match options.tx.as_ref() {
        Some(TxSource::Hash(_)) => {
            let config = match config {
                Some(config) => config.clone(),
                None => BitcoinRpcConfig::from_env()?,
            };
            let client = BitcoinRpcClient::new(&config)?;
            parse_with_source(options, &client).await
        }
        Some(local) => from_transaction(resolve_local(local)?.as_ref(), options),
        None => Err(missing_transaction()),
    }
}

/// Parse one transaction using `source` to resolve hashes
pub async fn parse_with_source<S>(options: &ParseOptions, source: &S) -> AppResult<TxRecord>
where
    S: RawTransactionSource,
{
    let tx = match options.tx.as_ref() {
        Some(TxSource::Hash(hash)) => {
            let raw = source.get_raw_transaction(hash).await?;
            Cow::Owned(decode_transaction(&raw)?)
        }
        Some(local) => resolve_local(local)?,
        None => return Err(missing_transaction()),
    };
    from_transaction(&tx, options)
}

/// Parse a serialised transaction
pub fn from_raw_tx(raw: &[u8], options: &ParseOptions) -> AppResult<TxRecord> {
    from_transaction(&decode_transaction(raw)?, options)
}

/// Parse a hex-encoded transaction
pub fn from_hex(raw_hex: &str, options: &ParseOptions) -> AppResult<TxRecord> {
    from_raw_tx(&hex::decode(raw_hex.trim())?, options)
}

/// Tokenize every input and output of a decoded transaction, in order
pub fn from_transaction(tx: &Transaction, options: &ParseOptions) -> AppResult<TxRecord> {
    let tokenizer = Tokenizer::new(&options.split, &options.transform);

    let inputs = tx
        .input
        .iter()
        .enumerate()
        .map(|(index, input)| -> AppResult<InputRecord> {
            Ok(InputRecord {
                index,
                tape: tokenizer.tokenize(&input.script_sig)?,
                sender: metadata::sender(input, options.network),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let outputs = tx
        .output
        .iter()
        .enumerate()
        .map(|(index, output)| -> AppResult<OutputRecord> {
            Ok(OutputRecord {
                index,
                tape: tokenizer.tokenize(&output.script_pubkey)?,
                receiver: metadata::receiver(output, output_index(index)?, options.network),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let hash = tx.compute_txid().to_string();
    debug!(
        "Parsed transaction {} ({} inputs, {} outputs)",
        hash,
        inputs.len(),
        outputs.len()
    );

    Ok(TxRecord {
        tx: TxHash { hash },
        inputs,
        outputs,
        lock_time: tx.lock_time.to_consensus_u32(),
    })
}

/// Decode raw transaction bytes
pub fn decode_transaction(raw: &[u8]) -> AppResult<Transaction> {
    Ok(bitcoin::consensus::deserialize(raw)?)
}

fn resolve_local(source: &TxSource) -> AppResult<Cow<'_, Transaction>> {
    match source {
        TxSource::Decoded(tx) => Ok(Cow::Borrowed(tx.as_ref())),
        TxSource::Raw(raw) => Ok(Cow::Owned(decode_transaction(raw)?)),
        TxSource::Hex(raw_hex) => Ok(Cow::Owned(decode_transaction(&hex::decode(raw_hex.trim())?)?)),
        TxSource::Hash(hash) => Err(AppError::InvalidInput(format!(
            "transaction {} must be fetched before decoding",
            hash
        ))),
    }
}

fn output_index(index: usize) -> AppResult<u32> {
    u32::try_from(index)
        .map_err(|_| AppError::Decode(format!("output index {} out of range", index)))
}

fn missing_transaction() -> AppError {
    AppError::InvalidInput("options.tx must carry a transaction hash or a raw transaction".to_string())
}
