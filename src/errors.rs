use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Bitcoin RPC operations
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Raw transaction bytes could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Caller supplied options that cannot be acted on
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Script tokenization
    #[error("Tokenize error: {0}")]
    Tokenize(#[from] TokenizeError),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialisation
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// RPC error types
#[derive(Error, Debug)]
pub enum RpcError {
    /// Failed to establish connection to the node's RPC server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// TXID string format is invalid (not valid hex or wrong length)
    #[error("Invalid txid: {txid}")]
    InvalidTxid { txid: String },

    /// RPC method call failed (covers network errors, authentication, etc.)
    #[error("RPC call failed: {method} - {message}")]
    CallFailed { method: String, message: String },

    /// Failed to deserialise RPC response data
    #[error("Deserialisation failed: {0}")]
    DeserialisationFailed(String),

    /// Transaction exists in valid format but not found in blockchain/mempool
    #[error("Transaction not found: {txid}")]
    TransactionNotFound { txid: String },
}

/// Tokenizer error types
#[derive(Error, Debug)]
pub enum TokenizeError {
    /// The caller-supplied transform hook failed; the whole script is abandoned
    #[error("Transform failed at chunk {chunk_index}: {source}")]
    Transform {
        chunk_index: usize,
        #[source]
        source: anyhow::Error,
    },
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for RPC operations
pub type RpcResult<T> = Result<T, RpcError>;

/// Result type for tokenizer operations
pub type TokenizeResult<T> = Result<T, TokenizeError>;

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<hex::FromHexError> for AppError {
    fn from(err: hex::FromHexError) -> Self {
        AppError::Decode(format!("Invalid transaction hex: {}", err))
    }
}

impl From<bitcoin::consensus::encode::Error> for AppError {
    fn from(err: bitcoin::consensus::encode::Error) -> Self {
        AppError::Decode(format!("Failed to deserialise transaction: {}", err))
    }
}
