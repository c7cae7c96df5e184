use super::RawTransactionSource;
use crate::config::BitcoinRpcConfig;
use crate::errors::{RpcError, RpcResult};
use corepc_client::bitcoin::Txid;
use corepc_client::client_sync::{v28::Client, Auth};
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// Node RPC client used to resolve a transaction hash to its raw bytes
///
/// Every call is a single `getrawtransaction` request: no retry, no cache and
/// no timeout. Any failure is returned to the caller as-is.
#[derive(Clone)]
pub struct BitcoinRpcClient {
    client: Arc<Client>,
    url: String,
}

impl BitcoinRpcClient {
    /// Create the client; no request is made until a transaction is fetched
    pub fn new(config: &BitcoinRpcConfig) -> RpcResult<Self> {
        let url = config.url();
        let auth = Auth::UserPass(config.username.clone(), config.password.clone());
        let client = Client::new_with_auth(&url, auth).map_err(|e| {
            RpcError::ConnectionFailed(format!("Failed to create Bitcoin RPC client: {}", e))
        })?;

        debug!("Bitcoin RPC client configured for {}", url);
        Ok(Self {
            client: Arc::new(client),
            url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the raw serialised transaction for `txid`
    pub async fn fetch_raw_transaction(&self, txid: &str) -> RpcResult<Vec<u8>> {
        let hash = Txid::from_str(txid).map_err(|_| RpcError::InvalidTxid {
            txid: txid.to_string(),
        })?;

        info!("Fetching transaction {} from {}", txid, self.url);

        let client = Arc::clone(&self.client);
        let raw_hex = execute_blocking(move || -> RpcResult<String> {
            let raw = client
                .get_raw_transaction(hash)
                .map_err(|e| RpcError::CallFailed {
                    method: "get_raw_transaction".to_string(),
                    message: e.to_string(),
                })?;
            Ok(raw.0)
        })
        .await
        .map_err(|e| classify_not_found(e, txid))?;

        hex::decode(&raw_hex).map_err(|e| {
            RpcError::DeserialisationFailed(format!("Failed to decode raw transaction hex: {}", e))
        })
    }
}

impl RawTransactionSource for BitcoinRpcClient {
    fn get_raw_transaction(&self, txid: &str) -> impl Future<Output = RpcResult<Vec<u8>>> + Send {
        self.fetch_raw_transaction(txid)
    }
}

impl std::fmt::Debug for BitcoinRpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitcoinRpcClient")
            .field("url", &self.url)
            .finish()
    }
}

/// Run a blocking RPC call on tokio's blocking pool
pub async fn execute_blocking<T, F>(operation: F) -> RpcResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> RpcResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(operation)
        .await
        .map_err(|e| RpcError::CallFailed {
            method: "spawn_blocking".to_string(),
            message: format!("Task execution error: {}", e),
        })?
}

/// Node replies for unknown transactions become `TransactionNotFound`
fn classify_not_found(error: RpcError, txid: &str) -> RpcError {
    let message = error.to_string();
    if message.contains("No such mempool or blockchain transaction")
        || message.contains("Invalid or non-wallet transaction id")
    {
        debug!("Transaction {} not found: {}", txid, message);
        RpcError::TransactionNotFound {
            txid: txid.to_string(),
        }
    } else {
        error
    }
}
