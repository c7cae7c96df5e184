//! In-memory transaction sources standing in for a node

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use tx_tape::errors::{RpcError, RpcResult};
use tx_tape::rpc::RawTransactionSource;

/// Serves raw transactions from a map and counts requests
#[derive(Debug, Default)]
pub struct MemorySource {
    transactions: HashMap<String, Vec<u8>>,
    requests: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transaction(mut self, txid: &str, raw: Vec<u8>) -> Self {
        self.transactions.insert(txid.to_string(), raw);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl RawTransactionSource for MemorySource {
    fn get_raw_transaction(&self, txid: &str) -> impl Future<Output = RpcResult<Vec<u8>>> + Send {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let result = self
            .transactions
            .get(txid)
            .cloned()
            .ok_or_else(|| RpcError::TransactionNotFound {
                txid: txid.to_string(),
            });
        async move { result }
    }
}

/// Fails every request the way an unreachable node would
#[derive(Debug, Default)]
pub struct FailingSource;

impl RawTransactionSource for FailingSource {
    fn get_raw_transaction(&self, _txid: &str) -> impl Future<Output = RpcResult<Vec<u8>>> + Send {
        async {
            Err(RpcError::CallFailed {
                method: "get_raw_transaction".to_string(),
                message: "connection refused".to_string(),
            })
        }
    }
}
