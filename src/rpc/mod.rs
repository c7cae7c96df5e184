//! Bitcoin node RPC integration module
//!
//! Resolving a transaction hash to raw bytes is the only network step of a
//! parse. The `RawTransactionSource` trait is the seam the parser drives;
//! `BitcoinRpcClient` implements it on top of the `corepc-client` crate.

pub mod client;

use crate::errors::RpcResult;
use std::future::Future;

pub use client::{execute_blocking, BitcoinRpcClient};

/// Anything that can resolve a transaction id to its serialised bytes
pub trait RawTransactionSource {
    fn get_raw_transaction(&self, txid: &str) -> impl Future<Output = RpcResult<Vec<u8>>> + Send;
}
