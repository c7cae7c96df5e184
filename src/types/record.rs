//! Per-transaction record assembled by the parser

use super::tape::Tape;
use serde::{Deserialize, Serialize};

/// Tokenized view of one transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxRecord {
    pub tx: TxHash,
    #[serde(rename = "in")]
    pub inputs: Vec<InputRecord>,
    #[serde(rename = "out")]
    pub outputs: Vec<OutputRecord>,
    #[serde(rename = "lock")]
    pub lock_time: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxHash {
    #[serde(rename = "h")]
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    #[serde(rename = "i")]
    pub index: usize,
    pub tape: Vec<Tape>,
    #[serde(rename = "e")]
    pub sender: Sender,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(rename = "i")]
    pub index: usize,
    pub tape: Vec<Tape>,
    #[serde(rename = "e")]
    pub receiver: Receiver,
}

/// Where an input's funds come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    #[serde(rename = "h")]
    pub prev_txid: String,
    #[serde(rename = "i")]
    pub output_index: u32,
    #[serde(rename = "seq")]
    pub sequence: u32,
    #[serde(rename = "a", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Where an output's funds go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    /// Amount in satoshis
    #[serde(rename = "v")]
    pub value: u64,
    #[serde(rename = "i")]
    pub output_index: u32,
    #[serde(rename = "a", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl TxRecord {
    pub fn hash(&self) -> &str {
        &self.tx.hash
    }
}
