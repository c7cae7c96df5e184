//! Hand-assembled scripts and transactions
//!
//! Scripts are written byte by byte so tests control exactly which push
//! opcodes appear.

use bitcoin::absolute::LockTime;
use bitcoin::hashes::Hash;
use bitcoin::transaction::Version;
use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Txid, Witness};

pub const OP_0: u8 = 0x00;
pub const OP_RETURN: u8 = 0x6a;
pub const OP_DUP: u8 = 0x76;

/// Byte-level script builder
#[derive(Debug, Default)]
pub struct ScriptAssembler {
    bytes: Vec<u8>,
}

impl ScriptAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn op(mut self, code: u8) -> Self {
        self.bytes.push(code);
        self
    }

    /// Push with the shortest push opcode for the payload length
    pub fn push(mut self, data: &[u8]) -> Self {
        match data.len() {
            0 => panic!("empty pushes encode as OP_0; use op(OP_0)"),
            len @ 1..=75 => self.bytes.push(len as u8),
            len @ 76..=255 => self.bytes.extend_from_slice(&[0x4c, len as u8]),
            len => {
                self.bytes.push(0x4d);
                self.bytes.extend_from_slice(&(len as u16).to_le_bytes());
            }
        }
        self.bytes.extend_from_slice(data);
        self
    }

    pub fn push_str(self, text: &str) -> Self {
        self.push(text.as_bytes())
    }

    pub fn build(self) -> ScriptBuf {
        ScriptBuf::from_bytes(self.bytes)
    }
}

/// `OP_RETURN` + 5 pushes, `|`, 18 pushes, `|`, 4 pushes
///
/// Chunk layout: 6 items, pipe, 18 items, pipe, 4 items (30 chunks).
pub fn bop_output_script() -> ScriptBuf {
    let mut script = ScriptAssembler::new().op(OP_RETURN);
    for text in ["19HxigV4QyBv3tHpQVcUEQyq1pzZVdoAut", "hello", "text/plain", "utf-8", "greeting.txt"] {
        script = script.push_str(text);
    }
    script = script.push_str("|");
    for i in 0..18 {
        script = script.push_str(&format!("field-{}", i));
    }
    script = script.push_str("|");
    for text in ["AIP", "BITCOIN_ECDSA", "1Signer", "sig"] {
        script = script.push_str(text);
    }
    script.build()
}

/// Legacy transaction with one input per `input_scripts` entry and one
/// output per `(value, script)` pair
pub fn transaction(
    input_scripts: Vec<ScriptBuf>,
    outputs: Vec<(u64, ScriptBuf)>,
    lock_time: u32,
) -> Transaction {
    Transaction {
        version: Version::ONE,
        lock_time: LockTime::from_consensus(lock_time),
        input: input_scripts
            .into_iter()
            .enumerate()
            .map(|(i, script_sig)| TxIn {
                previous_output: OutPoint::new(Txid::from_byte_array([i as u8 + 1; 32]), i as u32),
                script_sig,
                sequence: Sequence::MAX,
                witness: Witness::default(),
            })
            .collect(),
        output: outputs
            .into_iter()
            .map(|(value, script_pubkey)| TxOut {
                value: Amount::from_sat(value),
                script_pubkey,
            })
            .collect(),
    }
}

/// Hex serialisation of `tx`
pub fn to_hex(tx: &Transaction) -> String {
    hex::encode(bitcoin::consensus::encode::serialize(tx))
}
