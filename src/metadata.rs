//! Sender / receiver metadata for inputs and outputs
//!
//! Addresses are only attached when a standard address can be derived from
//! the script. Outputs use the locking script directly; inputs are matched
//! against the two spend shapes that reveal their address:
//! - `<sig> <pubkey>` spends a P2PKH output. The key is recognised by its
//!   prefix and length only, so an off-curve key still yields an address.
//! - `<push>... <redeem script>` spends a P2SH output when the redeem script
//!   is itself a recognised script (P2PKH, P2PK, P2SH, multisig or data).

use crate::script::opcodes::{OP_1, OP_16, OP_RETURN};
use crate::script::{chunks, Chunk};
use crate::types::{Receiver, Sender};
use bitcoin::hashes::Hash;
use bitcoin::{Address, Network, PubkeyHash, Script, ScriptBuf, TxIn, TxOut};
use tracing::debug;

const OP_CHECKMULTISIG: u8 = 0xae;
const DER_SEQUENCE: u8 = 0x30;

/// Build the sender record for an input
pub fn sender(input: &TxIn, network: Network) -> Sender {
    Sender {
        prev_txid: input.previous_output.txid.to_string(),
        output_index: input.previous_output.vout,
        sequence: input.sequence.to_consensus_u32(),
        address: input_address(&input.script_sig, network),
    }
}

/// Build the receiver record for the output at `output_index`
pub fn receiver(output: &TxOut, output_index: u32, network: Network) -> Receiver {
    Receiver {
        value: output.value.to_sat(),
        output_index,
        address: output_address(&output.script_pubkey, network),
    }
}

/// Address paid by a locking script, if it is a standard one
pub fn output_address(script: &Script, network: Network) -> Option<String> {
    match Address::from_script(script, network) {
        Ok(address) => non_empty(address.to_string()),
        Err(e) => {
            debug!("No address for output script {}: {}", hex::encode(script.as_bytes()), e);
            None
        }
    }
}

/// Address being spent from, recovered from an unlocking script
pub fn input_address(script: &Script, network: Network) -> Option<String> {
    let chunks = chunks(script);
    let address = match chunks.as_slice() {
        [Chunk::Push(sig), Chunk::Push(pubkey)]
            if sig.first() == Some(&DER_SEQUENCE) && is_public_key(pubkey) =>
        {
            Some(Address::p2pkh(PubkeyHash::hash(pubkey), network))
        }
        [_, .., Chunk::Push(redeem)] => redeem_script_address(redeem, network),
        _ => None,
    };
    address.and_then(|a| non_empty(a.to_string()))
}

/// Serialized public key shape: compressed (33 bytes) or uncompressed (65)
fn is_public_key(bytes: &[u8]) -> bool {
    match bytes.first() {
        Some(0x02 | 0x03) => bytes.len() == 33,
        Some(0x04) => bytes.len() == 65,
        _ => false,
    }
}

fn redeem_script_address(redeem: &[u8], network: Network) -> Option<Address> {
    let redeem = ScriptBuf::from_bytes(redeem.to_vec());
    if !is_recognised_script(&redeem) {
        return None;
    }
    Address::p2sh(&redeem, network).ok()
}

fn is_recognised_script(script: &Script) -> bool {
    script.is_p2pkh()
        || script.is_p2pk()
        || script.is_p2sh()
        || is_multisig(script)
        || script.as_bytes().first() == Some(&OP_RETURN)
}

/// `OP_m <pubkey>... OP_n OP_CHECKMULTISIG`
fn is_multisig(script: &Script) -> bool {
    let chunks = chunks(script);
    match chunks.as_slice() {
        [Chunk::Op(m), keys @ .., Chunk::Op(n), Chunk::Op(OP_CHECKMULTISIG)] => {
            (OP_1..=OP_16).contains(m)
                && (OP_1..=OP_16).contains(n)
                && !keys.is_empty()
                && keys
                    .iter()
                    .all(|key| matches!(key, Chunk::Push(bytes) if is_public_key(bytes)))
        }
        _ => false,
    }
}

fn non_empty(address: String) -> Option<String> {
    if address.is_empty() {
        None
    } else {
        Some(address)
    }
}
