//! Opcode mnemonics
//!
//! The `bitcoin` crate names several opcodes after their current BTC meaning
//! (`OP_PUSHNUM_1`, `OP_SUBSTR`, `OP_CLTV`, ...). Split rules and indexed items
//! use the legacy script names instead, so those codes are renamed here and
//! everything else falls through to the crate's own naming.

use bitcoin::opcodes::Opcode;

pub const OP_0: u8 = 0x00;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;
pub const OP_16: u8 = 0x60;
pub const OP_RETURN: u8 = 0x6a;

/// Resolve a numeric opcode to its mnemonic
pub fn mnemonic(code: u8) -> String {
    let name = match code {
        OP_0 => "OP_0",
        OP_1NEGATE => "OP_1NEGATE",
        OP_1..=OP_16 => return format!("OP_{}", code - OP_1 + 1),
        0x7f => "OP_SPLIT",
        0x80 => "OP_NUM2BIN",
        0x81 => "OP_BIN2NUM",
        0xb1 => "OP_CHECKLOCKTIMEVERIFY",
        0xb2 => "OP_CHECKSEQUENCEVERIFY",
        0xfd => "OP_PUBKEYHASH",
        0xfe => "OP_PUBKEY",
        _ => return Opcode::from(code).to_string(),
    };
    name.to_string()
}
