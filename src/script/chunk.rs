use super::opcodes::{mnemonic, OP_0};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use bitcoin::script::Instruction;
use bitcoin::Script;
use std::borrow::Cow;

/// One classified script element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk<'a> {
    /// Data push carrying its payload
    Push(&'a [u8]),
    /// Non-push opcode (OP_0 and the small-integer opcodes included)
    Op(u8),
    /// Bytes that could not be decoded as script instructions
    Raw(&'a [u8]),
}

impl<'a> Chunk<'a> {
    /// Best-effort text form of a data push (invalid UTF-8 becomes U+FFFD)
    pub fn text(&self) -> Option<Cow<'a, str>> {
        match *self {
            Chunk::Push(data) => Some(String::from_utf8_lossy(data)),
            _ => None,
        }
    }

    /// Standard base64 form of a data push
    pub fn base64(&self) -> Option<String> {
        match self {
            Chunk::Push(data) => Some(BASE64_STANDARD.encode(data)),
            _ => None,
        }
    }

    pub fn opcode(&self) -> Option<u8> {
        match *self {
            Chunk::Op(code) => Some(code),
            _ => None,
        }
    }

    pub fn mnemonic(&self) -> Option<String> {
        self.opcode().map(mnemonic)
    }

    /// Pushed payload, if any
    pub fn data(&self) -> Option<&'a [u8]> {
        match *self {
            Chunk::Push(data) => Some(data),
            _ => None,
        }
    }
}

/// Split a script into classified chunks, in script order
///
/// A truncated push ends the walk: everything from the offending byte onwards
/// becomes a single `Chunk::Raw`.
pub fn chunks(script: &Script) -> Vec<Chunk<'_>> {
    let mut result = Vec::new();
    let mut instructions = script.instructions();

    loop {
        let remaining = instructions.as_script().as_bytes();
        match instructions.next() {
            None => break,
            Some(Ok(Instruction::PushBytes(bytes))) => {
                // OP_0 is an opcode with no payload, not an empty push
                if bytes.is_empty() && remaining.first() == Some(&OP_0) {
                    result.push(Chunk::Op(OP_0));
                } else {
                    result.push(Chunk::Push(bytes.as_bytes()));
                }
            }
            Some(Ok(Instruction::Op(opcode))) => result.push(Chunk::Op(opcode.to_u8())),
            Some(Err(_)) => {
                result.push(Chunk::Raw(remaining));
                break;
            }
        }
    }

    result
}
