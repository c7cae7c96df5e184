//! Script chunk classification
//!
//! Turns a decoded script into the ordered chunk list the tokenizer walks:
//! - **Chunk** - one classified script element (data push, opcode, or raw bytes)
//! - **Opcodes** - numeric opcode to mnemonic resolution

pub mod chunk;
pub mod opcodes;

pub use chunk::{chunks, Chunk};
pub use opcodes::mnemonic;
