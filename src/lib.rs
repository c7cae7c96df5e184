//! Bitcoin transaction script tokenizer
//!
//! Decodes a transaction and re-groups every input and output script into
//! tapes of cells, split at caller-chosen tokens, so indexers can match on
//! individual pushes and opcodes instead of raw script bytes.

pub mod cli;
pub mod config;
pub mod errors;
pub mod metadata;
pub mod parser;
pub mod rpc;
pub mod script;
pub mod tape;
pub mod types;

pub use errors::{AppError, AppResult};
pub use parser::{parse, parse_with_source, ParseOptions, TxSource};
pub use tape::{Include, SplitRule, Token, Transform};
pub use types::TxRecord;
