//! Transaction tokenizer - Type System
//!
//! - `tape`: Items, cells and tapes produced from one script
//! - `record`: Per-transaction record with sender/receiver metadata

pub mod record;
pub mod tape;

pub use record::{InputRecord, OutputRecord, Receiver, Sender, TxHash, TxRecord};
pub use tape::{Cell, Item, ItemFields, Tape};
