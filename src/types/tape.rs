//! Tape and cell types produced by the tokenizer

use crate::script::Chunk;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stored form of one item: a JSON object the transform hook may reshape freely
pub type ItemFields = Map<String, Value>;

/// Ordered items of one cell
pub type Cell = Vec<ItemFields>;

/// Field names of the canonical item shape
pub mod keys {
    pub const BASE64: &str = "b";
    pub const TEXT: &str = "s";
    pub const OPCODE: &str = "op";
    pub const MNEMONIC: &str = "ops";
    pub const RAW: &str = "raw";
    pub const CHUNK_INDEX: &str = "ii";
    pub const CELL_INDEX: &str = "i";
}

/// Canonical, untransformed item built from one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<'a> {
    pub chunk: Chunk<'a>,
    /// Position of the chunk in the script
    pub chunk_index: usize,
    /// Position of the item within its cell
    pub cell_index: usize,
}

impl<'a> Item<'a> {
    pub fn new(chunk: Chunk<'a>, chunk_index: usize, cell_index: usize) -> Self {
        Self {
            chunk,
            chunk_index,
            cell_index,
        }
    }

    /// Render the canonical field set handed to the transform hook
    pub fn to_fields(&self) -> ItemFields {
        let mut fields = Map::new();
        match self.chunk {
            Chunk::Push(_) => {
                fields.insert(keys::BASE64.into(), Value::from(self.chunk.base64()));
                fields.insert(keys::TEXT.into(), Value::from(self.chunk.text()));
            }
            Chunk::Op(code) => {
                fields.insert(keys::OPCODE.into(), Value::from(code));
                fields.insert(keys::MNEMONIC.into(), Value::from(self.chunk.mnemonic()));
            }
            Chunk::Raw(bytes) => {
                fields.insert(keys::RAW.into(), Value::from(hex::encode(bytes)));
            }
        }
        fields.insert(keys::CHUNK_INDEX.into(), Value::from(self.chunk_index));
        fields.insert(keys::CELL_INDEX.into(), Value::from(self.cell_index));
        fields
    }
}

/// One segment of a script, bounded by split tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tape {
    pub cell: Cell,
    #[serde(rename = "i")]
    pub index: usize,
}

impl Tape {
    /// Text value of every item that still carries one, in cell order
    pub fn texts(&self) -> Vec<&str> {
        self.cell
            .iter()
            .filter_map(|item| item.get(keys::TEXT).and_then(Value::as_str))
            .collect()
    }
}
