//! Script tokenizer
//!
//! Re-groups a script's chunks into tapes of cells:
//! - **Split** - split rules and first-match-wins token matching
//! - **Transform** - per-item reshaping hook
//! - **Tokenizer** - the tape/cell grouping pass

pub mod split;
pub mod tokenizer;
pub mod transform;

pub use split::{find_match, Include, SplitRule, Token};
pub use tokenizer::Tokenizer;
pub use transform::Transform;
