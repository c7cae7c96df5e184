//! Split rules and token matching
//!
//! A rule pairs one token matcher with an inclusion policy. Rules are tested
//! in the order supplied and the first match wins.

use crate::script::Chunk;
use serde::{Deserialize, Serialize};

/// What a split rule matches on; exactly one selector per rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    /// Text-decoded push equality
    S(String),
    /// Base64-encoded push equality
    B(String),
    /// Numeric opcode equality
    Op(u8),
    /// Opcode mnemonic equality
    Ops(String),
}

impl Token {
    /// Whether `chunk` is this token. Pushes only match `S`/`B`, opcodes only `Op`/`Ops`.
    pub fn matches(&self, chunk: &Chunk<'_>) -> bool {
        match (self, chunk) {
            (Token::S(text), Chunk::Push(_)) => chunk.text().is_some_and(|s| s == text.as_str()),
            (Token::B(encoded), Chunk::Push(_)) => chunk.base64().is_some_and(|b| b == *encoded),
            (Token::Op(code), Chunk::Op(op)) => code == op,
            (Token::Ops(name), Chunk::Op(_)) => chunk.mnemonic().is_some_and(|m| m == *name),
            _ => false,
        }
    }
}

/// Where a matched token goes relative to the boundary it creates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Include {
    /// Dropped from every cell
    #[default]
    #[serde(rename = "x")]
    Exclude,
    /// Closes the cell before it
    #[serde(rename = "l")]
    Left,
    /// Opens the cell after it
    #[serde(rename = "r")]
    Right,
    /// Gets a tape of its own
    #[serde(rename = "c")]
    Center,
}

impl Include {
    pub fn is_exclude(&self) -> bool {
        matches!(self, Include::Exclude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRule {
    pub token: Token,
    #[serde(default, skip_serializing_if = "Include::is_exclude")]
    pub include: Include,
}

impl SplitRule {
    pub fn new(token: Token, include: Include) -> Self {
        Self { token, include }
    }

    pub fn exclude(token: Token) -> Self {
        Self::new(token, Include::Exclude)
    }
}

/// Inclusion policy of the first rule matching `chunk`, if any
pub fn find_match(rules: &[SplitRule], chunk: &Chunk<'_>) -> Option<Include> {
    rules
        .iter()
        .find(|rule| rule.token.matches(chunk))
        .map(|rule| rule.include)
}
