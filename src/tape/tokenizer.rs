use super::split::{find_match, Include, SplitRule};
use super::transform::Transform;
use crate::errors::{TokenizeError, TokenizeResult};
use crate::script::{chunks, Chunk};
use crate::types::{Cell, Item, ItemFields, Tape};
use bitcoin::Script;
use tracing::debug;

/// Groups a script's chunks into tapes according to split rules
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    rules: &'a [SplitRule],
    transform: &'a Transform,
}

impl<'a> Tokenizer<'a> {
    pub fn new(rules: &'a [SplitRule], transform: &'a Transform) -> Self {
        Self { rules, transform }
    }

    /// Tokenize a decoded script
    pub fn tokenize(&self, script: &Script) -> TokenizeResult<Vec<Tape>> {
        self.tokenize_chunks(&chunks(script))
    }

    /// Tokenize an already classified chunk sequence
    ///
    /// Split matching always looks at the untransformed chunk. The transform
    /// runs for every chunk, including excluded tokens whose output is dropped.
    pub fn tokenize_chunks(&self, chunks: &[Chunk<'_>]) -> TokenizeResult<Vec<Tape>> {
        let mut tapes = TapeBuilder::default();

        for (chunk_index, chunk) in chunks.iter().enumerate() {
            // Items are indexed against the pending cell before any split
            let item = Item::new(*chunk, chunk_index, tapes.pending_len());
            let fields = self.transform_item(item)?;
            let matched = find_match(self.rules, chunk);

            match matched {
                None => tapes.push(fields),
                Some(Include::Exclude) => tapes.close(),
                Some(Include::Left) => {
                    tapes.push(fields);
                    tapes.close();
                }
                Some(Include::Right) => {
                    tapes.close();
                    tapes.push(fields);
                }
                Some(Include::Center) => {
                    tapes.close();
                    tapes.push(fields);
                    tapes.close();
                }
            }
        }

        let tapes = tapes.finish();
        debug!("Tokenized {} chunks into {} tapes", chunks.len(), tapes.len());
        Ok(tapes)
    }

    fn transform_item(&self, item: Item<'_>) -> TokenizeResult<ItemFields> {
        self.transform
            .apply(item.to_fields(), &item.chunk)
            .map_err(|source| TokenizeError::Transform {
                chunk_index: item.chunk_index,
                source,
            })
    }
}

/// Accumulates the pending cell and the finished tapes
#[derive(Debug, Default)]
struct TapeBuilder {
    tapes: Vec<Tape>,
    pending: Cell,
}

impl TapeBuilder {
    fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn push(&mut self, fields: ItemFields) {
        self.pending.push(fields);
    }

    /// Emit the pending cell as a tape, even when it is empty
    fn close(&mut self) {
        let cell = std::mem::take(&mut self.pending);
        let index = self.tapes.len();
        self.tapes.push(Tape { cell, index });
    }

    fn finish(mut self) -> Vec<Tape> {
        if !self.pending.is_empty() {
            self.close();
        }
        self.tapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::Token;
    use serde_json::{json, Value};

    fn pipe_rule(include: Include) -> Vec<SplitRule> {
        vec![SplitRule::new(Token::S("|".to_string()), include)]
    }

    fn sizes(tapes: &[Tape]) -> Vec<usize> {
        tapes.iter().map(|t| t.cell.len()).collect()
    }

    const SCRIPT: [Chunk<'static>; 5] = [
        Chunk::Push(b"a"),
        Chunk::Push(b"|"),
        Chunk::Push(b"b"),
        Chunk::Push(b"c"),
        Chunk::Push(b"|"),
    ];

    #[test]
    fn test_no_rules_single_tape() {
        let transform = Transform::default();
        let tapes = Tokenizer::new(&[], &transform)
            .tokenize_chunks(&SCRIPT)
            .unwrap();
        assert_eq!(sizes(&tapes), vec![5]);
        assert_eq!(tapes[0].index, 0);
    }

    #[test]
    fn test_empty_script_no_tapes() {
        let transform = Transform::default();
        let rules = pipe_rule(Include::Center);
        let tapes = Tokenizer::new(&rules, &transform)
            .tokenize_chunks(&[])
            .unwrap();
        assert!(tapes.is_empty());
    }

    #[test]
    fn test_exclude_trailing_token_leaves_no_empty_tail() {
        let transform = Transform::default();
        let rules = pipe_rule(Include::Exclude);
        let tapes = Tokenizer::new(&rules, &transform)
            .tokenize_chunks(&SCRIPT)
            .unwrap();
        assert_eq!(sizes(&tapes), vec![1, 2]);
        assert_eq!(tapes[1].texts(), vec!["b", "c"]);
    }

    #[test]
    fn test_leading_token_closes_empty_cell() {
        let transform = Transform::default();
        let rules = pipe_rule(Include::Right);
        let chunks = [Chunk::Push(b"|"), Chunk::Push(b"a")];
        let tapes = Tokenizer::new(&rules, &transform)
            .tokenize_chunks(&chunks)
            .unwrap();
        assert_eq!(sizes(&tapes), vec![0, 2]);
        assert_eq!(tapes[1].cell[0]["i"], json!(0));
        assert_eq!(tapes[1].cell[1]["i"], json!(1));
    }

    #[test]
    fn test_split_token_keeps_position_of_closed_cell() {
        let transform = Transform::default();
        let rules = pipe_rule(Include::Right);
        let chunks = [
            Chunk::Push(b"a"),
            Chunk::Push(b"b"),
            Chunk::Push(b"|"),
            Chunk::Push(b"c"),
        ];
        let tapes = Tokenizer::new(&rules, &transform)
            .tokenize_chunks(&chunks)
            .unwrap();
        assert_eq!(sizes(&tapes), vec![2, 2]);
        assert_eq!(tapes[1].cell[0]["i"], json!(2));
        assert_eq!(tapes[1].cell[1]["i"], json!(1));

        let rules = vec![SplitRule::new(Token::Op(0x76), Include::Center)];
        let chunks = [Chunk::Push(b"a"), Chunk::Push(b"b"), Chunk::Op(0x76)];
        let tapes = Tokenizer::new(&rules, &transform)
            .tokenize_chunks(&chunks)
            .unwrap();
        assert_eq!(sizes(&tapes), vec![2, 1]);
        assert_eq!(tapes[1].cell[0]["ops"], json!("OP_DUP"));
        assert_eq!(tapes[1].cell[0]["i"], json!(2));
    }

    #[test]
    fn test_cell_and_chunk_indices() {
        let transform = Transform::default();
        let rules = pipe_rule(Include::Center);
        let tapes = Tokenizer::new(&rules, &transform)
            .tokenize_chunks(&SCRIPT)
            .unwrap();

        assert_eq!(sizes(&tapes), vec![1, 1, 2, 1]);
        let indices: Vec<(Value, Value)> = tapes
            .iter()
            .flat_map(|t| t.cell.iter())
            .map(|item| (item["ii"].clone(), item["i"].clone()))
            .collect();
        assert_eq!(
            indices,
            vec![
                (json!(0), json!(0)),
                (json!(1), json!(1)),
                (json!(2), json!(0)),
                (json!(3), json!(1)),
                (json!(4), json!(2)),
            ]
        );
        let tape_indices: Vec<usize> = tapes.iter().map(|t| t.index).collect();
        assert_eq!(tape_indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_transform_error_is_fatal() {
        let transform = Transform::new(|fields, chunk| {
            if chunk.text().as_deref() == Some("c") {
                anyhow::bail!("no c allowed");
            }
            Ok(fields)
        });
        let err = Tokenizer::new(&[], &transform)
            .tokenize_chunks(&SCRIPT)
            .unwrap_err();
        assert!(matches!(err, TokenizeError::Transform { chunk_index: 3, .. }));
    }

    #[test]
    fn test_transform_runs_on_excluded_tokens() {
        let transform = Transform::new(|fields, chunk| {
            if chunk.text().as_deref() == Some("|") {
                anyhow::bail!("saw a pipe");
            }
            Ok(fields)
        });
        let rules = pipe_rule(Include::Exclude);
        let result = Tokenizer::new(&rules, &transform).tokenize_chunks(&SCRIPT);
        assert!(result.is_err());
    }
}
