use crate::script::Chunk;
use crate::types::ItemFields;
use std::fmt;
use std::sync::Arc;

type TransformFn = dyn Fn(ItemFields, &Chunk<'_>) -> anyhow::Result<ItemFields> + Send + Sync;

/// Caller-supplied hook that reshapes every item before it is stored
///
/// The hook receives the canonical fields and the chunk they were built from,
/// and must be free of side effects. Returning an error aborts tokenization.
#[derive(Clone)]
pub struct Transform(Arc<TransformFn>);

impl Transform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(ItemFields, &Chunk<'_>) -> anyhow::Result<ItemFields> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn identity() -> Self {
        Self::new(|fields, _| Ok(fields))
    }

    pub fn apply(&self, fields: ItemFields, chunk: &Chunk<'_>) -> anyhow::Result<ItemFields> {
        (self.0)(fields, chunk)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}
