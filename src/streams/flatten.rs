use crate::core::{PipelineResult, Step};
use crate::streams::{Cursor, Sequence};

/// Sequence of sequences exposed as one flat sequence.
///
/// Restartability follows the outer sequence: a restartable outer sequence
/// hands out fresh inner sequences on every traversal.
#[derive(Debug, Clone)]
pub struct Flatten<S> {
    outer: S,
}

impl<S> Flatten<S> {
    pub fn new(outer: S) -> Self {
        Self { outer }
    }
}

impl<S> Sequence for Flatten<S>
where
    S: Sequence,
    S::Item: Sequence,
{
    type Item = <S::Item as Sequence>::Item;
    type Cursor = FlattenCursor<S::Cursor>;

    fn iterator(&mut self) -> Self::Cursor {
        FlattenCursor::new(self.outer.iterator())
    }
}

/// Cursor delegating to one inner cursor at a time.
///
/// Inner sequences are drained strictly in outer order. An inner cursor is
/// dropped the moment it reports exhaustion, before the next outer item is
/// pulled, so at most one inner cursor (and whatever it owns) is alive.
pub struct FlattenCursor<O>
where
    O: Cursor,
    O::Item: Sequence,
{
    outer: Option<O>,
    inner: Option<<O::Item as Sequence>::Cursor>,
}

impl<O> FlattenCursor<O>
where
    O: Cursor,
    O::Item: Sequence,
{
    pub fn new(outer: O) -> Self {
        Self {
            outer: Some(outer),
            inner: None,
        }
    }

    pub fn has_active_inner(&self) -> bool {
        self.inner.is_some()
    }

    fn fuse(&mut self) {
        self.inner = None;
        self.outer = None;
    }
}

impl<O> Cursor for FlattenCursor<O>
where
    O: Cursor,
    O::Item: Sequence,
{
    type Item = <O::Item as Sequence>::Item;

    fn advance(&mut self) -> PipelineResult<Step<Self::Item>> {
        loop {
            if let Some(inner) = self.inner.as_mut() {
                match inner.advance() {
                    Ok(Step::Value(v)) => return Ok(Step::Value(v)),
                    Ok(Step::Exhausted) => self.inner = None,
                    Err(e) => {
                        self.fuse();
                        return Err(e);
                    }
                }
            }

            let Some(outer) = self.outer.as_mut() else {
                return Ok(Step::Exhausted);
            };
            match outer.advance() {
                Ok(Step::Value(mut seq)) => self.inner = Some(seq.iterator()),
                Ok(Step::Exhausted) => {
                    self.outer = None;
                    return Ok(Step::Exhausted);
                }
                Err(e) => {
                    self.fuse();
                    return Err(e);
                }
            }
        }
    }
}
