use std::sync::Arc;

use crate::core::{PipelineResult, Step};
use crate::streams::{Cursor, Sequence};

/// Restartable sequence over an in-memory collection.
///
/// Cursors share the backing slice read-only and each keeps its own index,
/// so any number of traversals can run side by side.
#[derive(Debug, Clone)]
pub struct VecSequence<T> {
    items: Arc<[T]>,
}

impl<T> VecSequence<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<T> From<Vec<T>> for VecSequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for VecSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: Clone> Sequence for VecSequence<T> {
    type Item = T;
    type Cursor = VecCursor<T>;

    fn iterator(&mut self) -> Self::Cursor {
        VecCursor {
            items: Arc::clone(&self.items),
            pos: 0,
        }
    }
}

#[derive(Debug)]
pub struct VecCursor<T> {
    items: Arc<[T]>,
    pos: usize,
}

impl<T: Clone> Cursor for VecCursor<T> {
    type Item = T;

    fn advance(&mut self) -> PipelineResult<Step<T>> {
        let Some(item) = self.items.get(self.pos) else {
            return Ok(Step::Exhausted);
        };
        self.pos += 1;
        Ok(Step::Value(item.clone()))
    }
}
