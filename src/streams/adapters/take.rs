use crate::core::{PipelineResult, Step};
use crate::streams::Cursor;

/// Yields at most `limit` items, then drops the upstream cursor.
#[derive(Debug)]
pub struct TakeCursor<C> {
    upstream: Option<C>,
    remaining: u64,
}

impl<C> TakeCursor<C> {
    pub fn new(upstream: C, limit: u64) -> Self {
        Self {
            upstream: (limit > 0).then_some(upstream),
            remaining: limit,
        }
    }
}

impl<C: Cursor> Cursor for TakeCursor<C> {
    type Item = C::Item;

    fn advance(&mut self) -> PipelineResult<Step<C::Item>> {
        let Some(upstream) = self.upstream.as_mut() else {
            return Ok(Step::Exhausted);
        };
        match upstream.advance() {
            Ok(Step::Value(item)) => {
                self.remaining -= 1;
                if self.remaining == 0 {
                    self.upstream = None;
                }
                Ok(Step::Value(item))
            }
            Ok(Step::Exhausted) => {
                self.upstream = None;
                Ok(Step::Exhausted)
            }
            Err(e) => {
                self.upstream = None;
                Err(e)
            }
        }
    }
}
