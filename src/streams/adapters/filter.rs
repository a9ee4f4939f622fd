use crate::core::{PipelineResult, Step};
use crate::streams::Cursor;

/// Passes through only the items matching a predicate.
#[derive(Debug)]
pub struct FilterCursor<C, P> {
    upstream: Option<C>,
    predicate: P,
}

impl<C, P> FilterCursor<C, P> {
    pub fn new(upstream: C, predicate: P) -> Self {
        Self {
            upstream: Some(upstream),
            predicate,
        }
    }
}

impl<C, P> Cursor for FilterCursor<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item) -> bool,
{
    type Item = C::Item;

    fn advance(&mut self) -> PipelineResult<Step<C::Item>> {
        loop {
            let Some(upstream) = self.upstream.as_mut() else {
                return Ok(Step::Exhausted);
            };
            match upstream.advance() {
                Ok(Step::Value(item)) => {
                    if (self.predicate)(&item) {
                        return Ok(Step::Value(item));
                    }
                }
                Ok(Step::Exhausted) => {
                    self.upstream = None;
                    return Ok(Step::Exhausted);
                }
                Err(e) => {
                    self.upstream = None;
                    return Err(e);
                }
            }
        }
    }
}
