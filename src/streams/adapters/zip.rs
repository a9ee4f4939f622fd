use crate::core::{PipelineResult, Step};
use crate::streams::Cursor;

/// Pairs items from two cursors; ends as soon as either side ends.
///
/// The left side is pulled first. If it yields a value and the right side
/// is exhausted, that left value is dropped.
#[derive(Debug)]
pub struct ZipCursor<A, B> {
    sides: Option<(A, B)>,
}

impl<A, B> ZipCursor<A, B> {
    pub fn new(left: A, right: B) -> Self {
        Self {
            sides: Some((left, right)),
        }
    }
}

impl<A: Cursor, B: Cursor> Cursor for ZipCursor<A, B> {
    type Item = (A::Item, B::Item);

    fn advance(&mut self) -> PipelineResult<Step<Self::Item>> {
        let Some((left, right)) = self.sides.as_mut() else {
            return Ok(Step::Exhausted);
        };
        let pair = left.advance().and_then(|l| match l {
            Step::Value(l) => Ok(right.advance()?.map(|r| (l, r))),
            Step::Exhausted => Ok(Step::Exhausted),
        });
        if !matches!(pair, Ok(Step::Value(_))) {
            self.sides = None;
        }
        pair
    }
}
