use crate::core::{PipelineResult, Step};
use crate::streams::{Cursor, Sequence};

/// Counts down from `start` to 1, then ends.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    start: u64,
}

impl Countdown {
    pub fn new(start: u64) -> Self {
        Self { start }
    }
}

impl Sequence for Countdown {
    type Item = u64;
    type Cursor = CountdownCursor;

    fn iterator(&mut self) -> Self::Cursor {
        CountdownCursor { next: self.start }
    }
}

#[derive(Debug)]
pub struct CountdownCursor {
    next: u64,
}

impl Cursor for CountdownCursor {
    type Item = u64;

    fn advance(&mut self) -> PipelineResult<Step<u64>> {
        if self.next == 0 {
            return Ok(Step::Exhausted);
        }
        let n = self.next;
        self.next -= 1;
        Ok(Step::Value(n))
    }
}

/// Yields the same value forever. Bound it with
/// [`take`](crate::streams::CursorExt::take) before draining.
#[derive(Debug, Clone)]
pub struct Repeat<T> {
    value: T,
}

impl<T: Clone> Repeat<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone> Sequence for Repeat<T> {
    type Item = T;
    type Cursor = RepeatCursor<T>;

    fn iterator(&mut self) -> Self::Cursor {
        RepeatCursor {
            value: self.value.clone(),
        }
    }
}

#[derive(Debug)]
pub struct RepeatCursor<T> {
    value: T,
}

impl<T: Clone> Cursor for RepeatCursor<T> {
    type Item = T;

    #[inline]
    fn advance(&mut self) -> PipelineResult<Step<T>> {
        Ok(Step::Value(self.value.clone()))
    }
}
