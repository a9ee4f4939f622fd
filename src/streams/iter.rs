use std::iter::FusedIterator;

use crate::core::{PipelineResult, Step};
use crate::streams::Cursor;

/// [`Iterator`] view of a cursor. Yields `Err` at most once, then ends.
#[derive(Debug)]
pub struct Records<C> {
    cursor: C,
    done: bool,
}

impl<C> Records<C> {
    pub fn new(cursor: C) -> Self {
        Self {
            cursor,
            done: false,
        }
    }
}

impl<C: Cursor> Iterator for Records<C> {
    type Item = PipelineResult<C::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cursor.advance() {
            Ok(Step::Value(v)) => Some(Ok(v)),
            Ok(Step::Exhausted) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<C: Cursor> FusedIterator for Records<C> {}

/// Single-use [`Cursor`] over any [`Iterator`]; items are moved out, not
/// cloned.
#[derive(Debug)]
pub struct IterCursor<I> {
    iter: Option<I>,
}

impl<I: Iterator> IterCursor<I> {
    pub fn new<T: IntoIterator<IntoIter = I>>(items: T) -> Self {
        Self {
            iter: Some(items.into_iter()),
        }
    }
}

impl<I: Iterator> Cursor for IterCursor<I> {
    type Item = I::Item;

    fn advance(&mut self) -> PipelineResult<Step<I::Item>> {
        let Some(iter) = self.iter.as_mut() else {
            return Ok(Step::Exhausted);
        };
        match iter.next() {
            Some(v) => Ok(Step::Value(v)),
            None => {
                self.iter = None;
                Ok(Step::Exhausted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streams::{Countdown, CursorExt, Sequence};

    #[test]
    fn works_with_std_adapters() {
        let max = Countdown::new(5)
            .iterator()
            .map(|i| i * i * i)
            .records()
            .map(Result::unwrap)
            .max();
        assert_eq!(max, Some(125));
    }

    #[test]
    fn iter_cursor_moves_items_and_fuses() {
        let mut c = IterCursor::new(vec![String::from("a"), String::from("b")]);
        assert_eq!(c.advance().unwrap(), Step::Value("a".to_string()));
        assert_eq!(c.advance().unwrap(), Step::Value("b".to_string()));
        assert_eq!(c.advance().unwrap(), Step::Exhausted);
        assert_eq!(c.advance().unwrap(), Step::Exhausted);
    }

    #[test]
    fn collects_into_result() {
        let squares: Result<Vec<_>, _> = Countdown::new(3)
            .iterator()
            .map(|i| i * i)
            .records()
            .collect();
        assert_eq!(squares.unwrap(), vec![9, 4, 1]);
    }
}
