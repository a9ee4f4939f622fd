mod filter;
mod map;
mod take;
mod zip;

pub use filter::FilterCursor;
pub use map::MapCursor;
pub use take::TakeCursor;
pub use zip::ZipCursor;

use std::convert::Infallible;

use crate::core::{PipelineResult, Step, TransformError};
use crate::streams::flatten::{Flatten, FlattenCursor};
use crate::streams::iter::Records;
use crate::streams::{Cursor, Sequence};

/// Lazy combinators available on every [`Cursor`].
///
/// None of these pull anything when called; work only happens on `advance`.
pub trait CursorExt: Cursor + Sized {
    fn try_map<U, E, F>(self, f: F) -> MapCursor<Self, F>
    where
        F: FnMut(Self::Item) -> Result<U, E>,
        E: Into<TransformError>,
    {
        MapCursor::new(self, f)
    }

    fn map<U, F>(self, mut f: F) -> impl Cursor<Item = U>
    where
        F: FnMut(Self::Item) -> U,
    {
        MapCursor::new(self, move |item: Self::Item| Ok::<U, Infallible>(f(item)))
    }

    fn filter<P>(self, predicate: P) -> FilterCursor<Self, P>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        FilterCursor::new(self, predicate)
    }

    fn take(self, limit: u64) -> TakeCursor<Self> {
        TakeCursor::new(self, limit)
    }

    fn zip<B: Cursor>(self, other: B) -> ZipCursor<Self, B> {
        ZipCursor::new(self, other)
    }

    fn flatten(self) -> FlattenCursor<Self>
    where
        Self::Item: Sequence,
    {
        FlattenCursor::new(self)
    }

    /// Bridges into [`Iterator`], one `Result` per item.
    fn records(self) -> Records<Self> {
        Records::new(self)
    }

    /// Drains the cursor into memory. Only use on bounded data.
    fn collect_values(mut self) -> PipelineResult<Vec<Self::Item>> {
        let mut out = Vec::new();
        while let Step::Value(v) = self.advance()? {
            out.push(v);
        }
        Ok(out)
    }

    fn count_values(mut self) -> PipelineResult<u64> {
        let mut n = 0;
        while self.advance()?.is_value() {
            n += 1;
        }
        Ok(n)
    }
}

impl<C: Cursor> CursorExt for C {}

pub trait SequenceExt: Sequence + Sized {
    /// Concatenates the inner sequences of this sequence of sequences.
    fn flatten(self) -> Flatten<Self>
    where
        Self::Item: Sequence,
    {
        Flatten::new(self)
    }
}

impl<S: Sequence> SequenceExt for S {}
