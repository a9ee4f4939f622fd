use crate::core::{PipelineResult, Step};

/// Stateful, single-pass position over a series of items.
///
/// `advance` is the only operation that moves a cursor forward. Every
/// implementation in this crate is fused: once `advance` has returned
/// [`Step::Exhausted`] or an error, all subsequent calls return
/// [`Step::Exhausted`]. A cursor never revives.
pub trait Cursor {
    type Item;

    /// Pulls the next item.
    ///
    /// End of data is reported as `Ok(Step::Exhausted)`, never as an error.
    /// Errors are reserved for genuine faults (I/O, failing transforms) and
    /// are returned at most once.
    fn advance(&mut self) -> PipelineResult<Step<Self::Item>>;
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;

    #[inline]
    fn advance(&mut self) -> PipelineResult<Step<Self::Item>> {
        (**self).advance()
    }
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    type Item = C::Item;

    #[inline]
    fn advance(&mut self) -> PipelineResult<Step<Self::Item>> {
        (**self).advance()
    }
}

/// Capability to manufacture cursors over a logical, ordered series of items.
///
/// Calling [`iterator`] never consumes backing data by itself; only the
/// returned cursor does. What a second call yields depends on the backing:
///
/// - collection and generator backed sequences are restartable: every call
///   returns an independent cursor starting from the beginning;
/// - resource backed sequences are single use: the first cursor takes
///   ownership of the resource and every later call returns a cursor that is
///   immediately exhausted;
/// - combinators inherit the behaviour of what they wrap.
///
/// [`iterator`]: Sequence::iterator
pub trait Sequence {
    type Item;
    type Cursor: Cursor<Item = Self::Item>;

    fn iterator(&mut self) -> Self::Cursor;
}
