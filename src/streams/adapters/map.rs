use tracing::debug;

use crate::core::{PipelineError, PipelineResult, Step, TransformError};
use crate::streams::Cursor;

/// Applies a fallible mapping to each item pulled from upstream.
///
/// Exactly one upstream pull per `advance`; nothing is buffered ahead. When
/// the mapping fails the upstream cursor is dropped on the spot, which
/// releases whatever resource it owns, and no further items are pulled.
#[derive(Debug)]
pub struct MapCursor<C, F> {
    upstream: Option<C>,
    f: F,
    index: u64,
}

impl<C, F> MapCursor<C, F> {
    pub fn new(upstream: C, f: F) -> Self {
        Self {
            upstream: Some(upstream),
            f,
            index: 0,
        }
    }

    /// Whether the upstream cursor has been dropped.
    pub fn is_released(&self) -> bool {
        self.upstream.is_none()
    }
}

impl<C, F, U, E> Cursor for MapCursor<C, F>
where
    C: Cursor,
    F: FnMut(C::Item) -> Result<U, E>,
    E: Into<TransformError>,
{
    type Item = U;

    fn advance(&mut self) -> PipelineResult<Step<U>> {
        let Some(upstream) = self.upstream.as_mut() else {
            return Ok(Step::Exhausted);
        };

        let item = match upstream.advance() {
            Ok(Step::Value(item)) => item,
            Ok(Step::Exhausted) => {
                self.upstream = None;
                return Ok(Step::Exhausted);
            }
            Err(e) => {
                self.upstream = None;
                return Err(e);
            }
        };

        let index = self.index;
        self.index += 1;
        match (self.f)(item) {
            Ok(mapped) => Ok(Step::Value(mapped)),
            Err(cause) => {
                self.upstream = None;
                debug!(index, "mapping failed, upstream released");
                Err(PipelineError::TransformFailure {
                    index,
                    source: cause.into(),
                })
            }
        }
    }
}
