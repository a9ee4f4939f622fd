pub mod adapters;
pub mod collection;
pub mod flatten;
pub mod generators;
pub mod iter;
pub mod lines;
pub mod sequence;

pub use adapters::{CursorExt, FilterCursor, MapCursor, SequenceExt, TakeCursor, ZipCursor};
pub use collection::{VecCursor, VecSequence};
pub use flatten::{Flatten, FlattenCursor};
pub use generators::{Countdown, CountdownCursor, Repeat, RepeatCursor};
pub use iter::{IterCursor, Records};
pub use lines::{LineCursor, LineFiles, LineSequence, SourceFiles};
pub use sequence::{Cursor, Sequence};
