//! Lazy, pull-based streaming of line-oriented data.
//!
//! Data only moves when the consumer asks for it: a [`StreamWriter`] pulls
//! from a [`Cursor`], which pulls from whatever it wraps, down to a
//! [`LineSequence`] reading one line from its file. Nothing is read ahead and
//! nothing is materialized, so memory use does not depend on input size.
//!
//! ```no_run
//! use pullstream::tasks::run;
//! use pullstream::transforms::uppercase;
//!
//! let summary = run("src.txt", "dest.txt", uppercase)?;
//! println!("{summary}");
//! # Ok::<(), pullstream::core::PipelineError>(())
//! ```
//!
//! [`StreamWriter`]: tasks::StreamWriter
//! [`Cursor`]: streams::Cursor
//! [`LineSequence`]: streams::LineSequence

pub mod core;
pub mod streams;
pub mod tasks;
pub mod transforms;
pub mod ui;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
