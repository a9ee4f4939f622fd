//! Record mappings usable with [`CursorExt::try_map`] and the pipeline entry
//! points. Every mapping leaves the line terminator untouched.
//!
//! [`CursorExt::try_map`]: crate::streams::CursorExt::try_map

use std::convert::Infallible;

use thiserror::Error;

use crate::core::Record;
use crate::core::record::split_terminator;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("non-ASCII character {ch:?} at byte {offset}")]
pub struct NonAsciiRecord {
    pub offset: usize,
    pub ch: char,
}

pub fn identity(record: Record) -> Result<Record, Infallible> {
    Ok(record)
}

pub fn uppercase(record: Record) -> Result<Record, Infallible> {
    Ok(record.to_uppercase())
}

pub fn lowercase(record: Record) -> Result<Record, Infallible> {
    Ok(record.to_lowercase())
}

/// Replaces every occurrence of `pattern` in the line body.
pub fn replace(
    pattern: String,
    replacement: String,
) -> impl FnMut(Record) -> Result<Record, Infallible> {
    move |record| {
        let (body, terminator) = split_terminator(&record);
        Ok(format!("{}{terminator}", body.replace(&pattern, &replacement)))
    }
}

/// Passes ASCII lines through, rejects the first line that is not.
pub fn ascii_only(record: Record) -> Result<Record, NonAsciiRecord> {
    match record.char_indices().find(|(_, c)| !c.is_ascii()) {
        Some((offset, ch)) => Err(NonAsciiRecord { offset, ch }),
        None => Ok(record),
    }
}
