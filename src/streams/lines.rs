use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::{PipelineError, PipelineResult, Record, ResourceRole, Step};
use crate::streams::{Cursor, Sequence, VecCursor, VecSequence};

/// Lines of a readable resource, terminators included.
///
/// The resource is acquired when the sequence is built and handed to the
/// first cursor. The sequence is single use: every later call to
/// [`iterator`](Sequence::iterator) returns a cursor that is already
/// exhausted, it never re-reads from the start.
#[derive(Debug)]
pub struct LineSequence<R> {
    reader: Option<R>,
    label: Option<PathBuf>,
}

impl LineSequence<BufReader<File>> {
    /// Opens `path` for reading.
    ///
    /// Returns [`PipelineError::ResourceUnavailable`] if the file can not be
    /// opened; nothing is left open in that case.
    pub fn open(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| PipelineError::unavailable(path, ResourceRole::Source, e))?;
        debug!(path = %path.display(), "source acquired");
        Ok(Self {
            reader: Some(BufReader::new(file)),
            label: Some(path.to_path_buf()),
        })
    }
}

impl<R: BufRead> LineSequence<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: Some(reader),
            label: None,
        }
    }

    /// Whether a cursor has already taken the resource.
    pub fn is_consumed(&self) -> bool {
        self.reader.is_none()
    }
}

impl<R: BufRead> Sequence for LineSequence<R> {
    type Item = Record;
    type Cursor = LineCursor<R>;

    fn iterator(&mut self) -> Self::Cursor {
        LineCursor {
            reader: self.reader.take(),
            label: self.label.clone(),
            produced: 0,
        }
    }
}

/// Cursor owning the reader of a [`LineSequence`].
///
/// The reader is dropped exactly once: on end of input, on the first read
/// error, or when the cursor itself is dropped, whichever comes first.
#[derive(Debug)]
pub struct LineCursor<R> {
    reader: Option<R>,
    label: Option<PathBuf>,
    produced: u64,
}

impl<R> LineCursor<R> {
    pub fn is_released(&self) -> bool {
        self.reader.is_none()
    }

    fn release(&mut self) {
        if self.reader.take().is_some() {
            debug!(
                path = ?self.label,
                records = self.produced,
                "source released"
            );
        }
    }
}

impl<R: BufRead> Cursor for LineCursor<R> {
    type Item = Record;

    fn advance(&mut self) -> PipelineResult<Step<Record>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(Step::Exhausted);
        };

        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                self.release();
                Ok(Step::Exhausted)
            }
            Ok(_) => {
                self.produced += 1;
                Ok(Step::Value(line))
            }
            Err(source) => {
                self.release();
                Err(PipelineError::ReadFailure {
                    records: self.produced,
                    source,
                })
            }
        }
    }
}

impl<R> Drop for LineCursor<R> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Restartable list of source files, each exposed as a [`LineSequence`].
///
/// Combined with [`flatten`](crate::streams::SequenceExt::flatten) this reads
/// several files back to back with only one of them open at a time: each
/// file is opened when its turn comes, not up front.
#[derive(Debug, Clone)]
pub struct SourceFiles {
    paths: VecSequence<PathBuf>,
}

impl SourceFiles {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl Sequence for SourceFiles {
    type Item = LineSequence<BufReader<File>>;
    type Cursor = LineFiles;

    fn iterator(&mut self) -> Self::Cursor {
        LineFiles {
            paths: Some(self.paths.iterator()),
        }
    }
}

#[derive(Debug)]
pub struct LineFiles {
    paths: Option<VecCursor<PathBuf>>,
}

impl Cursor for LineFiles {
    type Item = LineSequence<BufReader<File>>;

    fn advance(&mut self) -> PipelineResult<Step<Self::Item>> {
        let Some(paths) = self.paths.as_mut() else {
            return Ok(Step::Exhausted);
        };
        let step = paths
            .advance()
            .and_then(|p| match p {
                Step::Value(path) => LineSequence::open(&path).map(Step::Value),
                Step::Exhausted => Ok(Step::Exhausted),
            });
        if !matches!(step, Ok(Step::Value(_))) {
            self.paths = None;
        }
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Stage;
    use crate::streams::{CursorExt, SequenceExt};
    use crate::testing::{SpyReader, fixtures};

    #[test]
    fn keeps_terminators_and_unterminated_tail() {
        let (reader, _spy) = SpyReader::new("ab\r\ncd\nlast");
        let lines = LineSequence::from_reader(reader)
            .iterator()
            .collect_values()
            .unwrap();
        assert_eq!(lines, vec!["ab\r\n", "cd\n", "last"]);
        assert_eq!(lines.concat(), "ab\r\ncd\nlast");
    }

    #[test]
    fn releases_on_exhaustion_and_stays_exhausted() {
        let (reader, spy) = SpyReader::new("x\n");
        let mut c = LineSequence::from_reader(reader).iterator();

        assert_eq!(c.advance().unwrap(), Step::Value("x\n".into()));
        assert!(!spy.is_closed());
        assert_eq!(c.advance().unwrap(), Step::Exhausted);
        assert!(spy.is_closed());
        assert!(c.is_released());
        assert_eq!(c.advance().unwrap(), Step::Exhausted);
        drop(c);
        assert_eq!(spy.close_count(), 1);
    }

    #[test]
    fn read_error_releases_before_surfacing() {
        let (reader, spy) = SpyReader::failing_after("a\nb\nc\n", 2);
        let mut c = LineSequence::from_reader(reader).iterator();

        assert_eq!(c.advance().unwrap(), Step::Value("a\n".into()));
        assert_eq!(c.advance().unwrap(), Step::Value("b\n".into()));
        let err = c.advance().unwrap_err();
        assert_eq!(err.stage(), Stage::Read);
        assert!(matches!(err, PipelineError::ReadFailure { records: 2, .. }));
        assert!(spy.is_closed());
        assert_eq!(c.advance().unwrap(), Step::Exhausted);
        assert_eq!(spy.close_count(), 1);
    }

    #[test]
    fn dropping_a_live_cursor_releases() {
        let (reader, spy) = SpyReader::new("1\n2\n3\n");
        let mut c = LineSequence::from_reader(reader).iterator();
        assert!(c.advance().unwrap().is_value());
        drop(c);
        assert!(spy.is_closed());
        assert_eq!(spy.close_count(), 1);
    }

    #[test]
    fn second_iterator_starts_exhausted() {
        let (reader, _spy) = SpyReader::new("once\n");
        let mut seq = LineSequence::from_reader(reader);
        let mut first = seq.iterator();
        assert!(seq.is_consumed());

        let mut second = seq.iterator();
        assert_eq!(second.advance().unwrap(), Step::Exhausted);
        assert_eq!(first.advance().unwrap(), Step::Value("once\n".into()));
    }

    #[test]
    fn invalid_utf8_is_a_read_failure() {
        let (reader, spy) = SpyReader::from_bytes(vec![b'o', b'k', b'\n', 0xff, 0xfe, b'\n']);
        let mut c = LineSequence::from_reader(reader).iterator();
        assert!(c.advance().unwrap().is_value());
        let err = c.advance().unwrap_err();
        match err {
            PipelineError::ReadFailure { records, source } => {
                assert_eq!(records, 1);
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(spy.is_closed());
    }

    #[test]
    fn open_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = LineSequence::open(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ResourceUnavailable {
                role: ResourceRole::Source,
                ..
            }
        ));
    }

    #[test]
    fn open_reads_file_lines() {
        let src = fixtures::text_file("ab\ncd\n");
        let lines = LineSequence::open(src.path())
            .unwrap()
            .iterator()
            .collect_values()
            .unwrap();
        assert_eq!(lines, vec!["ab\n", "cd\n"]);
    }

    #[test]
    fn source_files_flatten_in_order() {
        let a = fixtures::text_file("a1\na2\n");
        let empty = fixtures::text_file("");
        let b = fixtures::text_file("b1\n");

        let mut all = SourceFiles::new([a.path(), empty.path(), b.path()]).flatten();
        let lines = all.iterator().collect_values().unwrap();
        assert_eq!(lines, vec!["a1\n", "a2\n", "b1\n"]);

        let again = all.iterator().count_values().unwrap();
        assert_eq!(again, 3);
    }

    #[test]
    fn source_files_surface_missing_file_when_reached() {
        let a = fixtures::text_file("a\n");
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.txt");

        let mut c = SourceFiles::new([a.path().to_path_buf(), missing])
            .flatten()
            .iterator();
        assert_eq!(c.advance().unwrap(), Step::Value("a\n".into()));
        let err = c.advance().unwrap_err();
        assert_eq!(err.stage(), Stage::Open);
        assert_eq!(c.advance().unwrap(), Step::Exhausted);
    }
}
