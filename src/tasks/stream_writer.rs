use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, warn};

use crate::core::{PipelineError, PipelineResult, ResourceRole, Step};
use crate::streams::Cursor;
use crate::tasks::{RunSummary, StopFlag};

enum Halt {
    Exhausted,
    Limit,
    Stopped,
}

/// Consumer end of a pipeline: owns the destination and drives the pulls.
///
/// Every record pulled is written immediately. The destination is flushed
/// and dropped once the loop ends, whether it ended on exhaustion, on a
/// limit, on a stop request or on an error.
pub struct StreamWriter<W: Write> {
    sink: Option<W>,
    label: Option<PathBuf>,
    max_records: Option<u64>,
    stop: Option<StopFlag>,
    written: u64,
    bytes: u64,
}

impl StreamWriter<BufWriter<File>> {
    /// Creates (or truncates) `path` for writing.
    pub fn create(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| PipelineError::unavailable(path, ResourceRole::Destination, e))?;
        debug!(path = %path.display(), "destination acquired");

        let mut w = Self::from_writer(BufWriter::new(file));
        w.label = Some(path.to_path_buf());
        Ok(w)
    }
}

impl<W: Write> StreamWriter<W> {
    pub fn from_writer(sink: W) -> Self {
        Self {
            sink: Some(sink),
            label: None,
            max_records: None,
            stop: None,
            written: 0,
            bytes: 0,
        }
    }

    /// Stops pulling once `n` records have been written.
    pub fn with_limit(mut self, n: u64) -> Self {
        self.max_records = Some(n);
        self
    }

    pub fn with_stop(mut self, flag: StopFlag) -> Self {
        self.stop = Some(flag);
        self
    }

    pub fn is_released(&self) -> bool {
        self.sink.is_none()
    }

    /// Pulls `cursor` to the end and writes every record.
    ///
    /// The cursor is dropped before the destination is released, so both
    /// ends are closed when this returns. On failure the first cause is
    /// returned; records written before it stay in the destination. A
    /// [`PipelineError::ReadFailure`] reports the records written here, not
    /// the lines its source produced, so the count holds across sources.
    pub fn drain<C>(&mut self, mut cursor: C) -> PipelineResult<RunSummary>
    where
        C: Cursor,
        C::Item: AsRef<[u8]>,
    {
        if self.sink.is_none() {
            return Err(PipelineError::unavailable(
                self.label.clone().unwrap_or_default(),
                ResourceRole::Destination,
                io::Error::other("destination already released"),
            ));
        }

        let started_at = Utc::now();
        let clock = Instant::now();

        let outcome = self.pump(&mut cursor).map_err(|e| match e {
            PipelineError::ReadFailure { source, .. } => PipelineError::ReadFailure {
                records: self.written,
                source,
            },
            other => other,
        });
        drop(cursor);
        let released = self.release();

        match (outcome, released) {
            (Ok(halt), Ok(())) => {
                let summary = RunSummary {
                    records: self.written,
                    bytes: self.bytes,
                    cancelled: matches!(halt, Halt::Stopped),
                    limited: matches!(halt, Halt::Limit),
                    started_at,
                    seconds: clock.elapsed().as_secs_f64(),
                };
                if summary.cancelled {
                    warn!(records = self.written, "stopped on request");
                }
                Ok(summary)
            }
            (Ok(_), Err(source)) => Err(PipelineError::WriteFailure {
                records: self.written,
                source,
            }),
            (Err(e), Err(flush)) => {
                warn!(error = %flush, "flush failed while aborting");
                Err(e)
            }
            (Err(e), Ok(())) => Err(e),
        }
    }

    fn pump<C>(&mut self, cursor: &mut C) -> PipelineResult<Halt>
    where
        C: Cursor,
        C::Item: AsRef<[u8]>,
    {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(Halt::Exhausted);
        };

        loop {
            if self.stop.as_ref().is_some_and(StopFlag::is_raised) {
                return Ok(Halt::Stopped);
            }
            if self.max_records.is_some_and(|n| self.written >= n) {
                return Ok(Halt::Limit);
            }

            let record = match cursor.advance()? {
                Step::Value(record) => record,
                Step::Exhausted => return Ok(Halt::Exhausted),
            };

            let bytes = record.as_ref();
            sink.write_all(bytes)
                .map_err(|source| PipelineError::WriteFailure {
                    records: self.written,
                    source,
                })?;
            self.written += 1;
            self.bytes += bytes.len() as u64;
        }
    }

    fn release(&mut self) -> io::Result<()> {
        let Some(mut sink) = self.sink.take() else {
            return Ok(());
        };
        let flushed = sink.flush();
        drop(sink);
        debug!(
            path = ?self.label,
            records = self.written,
            "destination released"
        );
        flushed
    }
}

impl<W: Write> Drop for StreamWriter<W> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!(error = %e, "flush failed on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Stage;
    use crate::streams::{CursorExt, LineSequence, Repeat, Sequence, VecSequence};
    use crate::testing::{SpyReader, SpyWriter};

    #[test]
    fn writes_each_record_once_in_order() {
        let (sink, spy) = SpyWriter::new();
        let mut w = StreamWriter::from_writer(sink);
        let summary = w
            .drain(VecSequence::from(vec!["a\n", "b\n", "c\n"]).iterator())
            .unwrap();

        assert_eq!(spy.contents(), "a\nb\nc\n");
        assert_eq!(spy.writes(), 3);
        assert_eq!(summary.records, 3);
        assert_eq!(summary.bytes, 6);
        assert!(!summary.cancelled && !summary.limited);
        assert!(w.is_released());
        assert!(spy.is_closed());
        assert_eq!(spy.close_count(), 1);
    }

    #[test]
    fn empty_source_still_releases() {
        let (sink, spy) = SpyWriter::new();
        let summary = StreamWriter::from_writer(sink)
            .drain(VecSequence::<&str>::from(vec![]).iterator())
            .unwrap();
        assert_eq!(summary.records, 0);
        assert_eq!(spy.contents(), "");
        assert!(spy.is_closed());
    }

    #[test]
    fn upstream_failure_keeps_prefix_and_closes_both() {
        let (reader, source) = SpyReader::failing_after("1\n2\n3\n", 2);
        let (sink, dest) = SpyWriter::new();

        let err = StreamWriter::from_writer(sink)
            .drain(LineSequence::from_reader(reader).iterator())
            .unwrap_err();

        assert!(matches!(err, PipelineError::ReadFailure { records: 2, .. }));
        assert_eq!(dest.contents(), "1\n2\n");
        assert!(source.is_closed());
        assert!(dest.is_closed());
        assert!(dest.flushes() >= 1);
    }

    #[test]
    fn read_failure_counts_written_records_not_produced_lines() {
        let (reader, _source) = SpyReader::failing_after("a\n#skip\nb\n", 3);
        let (sink, dest) = SpyWriter::new();

        let cursor = LineSequence::from_reader(reader)
            .iterator()
            .filter(|line: &String| !line.starts_with('#'));
        let err = StreamWriter::from_writer(sink).drain(cursor).unwrap_err();

        assert!(matches!(err, PipelineError::ReadFailure { records: 2, .. }));
        assert_eq!(dest.contents(), "a\nb\n");
    }

    #[test]
    fn write_failure_reports_first_cause() {
        let (reader, source) = SpyReader::new("a\nb\nc\n");
        let (sink, dest) = SpyWriter::failing_after_writes(1);

        let err = StreamWriter::from_writer(sink)
            .drain(LineSequence::from_reader(reader).iterator())
            .unwrap_err();

        assert_eq!(err.stage(), Stage::Write);
        assert!(matches!(err, PipelineError::WriteFailure { records: 1, .. }));
        assert_eq!(dest.contents(), "a\n");
        assert!(source.is_closed());
        assert!(dest.is_closed());
    }

    #[test]
    fn flush_failure_on_success_is_a_write_failure() {
        let (sink, dest) = SpyWriter::failing_flush();
        let err = StreamWriter::from_writer(sink)
            .drain(VecSequence::from(vec!["x\n"]).iterator())
            .unwrap_err();
        assert!(matches!(err, PipelineError::WriteFailure { records: 1, .. }));
        assert!(dest.is_closed());
    }

    #[test]
    fn flush_failure_while_aborting_keeps_original_error() {
        let (reader, _source) = SpyReader::failing_after("a\nb\n", 1);
        let (sink, dest) = SpyWriter::failing_flush();
        let err = StreamWriter::from_writer(sink)
            .drain(LineSequence::from_reader(reader).iterator())
            .unwrap_err();
        assert_eq!(err.stage(), Stage::Read);
        assert!(dest.is_closed());
    }

    #[test]
    fn limit_stops_pulling_an_infinite_source() {
        let (sink, spy) = SpyWriter::new();
        let summary = StreamWriter::from_writer(sink)
            .with_limit(4)
            .drain(Repeat::new("y\n").iterator())
            .unwrap();
        assert!(summary.limited);
        assert_eq!(summary.records, 4);
        assert_eq!(spy.contents(), "y\ny\ny\ny\n");
    }

    #[test]
    fn raised_stop_flag_ends_loop_and_releases() {
        let flag = StopFlag::new();
        let trigger = flag.clone();
        let (sink, spy) = SpyWriter::new();

        let mut pulled = 0;
        let cursor = Repeat::new("r\n").iterator().map(move |r| {
            pulled += 1;
            if pulled == 3 {
                trigger.raise();
            }
            r
        });

        let summary = StreamWriter::from_writer(sink)
            .with_stop(flag)
            .drain(cursor)
            .unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.records, 3);
        assert!(spy.is_closed());
    }

    #[test]
    fn draining_twice_is_rejected() {
        let (sink, spy) = SpyWriter::new();
        let mut w = StreamWriter::from_writer(sink);
        w.drain(VecSequence::from(vec!["x\n"]).iterator()).unwrap();

        let err = w
            .drain(VecSequence::from(vec!["y\n"]).iterator())
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ResourceUnavailable {
                role: ResourceRole::Destination,
                ..
            }
        ));
        assert_eq!(spy.contents(), "x\n");
        assert_eq!(spy.close_count(), 1);
    }

    #[test]
    fn create_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old contents\n").unwrap();

        StreamWriter::create(&path)
            .unwrap()
            .drain(VecSequence::from(vec!["new\n"]).iterator())
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn create_in_missing_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = StreamWriter::create(dir.path().join("no/such/dir/out.txt"))
            .err()
            .unwrap();
        assert_eq!(err.stage(), Stage::Open);
    }
}
