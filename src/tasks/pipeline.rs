use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::{PipelineError, PipelineResult, Record, ResourceRole, TransformError};
use crate::streams::{Cursor, CursorExt, LineSequence, Sequence, SequenceExt, SourceFiles};
use crate::tasks::{RunSummary, StopFlag, StreamWriter};
use crate::utils::paths::same_file;

/// Read, transform, write: one line at a time from sources to destination.
///
/// With a single source the source is opened before the destination is
/// created, so a missing source never truncates the destination. With
/// several sources each file is opened when its turn comes; a missing file
/// further down the list aborts the run with whatever was written before.
/// An empty source list is rejected before the destination is touched.
#[derive(Debug, Clone)]
pub struct Pipeline {
    sources: Vec<PathBuf>,
    destination: PathBuf,
    max_records: Option<u64>,
    stop: Option<StopFlag>,
}

impl Pipeline {
    pub fn new<I, P>(sources: I, destination: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            destination: destination.into(),
            max_records: None,
            stop: None,
        }
    }

    pub fn with_limit(mut self, max_records: Option<u64>) -> Self {
        self.max_records = max_records;
        self
    }

    pub fn with_stop(mut self, flag: StopFlag) -> Self {
        self.stop = Some(flag);
        self
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Rejects a destination that resolves to one of the sources, so it is
    /// never truncated before being read.
    pub fn ensure_distinct(&self, destination: &Path) -> PipelineResult<()> {
        match self.sources.iter().find(|s| same_file(s, destination)) {
            Some(clash) => Err(PipelineError::unavailable(
                destination,
                ResourceRole::Destination,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("same file as source {}", clash.display()),
                ),
            )),
            None => Ok(()),
        }
    }

    pub fn run<F, E>(&self, transform: F) -> PipelineResult<RunSummary>
    where
        F: FnMut(Record) -> Result<Record, E>,
        E: Into<TransformError>,
    {
        self.run_into(&self.destination, transform)
    }

    /// Same as [`run`](Self::run) but writes to `destination` instead of the
    /// configured one; used to stage output in a temporary file.
    pub fn run_into<F, E>(&self, destination: &Path, transform: F) -> PipelineResult<RunSummary>
    where
        F: FnMut(Record) -> Result<Record, E>,
        E: Into<TransformError>,
    {
        if self.sources.is_empty() {
            return Err(PipelineError::unavailable(
                "",
                ResourceRole::Source,
                io::Error::new(io::ErrorKind::InvalidInput, "no source given"),
            ));
        }
        self.ensure_distinct(destination)?;

        info!(
            sources = self.sources.len(),
            destination = %destination.display(),
            "pipeline started"
        );

        let source: Box<dyn Cursor<Item = Record>> = match self.sources.as_slice() {
            [single] => Box::new(LineSequence::open(single)?.iterator()),
            many => Box::new(
                SourceFiles::new(many.iter().cloned())
                    .flatten()
                    .iterator(),
            ),
        };

        let mut writer = StreamWriter::create(destination)?;
        if let Some(n) = self.max_records {
            writer = writer.with_limit(n);
        }
        if let Some(flag) = &self.stop {
            writer = writer.with_stop(flag.clone());
        }

        let summary = writer.drain(source.try_map(transform))?;
        info!(%summary, "pipeline finished");
        Ok(summary)
    }
}

/// Streams `source` into `destination` through `transform`.
pub fn run<F, E>(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    transform: F,
) -> PipelineResult<RunSummary>
where
    F: FnMut(Record) -> Result<Record, E>,
    E: Into<TransformError>,
{
    Pipeline::new([source.as_ref()], destination.as_ref()).run(transform)
}

/// Streams every source, in order, into one destination.
pub fn run_many<I, P, F, E>(
    sources: I,
    destination: impl AsRef<Path>,
    transform: F,
) -> PipelineResult<RunSummary>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
    F: FnMut(Record) -> Result<Record, E>,
    E: Into<TransformError>,
{
    Pipeline::new(sources, destination.as_ref()).run(transform)
}

/// Pipeline over already open streams. Both are owned and released here.
pub fn run_streams<R, W, F, E>(reader: R, writer: W, transform: F) -> PipelineResult<RunSummary>
where
    R: BufRead,
    W: Write,
    F: FnMut(Record) -> Result<Record, E>,
    E: Into<TransformError>,
{
    let cursor = LineSequence::from_reader(reader).iterator().try_map(transform);
    StreamWriter::from_writer(writer).drain(cursor)
}
