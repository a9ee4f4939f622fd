use std::io;
use std::path::{Path, PathBuf};

use strum_macros::Display;
use thiserror::Error;

/// Boxed cause carried by a failing record mapping.
pub type TransformError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Which end of a pipeline a resource belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ResourceRole {
    Source,
    Destination,
}

/// Pipeline stage a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    Open,
    Read,
    Transform,
    Write,
}

/// Every fault a pipeline can surface. Exhaustion is never one of them.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{role} unavailable: {}: {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        role: ResourceRole,
        #[source]
        source: io::Error,
    },

    #[error("read failed after {records} records: {source}")]
    ReadFailure {
        records: u64,
        #[source]
        source: io::Error,
    },

    #[error("transform failed on record {index}: {source}")]
    TransformFailure {
        index: u64,
        #[source]
        source: TransformError,
    },

    #[error("write failed after {records} records: {source}")]
    WriteFailure {
        records: u64,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    pub fn unavailable(path: impl AsRef<Path>, role: ResourceRole, source: io::Error) -> Self {
        PipelineError::ResourceUnavailable {
            path: path.as_ref().to_path_buf(),
            role,
            source,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::ResourceUnavailable { .. } => Stage::Open,
            PipelineError::ReadFailure { .. } => Stage::Read,
            PipelineError::TransformFailure { .. } => Stage::Transform,
            PipelineError::WriteFailure { .. } => Stage::Write,
        }
    }
}
