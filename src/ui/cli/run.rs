use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::tasks::{RunSummary, StopFlag};
use crate::ui::types::build::{build_pipeline, build_transform};
use crate::ui::types::choices::PipelineParameters;

/// Builds and runs the pipeline described by `params`.
///
/// With `atomic` set, output is staged in a temporary file next to the
/// destination and renamed over it only when the run completes. A failed or
/// cancelled run then leaves the destination as it was.
pub fn execute(params: &PipelineParameters, stop: Option<StopFlag>) -> Result<RunSummary> {
    let mut pipeline = build_pipeline(params)?;
    if let Some(flag) = stop {
        pipeline = pipeline.with_stop(flag);
    }
    let transform = build_transform(params.transform.clone())?;

    if !params.atomic {
        return Ok(pipeline.run(transform)?);
    }

    pipeline.ensure_distinct(&params.destination)?;
    let dir = params
        .destination
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("staging output in {}", dir.display()))?;

    let summary = pipeline.run_into(staged.path(), transform)?;
    if summary.cancelled {
        warn!("run cancelled, staged output discarded");
        return Ok(summary);
    }

    staged
        .persist(&params.destination)
        .with_context(|| format!("renaming output onto {}", params.destination.display()))?;
    info!(destination = %params.destination.display(), "staged output persisted");
    Ok(summary)
}
