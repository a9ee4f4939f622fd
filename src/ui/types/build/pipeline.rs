use crate::tasks::Pipeline;
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::PipelineParameters;

impl TryFrom<&PipelineParameters> for Pipeline {
    type Error = BuildError;

    fn try_from(p: &PipelineParameters) -> Result<Self, Self::Error> {
        p.validate()?;
        let pipeline = Pipeline::new(p.sources.iter().cloned(), p.destination.clone());
        Ok(pipeline.with_limit(p.max_records))
    }
}

pub fn build_pipeline(params: &PipelineParameters) -> Result<Pipeline, BuildError> {
    Pipeline::try_from(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn params(sources: &[&str], destination: &str) -> PipelineParameters {
        PipelineParameters {
            sources: sources.iter().map(PathBuf::from).collect(),
            destination: destination.into(),
            transform: Default::default(),
            max_records: Some(5),
            atomic: false,
        }
    }

    #[test]
    fn copies_paths_in_order() {
        let p = build_pipeline(&params(&["a", "b"], "c")).unwrap();
        assert_eq!(p.sources(), &[PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(p.destination(), Path::new("c"));
    }

    #[test]
    fn invalid_params_do_not_build() {
        assert!(build_pipeline(&params(&[], "c")).is_err());
    }
}
