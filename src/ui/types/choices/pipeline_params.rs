use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};

use crate::ui::types::build::BuildError;
use crate::ui::types::choices::TransformChoice;

/// Everything needed to run one pipeline, as read from a JSON file or
/// gathered by the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PipelineParameters {
    #[schemars(
        with = "Vec<String>",
        title = "Sources",
        description = "Files to read, concatenated in this order",
        length(min = 1)
    )]
    pub sources: Vec<PathBuf>,

    #[schemars(
        with = "String",
        title = "Destination",
        description = "File to create or truncate"
    )]
    pub destination: PathBuf,

    #[serde(default)]
    #[schemars(title = "Transform", description = "Mapping applied to every line")]
    pub transform: TransformChoice,

    #[serde(default)]
    #[schemars(
        title = "Max Records",
        description = "Stop after this many lines (None = unlimited)"
    )]
    pub max_records: Option<u64>,

    #[serde(default)]
    #[schemars(
        title = "Atomic",
        description = "Write to a temporary file and rename it over the destination on success"
    )]
    pub atomic: bool,
}

impl PipelineParameters {
    pub fn schema() -> Schema {
        schema_for!(PipelineParameters)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(text).context("invalid pipeline parameters")?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("loading config {}", path.display()))
    }

    /// Static checks only; whether the files can actually be opened is
    /// found out when the pipeline runs.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.sources.is_empty() {
            return Err(BuildError::InvalidParameter("at least one source is required".into()));
        }
        if self.destination.as_os_str().is_empty() {
            return Err(BuildError::InvalidParameter("destination must not be empty".into()));
        }
        if self.sources.iter().any(|s| s == &self.destination) {
            return Err(BuildError::InvalidParameter(format!(
                "destination {} is also a source",
                self.destination.display()
            )));
        }
        if self.max_records == Some(0) {
            return Err(BuildError::InvalidParameter("max_records must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;
    use crate::ui::types::choices::{NoTransformParams, ReplaceParameters};

    #[test]
    fn minimal_json_gets_defaults() {
        let p = PipelineParameters::from_json_str(
            r#"{ "sources": ["src.txt"], "destination": "dest.txt" }"#,
        )
        .unwrap();
        assert_eq!(p.sources, vec![PathBuf::from("src.txt")]);
        assert_eq!(p.transform, TransformChoice::Uppercase(NoTransformParams {}));
        assert_eq!(p.max_records, None);
        assert!(!p.atomic);
    }

    #[test]
    fn full_json() {
        let p = PipelineParameters::from_json_str(
            r#"{
                "sources": ["a.txt", "b.txt"],
                "destination": "out.txt",
                "transform": {
                    "type": "replace",
                    "params": { "pattern": "x", "replacement": "y" }
                },
                "max_records": 10,
                "atomic": true
            }"#,
        )
        .unwrap();
        assert_eq!(p.sources.len(), 2);
        assert_eq!(
            p.transform,
            TransformChoice::Replace(ReplaceParameters {
                pattern: "x".into(),
                replacement: "y".into()
            })
        );
        assert_eq!(p.max_records, Some(10));
        assert!(p.atomic);
    }

    #[test]
    fn rejects_invalid_combinations() {
        for bad in [
            r#"{ "sources": [], "destination": "d.txt" }"#,
            r#"{ "sources": ["d.txt"], "destination": "d.txt" }"#,
            r#"{ "sources": ["s.txt"], "destination": "" }"#,
            r#"{ "sources": ["s.txt"], "destination": "d.txt", "max_records": 0 }"#,
            r#"{ "sources": ["s.txt"], "destination": "d.txt", "transform": { "type": "rot13" } }"#,
        ] {
            assert!(PipelineParameters::from_json_str(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn loads_from_file() {
        let f = fixtures::text_file(r#"{ "sources": ["in.txt"], "destination": "out.txt" }"#);
        let p = PipelineParameters::from_json_file(f.path()).unwrap();
        assert_eq!(p.destination, PathBuf::from("out.txt"));
    }

    #[test]
    fn missing_file_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = PipelineParameters::from_json_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("nope.json"));
    }

    #[test]
    fn schema_has_titles() {
        let text = serde_json::to_string(&PipelineParameters::schema()).unwrap();
        assert!(text.contains("\"Sources\""));
        assert!(text.contains("\"Max Records\""));
    }
}
