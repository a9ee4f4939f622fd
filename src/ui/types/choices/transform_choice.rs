use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{
    Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr,
};

use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::choices::PromptedChoice;

/// Empty parameter object for transforms that take none.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct NoTransformParams {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct ReplaceParameters {
    #[schemars(title = "Pattern", description = "Text to look for in each line")]
    pub pattern: String,

    #[serde(default)]
    #[schemars(title = "Replacement", description = "Text to put in its place")]
    pub replacement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(TransformKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum TransformChoice {
    #[strum_discriminants(strum(
        message = "Uppercase",
        detailed_message = "Convert every line to upper case."
    ))]
    Uppercase(NoTransformParams),
    #[strum_discriminants(strum(
        message = "Lowercase",
        detailed_message = "Convert every line to lower case."
    ))]
    Lowercase(NoTransformParams),
    #[strum_discriminants(strum(
        message = "Identity",
        detailed_message = "Copy lines unchanged."
    ))]
    Identity(NoTransformParams),
    #[strum_discriminants(strum(
        message = "Replace",
        detailed_message = "Replace a fixed pattern in every line."
    ))]
    Replace(ReplaceParameters),
    #[strum_discriminants(strum(
        message = "ASCII only",
        detailed_message = "Copy lines, abort on the first non-ASCII line."
    ))]
    AsciiOnly(NoTransformParams),
}

impl Default for TransformChoice {
    fn default() -> Self {
        TransformChoice::Uppercase(NoTransformParams::default())
    }
}

impl PromptedChoice for TransformChoice {
    type Kind = TransformKind;

    fn menu_title() -> &'static str {
        "Choose a transform:"
    }

    fn default_params(kind: Self::Kind) -> Map<String, Value> {
        let mut m = Map::new();
        if kind == TransformKind::Replace {
            m.insert("pattern".into(), Value::String(String::new()));
            m.insert("replacement".into(), Value::String(String::new()));
        }
        m
    }

    fn ask_params<D: PromptDriver>(driver: &D, kind: Self::Kind) -> Result<Map<String, Value>> {
        let mut m = Map::new();
        if kind == TransformKind::Replace {
            let pattern = driver.ask_string("Pattern", "Text to look for in each line", "")?;
            let replacement = driver.ask_string("Replacement", "Text to put in its place", "")?;
            m.insert("pattern".into(), Value::String(pattern));
            m.insert("replacement".into(), Value::String(replacement));
        }
        Ok(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::schema_for;
    use serde_json::json;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn adjacently_tagged_json() {
        let v = serde_json::to_value(TransformChoice::Replace(ReplaceParameters {
            pattern: "a".into(),
            replacement: "b".into(),
        }))
        .unwrap();
        assert_eq!(
            v,
            json!({ "type": "replace", "params": { "pattern": "a", "replacement": "b" } })
        );

        let back: TransformChoice =
            serde_json::from_value(json!({ "type": "ascii-only", "params": {} })).unwrap();
        assert_eq!(back, TransformChoice::AsciiOnly(NoTransformParams {}));
    }

    #[test]
    fn kinds_are_kebab_case() {
        let keys: Vec<&'static str> = TransformKind::iter().map(Into::into).collect();
        assert_eq!(
            keys,
            ["uppercase", "lowercase", "identity", "replace", "ascii-only"]
        );
        assert_eq!(TransformKind::from_str("ascii-only").unwrap(), TransformKind::AsciiOnly);
    }

    #[test]
    fn from_parts_uses_defaults() {
        for kind in TransformKind::iter() {
            let params = TransformChoice::default_params(kind);
            let choice = TransformChoice::from_parts(kind, params).unwrap();
            assert_eq!(TransformKind::from(&choice), kind);
        }
    }

    #[test]
    fn from_parts_rejects_missing_params() {
        let err = TransformChoice::from_parts(TransformKind::Replace, Map::new()).unwrap_err();
        assert!(err.to_string().contains("replace"), "{err}");
    }

    #[test]
    fn schema_lists_every_kind() {
        let text = serde_json::to_string(&schema_for!(TransformChoice)).unwrap();
        for kind in TransformKind::iter() {
            let key: &'static str = kind.into();
            assert!(text.contains(&format!("\"{key}\"")), "{key} missing from schema");
        }
    }
}
