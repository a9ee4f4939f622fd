use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use strum::{EnumMessage, IntoEnumIterator};

use crate::ui::cli::drivers::PromptDriver;

/// Enum the wizard builds in two steps: the user picks a kind from a menu,
/// then the kind's params are filled in.
///
/// Implementors deserialize from `{"type": <kind>, "params": {...}}`, the
/// same adjacently tagged shape the JSON config uses.
pub trait PromptedChoice: Sized + DeserializeOwned {
    type Kind: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator;

    /// Title of the kind menu.
    fn menu_title() -> &'static str;

    /// Params a kind starts from before any follow-up question.
    fn default_params(kind: Self::Kind) -> Map<String, Value>;

    /// Follow-up questions; their answers override the defaults.
    fn ask_params<D: PromptDriver>(_driver: &D, _kind: Self::Kind) -> Result<Map<String, Value>> {
        Ok(Map::new())
    }

    fn from_parts(kind: Self::Kind, params: Map<String, Value>) -> Result<Self> {
        let key: &'static str = kind.into();
        let mut tagged = Map::new();
        tagged.insert("type".into(), Value::String(key.to_owned()));
        tagged.insert("params".into(), Value::Object(params));
        serde_json::from_value(Value::Object(tagged))
            .with_context(|| format!("invalid params for {key}"))
    }
}
