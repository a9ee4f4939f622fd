use anyhow::Result;

/// Source of answers for the interactive wizard.
pub trait PromptDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool>;
    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String>;
    fn ask_u64(&self, title: &str, help: &str, default: u64, min: Option<u64>) -> Result<u64>;
    /// Returns the index of the picked option.
    fn ask_select(&self, title: &str, help: &str, options: &[String]) -> Result<usize>;
}
